// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duplicate detection and the resolution state machine.
//!
//! [`partition`] splits freshly parsed items into matches against the list
//! and unique items. [`apply`] advances a [`DuplicateSession`] by one user
//! decision and reports the list mutations it implies; it performs no I/O.

use pantry_core::error::PantryError;
use pantry_core::types::{ItemPatch, NewItem, ParsedItem, ParsingStatus, ShoppingItem};
use pantry_router::DupAction;
use pantry_state::{DuplicatePair, DuplicateSession, Slot};
use uuid::Uuid;

use crate::canonical::{fingerprint, new_item, quantity_string};

/// Parsed items split by whether the list already holds them.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub pairs: Vec<DuplicatePair>,
    pub unique: Vec<ParsedItem>,
}

/// Matches each parsed item against `existing` by fingerprint.
///
/// Items whose parsing failed never match.
pub fn partition(existing: &[ShoppingItem], parsed: Vec<ParsedItem>) -> Partition {
    let candidates: Vec<(String, &ShoppingItem)> = existing
        .iter()
        .filter(|item| item.parsing_status != ParsingStatus::Failed)
        .map(|item| (fingerprint(item.match_name()), item))
        .collect();

    let mut pairs = Vec::new();
    let mut unique = Vec::new();
    for item in parsed {
        let key = fingerprint(&item.standardized_name);
        match candidates.iter().find(|(fp, _)| *fp == key) {
            Some((_, existing)) => {
                let new = new_item(&item);
                pairs.push(DuplicatePair {
                    existing_item_id: existing.id,
                    existing_name: existing.display_name.clone(),
                    existing_quantity: existing.quantity.clone(),
                    parsed_name: new.canonical_name,
                    new_quantity: quantity_string(
                        item.quantity_value,
                        item.quantity_unit.as_deref(),
                    ),
                    display_name: new.display_name,
                    category: item.category.clone(),
                    resolved: false,
                });
            }
            None => unique.push(item),
        }
    }
    Partition { pairs, unique }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Open,
    PartiallyResolved,
    Complete,
    Cancelled,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Complete | SessionState::Cancelled)
    }
}

/// State of a live (non-cancelled) session.
pub fn state_of(session: &DuplicateSession) -> SessionState {
    let resolved = session.pairs.iter().filter(|p| p.resolved).count();
    if resolved == session.pairs.len() {
        SessionState::Complete
    } else if resolved == 0 {
        SessionState::Open
    } else {
        SessionState::PartiallyResolved
    }
}

/// One user choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Keep(usize),
    Replace(usize),
    Both(usize),
    KeepAll,
    ReplaceAll,
    Cancel,
}

impl Decision {
    /// Builds a decision from a callback. Per-item actions need an index.
    pub fn from_action(action: DupAction, index: Option<usize>) -> Result<Decision, PantryError> {
        let needs_index = || {
            index.ok_or_else(|| PantryError::StateExpired {
                slot: Slot::DuplicateResolution.to_string(),
            })
        };
        Ok(match action {
            DupAction::Keep => Decision::Keep(needs_index()?),
            DupAction::Replace => Decision::Replace(needs_index()?),
            DupAction::Both => Decision::Both(needs_index()?),
            DupAction::KeepAll => Decision::KeepAll,
            DupAction::ReplaceAll => Decision::ReplaceAll,
            DupAction::Cancel => Decision::Cancel,
        })
    }
}

/// A list mutation implied by a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Update { item_id: Uuid, patch: ItemPatch },
    Insert(NewItem),
    /// The items saved with the session; emitted once, on completion.
    InsertUnique(Vec<NewItem>),
    ClearSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub session: DuplicateSession,
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

fn resolve(pair: &mut DuplicatePair, replace: bool, add: bool, effects: &mut Vec<Effect>) {
    if pair.resolved {
        return;
    }
    if replace {
        effects.push(Effect::Update {
            item_id: pair.existing_item_id,
            patch: ItemPatch {
                canonical_name: pair.parsed_name.clone(),
                quantity: pair.new_quantity.clone(),
            },
        });
    }
    if add {
        effects.push(Effect::Insert(NewItem {
            display_name: pair.display_name.clone(),
            canonical_name: pair.parsed_name.clone(),
            quantity: pair.new_quantity.clone(),
            category: pair.category.clone(),
            notes: None,
        }));
    }
    pair.resolved = true;
}

/// Applies `decision` to `session`.
///
/// Deciding on a pair that is already resolved changes nothing. An index
/// past the end means the buttons belong to another session.
pub fn apply(mut session: DuplicateSession, decision: Decision) -> Result<Step, PantryError> {
    let mut effects = Vec::new();

    if decision == Decision::Cancel {
        return Ok(Step {
            session,
            state: SessionState::Cancelled,
            effects: vec![Effect::ClearSlot],
        });
    }

    match decision {
        Decision::Keep(i) | Decision::Replace(i) | Decision::Both(i) => {
            let pair = session
                .pairs
                .get_mut(i)
                .ok_or_else(|| PantryError::StateExpired {
                    slot: Slot::DuplicateResolution.to_string(),
                })?;
            let replace = matches!(decision, Decision::Replace(_));
            let add = matches!(decision, Decision::Both(_));
            resolve(pair, replace, add, &mut effects);
        }
        Decision::KeepAll | Decision::ReplaceAll => {
            let replace = decision == Decision::ReplaceAll;
            for pair in &mut session.pairs {
                resolve(pair, replace, false, &mut effects);
            }
        }
        Decision::Cancel => {}
    }

    let state = state_of(&session);
    if state == SessionState::Complete {
        let unique: Vec<NewItem> = session.unique_items.iter().map(new_item).collect();
        if !unique.is_empty() {
            effects.push(Effect::InsertUnique(unique));
        }
        effects.push(Effect::ClearSlot);
    }
    Ok(Step {
        session,
        state,
        effects,
    })
}
