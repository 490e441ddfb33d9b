// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duplicate-resolution callbacks.
//!
//! The new session state is committed before any list mutation, so a
//! repeated tap can never write the same items twice.

use pantry_core::error::PantryError;
use pantry_core::types::{MessageRef, short_id};
use pantry_router::DupAction;
use pantry_state::{DuplicateSession, Slot};
use tracing::{debug, info};
use uuid::Uuid;

use super::{Orchestrator, Turn};
use crate::duplicates::{self, Decision, Effect, SessionState};
use crate::{keyboards, telemetry, views};

fn expired() -> PantryError {
    PantryError::StateExpired {
        slot: Slot::DuplicateResolution.to_string(),
    }
}

impl Orchestrator {
    pub(super) async fn on_duplicate(
        &self,
        turn: &Turn,
        action: DupAction,
        index: Option<usize>,
        list: Option<&str>,
        message: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let user = turn.id();
        let raw = self
            .state
            .get(user, Slot::DuplicateResolution)
            .ok_or_else(expired)?;
        let session = DuplicateSession::decode(&raw)?;
        if list.is_some_and(|short| short != short_id(&session.list_id)) {
            return Err(expired());
        }
        let decision = Decision::from_action(action, index)?;
        let list_id = session.list_id;
        self.ensure_access(turn, list_id).await?;

        let step = duplicates::apply(session, decision)?;
        let committed = if step.state.is_terminal() {
            self.state.clear_if(user, Slot::DuplicateResolution, &raw)
        } else {
            self.state.compare_and_set(
                user,
                Slot::DuplicateResolution,
                Some(&raw),
                step.session.encode()?,
            )
        };
        if !committed {
            return Err(expired());
        }
        debug!(user_id = %user, ?decision, state = %step.state, "duplicate decision committed");

        self.apply_effects(turn, list_id, &step.effects).await?;

        let prompt = match message {
            Some(message) => Some(message),
            None => self.tracked(turn, Slot::ReplaceMessageId)?,
        };
        if !step.state.is_terminal() {
            let body = views::duplicates(turn.locale(), &step.session);
            let keyboard = keyboards::duplicates(turn.locale(), &step.session);
            let shown = self.present(turn, prompt, &body, &keyboard).await?;
            self.track(turn, Slot::ReplaceMessageId, shown);
            return Ok(());
        }

        self.state.clear(user, Slot::ReplaceMessageId);
        if let Some(prompt) = prompt {
            self.surface.delete(prompt).await;
        }
        self.render_list(turn, list_id, None).await?;
        let outcome = if step.state == SessionState::Cancelled {
            "cancelled"
        } else {
            "complete"
        };
        telemetry::record_duplicate_session(outcome);
        info!(user_id = %user, %list_id, outcome, "duplicate session closed");
        Ok(())
    }

    async fn apply_effects(
        &self,
        turn: &Turn,
        list_id: Uuid,
        effects: &[Effect],
    ) -> Result<(), PantryError> {
        for effect in effects {
            match effect {
                Effect::Update { item_id, patch } => {
                    self.lists.update_item(*item_id, patch.clone()).await?;
                }
                Effect::Insert(item) => {
                    self.lists
                        .add_items_parsed(list_id, turn.id(), vec![item.clone()])
                        .await?;
                }
                Effect::InsertUnique(items) => {
                    self.lists
                        .add_items_parsed(list_id, turn.id(), items.clone())
                        .await?;
                }
                Effect::ClearSlot => {}
            }
        }
        Ok(())
    }
}
