// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-turn workflows as one sum type.
//!
//! Each variant corresponds to one workflow slot. Decoding a slot value that
//! does not parse is an invariant violation and surfaces as `Internal`.

use pantry_core::error::PantryError;
use pantry_core::types::UserId;
use uuid::Uuid;

use crate::payload::{
    DuplicateSession, ProductListSelection, ViewingList, decode_family_target, decode_list_id,
};
use crate::slot::{Slot, TEXT_SLOTS};
use crate::store::StateStore;

/// The active workflow for one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Workflow {
    /// Waiting for a list name; `None` means a personal list.
    CreatingList { family_id: Option<Uuid> },
    /// Waiting for items to add to a list.
    AddingItems { list_id: Uuid },
    /// A list view is on screen and accepts product lists.
    ViewingList(ViewingList),
    /// A detected product list waiting for a target list.
    SelectingList(ProductListSelection),
    /// An interactive merge in progress.
    ResolvingDuplicates(DuplicateSession),
    /// Waiting for a name for a list that will receive the pending product list.
    NamingCustomList,
    /// Waiting for a receipt photo or document.
    AwaitingReceipt,
}

impl Workflow {
    pub fn slot(&self) -> Slot {
        match self {
            Workflow::CreatingList { .. } => Slot::CreatingListForFamily,
            Workflow::AddingItems { .. } => Slot::AddingItemToList,
            Workflow::ViewingList(_) => Slot::ViewingList,
            Workflow::SelectingList(_) => Slot::ProductListSelection,
            Workflow::ResolvingDuplicates(_) => Slot::DuplicateResolution,
            Workflow::NamingCustomList => Slot::CreatingCustomProductlist,
            Workflow::AwaitingReceipt => Slot::AwaitingReceiptUpload,
        }
    }

    /// Decodes the value stored under a workflow slot.
    pub fn decode(slot: Slot, raw: &str) -> Result<Workflow, PantryError> {
        Ok(match slot {
            Slot::CreatingListForFamily => Workflow::CreatingList {
                family_id: decode_family_target(raw)?,
            },
            Slot::AddingItemToList => Workflow::AddingItems {
                list_id: decode_list_id(slot, raw)?,
            },
            Slot::ViewingList => Workflow::ViewingList(raw.parse()?),
            Slot::ProductListSelection => {
                Workflow::SelectingList(ProductListSelection::decode(raw)?)
            }
            Slot::DuplicateResolution => {
                Workflow::ResolvingDuplicates(DuplicateSession::decode(raw)?)
            }
            Slot::CreatingCustomProductlist => Workflow::NamingCustomList,
            Slot::AwaitingReceiptUpload => Workflow::AwaitingReceipt,
            other => {
                return Err(PantryError::Internal(format!(
                    "`{other}` is not a workflow slot"
                )));
            }
        })
    }

    /// Encodes the slot value for this workflow.
    pub fn encode(&self) -> Result<String, PantryError> {
        Ok(match self {
            Workflow::CreatingList { family_id } => {
                crate::payload::encode_family_target(*family_id)
            }
            Workflow::AddingItems { list_id } => list_id.to_string(),
            Workflow::ViewingList(view) => view.to_string(),
            Workflow::SelectingList(selection) => selection.encode()?,
            Workflow::ResolvingDuplicates(session) => session.encode()?,
            Workflow::NamingCustomList | Workflow::AwaitingReceipt => "1".to_string(),
        })
    }

    /// Stores this workflow in its slot.
    pub fn store(&self, store: &StateStore, user: UserId) -> Result<(), PantryError> {
        store.set(user, self.slot(), self.encode()?);
        Ok(())
    }

    /// Loads the workflow held in `slot`, if any.
    pub fn load(store: &StateStore, user: UserId, slot: Slot) -> Result<Option<Workflow>, PantryError> {
        store
            .get(user, slot)
            .map(|raw| Workflow::decode(slot, &raw))
            .transpose()
    }

    /// The highest-priority workflow that consumes free text.
    pub fn text_target(store: &StateStore, user: UserId) -> Result<Option<Workflow>, PantryError> {
        for slot in TEXT_SLOTS {
            if let Some(workflow) = Workflow::load(store, user, slot)? {
                return Ok(Some(workflow));
            }
        }
        Ok(None)
    }
}
