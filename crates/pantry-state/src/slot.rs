// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slot catalogue.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A named compartment of per-user workflow state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Slot {
    // Workflow slots.
    CreatingListForFamily,
    AddingItemToList,
    ViewingList,
    ProductListSelection,
    DuplicateResolution,
    CreatingCustomProductlist,
    AwaitingReceiptUpload,

    // Message-id tracking slots.
    CreateListMessageId,
    AddItemMessageId,
    LatestBotMessageId,
    ProductListMessageId,
    ReplaceMessageId,
    UploadMessageId,
}

/// Cleared whenever the user enters a top-level destination.
pub const NAVIGATION_SLOTS: [Slot; 8] = [
    Slot::ViewingList,
    Slot::AddingItemToList,
    Slot::AddItemMessageId,
    Slot::ProductListSelection,
    Slot::CreatingListForFamily,
    Slot::DuplicateResolution,
    Slot::CreatingCustomProductlist,
    Slot::ReplaceMessageId,
];

/// Slots that consume free text, highest priority first.
pub const TEXT_SLOTS: [Slot; 4] = [
    Slot::AddingItemToList,
    Slot::ViewingList,
    Slot::CreatingListForFamily,
    Slot::CreatingCustomProductlist,
];

impl Slot {
    /// True for the seven slots that carry a workflow (as opposed to message ids).
    pub fn is_workflow(self) -> bool {
        matches!(
            self,
            Slot::CreatingListForFamily
                | Slot::AddingItemToList
                | Slot::ViewingList
                | Slot::ProductListSelection
                | Slot::DuplicateResolution
                | Slot::CreatingCustomProductlist
                | Slot::AwaitingReceiptUpload
        )
    }

    pub fn accepts_text(self) -> bool {
        TEXT_SLOTS.contains(&self)
    }

    /// The slot that can never be active at the same time as this one.
    pub(crate) fn exclusive_with(self) -> Option<Slot> {
        match self {
            Slot::ViewingList => Some(Slot::AddingItemToList),
            Slot::AddingItemToList => Some(Slot::ViewingList),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn names_match_stored_keys() {
        assert_eq!(Slot::CreatingCustomProductlist.to_string(), "creating_custom_productlist");
        assert_eq!(Slot::AddItemMessageId.as_ref(), "add_item_message_id");
        assert_eq!("duplicate_resolution".parse::<Slot>().unwrap(), Slot::DuplicateResolution);
    }

    #[test]
    fn seven_workflow_slots() {
        assert_eq!(Slot::iter().filter(|s| s.is_workflow()).count(), 7);
        assert!(TEXT_SLOTS.iter().all(|s| s.is_workflow()));
    }

    #[test]
    fn navigation_set_leaves_receipt_upload_alone() {
        assert!(!NAVIGATION_SLOTS.contains(&Slot::AwaitingReceiptUpload));
        assert!(!NAVIGATION_SLOTS.contains(&Slot::UploadMessageId));
    }
}
