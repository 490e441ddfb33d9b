// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user workflow state for the Pantry assistant.
//!
//! [`StateStore`] is the only process-wide mutable structure. Other crates
//! go through its operations; the map itself is private.

pub mod payload;
pub mod slot;
pub mod store;
pub mod workflow;

pub use payload::{DuplicatePair, DuplicateSession, FamilyChoice, ProductListSelection, ViewingList};
pub use slot::{NAVIGATION_SLOTS, Slot, TEXT_SLOTS};
pub use store::{StateStore, TurnGuard};
pub use workflow::Workflow;
