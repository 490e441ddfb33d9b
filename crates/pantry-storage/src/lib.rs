// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory persistence for the Pantry assistant.
//!
//! [`MemoryStore`] implements the list store, user directory and receipt
//! store collaborators over a single table set guarded by one async
//! `RwLock`, so every write is serialized and every read sees a consistent
//! view. Nothing survives a restart.

mod directory;
mod lists;
mod receipts;
mod store;

pub use store::MemoryStore;
