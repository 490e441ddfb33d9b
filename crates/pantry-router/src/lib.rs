// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message routing for the Pantry assistant.
//!
//! This crate provides:
//! - [`IntentClassifier`]: decides what a normalized text message means,
//!   given the user's active workflow slots and a product-list detection
//! - [`Callback`]: the parsed form of inline-keyboard callback tokens
//!
//! Nothing here performs I/O. The orchestrator asks the AI gateway for a
//! detection only when [`IntentClassifier::route`] says one is needed, so
//! classification is deterministic for identical model answers.

pub mod callback;
pub mod classifier;

pub use callback::{
    Callback, DupAction, MenuAction, ProductListAction, ReceiptsAction, TokenError,
};
pub use classifier::{Classification, Intent, IntentClassifier, Stage, parse_command};
