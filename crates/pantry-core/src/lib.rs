// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Pantry shopping assistant.
//!
//! This crate provides the data model, error taxonomy and collaborator traits
//! shared by every other crate in the workspace.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ErrorKind, PantryError};
pub use types::{
    Button, FileRef, HealthStatus, InboundEvent, InboundKind, Keyboard, Locale,
    MessageContent, MessageRef, ParsedItem, ParsingStatus, ProductListDetection, Sender,
    ShoppingItem, ShoppingList, User, UserId, short_id,
};

pub use traits::{
    ChatTransport, LanguageModel, ListStore, PluginAdapter, ReceiptAnalyzer, ReceiptStore,
    SpeechToText, UserDirectory,
};
