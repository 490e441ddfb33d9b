// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! Every collaborator extends the [`PluginAdapter`] lifecycle trait and uses
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod directory;
pub mod list_store;
pub mod llm;
pub mod receipt;
pub mod speech;
pub mod transport;

pub use adapter::PluginAdapter;
pub use directory::{UserDirectory, UserProfile};
pub use list_store::ListStore;
pub use llm::LanguageModel;
pub use receipt::{ReceiptAnalyzer, ReceiptPage, ReceiptStore};
pub use speech::{SpeechRequest, SpeechToText, Transcript};
pub use transport::ChatTransport;
