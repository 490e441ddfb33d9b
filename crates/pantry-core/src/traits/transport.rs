// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transport trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::PantryError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{FileRef, InboundEvent, Keyboard, MessageRef};

/// Bidirectional chat transport.
///
/// Delivery is at-most-once best effort. An `edit` whose target message no
/// longer exists must fail with `PantryError::not_found("message", ..)` so the
/// caller can fall back to sending a fresh message.
#[async_trait]
pub trait ChatTransport: PluginAdapter {
    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), PantryError>;

    /// Receives the next inbound event.
    async fn receive(&self) -> Result<InboundEvent, PantryError>;

    /// Sends a message, optionally with a keyboard.
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, PantryError>;

    /// Replaces the text and keyboard of an existing message.
    async fn edit(
        &self,
        target: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), PantryError>;

    /// Deletes a message.
    async fn delete(&self, target: MessageRef) -> Result<(), PantryError>;

    /// Acknowledges a button press, optionally with a short notice.
    async fn answer_callback(
        &self,
        callback_id: &str,
        notice: Option<&str>,
    ) -> Result<(), PantryError>;

    /// Resolves a file reference into a downloadable link.
    async fn file_link(&self, file: &FileRef) -> Result<String, PantryError>;

    /// Downloads the bytes behind a file reference.
    async fn download(&self, file: &FileRef) -> Result<Vec<u8>, PantryError>;
}
