// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound rendering on top of the chat transport.
//!
//! Units are sent at most once. Edits of a message that no longer exists
//! degrade to sending a new message; nothing is retried.

use std::sync::Arc;

use pantry_core::error::PantryError;
use pantry_core::traits::ChatTransport;
use pantry_core::types::{Keyboard, MessageRef};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct Surface {
    transport: Arc<dyn ChatTransport>,
}

impl Surface {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    pub async fn send(&self, chat_id: i64, text: &str) -> Result<MessageRef, PantryError> {
        self.transport.send(chat_id, text, None).await
    }

    pub async fn send_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<MessageRef, PantryError> {
        self.transport.send(chat_id, text, Some(keyboard)).await
    }

    /// Edits `target` in place, or sends a new message when there is no
    /// target or it has disappeared. Returns where the content now lives.
    pub async fn edit_or_send(
        &self,
        chat_id: i64,
        target: Option<MessageRef>,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, PantryError> {
        if let Some(target) = target {
            match self.transport.edit(target, text, keyboard).await {
                Ok(()) => return Ok(target),
                Err(e) if e.is_missing_message() => {
                    warn!(message = %target, "tracked message is gone, sending a new one");
                }
                Err(e) => return Err(e),
            }
        }
        self.transport.send(chat_id, text, keyboard).await
    }

    /// Best-effort delete.
    pub async fn delete(&self, target: MessageRef) {
        if let Err(e) = self.transport.delete(target).await {
            debug!(message = %target, error = %e, "delete failed");
        }
    }

    /// Sends a placeholder shown while a slow collaborator works.
    pub async fn loading(&self, chat_id: i64, text: &str) -> Option<MessageRef> {
        match self.transport.send(chat_id, text, None).await {
            Ok(placeholder) => Some(placeholder),
            Err(e) => {
                warn!(chat_id, error = %e, "failed to send loading placeholder");
                None
            }
        }
    }

    /// Best-effort callback acknowledgement.
    pub async fn answer(&self, callback_id: &str, notice: Option<&str>) {
        if let Err(e) = self.transport.answer_callback(callback_id, notice).await {
            debug!(callback_id, error = %e, "callback answer failed");
        }
    }
}
