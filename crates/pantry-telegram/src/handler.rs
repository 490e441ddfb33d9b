// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Update conversion and keyboard rendering.
//!
//! Turns Telegram messages and callback queries into transport-neutral
//! [`InboundEvent`]s. File contents are not downloaded here; only their
//! references travel with the event.

use chrono::Utc;
use pantry_core::types::{
    FileRef, InboundEvent, InboundKind, Keyboard, MessageContent, MessageRef, Sender,
};
use teloxide::prelude::*;
use teloxide::types::{ChatKind, FileMeta, InlineKeyboardButton, InlineKeyboardMarkup, User};

/// Checks whether the message is from a private (DM) chat.
///
/// Group, supergroup, and channel messages return `false`.
pub fn is_dm(msg: &Message) -> bool {
    matches!(msg.chat.kind, ChatKind::Private(_))
}

pub fn sender_of(user: &User) -> Sender {
    Sender {
        telegram_id: user.id.0 as i64,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        language_code: user.language_code.clone(),
    }
}

fn file_ref(meta: &FileMeta) -> FileRef {
    FileRef {
        file_id: meta.id.to_string(),
        size: Some(u64::from(meta.size)),
    }
}

/// Extracts the content of a message.
///
/// Returns `None` for unsupported message types (stickers, locations, etc.).
pub fn message_content(msg: &Message) -> Option<MessageContent> {
    if let Some(text) = msg.text() {
        return Some(MessageContent::Text(text.to_string()));
    }
    if let Some(voice) = msg.voice() {
        return Some(MessageContent::Voice {
            file: file_ref(&voice.file),
            duration_secs: Some(voice.duration.seconds()),
            mime_type: voice.mime_type.as_ref().map(ToString::to_string),
        });
    }
    if let Some(photos) = msg.photo() {
        // Telegram lists sizes smallest first.
        let largest = photos.last()?;
        return Some(MessageContent::Photo {
            file: file_ref(&largest.file),
            caption: msg.caption().map(str::to_string),
        });
    }
    if let Some(doc) = msg.document() {
        return Some(MessageContent::Document {
            file: file_ref(&doc.file),
            filename: doc.file_name.clone(),
            mime_type: doc.mime_type.as_ref().map(ToString::to_string),
        });
    }
    None
}

/// Converts a message into an event. Messages without a sender yield `None`.
pub fn message_event(msg: &Message, content: MessageContent) -> Option<InboundEvent> {
    let from = msg.from.as_ref()?;
    Some(InboundEvent {
        chat_id: msg.chat.id.0,
        sender: sender_of(from),
        kind: InboundKind::Message {
            message_id: msg.id.0,
            content,
        },
        timestamp: msg.date,
    })
}

/// Converts a button press into an event. Queries without data yield `None`.
pub fn callback_event(query: &CallbackQuery) -> Option<InboundEvent> {
    let data = query.data.clone()?;
    let message = query
        .message
        .as_ref()
        .map(|m| MessageRef::new(m.chat().id.0, m.id().0));
    let chat_id = message.map_or(query.from.id.0 as i64, |m| m.chat_id);
    Some(InboundEvent {
        chat_id,
        sender: sender_of(&query.from),
        kind: InboundKind::Callback {
            callback_id: query.id.0.clone(),
            data,
            message,
        },
        timestamp: Utc::now(),
    })
}

/// Renders a keyboard as an inline markup.
pub fn markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.token.clone()))
            .collect::<Vec<_>>()
    }))
}
