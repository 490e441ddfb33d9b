// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across collaborator traits and the Pantry workspace.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::PantryError;

/// Number of leading characters kept when an identifier is squeezed into a callback token.
pub const SHORT_ID_LEN: usize = 8;

/// Returns the first [`SHORT_ID_LEN`] characters of an identifier.
pub fn short_id(id: &Uuid) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

/// Internal identity of a user (distinct from the chat-platform identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Supported interface languages.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Uk,
    Ru,
}

impl Locale {
    /// Recognizes a language code, a common alias or a language name.
    ///
    /// Region suffixes are ignored, so `uk-UA` and `ru_RU` are accepted.
    pub fn recognize(code: &str) -> Option<Locale> {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "ukrainian" | "ukr" | "ua" | "укр" | "українська" => Some(Locale::Uk),
            "russian" | "rus" | "рус" | "русский" => Some(Locale::Ru),
            "english" | "eng" => Some(Locale::En),
            other => Locale::from_str(other).ok(),
        }
    }

    /// Maps any language code onto the supported set; unknown codes become English.
    pub fn coerce(code: &str) -> Locale {
        Locale::recognize(code).unwrap_or(Locale::En)
    }

    /// Like [`Locale::coerce`] but keeps `fallback` for empty input.
    pub fn coerce_or(code: &str, fallback: Locale) -> Locale {
        if code.trim().is_empty() {
            fallback
        } else {
            Locale::coerce(code)
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Uk => "uk",
            Locale::Ru => "ru",
        }
    }
}

// --- Chat identities ---

/// Address of a message already delivered to a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

impl MessageRef {
    pub fn new(chat_id: i64, message_id: i32) -> Self {
        Self {
            chat_id,
            message_id,
        }
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chat_id, self.message_id)
    }
}

impl FromStr for MessageRef {
    type Err = PantryError;

    /// Parses the `"<chatId>:<messageId>"` form stored in message-id slots.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chat, msg) = s
            .split_once(':')
            .ok_or_else(|| PantryError::Internal(format!("malformed message ref `{s}`")))?;
        let chat_id = chat
            .parse::<i64>()
            .map_err(|e| PantryError::Internal(format!("malformed chat id in `{s}`: {e}")))?;
        let message_id = msg
            .parse::<i32>()
            .map_err(|e| PantryError::Internal(format!("malformed message id in `{s}`: {e}")))?;
        Ok(Self::new(chat_id, message_id))
    }
}

/// A labelled button carrying an opaque callback token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// A finite 2D grid of buttons attached to an outbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row; empty rows are dropped.
    pub fn row(mut self, row: Vec<Button>) -> Self {
        if !row.is_empty() {
            self.rows.push(row);
        }
        self
    }

    /// Appends a single-button row.
    pub fn button(self, label: impl Into<String>, token: impl Into<String>) -> Self {
        self.row(vec![Button::new(label, token)])
    }

    /// Lays `buttons` out `per_row` to a row.
    pub fn grid(mut self, buttons: Vec<Button>, per_row: usize) -> Self {
        let per_row = per_row.max(1);
        let mut current = Vec::with_capacity(per_row);
        for button in buttons {
            current.push(button);
            if current.len() == per_row {
                self.rows.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            self.rows.push(current);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates every token on the keyboard in row order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(|b| b.token.as_str())
    }
}

// --- Inbound events ---

/// The person behind an inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub language_code: Option<String>,
}

/// A downloadable payload held by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub file_id: String,
    pub size: Option<u64>,
}

/// Content of an inbound chat message, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Voice {
        file: FileRef,
        duration_secs: Option<u32>,
        mime_type: Option<String>,
    },
    Photo {
        file: FileRef,
        caption: Option<String>,
    },
    Document {
        file: FileRef,
        filename: Option<String>,
        mime_type: Option<String>,
    },
}

impl MessageContent {
    pub fn kind_label(&self) -> &'static str {
        match self {
            MessageContent::Text(_) => "text",
            MessageContent::Voice { .. } => "voice",
            MessageContent::Photo { .. } => "photo",
            MessageContent::Document { .. } => "document",
        }
    }
}

/// What happened in the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundKind {
    Message {
        message_id: i32,
        content: MessageContent,
    },
    Callback {
        callback_id: String,
        data: String,
        /// The message carrying the pressed keyboard, when still known.
        message: Option<MessageRef>,
    },
}

/// A channel-agnostic inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: i64,
    pub sender: Sender,
    pub kind: InboundKind,
    pub timestamp: DateTime<Utc>,
}

// --- Users and families ---

/// A chat user known to the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub locale: Locale,
    pub is_authorized: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Name shown in greetings and admin listings.
    pub fn display_name(&self) -> String {
        match (&self.username, self.first_name.is_empty()) {
            (_, false) => self.first_name.clone(),
            (Some(username), true) => format!("@{username}"),
            (None, true) => self.telegram_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<UserId>,
    pub created_by: UserId,
}

/// Directory-wide counters for the admin `/stats` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub users: usize,
    pub authorized: usize,
    pub admins: usize,
    pub families: usize,
}

// --- Lists and items ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: Uuid,
    pub name: String,
    pub family_id: Option<Uuid>,
    pub owner_id: UserId,
    pub is_shared: bool,
    pub created_at: DateTime<Utc>,
}

/// Request to create a list.
#[derive(Debug, Clone, PartialEq)]
pub struct NewList {
    pub name: String,
    pub family_id: Option<Uuid>,
    pub owner_id: UserId,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParsingStatus {
    Pending,
    Parsed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub list_id: Uuid,
    /// The phrase shown to users.
    pub display_name: String,
    /// The parsed name; required when `parsing_status` is `Parsed`.
    pub canonical_name: Option<String>,
    /// `"<value> <unit>"`.
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub completed: bool,
    pub completed_by: Option<UserId>,
    pub completed_at: Option<DateTime<Utc>>,
    pub parsing_status: ParsingStatus,
    pub notes: Option<String>,
    pub added_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl ShoppingItem {
    /// The name duplicate detection compares against.
    pub fn match_name(&self) -> &str {
        self.canonical_name.as_deref().unwrap_or(&self.display_name)
    }
}

/// An item ready to be written to a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub display_name: String,
    pub canonical_name: String,
    pub quantity: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// Replacement values applied to an existing item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPatch {
    pub canonical_name: String,
    pub quantity: Option<String>,
}

// --- Model outputs ---

fn default_confidence() -> f64 {
    0.5
}

/// A single item extracted from free text by the language model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedItem {
    pub standardized_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub quantity_value: Option<f64>,
    #[serde(default)]
    pub quantity_unit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_confidence")]
    pub confidence_score: f64,
    /// The phrase this item came from, if the model echoed it.
    #[serde(default)]
    pub original_text: Option<String>,
}

impl ParsedItem {
    /// Convenience constructor used by tests and fallbacks.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            standardized_name: name.into(),
            category: None,
            subcategory: None,
            quantity_value: None,
            quantity_unit: None,
            notes: None,
            confidence_score: 1.0,
            original_text: None,
        }
    }

    pub fn with_quantity(mut self, value: f64, unit: impl Into<String>) -> Self {
        self.quantity_value = Some(value);
        let unit = unit.into();
        self.quantity_unit = (!unit.is_empty()).then_some(unit);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence_score = confidence;
        self
    }
}

/// The model's verdict on whether a message is a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListDetection {
    pub is_product_list: bool,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub detected_items_count: u32,
    #[serde(default)]
    pub sample_items: Vec<String>,
}

impl ProductListDetection {
    pub fn new(is_product_list: bool, confidence: f64) -> Self {
        Self {
            is_product_list,
            confidence,
            detected_items_count: 0,
            sample_items: Vec::new(),
        }
    }
}

// --- Receipts ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub total_price: f64,
    pub category: Option<String>,
}

/// Structured data extracted from a receipt image or PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptData {
    pub merchant_name: Option<String>,
    pub merchant_address: Option<String>,
    pub merchant_phone: Option<String>,
    pub transaction_date: Option<NaiveDate>,
    pub transaction_time: Option<NaiveTime>,
    pub currency: Option<String>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub items: Vec<ReceiptItem>,
    pub country_region: Option<String>,
    pub receipt_type: Option<String>,
    pub confidence: f64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Uploaded,
    Processed,
    Failed,
}

/// A stored receipt upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub user_id: UserId,
    pub file_name: String,
    pub content_type: String,
    pub status: ReceiptStatus,
    pub data: Option<ReceiptData>,
    pub created_at: DateTime<Utc>,
}

/// Aggregates over a user's processed receipts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptSummary {
    pub count: usize,
    pub processed: usize,
    pub total_spent: f64,
    pub total_tax: f64,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn coerce_always_lands_in_supported_set(code in "\\PC{0,12}") {
            let locale = Locale::coerce(&code);
            prop_assert!(matches!(locale, Locale::En | Locale::Uk | Locale::Ru));
        }

        #[test]
        fn region_suffix_does_not_change_an_alias(
            alias in prop::sample::select(vec!["ukrainian", "ua", "russian", "rus", "english", "eng"]),
            region in "[A-Za-z]{2}",
        ) {
            prop_assert_eq!(
                Locale::coerce(&format!("{alias}-{region}")),
                Locale::coerce(alias)
            );
        }

        #[test]
        fn message_ref_text_form_is_reversible(chat in any::<i64>(), msg in any::<i32>()) {
            let r = MessageRef::new(chat, msg);
            prop_assert_eq!(r.to_string().parse::<MessageRef>().unwrap(), r);
        }
    }
}
