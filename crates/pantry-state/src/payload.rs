// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encodings of structured slot values.
//!
//! - `duplicate_resolution`: JSON [`DuplicateSession`] (camelCase keys).
//! - `product_list_selection`: JSON [`ProductListSelection`] (camelCase keys).
//! - `viewing_list`: `"<listId>:<chatId>:<messageId>"`.
//! - message-id slots: `"<chatId>:<messageId>"`.

use std::fmt;
use std::str::FromStr;

use pantry_core::error::PantryError;
use pantry_core::types::{MessageRef, ParsedItem, ProductListDetection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::slot::Slot;

fn corrupt(slot: Slot, detail: impl fmt::Display) -> PantryError {
    PantryError::Internal(format!("corrupt `{slot}` slot value: {detail}"))
}

/// One new item that matched an item already on the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatePair {
    pub existing_item_id: Uuid,
    /// Name of the existing item, kept for the prompt.
    pub existing_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_quantity: Option<String>,
    pub parsed_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_quantity: Option<String>,
    /// The phrase the new item came from.
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub resolved: bool,
}

/// The persisted state of an interactive merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateSession {
    pub list_id: Uuid,
    pub pairs: Vec<DuplicatePair>,
    pub unique_items: Vec<ParsedItem>,
}

impl DuplicateSession {
    pub fn encode(&self) -> Result<String, PantryError> {
        serde_json::to_string(self).map_err(|e| corrupt(Slot::DuplicateResolution, e))
    }

    pub fn decode(raw: &str) -> Result<Self, PantryError> {
        serde_json::from_str(raw).map_err(|e| corrupt(Slot::DuplicateResolution, e))
    }
}

/// A family offered as a target for a new list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyChoice {
    pub id: Uuid,
    pub name: String,
}

/// A message detected as a product list, waiting for the user to pick a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListSelection {
    pub message_text: String,
    pub detection_result: ProductListDetection,
    pub available_families: Vec<FamilyChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_list_message_id: Option<String>,
    /// Language detected while normalizing (voice), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
}

impl ProductListSelection {
    pub fn encode(&self) -> Result<String, PantryError> {
        serde_json::to_string(self).map_err(|e| corrupt(Slot::ProductListSelection, e))
    }

    pub fn decode(raw: &str) -> Result<Self, PantryError> {
        serde_json::from_str(raw).map_err(|e| corrupt(Slot::ProductListSelection, e))
    }

    /// The tracked prompt message, if it parses.
    pub fn prompt(&self) -> Option<MessageRef> {
        self.product_list_message_id
            .as_deref()
            .and_then(|raw| raw.parse().ok())
    }
}

/// The list currently on screen and the message showing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewingList {
    pub list_id: Uuid,
    pub message: MessageRef,
}

impl fmt::Display for ViewingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.list_id, self.message)
    }
}

impl FromStr for ViewingList {
    type Err = PantryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (list, rest) = s
            .split_once(':')
            .ok_or_else(|| corrupt(Slot::ViewingList, s))?;
        let list_id = Uuid::parse_str(list).map_err(|e| corrupt(Slot::ViewingList, e))?;
        let message = rest
            .parse::<MessageRef>()
            .map_err(|e| corrupt(Slot::ViewingList, e))?;
        Ok(Self { list_id, message })
    }
}

/// Parses a stored list id (`adding_item_to_list`).
pub fn decode_list_id(slot: Slot, raw: &str) -> Result<Uuid, PantryError> {
    Uuid::parse_str(raw.trim()).map_err(|e| corrupt(slot, e))
}

/// Parses a message-id slot value.
pub fn decode_message_ref(slot: Slot, raw: &str) -> Result<MessageRef, PantryError> {
    raw.parse::<MessageRef>().map_err(|e| corrupt(slot, e))
}

/// Value stored in `creating_list_for_family` for a personal (family-less) list.
pub const PERSONAL_LIST: &str = "personal";

/// Parses `creating_list_for_family`: a family id or [`PERSONAL_LIST`].
pub fn decode_family_target(raw: &str) -> Result<Option<Uuid>, PantryError> {
    if raw == PERSONAL_LIST {
        return Ok(None);
    }
    decode_list_id(Slot::CreatingListForFamily, raw).map(Some)
}

pub fn encode_family_target(family_id: Option<Uuid>) -> String {
    family_id.map_or_else(|| PERSONAL_LIST.to_string(), |id| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> DuplicateSession {
        DuplicateSession {
            list_id: Uuid::new_v4(),
            pairs: vec![DuplicatePair {
                existing_item_id: Uuid::new_v4(),
                existing_name: "bread".into(),
                existing_quantity: None,
                parsed_name: "bread".into(),
                new_quantity: Some("2 loaves".into()),
                display_name: "bread 2 loaves".into(),
                category: None,
                resolved: false,
            }],
            unique_items: vec![ParsedItem::named("butter")],
        }
    }

    #[test]
    fn duplicate_session_uses_camel_case_keys() {
        let raw = session().encode().unwrap();
        assert!(raw.contains("\"listId\""));
        assert!(raw.contains("\"existingItemId\""));
        assert!(raw.contains("\"newQuantity\":\"2 loaves\""));
        assert!(raw.contains("\"uniqueItems\""));
        assert_eq!(DuplicateSession::decode(&raw).unwrap(), session());
    }

    #[test]
    fn corrupt_payload_is_internal_error() {
        let err = DuplicateSession::decode("{not json").unwrap_err();
        assert!(matches!(err, PantryError::Internal(_)));
        assert!(err.to_string().contains("duplicate_resolution"));
    }

    #[test]
    fn viewing_list_text_form() {
        let id = Uuid::new_v4();
        let v = ViewingList {
            list_id: id,
            message: MessageRef::new(-100500, 77),
        };
        let raw = v.to_string();
        assert_eq!(raw, format!("{id}:-100500:77"));
        assert_eq!(raw.parse::<ViewingList>().unwrap(), v);
        assert!("abc:1:2".parse::<ViewingList>().is_err());
    }

    #[test]
    fn family_target_round_trip() {
        assert_eq!(decode_family_target(PERSONAL_LIST).unwrap(), None);
        let id = Uuid::new_v4();
        assert_eq!(decode_family_target(&encode_family_target(Some(id))).unwrap(), Some(id));
    }

    #[test]
    fn selection_prompt_parses_message_ref() {
        let selection = ProductListSelection {
            message_text: "milk, eggs".into(),
            detection_result: ProductListDetection::new(true, 0.9),
            available_families: vec![],
            product_list_message_id: Some("5:9".into()),
            detected_language: None,
        };
        let raw = selection.encode().unwrap();
        assert!(raw.contains("\"messageText\""));
        assert!(raw.contains("\"productListMessageId\":\"5:9\""));
        assert_eq!(
            ProductListSelection::decode(&raw).unwrap().prompt(),
            Some(MessageRef::new(5, 9))
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn viewing_list_parses_back(bytes in any::<[u8; 16]>(), chat in any::<i64>(), msg in any::<i32>()) {
            let view = ViewingList {
                list_id: Uuid::from_bytes(bytes),
                message: MessageRef::new(chat, msg),
            };
            prop_assert_eq!(view.to_string().parse::<ViewingList>().unwrap(), view);
        }

        #[test]
        fn arbitrary_text_never_panics_the_decoders(raw in "\\PC{0,40}") {
            let _ = raw.parse::<ViewingList>();
            let _ = DuplicateSession::decode(&raw);
            let _ = decode_family_target(&raw);
        }
    }
}
