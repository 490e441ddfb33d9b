// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of JSON payloads from free-form model answers.

use pantry_core::PantryError;
use pantry_core::types::{ParsedItem, ProductListDetection};

/// Confidence assigned when the model reports one outside `[0, 1]`.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

fn malformed(what: &str, detail: impl std::fmt::Display) -> PantryError {
    PantryError::Provider {
        message: format!("malformed {what} answer: {detail}"),
        source: None,
    }
}

/// The substring from the first `open` to the last `close`, inclusive.
fn outermost(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (start < end).then(|| &text[start..=end])
}

fn clamp_confidence(value: f64) -> f64 {
    if (0.0..=1.0).contains(&value) {
        value
    } else {
        DEFAULT_CONFIDENCE
    }
}

pub fn detection(answer: &str) -> Result<ProductListDetection, PantryError> {
    let json = outermost(answer.trim(), '{', '}')
        .ok_or_else(|| malformed("product list detection", "no JSON object"))?;
    let mut detection: ProductListDetection =
        serde_json::from_str(json).map_err(|e| malformed("product list detection", e))?;
    detection.confidence = clamp_confidence(detection.confidence);
    Ok(detection)
}

pub fn items(answer: &str) -> Result<Vec<ParsedItem>, PantryError> {
    let json = outermost(answer.trim(), '[', ']')
        .ok_or_else(|| malformed("item parsing", "no JSON array"))?;
    let mut items: Vec<ParsedItem> =
        serde_json::from_str(json).map_err(|e| malformed("item parsing", e))?;
    for (index, item) in items.iter_mut().enumerate() {
        if item.standardized_name.trim().is_empty() {
            return Err(malformed(
                "item parsing",
                format!("item {index} has no standardized_name"),
            ));
        }
        item.confidence_score = clamp_confidence(item.confidence_score);
        // Models often send "" for absent strings.
        for field in [
            &mut item.category,
            &mut item.subcategory,
            &mut item.quantity_unit,
            &mut item.notes,
            &mut item.original_text,
        ] {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_ignores_surrounding_prose() {
        let answer = "Sure!\n```json\n{\"is_product_list\": true, \"confidence\": 0.92, \
\"detected_items_count\": 2, \"sample_items\": [\"milk\"]}\n```";
        let d = detection(answer).unwrap();
        assert!(d.is_product_list);
        assert_eq!(d.confidence, 0.92);
        assert_eq!(d.detected_items_count, 2);
    }

    #[test]
    fn out_of_range_confidence_resets() {
        let d = detection("{\"is_product_list\": false, \"confidence\": 7}").unwrap();
        assert_eq!(d.confidence, DEFAULT_CONFIDENCE);

        let parsed = items("[{\"standardized_name\":\"milk\",\"confidence_score\":-1}]").unwrap();
        assert_eq!(parsed[0].confidence_score, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn items_keep_cyrillic_names() {
        let parsed = items(
            "[{\"standardized_name\":\"молоко\",\"category\":\"dairy\",\"quantity_value\":1,\
\"quantity_unit\":\"л\",\"confidence_score\":0.9},\
{\"standardized_name\":\"хліб\",\"category\":\"\",\"quantity_unit\":\"\",\"confidence_score\":0.8}]",
        )
        .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].standardized_name, "молоко");
        assert_eq!(parsed[0].quantity_unit.as_deref(), Some("л"));
        assert_eq!(parsed[1].category, None);
        assert_eq!(parsed[1].quantity_unit, None);
    }

    #[test]
    fn nameless_item_rejects_the_answer() {
        assert!(items("[{\"standardized_name\":\"  \"}]").is_err());
        assert!(items("no json here").is_err());
        assert!(detection("] {").is_err());
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(items("[]").unwrap().is_empty());
    }
}
