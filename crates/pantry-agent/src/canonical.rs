// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-processing of parsed items before they reach the list store.

use pantry_core::types::{ItemPatch, NewItem, ParsedItem};

/// Renders a quantity as `"<value> <unit>"`.
///
/// Integral values drop their decimals, everything else keeps one decimal
/// place. A zero value is still a quantity.
pub fn quantity_string(value: Option<f64>, unit: Option<&str>) -> Option<String> {
    let value = value.filter(|v| v.is_finite())?;
    let number = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    };
    match unit.map(str::trim).filter(|u| !u.is_empty()) {
        Some(unit) => Some(format!("{number} {unit}")),
        None => Some(number),
    }
}

/// Case-folded, whitespace-collapsed form of a name used to spot duplicates.
///
/// No translation happens here: names in different languages never match.
pub fn fingerprint(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The phrase shown to users: the original wording when the model kept it.
pub fn display_name(item: &ParsedItem) -> String {
    item.original_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| item.standardized_name.trim())
        .to_string()
}

pub fn new_item(item: &ParsedItem) -> NewItem {
    NewItem {
        display_name: display_name(item),
        canonical_name: item.standardized_name.trim().to_string(),
        quantity: quantity_string(item.quantity_value, item.quantity_unit.as_deref()),
        category: item.category.clone(),
        notes: item.notes.clone().filter(|n| !n.trim().is_empty()),
    }
}

pub fn patch(item: &ParsedItem) -> ItemPatch {
    ItemPatch {
        canonical_name: item.standardized_name.trim().to_string(),
        quantity: quantity_string(item.quantity_value, item.quantity_unit.as_deref()),
    }
}

/// Quantities that carry no information (`"0"`, `"0 pcs"`) are hidden in views.
pub fn visible_quantity(quantity: Option<&str>) -> Option<&str> {
    let quantity = quantity?.trim();
    if quantity.is_empty() || quantity == "0" || quantity.starts_with("0 ") {
        None
    } else {
        Some(quantity)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn fingerprint_is_idempotent(name in "\\PC{0,24}") {
            let once = fingerprint(&name);
            prop_assert_eq!(fingerprint(&once), once);
        }

        #[test]
        fn fingerprint_ignores_case_and_padding(name in "[a-zA-Z ]{0,16}") {
            let padded = format!("  {}  ", name.to_uppercase());
            prop_assert_eq!(fingerprint(&padded), fingerprint(&name));
        }

        #[test]
        fn whole_numbers_render_without_a_point(n in 0u32..100_000) {
            let rendered = quantity_string(Some(f64::from(n)), Some("pcs")).unwrap();
            prop_assert_eq!(rendered, format!("{n} pcs"));
        }
    }
}
