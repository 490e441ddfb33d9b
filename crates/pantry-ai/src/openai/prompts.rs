// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates.

use pantry_core::types::Locale;

const CATEGORIES: &str = "dairy, bakery, meat, fish, vegetables, fruits, grains, \
canned, frozen, beverages, snacks, sweets, spices, household, personal_care, other";

pub fn language_detection(text: &str) -> String {
    format!(
        "Identify the language of the text below. Answer with exactly one code: \
en, uk or ru. If it is none of them answer en.\n\nText:\n{text}"
    )
}

pub fn product_list_detection(text: &str) -> String {
    format!(
        "Decide whether the message below is a shopping list (one or more products \
a person wants to buy). Ordinary conversation, questions and plans are not shopping \
lists.\n\
Reply with a single JSON object and nothing else:\n\
{{\"is_product_list\": bool, \"confidence\": number between 0 and 1, \
\"detected_items_count\": integer, \"sample_items\": [up to 3 strings]}}\n\n\
Message:\n{text}"
    )
}

fn examples(lang: Locale) -> &'static str {
    match lang {
        Locale::En => {
            "\"milk and two loaves of bread\" -> [{\"standardized_name\":\"milk\",...},\
{\"standardized_name\":\"bread\",\"quantity_value\":2,\"quantity_unit\":\"loaves\",...}]"
        }
        Locale::Uk => {
            "\"молоко, 2 кг картоплі\" -> [{\"standardized_name\":\"молоко\",...},\
{\"standardized_name\":\"картопля\",\"quantity_value\":2,\"quantity_unit\":\"кг\",...}]"
        }
        Locale::Ru => {
            "\"хлеб и 10 яиц\" -> [{\"standardized_name\":\"хлеб\",...},\
{\"standardized_name\":\"яйца\",\"quantity_value\":10,\"quantity_unit\":\"шт\",...}]"
        }
    }
}

pub fn item_parsing(text: &str, lang: Locale) -> String {
    format!(
        "Split the shopping request below into individual products.\n\
Rules:\n\
1. Keep every name in the language the user wrote it in ({lang}); never translate.\n\
2. Use the singular dictionary form as standardized_name.\n\
3. Repeated products become one item.\n\
4. Words that only describe another product belong in its notes.\n\
5. category is one of: {CATEGORIES}.\n\
Reply with a JSON array only. Each element:\n\
{{\"standardized_name\": string, \"category\": string, \"subcategory\": string, \
\"quantity_value\": number or null, \"quantity_unit\": string or null, \
\"notes\": string or null, \"confidence_score\": number between 0 and 1, \
\"original_text\": the fragment of the request this item came from}}\n\
Example: {examples}\n\n\
Request:\n{text}",
        lang = lang.code(),
        examples = examples(lang),
    )
}
