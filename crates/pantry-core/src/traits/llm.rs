// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Large-language-model collaborator.

use async_trait::async_trait;

use crate::error::PantryError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Locale, ParsedItem, ProductListDetection, UserId};

/// Typed operations a language model client offers.
///
/// Answers are probabilistic. Callers wrap every call in a deadline and must
/// never treat an error as an empty result.
#[async_trait]
pub trait LanguageModel: PluginAdapter {
    /// Returns the model's raw language answer (expected to contain `en`, `uk` or `ru`).
    async fn detect_language(&self, text: &str) -> Result<String, PantryError>;

    async fn detect_product_list(&self, text: &str) -> Result<ProductListDetection, PantryError>;

    /// Extracts items, keeping the user's language in `standardized_name`.
    async fn parse_items(
        &self,
        text: &str,
        lang: Locale,
        user: UserId,
    ) -> Result<Vec<ParsedItem>, PantryError>;

    /// True when the provider stores requests, which makes short-lived
    /// response caching safe.
    fn honors_store(&self) -> bool;
}
