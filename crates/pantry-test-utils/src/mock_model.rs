// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language model for deterministic testing.
//!
//! Answers are scripted per input text. Unscripted detection requests are
//! answered "not a product list"; unscripted parse requests yield nothing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use pantry_core::error::PantryError;
use pantry_core::traits::{LanguageModel, PluginAdapter};
use pantry_core::types::{
    HealthStatus, Locale, ParsedItem, ProductListDetection, UserId,
};

/// A scripted language model.
pub struct MockLanguageModel {
    detections: Mutex<HashMap<String, ProductListDetection>>,
    parses: Mutex<HashMap<String, Vec<ParsedItem>>>,
    language: Mutex<String>,
    unavailable: AtomicBool,
    detect_calls: AtomicUsize,
    parse_calls: AtomicUsize,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self {
            detections: Mutex::new(HashMap::new()),
            parses: Mutex::new(HashMap::new()),
            language: Mutex::new("en".to_string()),
            unavailable: AtomicBool::new(false),
            detect_calls: AtomicUsize::new(0),
            parse_calls: AtomicUsize::new(0),
        }
    }

    /// Script `text` as a product list with `items`: detection answers a
    /// confident positive and parsing returns `items`.
    pub async fn product_list(&self, text: &str, items: Vec<ParsedItem>) {
        let detection = ProductListDetection {
            is_product_list: true,
            confidence: 0.9,
            detected_items_count: items.len() as u32,
            sample_items: items
                .iter()
                .take(3)
                .map(|i| i.standardized_name.clone())
                .collect(),
        };
        self.detections.lock().await.insert(text.to_string(), detection);
        self.parses.lock().await.insert(text.to_string(), items);
    }

    /// Script the detection answer for `text`.
    pub async fn detection(&self, text: &str, detection: ProductListDetection) {
        self.detections.lock().await.insert(text.to_string(), detection);
    }

    /// Script the parse answer for `text`.
    pub async fn parse(&self, text: &str, items: Vec<ParsedItem>) {
        self.parses.lock().await.insert(text.to_string(), items);
    }

    /// Set the raw answer to language detection.
    pub async fn set_language(&self, answer: &str) {
        *self.language.lock().await = answer.to_string();
    }

    /// While set, every call fails with a provider error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn detect_calls(&self) -> usize {
        self.detect_calls.load(Ordering::SeqCst)
    }

    pub fn parse_calls(&self) -> usize {
        self.parse_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), PantryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PantryError::Provider {
                message: "mock model unavailable".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}

impl Default for MockLanguageModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockLanguageModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("unavailable".to_string()));
        }
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn detect_language(&self, _text: &str) -> Result<String, PantryError> {
        self.check_available()?;
        Ok(self.language.lock().await.clone())
    }

    async fn detect_product_list(&self, text: &str) -> Result<ProductListDetection, PantryError> {
        self.detect_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .detections
            .lock()
            .await
            .get(text.trim())
            .cloned()
            .unwrap_or_else(|| ProductListDetection::new(false, 0.1)))
    }

    async fn parse_items(
        &self,
        text: &str,
        _lang: Locale,
        _user: UserId,
    ) -> Result<Vec<ParsedItem>, PantryError> {
        self.parse_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .parses
            .lock()
            .await
            .get(text.trim())
            .cloned()
            .unwrap_or_default())
    }

    fn honors_store(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_product_list_answers_both_calls() {
        let model = MockLanguageModel::new();
        model
            .product_list("milk, bread", vec![ParsedItem::named("milk"), ParsedItem::named("bread")])
            .await;

        let detection = model.detect_product_list("milk, bread").await.unwrap();
        assert!(detection.is_product_list);
        assert_eq!(detection.detected_items_count, 2);

        let items = model
            .parse_items("milk, bread", Locale::En, UserId::new())
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(model.detect_calls(), 1);
        assert_eq!(model.parse_calls(), 1);
    }

    #[tokio::test]
    async fn unscripted_text_is_not_a_list() {
        let model = MockLanguageModel::new();
        let detection = model.detect_product_list("hello there").await.unwrap();
        assert!(!detection.is_product_list);
    }

    #[tokio::test]
    async fn unavailable_model_fails_every_call() {
        let model = MockLanguageModel::new();
        model.set_unavailable(true);
        assert!(model.detect_language("x").await.is_err());
        assert!(model.detect_product_list("x").await.is_err());
        assert!(matches!(
            model.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }
}
