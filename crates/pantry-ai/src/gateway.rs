// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed facade over the language model.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use pantry_config::PantryConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::LanguageModel;
use pantry_core::types::{Locale, ParsedItem, ProductListDetection, UserId};
use tracing::{debug, info, warn};

use crate::cache::ParseCache;

/// Tunables of the gateway.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub item_confidence_floor: f64,
}

impl GatewaySettings {
    pub fn from_config(config: &PantryConfig) -> Self {
        Self {
            timeout: config.openai.timeout(),
            cache_ttl: config.openai.cache_ttl(),
            item_confidence_floor: config.classifier.item_confidence_floor,
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            cache_ttl: Duration::from_secs(300),
            item_confidence_floor: 0.6,
        }
    }
}

/// Wraps every model call in a deadline and post-processes the answers.
///
/// Errors are surfaced, never turned into empty results. Language detection
/// is the one exception: it falls back to the caller's locale.
pub struct AiGateway {
    model: Arc<dyn LanguageModel>,
    settings: GatewaySettings,
    cache: Option<ParseCache>,
}

impl AiGateway {
    pub fn new(model: Arc<dyn LanguageModel>, settings: GatewaySettings) -> Self {
        let cache = (model.honors_store() && !settings.cache_ttl.is_zero())
            .then(|| ParseCache::new(settings.cache_ttl));
        info!(
            model = model.name(),
            timeout_secs = settings.timeout.as_secs(),
            cache = cache.is_some(),
            "AI gateway ready"
        );
        Self {
            model,
            settings,
            cache,
        }
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    async fn with_deadline<T>(
        &self,
        call: impl Future<Output = Result<T, PantryError>>,
    ) -> Result<T, PantryError> {
        tokio::time::timeout(self.settings.timeout, call)
            .await
            .map_err(|_| PantryError::Timeout {
                duration: self.settings.timeout,
            })?
    }

    /// Detects the language of `text`; any failure or unsupported answer yields `fallback`.
    pub async fn detect_language(&self, text: &str, fallback: Locale) -> Locale {
        match self.with_deadline(self.model.detect_language(text)).await {
            Ok(answer) => match first_supported_code(&answer) {
                Some(locale) => locale,
                None => {
                    debug!(answer = %answer, fallback = %fallback, "unsupported language answer");
                    fallback
                }
            },
            Err(e) => {
                warn!(error = %e, fallback = %fallback, "language detection failed");
                fallback
            }
        }
    }

    pub async fn detect_product_list(
        &self,
        text: &str,
    ) -> Result<ProductListDetection, PantryError> {
        let mut detection = self
            .with_deadline(self.model.detect_product_list(text))
            .await?;
        if !(0.0..=1.0).contains(&detection.confidence) {
            detection.confidence = 0.5;
        }
        Ok(detection)
    }

    /// Parses free text into items, folding low-confidence fragments into notes.
    pub async fn parse_items(
        &self,
        raw_text: &str,
        lang: Locale,
        user: UserId,
    ) -> Result<Vec<ParsedItem>, PantryError> {
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(raw_text, lang)) {
            debug!(user_id = %user, lang = %lang, "parse served from cache");
            return Ok(cached);
        }

        let parsed = self
            .with_deadline(self.model.parse_items(raw_text, lang, user))
            .await?;
        let folded = fold_low_confidence(parsed, self.settings.item_confidence_floor);
        debug!(user_id = %user, lang = %lang, count = folded.len(), "items parsed");

        if let Some(cache) = &self.cache {
            cache.insert(raw_text, lang, folded.clone());
        }
        Ok(folded)
    }
}

/// Finds the first supported language code or name mentioned in a model answer.
fn first_supported_code(answer: &str) -> Option<Locale> {
    answer
        .split(|c: char| !c.is_alphabetic())
        .filter(|token| !token.is_empty())
        .find_map(Locale::recognize)
}

/// Items under `floor` become notes on the first confident item. When every
/// item is under it, only the most confident one is kept.
pub fn fold_low_confidence(items: Vec<ParsedItem>, floor: f64) -> Vec<ParsedItem> {
    let (mut confident, weak): (Vec<ParsedItem>, Vec<ParsedItem>) = items
        .into_iter()
        .partition(|item| item.confidence_score >= floor);

    if confident.is_empty() {
        return weak
            .into_iter()
            .reduce(|best, item| {
                if item.confidence_score > best.confidence_score {
                    item
                } else {
                    best
                }
            })
            .into_iter()
            .collect();
    }

    if !weak.is_empty() {
        let first = &mut confident[0];
        let mut notes: Vec<String> = first
            .notes
            .take()
            .filter(|n| !n.is_empty())
            .into_iter()
            .collect();
        notes.extend(weak.into_iter().map(|item| item.standardized_name));
        first.notes = Some(notes.join(", "));
    }
    confident
}
