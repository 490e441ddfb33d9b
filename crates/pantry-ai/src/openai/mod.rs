// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI Responses API implementation of [`LanguageModel`].

pub mod client;
pub mod parse;
pub mod prompts;
pub mod types;

use async_trait::async_trait;
use pantry_config::model::OpenAiConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::{LanguageModel, PluginAdapter};
use pantry_core::types::{
    HealthStatus, Locale, ParsedItem, ProductListDetection, UserId,
};
use tracing::{debug, info};

use crate::openai::client::OpenAiClient;

/// Language model backed by the OpenAI Responses API.
///
/// API key resolution: `openai.api_key`, then `OPENAI_API_KEY`.
pub struct OpenAiModel {
    client: OpenAiClient,
}

impl OpenAiModel {
    pub fn new(config: &OpenAiConfig) -> Result<Self, PantryError> {
        let api_key = resolve_api_key(config.api_key.as_deref())?;
        let client = OpenAiClient::new(
            &api_key,
            &config.base_url,
            config.model.clone(),
            config.store,
            config.max_retries,
        )?;
        info!(model = %config.model, store = config.store, "OpenAI model initialized");
        Ok(Self { client })
    }

    pub fn with_client(client: OpenAiClient) -> Self {
        Self { client }
    }
}

fn resolve_api_key(configured: Option<&str>) -> Result<String, PantryError> {
    if let Some(key) = configured.filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            PantryError::Config(
                "no OpenAI API key: set openai.api_key or OPENAI_API_KEY".to_string(),
            )
        })
}

#[async_trait]
impl PluginAdapter for OpenAiModel {
    fn name(&self) -> &str {
        "openai"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    async fn detect_language(&self, text: &str) -> Result<String, PantryError> {
        let answer = self.client.respond(&prompts::language_detection(text)).await?;
        let code = answer.trim().to_lowercase();
        debug!(detected = %code, "language detected");
        Ok(code)
    }

    async fn detect_product_list(&self, text: &str) -> Result<ProductListDetection, PantryError> {
        let answer = self
            .client
            .respond(&prompts::product_list_detection(text))
            .await?;
        let detection = parse::detection(&answer)?;
        debug!(
            is_product_list = detection.is_product_list,
            confidence = detection.confidence,
            items = detection.detected_items_count,
            "product list detection"
        );
        Ok(detection)
    }

    async fn parse_items(
        &self,
        text: &str,
        lang: Locale,
        user: UserId,
    ) -> Result<Vec<ParsedItem>, PantryError> {
        let answer = self.client.respond(&prompts::item_parsing(text, lang)).await?;
        let items = parse::items(&answer)?;
        debug!(user_id = %user, lang = %lang, count = items.len(), "items parsed");
        Ok(items)
    }

    fn honors_store(&self) -> bool {
        self.client.store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn model_answering(text: &str) -> (MockServer, OpenAiModel) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "output": [{"type": "message", "role": "assistant",
                            "content": [{"type": "output_text", "text": text}]}]
            })))
            .mount(&server)
            .await;
        let client = OpenAiClient::new("k", &server.uri(), "gpt-5-nano".into(), false, 0).unwrap();
        (server, OpenAiModel::with_client(client))
    }

    #[tokio::test]
    async fn language_answer_is_normalized() {
        let (_server, model) = model_answering("  UK\n").await;
        assert_eq!(model.detect_language("привіт").await.unwrap(), "uk");
        assert!(!model.honors_store());
    }

    #[tokio::test]
    async fn parse_items_through_http() {
        let (_server, model) = model_answering(
            "[{\"standardized_name\":\"bread\",\"quantity_value\":2,\"quantity_unit\":\"loaves\",\"confidence_score\":0.95}]",
        )
        .await;
        let items = model
            .parse_items("bread 2 loaves", Locale::En, UserId::new())
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity_value, Some(2.0));
    }

    #[test]
    fn configured_key_wins() {
        assert_eq!(resolve_api_key(Some("sk-config")).unwrap(), "sk-config");
    }
}
