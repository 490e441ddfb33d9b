// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Responses API.
//!
//! Handles authentication, request construction and retry of transient
//! errors (429, 500, 503).

use std::time::Duration;

use pantry_core::PantryError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::openai::types::{
    ApiErrorResponse, InputMessage, Reasoning, ResponsesRequest, ResponsesResponse,
};

const REASONING_EFFORT: &str = "low";

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    store: bool,
    max_retries: u32,
}

impl OpenAiClient {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: String,
        store: bool,
        max_retries: u32,
    ) -> Result<Self, PantryError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| PantryError::Config(format!("invalid API key header value: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| PantryError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            store,
            max_retries,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn store(&self) -> bool {
        self.store
    }

    fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Sends one user prompt and returns the assistant's text.
    pub async fn respond(&self, prompt: &str) -> Result<String, PantryError> {
        let request = ResponsesRequest {
            model: self.model.clone(),
            input: vec![InputMessage::user(prompt)],
            store: self.store.then_some(true),
            reasoning: Some(Reasoning {
                effort: REASONING_EFFORT.into(),
            }),
        };
        let response = self.create_response(&request).await?;
        response
            .assistant_text()
            .map(str::to_owned)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| PantryError::Provider {
                message: "no assistant output in response".into(),
                source: None,
            })
    }

    /// Posts a request, retrying transient failures after a one second pause.
    pub async fn create_response(
        &self,
        request: &ResponsesRequest,
    ) -> Result<ResponsesResponse, PantryError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying responses request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(self.endpoint())
                .json(request)
                .send()
                .await
                .map_err(|e| PantryError::Provider {
                    message: format!("HTTP request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, model = %request.model, "responses API answered");

            if status.is_success() {
                let body = response.text().await.map_err(|e| PantryError::Provider {
                    message: format!("failed to read response body: {e}"),
                    source: Some(Box::new(e)),
                })?;
                return serde_json::from_str(&body).map_err(|e| PantryError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                });
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                last_error = Some(PantryError::Provider {
                    message: format!("API returned {status}: {body}"),
                    source: None,
                });
                continue;
            }

            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(PantryError::Provider {
                message,
                source: None,
            });
        }

        Err(last_error.unwrap_or_else(|| PantryError::Provider {
            message: "responses request failed after retries".into(),
            source: None,
        }))
    }
}

fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
