// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the chunked speech-to-text service.
//!
//! Each voice message is sent as a single multipart chunk to
//! `{base_url}/chunk/`.

use std::time::Duration;

use async_trait::async_trait;
use pantry_config::model::SpeechConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::{PluginAdapter, SpeechRequest, SpeechToText, Transcript};
use pantry_core::types::{HealthStatus};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct ChunkResponse {
    #[serde(default)]
    raw_text: String,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    processing_time_s: f64,
    #[serde(default)]
    detected_language: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SpeechClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SpeechClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PantryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PantryError::Provider {
                message: format!("failed to build speech HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Builds a client from config. Returns `Ok(None)` when no service is configured.
    pub fn from_config(config: &SpeechConfig) -> Result<Option<Self>, PantryError> {
        config
            .base_url
            .as_deref()
            .map(|url| Self::new(url, config.timeout()))
            .transpose()
    }

    fn endpoint(&self) -> String {
        format!("{}/chunk/", self.base_url)
    }
}

#[async_trait]
impl PluginAdapter for SpeechClient {
    fn name(&self) -> &str {
        "speech"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SpeechToText for SpeechClient {
    async fn process(&self, request: SpeechRequest) -> Result<Transcript, PantryError> {
        let audio_len = request.audio.len();
        let part = Part::bytes(request.audio).file_name(request.filename);
        let form = Form::new()
            .text("session_id", request.session_id)
            .text("chunk_id", request.chunk_id.to_string())
            .text("language", request.language.unwrap_or_default())
            .text("target_language", request.target_language.unwrap_or_default())
            .part("file", part);

        debug!(bytes = audio_len, "sending audio chunk for transcription");
        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PantryError::Timeout {
                        duration: self.timeout,
                    }
                } else {
                    PantryError::Provider {
                        message: format!("speech request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "speech service returned an error");
            return Err(PantryError::Provider {
                message: format!("speech service error ({status}): {body}"),
                source: None,
            });
        }

        let chunk: ChunkResponse = response.json().await.map_err(|e| PantryError::Provider {
            message: format!("failed to decode speech response: {e}"),
            source: Some(Box::new(e)),
        })?;

        Ok(Transcript {
            raw_text: chunk.raw_text.trim().to_string(),
            translation: chunk.translation.filter(|t| !t.trim().is_empty()),
            detected_language: chunk.detected_language.filter(|l| !l.is_empty()),
            processing_time_secs: chunk.processing_time_s,
        })
    }
}
