// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock speech-to-text and receipt analyzer.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use pantry_core::error::PantryError;
use pantry_core::traits::{
    PluginAdapter, ReceiptAnalyzer, SpeechRequest, SpeechToText, Transcript,
};
use pantry_core::types::{HealthStatus, ReceiptData};

/// Speech-to-text that returns one fixed transcript or fails.
pub struct MockSpeech {
    outcome: Result<Transcript, String>,
    calls: AtomicUsize,
}

impl MockSpeech {
    /// Recognizes `text` in `language` for every request.
    pub fn saying(text: &str, language: Option<&str>) -> Self {
        Self::with(Ok(Transcript {
            raw_text: text.to_string(),
            detected_language: language.map(str::to_string),
            processing_time_secs: 0.1,
            ..Transcript::default()
        }))
    }

    /// Recognizes nothing.
    pub fn silent() -> Self {
        Self::saying("   ", None)
    }

    /// Fails every request with a provider error.
    pub fn failing() -> Self {
        Self::with(Err("speech service down".to_string()))
    }

    fn with(outcome: Result<Transcript, String>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PluginAdapter for MockSpeech {
    fn name(&self) -> &str {
        "mock-speech"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl SpeechToText for MockSpeech {
    async fn process(&self, _request: SpeechRequest) -> Result<Transcript, PantryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(|message| PantryError::Provider {
            message,
            source: None,
        })
    }
}

/// Receipt analyzer that returns fixed data or fails.
pub struct MockReceiptAnalyzer {
    outcome: Result<ReceiptData, String>,
}

impl MockReceiptAnalyzer {
    pub fn returning(data: ReceiptData) -> Self {
        Self { outcome: Ok(data) }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err("analysis failed".to_string()),
        }
    }
}

#[async_trait]
impl PluginAdapter for MockReceiptAnalyzer {
    fn name(&self) -> &str {
        "mock-receipts"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ReceiptAnalyzer for MockReceiptAnalyzer {
    async fn analyze(
        &self,
        _document: Vec<u8>,
        _content_type: &str,
    ) -> Result<ReceiptData, PantryError> {
        self.outcome.clone().map_err(|message| PantryError::Provider {
            message,
            source: None,
        })
    }
}
