// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech-to-text collaborator.

use async_trait::async_trait;

use crate::error::PantryError;
use crate::traits::adapter::PluginAdapter;

/// One audio chunk submitted for transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub session_id: String,
    pub chunk_id: u32,
    /// `None` forces language auto-detection.
    pub language: Option<String>,
    pub target_language: Option<String>,
    pub audio: Vec<u8>,
    pub filename: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub raw_text: String,
    pub translation: Option<String>,
    pub detected_language: Option<String>,
    pub processing_time_secs: f64,
}

#[async_trait]
pub trait SpeechToText: PluginAdapter {
    async fn process(&self, request: SpeechRequest) -> Result<Transcript, PantryError>;
}
