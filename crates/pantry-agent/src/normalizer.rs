// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns inbound modalities into text or receipt data.
//!
//! The normalizer never touches persistent state. Every collaborator call
//! runs under its own deadline, and dropping the returned future abandons
//! the call in flight.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use pantry_config::PantryConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::{ChatTransport, ReceiptAnalyzer, SpeechRequest, SpeechToText};
use pantry_core::types::{FileRef, Locale, MessageContent, ReceiptData};
use tracing::{debug, info};
use uuid::Uuid;

/// Extra time on top of the analyzer's polling budget for upload and download.
const RECEIPT_TRANSFER_ALLOWANCE: Duration = Duration::from_secs(30);

/// Normalized text plus the language the speech service heard, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: Option<Locale>,
}

impl Utterance {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Text(Utterance),
    /// Photos and documents never reach the intent classifier.
    Receipt(ReceiptData),
}

/// Name and content type recorded for a receipt upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMeta {
    pub file_name: String,
    pub content_type: String,
}

impl UploadMeta {
    /// `None` for modalities that are not uploads.
    pub fn of(content: &MessageContent) -> Result<Option<UploadMeta>, PantryError> {
        match content {
            MessageContent::Photo { file, .. } => Ok(Some(UploadMeta {
                file_name: format!("{}.jpg", file.file_id),
                content_type: "image/jpeg".to_string(),
            })),
            MessageContent::Document {
                file,
                filename,
                mime_type,
            } => {
                let content_type = mime_type
                    .clone()
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                if !(content_type.starts_with("image/") || content_type == "application/pdf") {
                    return Err(PantryError::Validation(format!(
                        "unsupported receipt type `{content_type}`"
                    )));
                }
                Ok(Some(UploadMeta {
                    file_name: filename.clone().unwrap_or_else(|| file.file_id.clone()),
                    content_type,
                }))
            }
            MessageContent::Text(_) | MessageContent::Voice { .. } => Ok(None),
        }
    }
}

pub struct Normalizer {
    transport: Arc<dyn ChatTransport>,
    speech: Option<Arc<dyn SpeechToText>>,
    analyzer: Option<Arc<dyn ReceiptAnalyzer>>,
    speech_timeout: Duration,
    receipt_timeout: Duration,
}

impl Normalizer {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        speech: Option<Arc<dyn SpeechToText>>,
        analyzer: Option<Arc<dyn ReceiptAnalyzer>>,
        speech_timeout: Duration,
        receipt_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            speech,
            analyzer,
            speech_timeout,
            receipt_timeout,
        }
    }

    pub fn from_config(
        transport: Arc<dyn ChatTransport>,
        speech: Option<Arc<dyn SpeechToText>>,
        analyzer: Option<Arc<dyn ReceiptAnalyzer>>,
        config: &PantryConfig,
    ) -> Self {
        Self::new(
            transport,
            speech,
            analyzer,
            config.speech.timeout(),
            config.receipts.poll_budget() + RECEIPT_TRANSFER_ALLOWANCE,
        )
    }

    pub fn receipts_enabled(&self) -> bool {
        self.analyzer.is_some()
    }

    pub async fn normalize(&self, content: &MessageContent) -> Result<Normalized, PantryError> {
        match content {
            MessageContent::Text(text) => Ok(Normalized::Text(Utterance::typed(text.as_str()))),
            MessageContent::Voice {
                file, mime_type, ..
            } => self
                .transcribe(file, mime_type.as_deref())
                .await
                .map(Normalized::Text),
            MessageContent::Photo { file, .. } | MessageContent::Document { file, .. } => {
                let meta = UploadMeta::of(content)?.ok_or_else(|| {
                    PantryError::Internal("upload without metadata".to_string())
                })?;
                self.analyze(file, &meta.content_type)
                    .await
                    .map(Normalized::Receipt)
            }
        }
    }

    async fn transcribe(
        &self,
        file: &FileRef,
        mime_type: Option<&str>,
    ) -> Result<Utterance, PantryError> {
        let speech = self.speech.as_ref().ok_or_else(|| PantryError::Provider {
            message: "speech-to-text is not configured".to_string(),
            source: None,
        })?;

        let transcript = with_deadline(self.speech_timeout, async {
            let audio = self.transport.download(file).await?;
            debug!(bytes = audio.len(), "voice payload downloaded");
            speech
                .process(SpeechRequest {
                    session_id: Uuid::new_v4().to_string(),
                    chunk_id: 0,
                    language: None,
                    target_language: None,
                    audio,
                    filename: voice_filename(mime_type).to_string(),
                })
                .await
        })
        .await?;

        let text = transcript.raw_text.trim();
        if text.is_empty() {
            return Err(PantryError::EmptyResult(
                "no speech recognized in voice message".to_string(),
            ));
        }
        let language = transcript
            .detected_language
            .as_deref()
            .filter(|code| !code.trim().is_empty())
            .map(Locale::coerce);
        info!(
            chars = text.chars().count(),
            language = ?language,
            secs = transcript.processing_time_secs,
            "voice transcribed"
        );
        Ok(Utterance {
            text: text.to_string(),
            language,
        })
    }

    async fn analyze(&self, file: &FileRef, content_type: &str) -> Result<ReceiptData, PantryError> {
        let analyzer = self.analyzer.as_ref().ok_or_else(|| PantryError::Provider {
            message: "receipt analysis is not configured".to_string(),
            source: None,
        })?;
        with_deadline(self.receipt_timeout, async {
            let document = self.transport.download(file).await?;
            debug!(bytes = document.len(), content_type, "receipt payload downloaded");
            analyzer.analyze(document, content_type).await
        })
        .await
    }
}

async fn with_deadline<T>(
    deadline: Duration,
    call: impl Future<Output = Result<T, PantryError>>,
) -> Result<T, PantryError> {
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| PantryError::Timeout { duration: deadline })?
}

fn voice_filename(mime_type: Option<&str>) -> &'static str {
    match mime_type {
        Some("audio/mpeg") => "voice.mp3",
        Some("audio/mp4") | Some("audio/m4a") => "voice.m4a",
        Some("audio/wav") | Some("audio/x-wav") => "voice.wav",
        _ => "voice.ogg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> FileRef {
        FileRef {
            file_id: "abc".into(),
            size: None,
        }
    }

    #[test]
    fn photos_are_jpeg_uploads() {
        let meta = UploadMeta::of(&MessageContent::Photo {
            file: file(),
            caption: None,
        })
        .unwrap()
        .unwrap();
        assert_eq!(meta.content_type, "image/jpeg");
        assert_eq!(meta.file_name, "abc.jpg");
    }

    #[test]
    fn documents_must_be_images_or_pdf() {
        let doc = |mime: &str| MessageContent::Document {
            file: file(),
            filename: Some("r.bin".into()),
            mime_type: Some(mime.into()),
        };
        assert!(UploadMeta::of(&doc("application/pdf")).unwrap().is_some());
        assert!(UploadMeta::of(&doc("image/png")).unwrap().is_some());
        assert!(matches!(
            UploadMeta::of(&doc("application/zip")),
            Err(PantryError::Validation(_))
        ));
        assert!(
            UploadMeta::of(&MessageContent::Text("hi".into()))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn voice_filenames_follow_mime() {
        assert_eq!(voice_filename(Some("audio/mpeg")), "voice.mp3");
        assert_eq!(voice_filename(None), "voice.ogg");
    }
}
