// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles an orchestrator over mock collaborators and an
//! in-memory store. Events are handled inline, one turn per call, so tests
//! observe the outbound log deterministically.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use pantry_agent::{Orchestrator, Services};
use pantry_ai::{AiGateway, GatewaySettings};
use pantry_config::PantryConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::{ReceiptAnalyzer, SpeechToText, UserDirectory};
use pantry_core::types::{
    FileRef, InboundEvent, InboundKind, MessageContent, MessageRef, Sender, User,
};
use pantry_state::StateStore;
use pantry_storage::MemoryStore;

use crate::mock_media::{MockReceiptAnalyzer, MockSpeech};
use crate::mock_model::MockLanguageModel;
use crate::mock_transport::MockTransport;

/// Telegram id of the harness's default, pre-authorized user.
pub const DEFAULT_TELEGRAM_ID: i64 = 1001;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    config: PantryConfig,
    model: Option<Arc<MockLanguageModel>>,
    speech: Option<Arc<MockSpeech>>,
    analyzer: Option<Arc<MockReceiptAnalyzer>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        let mut config = PantryConfig::default();
        config.telegram.allowed_users = vec![DEFAULT_TELEGRAM_ID.to_string()];
        Self {
            config,
            model: None,
            speech: None,
            analyzer: None,
        }
    }

    /// Replace the configuration. The default user is added to
    /// `allowed_users` unless the configuration already lists users.
    pub fn with_config(mut self, mut config: PantryConfig) -> Self {
        if config.telegram.allowed_users.is_empty() {
            config.telegram.allowed_users = vec![DEFAULT_TELEGRAM_ID.to_string()];
        }
        self.config = config;
        self
    }

    /// Use a pre-scripted language model.
    pub fn with_model(mut self, model: Arc<MockLanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Enable voice messages.
    pub fn with_speech(mut self, speech: MockSpeech) -> Self {
        self.speech = Some(Arc::new(speech));
        self
    }

    /// Enable receipt uploads.
    pub fn with_receipts(mut self, analyzer: MockReceiptAnalyzer) -> Self {
        self.analyzer = Some(Arc::new(analyzer));
        self
    }

    /// Build the test harness.
    pub async fn build(self) -> Result<TestHarness, PantryError> {
        let transport = Arc::new(MockTransport::new());
        let model = self
            .model
            .unwrap_or_else(|| Arc::new(MockLanguageModel::new()));
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(StateStore::new());
        let gateway = Arc::new(AiGateway::new(
            model.clone(),
            GatewaySettings::from_config(&self.config),
        ));

        let services = Services {
            transport: transport.clone(),
            lists: store.clone(),
            directory: store.clone(),
            receipts: store.clone(),
            gateway,
            speech: self
                .speech
                .clone()
                .map(|s| s as Arc<dyn SpeechToText>),
            analyzer: self
                .analyzer
                .map(|a| a as Arc<dyn ReceiptAnalyzer>),
            state: state.clone(),
        };
        let orchestrator = Orchestrator::new(services, &self.config);

        Ok(TestHarness {
            transport,
            model,
            speech: self.speech,
            store,
            state,
            orchestrator,
            config: self.config,
            next_message: AtomicU64::new(1),
        })
    }
}

/// A complete orchestrator stack for integration tests.
pub struct TestHarness {
    pub transport: Arc<MockTransport>,
    pub model: Arc<MockLanguageModel>,
    pub speech: Option<Arc<MockSpeech>>,
    pub store: Arc<MemoryStore>,
    pub state: Arc<StateStore>,
    pub orchestrator: Orchestrator,
    pub config: PantryConfig,
    next_message: AtomicU64,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Build with defaults: no speech, no receipts, unscripted model.
    pub async fn new() -> Result<TestHarness, PantryError> {
        Self::builder().build().await
    }

    fn next_id(&self) -> u64 {
        self.next_message.fetch_add(1, Ordering::SeqCst)
    }

    fn sender(telegram_id: i64) -> Sender {
        Sender {
            telegram_id,
            username: Some(format!("user{telegram_id}")),
            first_name: format!("Tester {telegram_id}"),
            language_code: Some("en".to_string()),
        }
    }

    fn message_event(&self, telegram_id: i64, content: MessageContent) -> InboundEvent {
        InboundEvent {
            chat_id: telegram_id,
            sender: Self::sender(telegram_id),
            kind: InboundKind::Message {
                message_id: self.next_id() as i32,
                content,
            },
            timestamp: Utc::now(),
        }
    }

    /// Handle one event as a full turn.
    pub async fn handle(&self, event: InboundEvent) -> Result<(), PantryError> {
        self.orchestrator.handle(event).await
    }

    /// Send a text message from the default user.
    pub async fn send_text(&self, text: &str) -> Result<(), PantryError> {
        self.send_text_as(DEFAULT_TELEGRAM_ID, text).await
    }

    pub async fn send_text_as(&self, telegram_id: i64, text: &str) -> Result<(), PantryError> {
        let event = self.message_event(telegram_id, MessageContent::Text(text.to_string()));
        self.handle(event).await
    }

    /// Send a voice message; the configured speech mock decides the transcript.
    pub async fn send_voice(&self) -> Result<(), PantryError> {
        let file_id = format!("voice-{}", self.next_id());
        self.transport.put_file(&file_id, vec![0u8; 16]).await;
        let event = self.message_event(
            DEFAULT_TELEGRAM_ID,
            MessageContent::Voice {
                file: FileRef {
                    file_id,
                    size: Some(16),
                },
                duration_secs: Some(2),
                mime_type: Some("audio/ogg".to_string()),
            },
        );
        self.handle(event).await
    }

    /// Send a photo; the configured receipt analyzer decides the outcome.
    pub async fn send_photo(&self) -> Result<(), PantryError> {
        let file_id = format!("photo-{}", self.next_id());
        self.transport.put_file(&file_id, vec![0xFF, 0xD8, 0xFF]).await;
        let event = self.message_event(
            DEFAULT_TELEGRAM_ID,
            MessageContent::Photo {
                file: FileRef {
                    file_id,
                    size: Some(3),
                },
                caption: None,
            },
        );
        self.handle(event).await
    }

    /// Press a button as the default user.
    ///
    /// The callback carries the most recent message whose keyboard holds
    /// `token`, like a real client would.
    pub async fn press(&self, token: &str) -> Result<(), PantryError> {
        let message = self.message_with_token(token).await;
        self.press_on(token, message).await
    }

    /// Press a button with an explicit (or missing) source message.
    pub async fn press_on(
        &self,
        token: &str,
        message: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let event = InboundEvent {
            chat_id: DEFAULT_TELEGRAM_ID,
            sender: Self::sender(DEFAULT_TELEGRAM_ID),
            kind: InboundKind::Callback {
                callback_id: format!("cb-{}", self.next_id()),
                data: token.to_string(),
                message,
            },
            timestamp: Utc::now(),
        };
        self.handle(event).await
    }

    /// The most recent message whose keyboard holds `token`.
    pub async fn message_with_token(&self, token: &str) -> Option<MessageRef> {
        self.transport
            .outbound()
            .await
            .iter()
            .rev()
            .find(|o| o.keyboard().is_some_and(|k| k.tokens().any(|t| t == token)))
            .and_then(|o| o.message())
    }

    /// The first token on the last screen that starts with `prefix`.
    pub async fn token_starting_with(&self, prefix: &str) -> Option<String> {
        let screen = self.transport.last_screen().await?;
        screen
            .keyboard()?
            .tokens()
            .find(|t| t.starts_with(prefix))
            .map(str::to_string)
    }

    /// Text of the last screen sent or edited.
    pub async fn last_text(&self) -> String {
        self.transport
            .last_screen()
            .await
            .and_then(|o| o.text().map(str::to_string))
            .unwrap_or_default()
    }

    /// The stored default user, if any turn has run.
    pub async fn user(&self) -> Result<Option<User>, PantryError> {
        self.store.user_by_telegram_id(DEFAULT_TELEGRAM_ID).await
    }
}
