// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Telegram chat transport for Pantry.
//!
//! Implements [`ChatTransport`] for the Telegram Bot API via teloxide:
//! long polling for messages and button presses, HTML-formatted replies
//! with inline keyboards, in-place edits and file downloads.

pub mod handler;

use async_trait::async_trait;
use pantry_config::model::TelegramConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::{ChatTransport, PluginAdapter};
use pantry_core::types::{
    FileRef, HealthStatus, InboundEvent, Keyboard, MessageRef,
};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, ChatId, FileId, MessageId, ParseMode};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

const INBOUND_CAPACITY: usize = 100;

/// How a failed edit or delete should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOutcome {
    /// The message already shows the requested content.
    Unchanged,
    /// The target message no longer exists.
    Missing,
    Failed,
}

/// Classifies a Bot API error message.
pub fn classify(error: &str) -> ApiOutcome {
    let error = error.to_ascii_lowercase();
    if error.contains("message is not modified") {
        ApiOutcome::Unchanged
    } else if error.contains("message to edit not found")
        || error.contains("message to delete not found")
        || error.contains("message can't be edited")
    {
        ApiOutcome::Missing
    } else {
        ApiOutcome::Failed
    }
}

fn channel_error(action: &str, e: teloxide::RequestError) -> PantryError {
    metrics::counter!("pantry_telegram_api_errors_total", "action" => action.to_string())
        .increment(1);
    PantryError::Channel {
        message: format!("failed to {action}: {e}"),
        source: Some(Box::new(e)),
    }
}

fn message_id(target: MessageRef) -> (ChatId, MessageId) {
    (ChatId(target.chat_id), MessageId(target.message_id))
}

/// Telegram transport implementing [`ChatTransport`].
pub struct TelegramTransport {
    bot: Bot,
    inbound_rx: tokio::sync::Mutex<mpsc::Receiver<InboundEvent>>,
    inbound_tx: mpsc::Sender<InboundEvent>,
    polling_handle: Option<tokio::task::JoinHandle<()>>,
}

impl TelegramTransport {
    /// Creates a new Telegram transport.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: &TelegramConfig) -> Result<Self, PantryError> {
        let token = config.bot_token.as_deref().ok_or_else(|| {
            PantryError::Config("telegram.bot_token is required for the Telegram transport".into())
        })?;
        if token.trim().is_empty() {
            return Err(PantryError::Config(
                "telegram.bot_token cannot be empty".into(),
            ));
        }

        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_CAPACITY);
        Ok(Self {
            bot: Bot::new(token),
            inbound_rx: tokio::sync::Mutex::new(inbound_rx),
            inbound_tx,
            polling_handle: None,
        })
    }

    async fn forward(tx: &mpsc::Sender<InboundEvent>, event: InboundEvent) {
        if tx.send(event).await.is_err() {
            warn!("inbound channel closed, dropping update");
        }
    }
}

#[async_trait]
impl PluginAdapter for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        match self.bot.get_me().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Telegram bot unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), PantryError> {
        debug!("Telegram transport shutting down");
        if let Some(handle) = &self.polling_handle {
            handle.abort();
        }
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn connect(&mut self) -> Result<(), PantryError> {
        if self.polling_handle.is_some() {
            return Ok(());
        }

        let bot = self.bot.clone();
        let message_tx = self.inbound_tx.clone();
        let callback_tx = self.inbound_tx.clone();
        info!("starting Telegram long polling");

        let handle = tokio::spawn(async move {
            let handler = dptree::entry()
                .branch(Update::filter_message().endpoint(move |msg: Message| {
                    let tx = message_tx.clone();
                    async move {
                        if !handler::is_dm(&msg) {
                            debug!(chat_id = msg.chat.id.0, "ignoring non-DM message");
                            return respond(());
                        }
                        let Some(content) = handler::message_content(&msg) else {
                            debug!(msg_id = msg.id.0, "ignoring unsupported message type");
                            return respond(());
                        };
                        match handler::message_event(&msg, content) {
                            Some(event) => Self::forward(&tx, event).await,
                            None => debug!(msg_id = msg.id.0, "ignoring message without sender"),
                        }
                        respond(())
                    }
                }))
                .branch(Update::filter_callback_query().endpoint(
                    move |query: CallbackQuery| {
                        let tx = callback_tx.clone();
                        async move {
                            match handler::callback_event(&query) {
                                Some(event) => Self::forward(&tx, event).await,
                                None => debug!("ignoring callback without data"),
                            }
                            respond(())
                        }
                    },
                ));

            Dispatcher::builder(bot, handler)
                .default_handler(|_| async {})
                .build()
                .dispatch()
                .await;
        });

        self.polling_handle = Some(handle);
        Ok(())
    }

    async fn receive(&self) -> Result<InboundEvent, PantryError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| PantryError::Channel {
            message: "Telegram inbound channel closed".into(),
            source: None,
        })
    }

    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, PantryError> {
        let mut request = self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard.filter(|k| !k.is_empty()) {
            request = request.reply_markup(handler::markup(keyboard));
        }
        let sent = request.await.map_err(|e| channel_error("send message", e))?;
        Ok(MessageRef::new(sent.chat.id.0, sent.id.0))
    }

    async fn edit(
        &self,
        target: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), PantryError> {
        let (chat, id) = message_id(target);
        let mut request = self
            .bot
            .edit_message_text(chat, id, text)
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard.filter(|k| !k.is_empty()) {
            request = request.reply_markup(handler::markup(keyboard));
        }
        match request.await {
            Ok(_) => Ok(()),
            Err(e) => match classify(&e.to_string()) {
                ApiOutcome::Unchanged => Ok(()),
                ApiOutcome::Missing => Err(PantryError::not_found("message", target.to_string())),
                ApiOutcome::Failed => Err(channel_error("edit message", e)),
            },
        }
    }

    async fn delete(&self, target: MessageRef) -> Result<(), PantryError> {
        let (chat, id) = message_id(target);
        match self.bot.delete_message(chat, id).await {
            Ok(_) => Ok(()),
            Err(e) => match classify(&e.to_string()) {
                ApiOutcome::Missing => Err(PantryError::not_found("message", target.to_string())),
                _ => Err(channel_error("delete message", e)),
            },
        }
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        notice: Option<&str>,
    ) -> Result<(), PantryError> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if let Some(notice) = notice {
            request = request.text(notice);
        }
        request
            .await
            .map_err(|e| channel_error("answer callback", e))?;
        Ok(())
    }

    async fn file_link(&self, file: &FileRef) -> Result<String, PantryError> {
        let meta = self
            .bot
            .get_file(FileId(file.file_id.clone()))
            .await
            .map_err(|e| channel_error("get file info", e))?;
        Ok(format!(
            "https://api.telegram.org/file/bot{}/{}",
            self.bot.token(),
            meta.path
        ))
    }

    async fn download(&self, file: &FileRef) -> Result<Vec<u8>, PantryError> {
        let meta = self
            .bot
            .get_file(FileId(file.file_id.clone()))
            .await
            .map_err(|e| channel_error("get file info", e))?;

        let mut buf = Vec::new();
        self.bot
            .download_file(&meta.path, &mut buf)
            .await
            .map_err(|e| {
                error!(file_id = %file.file_id, error = %e, "download failed");
                PantryError::Channel {
                    message: format!("failed to download file: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;
        debug!(file_id = %file.file_id, size = buf.len(), "downloaded file from Telegram");
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> TelegramConfig {
        TelegramConfig {
            bot_token: token.map(str::to_string),
            ..TelegramConfig::default()
        }
    }

    #[test]
    fn new_requires_bot_token() {
        assert!(TelegramTransport::new(&config(None)).is_err());
    }

    #[test]
    fn new_rejects_empty_token() {
        assert!(TelegramTransport::new(&config(Some("  "))).is_err());
    }

    #[test]
    fn new_accepts_valid_token() {
        let transport =
            TelegramTransport::new(&config(Some("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11")))
                .unwrap();
        assert_eq!(transport.name(), "telegram");
    }

    #[test]
    fn api_errors_are_classified() {
        assert_eq!(
            classify("Bad Request: message is not modified: specified new message content and reply markup are exactly the same"),
            ApiOutcome::Unchanged
        );
        assert_eq!(classify("Bad Request: message to edit not found"), ApiOutcome::Missing);
        assert_eq!(classify("Bad Request: message to delete not found"), ApiOutcome::Missing);
        assert_eq!(classify("Forbidden: bot was blocked by the user"), ApiOutcome::Failed);
    }
}
