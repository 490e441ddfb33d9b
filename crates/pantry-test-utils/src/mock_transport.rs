// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat transport for deterministic testing.
//!
//! `MockTransport` implements `ChatTransport` with injectable inbound events
//! and a captured log of everything the bot sent, edited, deleted or
//! answered.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use pantry_core::error::PantryError;
use pantry_core::traits::{ChatTransport, PluginAdapter};
use pantry_core::types::{FileRef, HealthStatus, InboundEvent, Keyboard, MessageRef};

/// One outbound call captured by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Send {
        message: MessageRef,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Edit {
        message: MessageRef,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Delete(MessageRef),
    Answer {
        callback_id: String,
        notice: Option<String>,
    },
}

impl Outbound {
    /// Text of a send or edit.
    pub fn text(&self) -> Option<&str> {
        match self {
            Outbound::Send { text, .. } | Outbound::Edit { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Keyboard of a send or edit.
    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Outbound::Send { keyboard, .. } | Outbound::Edit { keyboard, .. } => {
                keyboard.as_ref()
            }
            _ => None,
        }
    }

    /// The message a send produced or an edit/delete touched.
    pub fn message(&self) -> Option<MessageRef> {
        match self {
            Outbound::Send { message, .. } | Outbound::Edit { message, .. } => Some(*message),
            Outbound::Delete(message) => Some(*message),
            Outbound::Answer { .. } => None,
        }
    }
}

/// A mock messaging transport for testing.
///
/// - **inbound**: events injected via `inject()` are returned by `receive()`
/// - **outbound**: every send, edit, delete and callback answer is captured
///
/// Messages marked with `forget()` behave like messages the platform no
/// longer has: edits and deletes of them fail with `NotFound`.
pub struct MockTransport {
    inbound: Arc<Mutex<VecDeque<InboundEvent>>>,
    outbound: Arc<Mutex<Vec<Outbound>>>,
    notify: Arc<Notify>,
    next_id: AtomicI32,
    gone: Arc<Mutex<HashSet<MessageRef>>>,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    closed: AtomicBool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            outbound: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            next_id: AtomicI32::new(1),
            gone: Arc::new(Mutex::new(HashSet::new())),
            files: Arc::new(Mutex::new(HashMap::new())),
            closed: AtomicBool::new(false),
        }
    }

    /// Inject an inbound event; the next `receive()` returns it.
    pub async fn inject(&self, event: InboundEvent) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// Make `receive()` fail with a "closed" channel error once the queue drains.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Register the bytes `download()` returns for `file_id`.
    pub async fn put_file(&self, file_id: &str, bytes: Vec<u8>) {
        self.files.lock().await.insert(file_id.to_string(), bytes);
    }

    /// Make later edits and deletes of `message` fail with `NotFound`.
    pub async fn forget(&self, message: MessageRef) {
        self.gone.lock().await.insert(message);
    }

    /// Everything captured so far, in call order.
    pub async fn outbound(&self) -> Vec<Outbound> {
        self.outbound.lock().await.clone()
    }

    /// Texts of sends and edits, in call order.
    pub async fn texts(&self) -> Vec<String> {
        self.outbound
            .lock()
            .await
            .iter()
            .filter_map(|o| o.text().map(str::to_string))
            .collect()
    }

    /// The last send or edit.
    pub async fn last_screen(&self) -> Option<Outbound> {
        self.outbound
            .lock()
            .await
            .iter()
            .rev()
            .find(|o| o.text().is_some())
            .cloned()
    }

    /// Count of `Send` calls.
    pub async fn sent_count(&self) -> usize {
        self.outbound
            .lock()
            .await
            .iter()
            .filter(|o| matches!(o, Outbound::Send { .. }))
            .count()
    }

    pub async fn clear(&self) {
        self.outbound.lock().await.clear();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTransport {
    fn name(&self) -> &str {
        "mock-transport"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PantryError> {
        self.close();
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn connect(&mut self) -> Result<(), PantryError> {
        Ok(())
    }

    async fn receive(&self) -> Result<InboundEvent, PantryError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }
            if self.closed.load(Ordering::SeqCst) {
                return Err(PantryError::Channel {
                    message: "mock transport closed".to_string(),
                    source: None,
                });
            }
            self.notify.notified().await;
        }
    }

    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageRef, PantryError> {
        let message = MessageRef::new(chat_id, self.next_id.fetch_add(1, Ordering::SeqCst));
        self.outbound.lock().await.push(Outbound::Send {
            message,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(message)
    }

    async fn edit(
        &self,
        target: MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), PantryError> {
        if self.gone.lock().await.contains(&target) {
            return Err(PantryError::not_found("message", target.to_string()));
        }
        self.outbound.lock().await.push(Outbound::Edit {
            message: target,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn delete(&self, target: MessageRef) -> Result<(), PantryError> {
        if !self.gone.lock().await.insert(target) {
            return Err(PantryError::not_found("message", target.to_string()));
        }
        self.outbound.lock().await.push(Outbound::Delete(target));
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        notice: Option<&str>,
    ) -> Result<(), PantryError> {
        self.outbound.lock().await.push(Outbound::Answer {
            callback_id: callback_id.to_string(),
            notice: notice.map(str::to_string),
        });
        Ok(())
    }

    async fn file_link(&self, file: &FileRef) -> Result<String, PantryError> {
        Ok(format!("mock://files/{}", file.file_id))
    }

    async fn download(&self, file: &FileRef) -> Result<Vec<u8>, PantryError> {
        self.files
            .lock()
            .await
            .get(&file.file_id)
            .cloned()
            .ok_or_else(|| PantryError::not_found("file", file.file_id.clone()))
    }
}
