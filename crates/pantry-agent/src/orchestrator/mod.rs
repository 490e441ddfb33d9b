// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The workflow orchestrator.
//!
//! [`Orchestrator::handle`] processes one inbound event as one turn: it
//! resolves the user, takes the user's turn lock, routes the event and
//! renders any error. Handlers return typed errors; only this module turns
//! them into user-visible text.

mod callbacks;
mod commands;
mod dedupe;
mod items;
mod lists;
mod messages;
mod navigation;
mod products;
mod receipts;

use std::sync::Arc;

use pantry_ai::AiGateway;
use pantry_config::PantryConfig;
use pantry_config::model::{ListsConfig, TelegramConfig};
use pantry_core::error::{ErrorKind, PantryError};
use pantry_core::traits::{
    ChatTransport, ListStore, ReceiptAnalyzer, ReceiptStore, SpeechToText, UserDirectory,
    UserProfile,
};
use pantry_core::types::{InboundEvent, InboundKind, Locale, Sender, User, UserId};
use pantry_router::IntentClassifier;
use pantry_state::StateStore;
use tracing::{error, info, warn};

use crate::i18n::{Msg, escape, render, text};
use crate::normalizer::Normalizer;
use crate::surface::Surface;
use crate::telemetry;

/// Every collaborator the orchestrator talks to.
pub struct Services {
    pub transport: Arc<dyn ChatTransport>,
    pub lists: Arc<dyn ListStore>,
    pub directory: Arc<dyn UserDirectory>,
    pub receipts: Arc<dyn ReceiptStore>,
    pub gateway: Arc<AiGateway>,
    pub speech: Option<Arc<dyn SpeechToText>>,
    pub analyzer: Option<Arc<dyn ReceiptAnalyzer>>,
    pub state: Arc<StateStore>,
}

/// The acting user and where to answer.
#[derive(Debug, Clone)]
pub(crate) struct Turn {
    pub user: User,
    pub chat_id: i64,
    pub is_admin: bool,
}

impl Turn {
    pub fn id(&self) -> UserId {
        self.user.id
    }

    pub fn locale(&self) -> Locale {
        self.user.locale
    }

    pub fn authorized(&self) -> bool {
        self.user.is_authorized || self.is_admin
    }

    pub fn text(&self, msg: Msg) -> &'static str {
        text(self.locale(), msg)
    }

    pub fn render(&self, msg: Msg, args: &[(&str, &str)]) -> String {
        render(self.locale(), msg, args)
    }
}

pub struct Orchestrator {
    surface: Surface,
    lists: Arc<dyn ListStore>,
    directory: Arc<dyn UserDirectory>,
    receipts: Arc<dyn ReceiptStore>,
    gateway: Arc<AiGateway>,
    normalizer: Normalizer,
    state: Arc<StateStore>,
    classifier: IntentClassifier,
    access: TelegramConfig,
    limits: ListsConfig,
    default_locale: Locale,
    page_size: usize,
}

impl Orchestrator {
    pub fn new(services: Services, config: &PantryConfig) -> Self {
        let normalizer = Normalizer::from_config(
            services.transport.clone(),
            services.speech,
            services.analyzer,
            config,
        );
        Self {
            surface: Surface::new(services.transport),
            lists: services.lists,
            directory: services.directory,
            receipts: services.receipts,
            gateway: services.gateway,
            normalizer,
            state: services.state,
            classifier: IntentClassifier::from_config(&config.classifier),
            access: config.telegram.clone(),
            limits: config.lists.clone(),
            default_locale: Locale::coerce(&config.agent.default_locale),
            page_size: config.receipts.page_size.max(1),
        }
    }

    /// The shared state store.
    pub fn state(&self) -> &Arc<StateStore> {
        &self.state
    }

    /// Processes one inbound event.
    ///
    /// Fails only when the acting user cannot be resolved; every other error
    /// is rendered to the user and logged.
    pub async fn handle(&self, event: InboundEvent) -> Result<(), PantryError> {
        let kind = match &event.kind {
            InboundKind::Message { content, .. } => content.kind_label(),
            InboundKind::Callback { .. } => "callback",
        };
        telemetry::record_inbound(kind);

        let user = self.resolve_user(&event.sender).await?;
        let turn = Turn {
            is_admin: user.is_admin || self.access.is_admin(user.telegram_id, user.username.as_deref()),
            user,
            chat_id: event.chat_id,
        };
        let guard = self.state.lock_user(turn.id()).await;

        match event.kind {
            InboundKind::Message { content, .. } => {
                if let Err(e) = self.on_message(&turn, content, guard).await {
                    self.render_error(&turn, e).await;
                }
            }
            InboundKind::Callback {
                callback_id,
                data,
                message,
            } => {
                let result = self.on_callback(&turn, &data, message).await;
                drop(guard);
                match result {
                    Ok(notice) => self.surface.answer(&callback_id, notice.as_deref()).await,
                    Err(e) if e.kind() == ErrorKind::StateExpired => {
                        info!(user_id = %turn.id(), callback = %data, "callback outlived its session");
                        self.surface
                            .answer(&callback_id, Some(turn.text(Msg::SessionExpired)))
                            .await;
                    }
                    Err(e) => {
                        self.surface.answer(&callback_id, None).await;
                        self.render_error(&turn, e).await;
                    }
                }
            }
        }
        Ok(())
    }

    async fn resolve_user(&self, sender: &Sender) -> Result<User, PantryError> {
        let username = sender.username.as_deref();
        let allowed = self.access.is_allowed(sender.telegram_id, username);
        let profile = UserProfile {
            telegram_id: sender.telegram_id,
            username: sender.username.clone(),
            first_name: sender.first_name.clone(),
            locale: Locale::coerce_or(
                sender.language_code.as_deref().unwrap_or_default(),
                self.default_locale,
            ),
            is_authorized: allowed,
            is_admin: self.access.is_admin(sender.telegram_id, username),
        };
        let first_contact = self
            .directory
            .user_by_telegram_id(sender.telegram_id)
            .await?
            .is_none();
        let user = self.directory.get_or_create_user(profile).await?;
        if first_contact && !user.is_admin {
            self.notify_admins_of(&user).await;
        }
        if allowed && !user.is_authorized {
            info!(target: "pantry::audit", telegram_id = user.telegram_id, "user authorized by configuration");
            return self.directory.set_authorized(user.telegram_id, true).await;
        }
        Ok(user)
    }

    /// Tells every known admin that `newcomer` has just appeared.
    async fn notify_admins_of(&self, newcomer: &User) {
        let users = match self.directory.list_users().await {
            Ok(users) => users,
            Err(e) => {
                warn!(error = %e, "cannot list admins for new-user notice");
                return;
            }
        };
        let id = newcomer.telegram_id.to_string();
        let name = escape(&newcomer.first_name);
        let username = escape(newcomer.username.as_deref().unwrap_or("-"));
        for admin in users.iter().filter(|u| {
            u.id != newcomer.id
                && (u.is_admin || self.access.is_admin(u.telegram_id, u.username.as_deref()))
        }) {
            let notice = render(
                admin.locale,
                Msg::NewUserNotice,
                &[("name", &name), ("username", &username), ("id", &id)],
            );
            self.notify(admin.telegram_id, &notice).await;
        }
    }

    /// Sends an unsolicited message to another user's chat; failures are only logged.
    async fn notify(&self, chat_id: i64, body: &str) {
        if let Err(e) = self.surface.send(chat_id, body).await {
            warn!(chat_id, error = %e, "failed to deliver notice");
        }
    }

    /// Maps an error onto the user-visible taxonomy.
    async fn render_error(&self, turn: &Turn, err: PantryError) {
        let msg = match err.kind() {
            ErrorKind::Transport => {
                warn!(user_id = %turn.id(), error = %err, "transport failure");
                Msg::TransportError
            }
            ErrorKind::CollaboratorUnavailable => {
                warn!(user_id = %turn.id(), error = %err, "collaborator unavailable");
                Msg::ServiceUnavailable
            }
            ErrorKind::CollaboratorEmpty => Msg::EmptySpeech,
            ErrorKind::Validation => Msg::InvalidInput,
            ErrorKind::AccessDenied => {
                info!(user_id = %turn.id(), error = %err, "access denied");
                Msg::AccessDenied
            }
            ErrorKind::NotFound => Msg::NotFound,
            ErrorKind::StateExpired => Msg::SessionExpired,
            ErrorKind::Conflict => Msg::Conflict,
            ErrorKind::Fatal => {
                error!(user_id = %turn.id(), error = %err, "invariant violated, dropping user state");
                self.state.clear_all(turn.id());
                Msg::InternalError
            }
        };
        if let Err(e) = self.surface.send(turn.chat_id, turn.text(msg)).await {
            warn!(user_id = %turn.id(), error = %e, "failed to deliver error notice");
        }
    }
}
