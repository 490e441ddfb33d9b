// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Top-level destinations and message-identity tracking.
//!
//! Entering any top-level destination ends every workflow of the acting user:
//! the navigation slot set is cleared before the screen is rendered.

use pantry_core::error::PantryError;
use pantry_core::types::{Keyboard, MessageRef};
use pantry_state::payload::decode_message_ref;
use pantry_state::{NAVIGATION_SLOTS, Slot};
use tracing::debug;

use super::{Orchestrator, Turn};
use crate::i18n::{Msg, escape};
use crate::{keyboards, views};

impl Orchestrator {
    pub(super) fn enter_top_level(&self, turn: &Turn) {
        self.state.clear_many(turn.id(), &NAVIGATION_SLOTS);
        debug!(user_id = %turn.id(), "navigation cleared workflow slots");
    }

    /// The message recorded in a message-id slot.
    pub(super) fn tracked(&self, turn: &Turn, slot: Slot) -> Result<Option<MessageRef>, PantryError> {
        self.state
            .get(turn.id(), slot)
            .map(|raw| decode_message_ref(slot, &raw))
            .transpose()
    }

    pub(super) fn track(&self, turn: &Turn, slot: Slot, message: MessageRef) {
        self.state.set(turn.id(), slot, message.to_string());
    }

    /// Renders a screen over `target` and remembers where it landed.
    pub(super) async fn present(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<MessageRef, PantryError> {
        let shown = self
            .surface
            .edit_or_send(turn.chat_id, target, text, Some(keyboard))
            .await?;
        self.track(turn, Slot::LatestBotMessageId, shown);
        Ok(shown)
    }

    pub(super) async fn show_main_menu(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        if !turn.authorized() {
            return self.show_unauthorized(turn, target).await;
        }
        let keyboard = keyboards::main_menu(turn.locale(), turn.is_admin);
        self.present(turn, target, turn.text(Msg::MainMenu), &keyboard)
            .await?;
        Ok(())
    }

    pub(super) async fn show_unauthorized(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let body = turn.render(
            Msg::Unauthorized,
            &[
                ("name", &escape(&turn.user.display_name())),
                ("id", &turn.user.telegram_id.to_string()),
            ],
        );
        self.surface
            .edit_or_send(turn.chat_id, target, &body, None)
            .await?;
        Ok(())
    }

    /// A static page with a single way back to the main menu.
    pub(super) async fn show_page(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
        body: &str,
    ) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        self.present(turn, target, body, &keyboards::back_to_menu(turn.locale()))
            .await?;
        Ok(())
    }

    pub(super) async fn show_status(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let lists = if turn.authorized() {
            self.lists.user_lists(turn.id()).await?.len()
        } else {
            0
        };
        let authorized = if turn.authorized() { "✅" } else { "❌" };
        let body = turn.render(
            Msg::Status,
            &[
                ("authorized", authorized),
                ("locale", turn.locale().code()),
                ("lists", &lists.to_string()),
            ],
        );
        self.show_page(turn, target, &body).await
    }

    pub(super) async fn show_my_id(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let body = turn.render(Msg::MyId, &[("id", &turn.user.telegram_id.to_string())]);
        self.show_page(turn, target, &body).await
    }

    pub(super) async fn show_lists(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        let lists = self.lists.user_lists(turn.id()).await?;
        let keyboard = keyboards::lists_overview(turn.locale(), &lists);
        self.present(turn, target, views::lists_overview(turn.locale(), &lists), &keyboard)
            .await?;
        Ok(())
    }

    pub(super) async fn show_families(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let mut families = Vec::new();
        for family in self.directory.user_families(turn.id()).await? {
            let lists = self.lists.family_lists(family.id).await?.len();
            families.push((family, lists));
        }
        let body = views::families(turn.locale(), &families);
        self.show_page(turn, target, &body).await
    }

    pub(super) async fn show_languages(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        self.present(turn, target, turn.text(Msg::ChooseLanguage), &keyboards::languages())
            .await?;
        Ok(())
    }

    pub(super) async fn show_users(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let users = self.directory.list_users().await?;
        let body = views::users(turn.locale(), &users);
        self.show_page(turn, target, &body).await
    }

    pub(super) async fn show_stats(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let stats = self.directory.stats().await?;
        let body = turn.render(
            Msg::AdminStats,
            &[
                ("users", &stats.users.to_string()),
                ("authorized", &stats.authorized.to_string()),
                ("admins", &stats.admins.to_string()),
                ("families", &stats.families.to_string()),
            ],
        );
        self.show_page(turn, target, &body).await
    }
}
