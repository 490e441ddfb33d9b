// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inline-keyboard callbacks.

use pantry_core::error::PantryError;
use pantry_core::types::{Locale, MessageRef};
use pantry_router::{Callback, MenuAction};
use pantry_state::Slot;
use tracing::{debug, info, warn};

use super::{Orchestrator, Turn};
use crate::i18n::{Msg, text};

/// Callbacks an unauthorized user may press.
fn is_public(callback: &Callback) -> bool {
    matches!(
        callback,
        Callback::Menu(MenuAction::Start | MenuAction::Help | MenuAction::Status | MenuAction::MyId)
            | Callback::Language(_)
    )
}

fn is_admin_only(callback: &Callback) -> bool {
    matches!(callback, Callback::Menu(MenuAction::Users | MenuAction::Stats))
}

impl Orchestrator {
    /// Handles one callback and returns the notice to answer it with.
    pub(super) async fn on_callback(
        &self,
        turn: &Turn,
        data: &str,
        message: Option<MessageRef>,
    ) -> Result<Option<String>, PantryError> {
        let callback = match data.parse::<Callback>() {
            Ok(callback) => callback,
            Err(e) => {
                warn!(user_id = %turn.id(), error = %e, "unrecognized callback");
                return Ok(Some(turn.text(Msg::UnknownAction).to_string()));
            }
        };
        if !is_public(&callback) && !turn.authorized() {
            info!(target: "pantry::audit", callback = data, user_id = %turn.id(), reason = "unauthorized", "callback ignored");
            return Ok(None);
        }
        if is_admin_only(&callback) && !turn.is_admin {
            info!(target: "pantry::audit", callback = data, user_id = %turn.id(), reason = "not_admin", "callback ignored");
            return Ok(None);
        }
        debug!(user_id = %turn.id(), namespace = callback.namespace(), "callback");

        let target = match message {
            Some(message) => Some(message),
            None => self.tracked(turn, Slot::LatestBotMessageId)?,
        };

        match callback {
            Callback::Menu(action) => self.on_menu(turn, action, target).await?,
            Callback::ViewList(list_id) => self.show_list(turn, list_id, target).await?,
            Callback::AddItem(list_id) => self.begin_adding(turn, list_id, target).await?,
            Callback::ClearCompleted(list_id) => {
                self.clear_completed(turn, list_id, target).await?
            }
            Callback::DeleteList(list_id) => {
                return self.ask_delete_list(turn, list_id, target).await;
            }
            Callback::ConfirmDeleteList(list_id) => {
                return self.delete_list(turn, list_id, target).await;
            }
            Callback::ToggleItem { list, item } => {
                self.toggle_item(turn, &list, &item, target).await?
            }
            Callback::CreateListFor(family_id) => {
                self.choose_family(turn, family_id, target).await?
            }
            Callback::ShowLists => self.show_lists(turn, target).await?,
            Callback::CreateNewList => self.start_create_list(turn, target).await?,
            Callback::Duplicate {
                action,
                index,
                list,
            } => {
                self.on_duplicate(turn, action, index, list.as_deref(), target)
                    .await?
            }
            Callback::ProductList(action) => self.on_product_list(turn, action, target).await?,
            Callback::Receipts(action) => self.on_receipts(turn, action, target).await?,
            Callback::Language(locale) => return self.set_language(turn, locale, target).await,
        }
        Ok(None)
    }

    async fn on_menu(
        &self,
        turn: &Turn,
        action: MenuAction,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        match action {
            MenuAction::Start => self.show_main_menu(turn, target).await,
            MenuAction::Help => self.show_page(turn, target, turn.text(Msg::Help)).await,
            MenuAction::Status => self.show_status(turn, target).await,
            MenuAction::MyId => self.show_my_id(turn, target).await,
            MenuAction::Lists => self.show_lists(turn, target).await,
            MenuAction::CreateList => self.start_create_list(turn, target).await,
            MenuAction::CreateFamily => {
                self.show_page(turn, target, turn.text(Msg::CreateFamilyHint))
                    .await
            }
            MenuAction::Families => self.show_families(turn, target).await,
            MenuAction::Receipts => self.show_receipts_menu(turn, target).await,
            MenuAction::Language => self.show_languages(turn, target).await,
            MenuAction::Users => self.show_users(turn, target).await,
            MenuAction::Stats => self.show_stats(turn, target).await,
        }
    }

    async fn set_language(
        &self,
        turn: &Turn,
        locale: Locale,
        target: Option<MessageRef>,
    ) -> Result<Option<String>, PantryError> {
        let user = self.directory.set_locale(turn.id(), locale).await?;
        info!(user_id = %user.id, locale = %locale, "language changed");
        let turn = Turn {
            user,
            ..turn.clone()
        };
        self.show_main_menu(&turn, target).await?;
        Ok(Some(text(locale, Msg::LanguageChanged).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_router::ReceiptsAction;

    #[test]
    fn public_callbacks() {
        assert!(is_public(&Callback::Menu(MenuAction::Help)));
        assert!(is_public(&Callback::Language(Locale::Uk)));
        assert!(!is_public(&Callback::Menu(MenuAction::Lists)));
        assert!(!is_public(&Callback::Receipts(ReceiptsAction::Menu)));
    }

    #[test]
    fn admin_callbacks() {
        assert!(is_admin_only(&Callback::Menu(MenuAction::Stats)));
        assert!(!is_admin_only(&Callback::Menu(MenuAction::Start)));
    }
}
