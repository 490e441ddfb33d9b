// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Detected product lists waiting for a target list.

use chrono::Utc;
use pantry_core::error::PantryError;
use pantry_core::types::{Locale, MessageRef, NewList, ProductListDetection, ShoppingList};
use pantry_router::ProductListAction;
use pantry_state::{FamilyChoice, ProductListSelection, Slot, Workflow};
use tracing::info;

use super::lists::check_name;
use super::{Orchestrator, Turn};
use crate::i18n::Msg;
use crate::keyboards;

/// Suffixes tried when the generated list name is already taken.
const AUTO_NAME_ATTEMPTS: u32 = 9;

const SELECTION_SLOTS: [Slot; 3] = [
    Slot::ProductListSelection,
    Slot::ProductListMessageId,
    Slot::CreatingCustomProductlist,
];

fn expired() -> PantryError {
    PantryError::StateExpired {
        slot: Slot::ProductListSelection.to_string(),
    }
}

impl Orchestrator {
    /// Stores the selection and asks where the items should go.
    pub(super) async fn offer_product_list(
        &self,
        turn: &Turn,
        text: &str,
        detection: ProductListDetection,
        language: Option<Locale>,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let families = self
            .directory
            .user_families(turn.id())
            .await?
            .into_iter()
            .map(|f| FamilyChoice {
                id: f.id,
                name: f.name,
            })
            .collect();
        let mut lists = self.lists.user_lists(turn.id()).await?;
        lists.truncate(self.limits.max_selection_lists);

        let count = detection.detected_items_count.to_string();
        let body = turn.render(Msg::ProductListDetected, &[("count", &count)]);
        let prompt = self
            .present(
                turn,
                target,
                &body,
                &keyboards::product_list_targets(turn.locale(), &lists),
            )
            .await?;

        let selection = ProductListSelection {
            message_text: text.to_string(),
            detection_result: detection,
            available_families: families,
            product_list_message_id: Some(prompt.to_string()),
            detected_language: language.map(|l| l.code().to_string()),
        };
        Workflow::SelectingList(selection).store(&self.state, turn.id())?;
        self.track(turn, Slot::ProductListMessageId, prompt);
        info!(user_id = %turn.id(), "product list offered");
        Ok(())
    }

    fn pending_selection(&self, turn: &Turn) -> Result<ProductListSelection, PantryError> {
        match Workflow::load(&self.state, turn.id(), Slot::ProductListSelection)? {
            Some(Workflow::SelectingList(selection)) => Ok(selection),
            _ => Err(expired()),
        }
    }

    pub(super) async fn on_product_list(
        &self,
        turn: &Turn,
        action: ProductListAction,
        message: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let selection = self.pending_selection(turn)?;
        let target = message.or_else(|| selection.prompt());
        let language = selection.detected_language.as_deref().map(Locale::coerce);

        match action {
            ProductListAction::AddTo(short) => {
                let list = self.resolve_list(turn, &short).await?;
                self.add_items(turn, list.id, &selection.message_text, language, target)
                    .await?;
                self.state.clear_many(turn.id(), &SELECTION_SLOTS);
                Ok(())
            }
            ProductListAction::CreateAuto => {
                let list = self.create_auto_list(turn, &selection).await?;
                self.add_items(turn, list.id, &selection.message_text, language, target)
                    .await?;
                self.state.clear_many(turn.id(), &SELECTION_SLOTS);
                Ok(())
            }
            ProductListAction::CreateCustom => {
                Workflow::NamingCustomList.store(&self.state, turn.id())?;
                self.present(
                    turn,
                    target,
                    turn.text(Msg::CustomListNamePrompt),
                    &keyboards::back_to_menu(turn.locale()),
                )
                .await?;
                Ok(())
            }
            ProductListAction::Cancel => {
                self.state.clear_many(turn.id(), &SELECTION_SLOTS);
                info!(user_id = %turn.id(), "product list dismissed");
                self.show_lists(turn, target).await
            }
        }
    }

    /// Text reply while `creating_custom_productlist` is active.
    pub(super) async fn on_custom_list_name(&self, turn: &Turn, text: &str) -> Result<(), PantryError> {
        let selection = self.pending_selection(turn)?;
        let name = text.trim();
        if let Err(problem) = check_name(name, &self.limits) {
            return self.refuse_name(turn, problem).await;
        }
        let family_id = selection.available_families.first().map(|f| f.id);
        let Some(list) = self.create_named_list(turn, name, family_id).await? else {
            return Ok(());
        };
        self.state.clear(turn.id(), Slot::CreatingCustomProductlist);

        let language = selection.detected_language.as_deref().map(Locale::coerce);
        self.add_items(
            turn,
            list.id,
            &selection.message_text,
            language,
            selection.prompt(),
        )
        .await?;
        self.state.clear_many(turn.id(), &SELECTION_SLOTS);
        Ok(())
    }

    /// Creates `Shopping <date>` in the first family, or as a personal list.
    async fn create_auto_list(
        &self,
        turn: &Turn,
        selection: &ProductListSelection,
    ) -> Result<ShoppingList, PantryError> {
        let date = Utc::now().format("%d.%m.%Y").to_string();
        let base = turn.render(Msg::AutoListName, &[("date", &date)]);
        let family_id = selection.available_families.first().map(|f| f.id);

        let mut name = base.clone();
        for attempt in 2..=AUTO_NAME_ATTEMPTS + 1 {
            match self
                .lists
                .create_list(NewList {
                    name: name.clone(),
                    family_id,
                    owner_id: turn.id(),
                })
                .await
            {
                Ok(list) => {
                    info!(user_id = %turn.id(), list_id = %list.id, "list created for product list");
                    return Ok(list);
                }
                Err(PantryError::Conflict(_)) => name = format!("{base} ({attempt})"),
                Err(e) => return Err(e),
            }
        }
        Err(PantryError::Conflict(format!("no free name for `{base}`")))
    }
}
