// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! List creation, list views and item toggles.

use pantry_config::model::ListsConfig;
use pantry_core::error::PantryError;
use pantry_core::types::{MessageRef, NewList, ShoppingList, short_id};
use pantry_state::{FamilyChoice, Slot, ViewingList, Workflow};
use tracing::info;
use uuid::Uuid;

use super::{Orchestrator, Turn};
use crate::i18n::{Msg, escape};
use crate::{keyboards, views};

/// Why a proposed list name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NameProblem {
    Empty,
    TooShort,
    TooLong,
}

/// Checks a trimmed list name against the configured bounds.
pub(super) fn check_name(name: &str, limits: &ListsConfig) -> Result<(), NameProblem> {
    let len = name.chars().count();
    if len == 0 {
        Err(NameProblem::Empty)
    } else if len < limits.min_name_len {
        Err(NameProblem::TooShort)
    } else if len > limits.max_name_len {
        Err(NameProblem::TooLong)
    } else {
        Ok(())
    }
}

impl Orchestrator {
    pub(super) async fn ensure_access(&self, turn: &Turn, list_id: Uuid) -> Result<(), PantryError> {
        if self.lists.can_access(turn.id(), list_id).await? {
            Ok(())
        } else {
            Err(PantryError::AccessDenied(format!(
                "user {} cannot access list {list_id}",
                turn.id()
            )))
        }
    }

    /// Resolves a short list id against the user's accessible lists.
    ///
    /// Ambiguous prefixes are treated like unknown ones.
    pub(super) async fn resolve_list(
        &self,
        turn: &Turn,
        short: &str,
    ) -> Result<ShoppingList, PantryError> {
        let mut matches = self
            .lists
            .user_lists(turn.id())
            .await?
            .into_iter()
            .filter(|list| short_id(&list.id) == short);
        match (matches.next(), matches.next()) {
            (Some(list), None) => Ok(list),
            _ => Err(PantryError::not_found("list", short)),
        }
    }

    /// Renders a list over `target` and makes it the viewed list.
    pub(super) async fn render_list(
        &self,
        turn: &Turn,
        list_id: Uuid,
        target: Option<MessageRef>,
    ) -> Result<MessageRef, PantryError> {
        let list = self.lists.get_list(list_id).await?;
        let items = self.lists.list_items(list_id).await?;
        let body = views::list_view(turn.locale(), &list, &items);
        let keyboard = keyboards::list_view(turn.locale(), &list, &items);
        let shown = self.present(turn, target, &body, &keyboard).await?;
        Workflow::ViewingList(ViewingList {
            list_id,
            message: shown,
        })
        .store(&self.state, turn.id())?;
        self.state.clear(turn.id(), Slot::AddItemMessageId);
        Ok(shown)
    }

    pub(super) async fn show_list(
        &self,
        turn: &Turn,
        list_id: Uuid,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        self.ensure_access(turn, list_id).await?;
        self.render_list(turn, list_id, target).await?;
        Ok(())
    }

    pub(super) async fn begin_adding(
        &self,
        turn: &Turn,
        list_id: Uuid,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        self.ensure_access(turn, list_id).await?;
        let list = self.lists.get_list(list_id).await?;
        Workflow::AddingItems { list_id }.store(&self.state, turn.id())?;
        let body = turn.render(Msg::AddItemsPrompt, &[("name", &escape(&list.name))]);
        let prompt = self
            .present(turn, target, &body, &keyboards::adding_items(turn.locale(), list_id))
            .await?;
        self.track(turn, Slot::AddItemMessageId, prompt);
        info!(user_id = %turn.id(), %list_id, "waiting for items");
        Ok(())
    }

    pub(super) async fn toggle_item(
        &self,
        turn: &Turn,
        list_short: &str,
        item_short: &str,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let list = self.resolve_list(turn, list_short).await?;
        let mut matches = self
            .lists
            .list_items(list.id)
            .await?
            .into_iter()
            .filter(|item| short_id(&item.id) == item_short);
        let item = match (matches.next(), matches.next()) {
            (Some(item), None) => item,
            _ => return Err(PantryError::not_found("item", item_short)),
        };
        if item.completed {
            self.lists.uncomplete_item(item.id).await?;
        } else {
            self.lists.complete_item(item.id, turn.id()).await?;
        }
        self.render_list(turn, list.id, target).await?;
        Ok(())
    }

    /// Deletes every bought item of a list and re-renders it.
    pub(super) async fn clear_completed(
        &self,
        turn: &Turn,
        list_id: Uuid,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        self.ensure_access(turn, list_id).await?;
        let mut removed = 0usize;
        for item in self.lists.list_items(list_id).await? {
            if item.completed {
                self.lists.delete_item(item.id).await?;
                removed += 1;
            }
        }
        info!(user_id = %turn.id(), %list_id, removed, "bought items cleared");
        self.render_list(turn, list_id, target).await?;
        Ok(())
    }

    /// The list, provided the acting user created it.
    async fn owned_list(&self, turn: &Turn, list_id: Uuid) -> Result<Option<ShoppingList>, PantryError> {
        self.ensure_access(turn, list_id).await?;
        let list = self.lists.get_list(list_id).await?;
        Ok((list.owner_id == turn.id()).then_some(list))
    }

    pub(super) async fn ask_delete_list(
        &self,
        turn: &Turn,
        list_id: Uuid,
        target: Option<MessageRef>,
    ) -> Result<Option<String>, PantryError> {
        let Some(list) = self.owned_list(turn, list_id).await? else {
            return Ok(Some(turn.text(Msg::NotListOwner).to_string()));
        };
        let body = turn.render(Msg::ConfirmDeleteList, &[("name", &escape(&list.name))]);
        self.present(turn, target, &body, &keyboards::confirm_delete(turn.locale(), list_id))
            .await?;
        Ok(None)
    }

    /// Deletes a list with its items and returns to the overview.
    pub(super) async fn delete_list(
        &self,
        turn: &Turn,
        list_id: Uuid,
        target: Option<MessageRef>,
    ) -> Result<Option<String>, PantryError> {
        let Some(list) = self.owned_list(turn, list_id).await? else {
            return Ok(Some(turn.text(Msg::NotListOwner).to_string()));
        };
        self.lists.delete_list(list_id).await?;
        info!(user_id = %turn.id(), %list_id, "list deleted");
        self.show_lists(turn, target).await?;
        Ok(Some(turn.render(Msg::ListDeleted, &[("name", &list.name)])))
    }

    /// Starts list creation with the family picker.
    pub(super) async fn start_create_list(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        let families: Vec<FamilyChoice> = self
            .directory
            .user_families(turn.id())
            .await?
            .into_iter()
            .map(|f| FamilyChoice {
                id: f.id,
                name: f.name,
            })
            .collect();
        let keyboard = keyboards::family_picker(turn.locale(), &families);
        self.present(turn, target, turn.text(Msg::ChooseFamily), &keyboard)
            .await?;
        Ok(())
    }

    pub(super) async fn choose_family(
        &self,
        turn: &Turn,
        family_id: Option<Uuid>,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        if let Some(family_id) = family_id {
            if !self.directory.is_family_member(turn.id(), family_id).await? {
                self.surface
                    .edit_or_send(turn.chat_id, target, turn.text(Msg::NotFamilyMember), None)
                    .await?;
                return Ok(());
            }
        }
        Workflow::CreatingList { family_id }.store(&self.state, turn.id())?;
        let prompt = self
            .present(
                turn,
                target,
                turn.text(Msg::EnterListName),
                &keyboards::back_to_menu(turn.locale()),
            )
            .await?;
        self.track(turn, Slot::CreateListMessageId, prompt);
        Ok(())
    }

    /// Sends the corrective message for a refused name. The workflow stays
    /// active so the user can try again.
    pub(super) async fn refuse_name(&self, turn: &Turn, problem: NameProblem) -> Result<(), PantryError> {
        let body = match problem {
            NameProblem::Empty => turn.text(Msg::EmptyName).to_string(),
            NameProblem::TooShort => turn.render(
                Msg::ListNameTooShort,
                &[("min", &self.limits.min_name_len.to_string())],
            ),
            NameProblem::TooLong => turn.render(
                Msg::ListNameTooLong,
                &[("max", &self.limits.max_name_len.to_string())],
            ),
        };
        self.surface.send(turn.chat_id, &body).await?;
        Ok(())
    }

    /// Creates a list, or reports the name as taken and returns `None`.
    pub(super) async fn create_named_list(
        &self,
        turn: &Turn,
        name: &str,
        family_id: Option<Uuid>,
    ) -> Result<Option<ShoppingList>, PantryError> {
        let created = self
            .lists
            .create_list(NewList {
                name: name.to_string(),
                family_id,
                owner_id: turn.id(),
            })
            .await;
        match created {
            Ok(list) => {
                info!(user_id = %turn.id(), list_id = %list.id, family_id = ?family_id, "list created");
                Ok(Some(list))
            }
            Err(PantryError::Conflict(detail)) => {
                info!(user_id = %turn.id(), %detail, "list name taken");
                let body = turn.render(Msg::ListExists, &[("name", &escape(name))]);
                self.surface.send(turn.chat_id, &body).await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Text reply while `creating_list_for_family` is active.
    pub(super) async fn on_list_name(
        &self,
        turn: &Turn,
        family_id: Option<Uuid>,
        text: &str,
    ) -> Result<(), PantryError> {
        let name = text.trim();
        if let Err(problem) = check_name(name, &self.limits) {
            return self.refuse_name(turn, problem).await;
        }
        let Some(list) = self.create_named_list(turn, name, family_id).await? else {
            return Ok(());
        };
        self.state.clear(turn.id(), Slot::CreatingListForFamily);
        let prompt = self.tracked(turn, Slot::CreateListMessageId)?;
        self.state.clear(turn.id(), Slot::CreateListMessageId);

        let body = turn.render(Msg::ListCreated, &[("name", &escape(&list.name))]);
        let keyboard = keyboards::list_actions(turn.locale(), list.id);
        self.present(turn, prompt, &body, &keyboard).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ListsConfig {
        ListsConfig {
            min_name_len: 2,
            max_name_len: 5,
            max_selection_lists: 5,
        }
    }

    #[test]
    fn name_bounds_count_characters() {
        assert_eq!(check_name("", &limits()), Err(NameProblem::Empty));
        assert_eq!(check_name("a", &limits()), Err(NameProblem::TooShort));
        assert_eq!(check_name("ab", &limits()), Ok(()));
        assert_eq!(check_name("молоко", &limits()), Err(NameProblem::TooLong));
        assert_eq!(check_name("хліб", &limits()), Ok(()));
    }
}
