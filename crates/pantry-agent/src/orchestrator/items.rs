// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adding free text to a list: parse, check for duplicates, write.

use pantry_core::error::PantryError;
use pantry_core::types::{Locale, MessageRef, NewItem};
use pantry_state::{DuplicateSession, Slot, Workflow};
use tracing::info;
use uuid::Uuid;

use super::{Orchestrator, Turn};
use crate::canonical::new_item;
use crate::i18n::Msg;
use crate::{duplicates, keyboards, telemetry, views};

impl Orchestrator {
    /// Parses `text` into items for `list_id`.
    ///
    /// Without duplicates the items are written and `target` becomes the
    /// refreshed list view. Otherwise a duplicate session opens and nothing
    /// is written until the user decides.
    pub(super) async fn add_items(
        &self,
        turn: &Turn,
        list_id: Uuid,
        text: &str,
        language: Option<Locale>,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PantryError::Validation("no item text".to_string()));
        }
        self.ensure_access(turn, list_id).await?;

        let language = match language {
            Some(language) => language,
            None => self.gateway.detect_language(text, turn.locale()).await,
        };
        let progress = self
            .surface
            .edit_or_send(turn.chat_id, target, turn.text(Msg::Processing), None)
            .await?;

        let parsed = self.gateway.parse_items(text, language, turn.id()).await?;
        if parsed.is_empty() {
            self.surface
                .edit_or_send(
                    turn.chat_id,
                    Some(progress),
                    turn.text(Msg::NoItemsParsed),
                    Some(&keyboards::list_actions(turn.locale(), list_id)),
                )
                .await?;
            return Ok(());
        }

        let existing = self.lists.list_items(list_id).await?;
        let split = duplicates::partition(&existing, parsed);
        if !split.pairs.is_empty() {
            let session = DuplicateSession {
                list_id,
                pairs: split.pairs,
                unique_items: split.unique,
            };
            return self.open_duplicates(turn, session, progress).await;
        }

        let items: Vec<NewItem> = split.unique.iter().map(new_item).collect();
        let count = items.len();
        self.lists.add_items_parsed(list_id, turn.id(), items).await?;
        info!(user_id = %turn.id(), %list_id, count, %language, "items added");

        self.render_list(turn, list_id, Some(progress)).await?;
        self.state
            .clear_many(turn.id(), &[Slot::AddingItemToList, Slot::AddItemMessageId]);
        Ok(())
    }

    async fn open_duplicates(
        &self,
        turn: &Turn,
        session: DuplicateSession,
        progress: MessageRef,
    ) -> Result<(), PantryError> {
        let list_id = session.list_id;
        let pairs = session.pairs.len();
        let body = views::duplicates(turn.locale(), &session);
        let keyboard = keyboards::duplicates(turn.locale(), &session);

        Workflow::ResolvingDuplicates(session).store(&self.state, turn.id())?;
        self.state.clear_many(
            turn.id(),
            &[Slot::AddingItemToList, Slot::AddItemMessageId, Slot::ViewingList],
        );

        let prompt = self
            .present(turn, Some(progress), &body, &keyboard)
            .await?;
        self.track(turn, Slot::ReplaceMessageId, prompt);
        telemetry::record_duplicate_session("opened");
        info!(user_id = %turn.id(), %list_id, pairs, "duplicate session opened");
        Ok(())
    }
}
