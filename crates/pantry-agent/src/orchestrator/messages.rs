// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound messages: normalization, classification and intent dispatch.

use pantry_core::error::PantryError;
use pantry_core::types::{MessageContent, MessageRef};
use pantry_router::{Intent, Stage, parse_command};
use pantry_state::{Slot, TurnGuard, Workflow};
use tracing::{debug, info};

use super::{Orchestrator, Turn};
use crate::i18n::{Msg, escape};
use crate::normalizer::{Normalized, Utterance};
use crate::telemetry;

/// Message-id slots that belong to a workflow slot.
fn companion(slot: Slot) -> Option<Slot> {
    match slot {
        Slot::ProductListSelection => Some(Slot::ProductListMessageId),
        Slot::AwaitingReceiptUpload => Some(Slot::UploadMessageId),
        Slot::DuplicateResolution => Some(Slot::ReplaceMessageId),
        _ => None,
    }
}

impl Orchestrator {
    pub(super) async fn on_message(
        &self,
        turn: &Turn,
        content: MessageContent,
        guard: TurnGuard,
    ) -> Result<(), PantryError> {
        if let MessageContent::Text(text) = &content {
            if let Some((name, args)) = parse_command(text) {
                return self.on_command(turn, &name, &args).await;
            }
        }
        if !turn.authorized() {
            info!(
                target: "pantry::audit",
                user_id = %turn.id(),
                kind = content.kind_label(),
                reason = "unauthorized",
                "message ignored"
            );
            return self.show_unauthorized(turn, None).await;
        }

        match content {
            MessageContent::Text(text) => self.on_text(turn, Utterance::typed(text)).await,
            MessageContent::Voice { .. } => {
                let Normalized::Text(utterance) = self.normalizer.normalize(&content).await? else {
                    return Err(PantryError::Internal(
                        "voice normalized to a receipt".to_string(),
                    ));
                };
                let echo = turn.render(Msg::VoiceTranscript, &[("text", &escape(&utterance.text))]);
                self.surface.send(turn.chat_id, &echo).await?;
                self.on_text(turn, utterance).await
            }
            MessageContent::Photo { .. } | MessageContent::Document { .. } => {
                self.on_upload(turn, content, guard).await
            }
        }
    }

    /// Clears workflow slots a new message made stale, with their message ids.
    fn drop_stale(&self, turn: &Turn, stale: &[Slot]) {
        for &slot in stale {
            self.state.clear(turn.id(), slot);
            if let Some(companion) = companion(slot) {
                self.state.clear(turn.id(), companion);
            }
            info!(user_id = %turn.id(), %slot, "workflow abandoned by new message");
        }
    }

    pub(super) async fn on_text(&self, turn: &Turn, utterance: Utterance) -> Result<(), PantryError> {
        let text = utterance.text.trim();
        if text.is_empty() {
            return Err(PantryError::Validation("empty message".to_string()));
        }

        let active = self.state.active_slots(turn.id());
        let (intent, placeholder) = match self.classifier.route(text, &active) {
            Stage::Decided(classification) => {
                self.drop_stale(turn, &classification.stale_slots);
                (classification.intent, None)
            }
            Stage::NeedsDetection { stale_slots } => {
                self.drop_stale(turn, &stale_slots);
                let placeholder = self
                    .surface
                    .loading(turn.chat_id, turn.text(Msg::Processing))
                    .await;
                let detection = self.gateway.detect_product_list(text).await;
                let classification = self.classifier.finish(stale_slots, detection);
                (classification.intent, placeholder)
            }
        };
        telemetry::record_intent(intent.label());
        debug!(user_id = %turn.id(), intent = intent.label(), "text classified");

        match intent {
            Intent::Command { name, args } => {
                if let Some(placeholder) = placeholder {
                    self.surface.delete(placeholder).await;
                }
                self.on_command(turn, &name, &args).await
            }
            Intent::SlotReply { slot, text } => self.on_slot_reply(turn, slot, &text, &utterance).await,
            Intent::ProductListCandidate(detection) => {
                self.offer_product_list(turn, text, detection, utterance.language, placeholder)
                    .await
            }
            Intent::LowConfidenceProductList(_) => {
                self.reply(turn, placeholder, Msg::LowConfidence).await
            }
            Intent::Chatter => self.reply(turn, placeholder, Msg::MessageReceived).await,
        }
    }

    async fn reply(&self, turn: &Turn, placeholder: Option<MessageRef>, msg: Msg) -> Result<(), PantryError> {
        self.surface
            .edit_or_send(turn.chat_id, placeholder, turn.text(msg), None)
            .await?;
        Ok(())
    }

    async fn on_slot_reply(
        &self,
        turn: &Turn,
        slot: Slot,
        text: &str,
        utterance: &Utterance,
    ) -> Result<(), PantryError> {
        let workflow = Workflow::load(&self.state, turn.id(), slot)?.ok_or_else(|| {
            PantryError::StateExpired {
                slot: slot.to_string(),
            }
        })?;
        match workflow {
            Workflow::AddingItems { list_id } => {
                let target = self.tracked(turn, Slot::AddItemMessageId)?;
                self.add_items(turn, list_id, text, utterance.language, target)
                    .await
            }
            Workflow::ViewingList(view) => {
                let detection = self.gateway.detect_product_list(text).await;
                match self.classifier.finish(Vec::new(), detection).intent {
                    Intent::ProductListCandidate(_) => {
                        self.add_items(
                            turn,
                            view.list_id,
                            text,
                            utterance.language,
                            Some(view.message),
                        )
                        .await
                    }
                    Intent::LowConfidenceProductList(_) => {
                        self.reply(turn, None, Msg::LowConfidence).await
                    }
                    _ => self.reply(turn, None, Msg::MessageReceived).await,
                }
            }
            Workflow::CreatingList { family_id } => self.on_list_name(turn, family_id, text).await,
            Workflow::NamingCustomList => self.on_custom_list_name(turn, text).await,
            other => Err(PantryError::Internal(format!(
                "`{}` does not take text",
                other.slot()
            ))),
        }
    }
}
