// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Receipt menu, uploads and history.

use pantry_core::error::PantryError;
use pantry_core::types::{MessageContent, MessageRef, Receipt};
use pantry_router::ReceiptsAction;
use pantry_state::{Slot, TurnGuard, Workflow};
use tracing::{info, warn};

use super::{Orchestrator, Turn};
use crate::i18n::{Msg, escape};
use crate::normalizer::{Normalized, UploadMeta};
use crate::{keyboards, views};

const UPLOAD_SLOTS: [Slot; 2] = [Slot::AwaitingReceiptUpload, Slot::UploadMessageId];

/// Number of pages needed for `total` entries.
fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size).max(1)
}

impl Orchestrator {
    /// The receipts menu is a top-level destination that also ends a pending upload.
    pub(super) async fn show_receipts_menu(
        &self,
        turn: &Turn,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        self.state.clear_many(turn.id(), &UPLOAD_SLOTS);
        if !self.normalizer.receipts_enabled() {
            return self
                .show_page(turn, target, turn.text(Msg::ReceiptsDisabled))
                .await;
        }
        self.present(
            turn,
            target,
            turn.text(Msg::ReceiptsMenu),
            &keyboards::receipts_menu(turn.locale()),
        )
        .await?;
        Ok(())
    }

    pub(super) async fn on_receipts(
        &self,
        turn: &Turn,
        action: ReceiptsAction,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        match action {
            ReceiptsAction::Menu => self.show_receipts_menu(turn, target).await,
            ReceiptsAction::Upload => self.await_upload(turn, target).await,
            ReceiptsAction::View { page } => self.show_receipts_page(turn, page, target).await,
            ReceiptsAction::Detail(id) => {
                let receipt = self.receipts.get_receipt(turn.id(), id).await?;
                self.present(
                    turn,
                    target,
                    &views::receipt_detail(&receipt),
                    &keyboards::receipt_detail(turn.locale()),
                )
                .await?;
                Ok(())
            }
            ReceiptsAction::Taxes | ReceiptsAction::Stats => {
                let summary = self.receipts.receipt_summary(turn.id()).await?;
                let body = turn.render(
                    Msg::ReceiptSummary,
                    &[
                        ("count", &summary.count.to_string()),
                        ("processed", &summary.processed.to_string()),
                        ("spent", &format!("{:.2}", summary.total_spent)),
                        ("tax", &format!("{:.2}", summary.total_tax)),
                    ],
                );
                self.present(turn, target, &body, &keyboards::back_to_receipts(turn.locale()))
                    .await?;
                Ok(())
            }
        }
    }

    async fn await_upload(&self, turn: &Turn, target: Option<MessageRef>) -> Result<(), PantryError> {
        if !self.normalizer.receipts_enabled() {
            return self
                .show_page(turn, target, turn.text(Msg::ReceiptsDisabled))
                .await;
        }
        Workflow::AwaitingReceipt.store(&self.state, turn.id())?;
        let prompt = self
            .present(
                turn,
                target,
                turn.text(Msg::UploadPrompt),
                &keyboards::back_to_receipts(turn.locale()),
            )
            .await?;
        self.track(turn, Slot::UploadMessageId, prompt);
        Ok(())
    }

    async fn show_receipts_page(
        &self,
        turn: &Turn,
        page: usize,
        target: Option<MessageRef>,
    ) -> Result<(), PantryError> {
        let size = self.page_size;
        let mut page = page;
        let mut listing = self
            .receipts
            .user_receipts(turn.id(), page.saturating_mul(size), size)
            .await?;
        if listing.total == 0 {
            self.present(
                turn,
                target,
                turn.text(Msg::NoReceipts),
                &keyboards::back_to_receipts(turn.locale()),
            )
            .await?;
            return Ok(());
        }
        let pages = page_count(listing.total, size);
        if page >= pages {
            page = pages - 1;
            listing = self.receipts.user_receipts(turn.id(), page * size, size).await?;
        }
        let body = turn.render(
            Msg::ReceiptsPage,
            &[
                ("page", &(page + 1).to_string()),
                ("pages", &pages.to_string()),
            ],
        );
        let keyboard = keyboards::receipts_page(turn.locale(), &listing.receipts, page, pages);
        self.present(turn, target, &body, &keyboard).await?;
        Ok(())
    }

    /// A photo or document. Only accepted while an upload is awaited.
    ///
    /// The turn lock is released while the analyzer works; afterwards the
    /// upload slot is re-checked so a user who navigated away gets a fresh
    /// message instead of an edit of a screen they left.
    pub(super) async fn on_upload(
        &self,
        turn: &Turn,
        content: MessageContent,
        guard: TurnGuard,
    ) -> Result<(), PantryError> {
        let meta = UploadMeta::of(&content)?
            .ok_or_else(|| PantryError::Internal("upload without metadata".to_string()))?;
        let Some(awaiting) = self.state.get(turn.id(), Slot::AwaitingReceiptUpload) else {
            self.surface
                .send(turn.chat_id, turn.text(Msg::ReceiptHint))
                .await?;
            return Ok(());
        };

        let placeholder = self.tracked(turn, Slot::UploadMessageId)?;
        let placeholder = self
            .surface
            .edit_or_send(turn.chat_id, placeholder, turn.text(Msg::ReceiptProcessing), None)
            .await?;
        self.track(turn, Slot::UploadMessageId, placeholder);
        let receipt = self
            .receipts
            .create_receipt(turn.id(), &meta.file_name, &meta.content_type)
            .await?;
        info!(user_id = %turn.id(), receipt_id = %receipt.id, content_type = %meta.content_type, "receipt upload started");

        drop(guard);
        let outcome = self.normalizer.normalize(&content).await;
        let _guard = self.state.lock_user(turn.id()).await;

        let body = match outcome {
            Ok(Normalized::Receipt(data)) => {
                let saved = self.receipts.complete_receipt(receipt.id, data).await?;
                info!(user_id = %turn.id(), receipt_id = %saved.id, "receipt processed");
                self.saved_notice(turn, &saved)
            }
            Ok(Normalized::Text(_)) => {
                self.receipts.fail_receipt(receipt.id).await?;
                return Err(PantryError::Internal(
                    "upload normalized to text".to_string(),
                ));
            }
            Err(e) => {
                warn!(user_id = %turn.id(), receipt_id = %receipt.id, error = %e, "receipt analysis failed");
                self.receipts.fail_receipt(receipt.id).await?;
                turn.text(Msg::ReceiptFailed).to_string()
            }
        };

        let keyboard = keyboards::receipts_menu(turn.locale());
        if self
            .state
            .clear_if(turn.id(), Slot::AwaitingReceiptUpload, &awaiting)
        {
            self.state.clear(turn.id(), Slot::UploadMessageId);
            self.present(turn, Some(placeholder), &body, &keyboard).await?;
        } else {
            info!(user_id = %turn.id(), "upload workflow ended while analyzing");
            self.surface
                .send_with_keyboard(turn.chat_id, &body, &keyboard)
                .await?;
        }
        Ok(())
    }

    fn saved_notice(&self, turn: &Turn, receipt: &Receipt) -> String {
        let Some(data) = receipt.data.as_ref() else {
            return turn.text(Msg::ReceiptFailed).to_string();
        };
        turn.render(
            Msg::ReceiptSaved,
            &[
                (
                    "merchant",
                    &escape(data.merchant_name.as_deref().unwrap_or("?")),
                ),
                ("total", &format!("{:.2}", data.total)),
                ("currency", data.currency.as_deref().unwrap_or("")),
                ("tax", &format!("{:.2}", data.tax)),
                ("items", &data.items.len().to_string()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::page_count;

    #[test]
    fn pages_round_up() {
        assert_eq!(page_count(0, 5), 1);
        assert_eq!(page_count(5, 5), 1);
        assert_eq!(page_count(6, 5), 2);
    }
}
