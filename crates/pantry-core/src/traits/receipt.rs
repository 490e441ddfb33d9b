// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Receipt analysis and receipt persistence collaborators.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PantryError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Receipt, ReceiptData, ReceiptSummary, UserId};

/// Document-analysis service that extracts structured receipt data.
#[async_trait]
pub trait ReceiptAnalyzer: PluginAdapter {
    /// Analyzes an image or PDF. Implementations bound their own polling.
    async fn analyze(&self, document: Vec<u8>, content_type: &str)
    -> Result<ReceiptData, PantryError>;
}

/// A page of receipts plus the total number available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReceiptPage {
    pub receipts: Vec<Receipt>,
    pub total: usize,
}

/// Owner of uploaded receipts.
#[async_trait]
pub trait ReceiptStore: PluginAdapter {
    /// Records an upload in the `uploaded` state.
    async fn create_receipt(
        &self,
        user: UserId,
        file_name: &str,
        content_type: &str,
    ) -> Result<Receipt, PantryError>;

    /// Attaches extracted data and moves the receipt to `processed`.
    async fn complete_receipt(&self, id: Uuid, data: ReceiptData) -> Result<Receipt, PantryError>;

    /// Moves the receipt to `failed`.
    async fn fail_receipt(&self, id: Uuid) -> Result<Receipt, PantryError>;

    /// Newest first.
    async fn user_receipts(
        &self,
        user: UserId,
        offset: usize,
        limit: usize,
    ) -> Result<ReceiptPage, PantryError>;

    /// Fails with `AccessDenied` when the receipt belongs to someone else.
    async fn get_receipt(&self, user: UserId, id: Uuid) -> Result<Receipt, PantryError>;

    async fn receipt_summary(&self, user: UserId) -> Result<ReceiptSummary, PantryError>;
}
