// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ReceiptStore`] over the in-memory tables.

use async_trait::async_trait;
use chrono::Utc;
use pantry_core::error::PantryError;
use pantry_core::traits::{ReceiptPage, ReceiptStore};
use pantry_core::types::{Receipt, ReceiptData, ReceiptStatus, ReceiptSummary, UserId};
use uuid::Uuid;

use crate::store::MemoryStore;

impl MemoryStore {
    async fn set_receipt_status(
        &self,
        id: Uuid,
        status: ReceiptStatus,
        data: Option<ReceiptData>,
    ) -> Result<Receipt, PantryError> {
        let mut tables = self.tables.write().await;
        let receipt = tables
            .receipts
            .get_mut(&id)
            .ok_or_else(|| PantryError::not_found("receipt", id.to_string()))?;
        receipt.status = status;
        if data.is_some() {
            receipt.data = data;
        }
        Ok(receipt.clone())
    }
}

#[async_trait]
impl ReceiptStore for MemoryStore {
    async fn create_receipt(
        &self,
        user: UserId,
        file_name: &str,
        content_type: &str,
    ) -> Result<Receipt, PantryError> {
        let receipt = Receipt {
            id: Uuid::new_v4(),
            user_id: user,
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            status: ReceiptStatus::Uploaded,
            data: None,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .receipts
            .insert(receipt.id, receipt.clone());
        Ok(receipt)
    }

    async fn complete_receipt(&self, id: Uuid, data: ReceiptData) -> Result<Receipt, PantryError> {
        self.set_receipt_status(id, ReceiptStatus::Processed, Some(data))
            .await
    }

    async fn fail_receipt(&self, id: Uuid) -> Result<Receipt, PantryError> {
        self.set_receipt_status(id, ReceiptStatus::Failed, None).await
    }

    async fn user_receipts(
        &self,
        user: UserId,
        offset: usize,
        limit: usize,
    ) -> Result<ReceiptPage, PantryError> {
        let tables = self.tables.read().await;
        let mut receipts: Vec<&Receipt> = tables
            .receipts
            .values()
            .filter(|r| r.user_id == user)
            .collect();
        receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        Ok(ReceiptPage {
            total: receipts.len(),
            receipts: receipts
                .into_iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
        })
    }

    async fn get_receipt(&self, user: UserId, id: Uuid) -> Result<Receipt, PantryError> {
        let tables = self.tables.read().await;
        let receipt = tables
            .receipts
            .get(&id)
            .ok_or_else(|| PantryError::not_found("receipt", id.to_string()))?;
        if receipt.user_id != user {
            return Err(PantryError::AccessDenied(format!(
                "receipt {id} belongs to another user"
            )));
        }
        Ok(receipt.clone())
    }

    async fn receipt_summary(&self, user: UserId) -> Result<ReceiptSummary, PantryError> {
        let tables = self.tables.read().await;
        let mut summary = ReceiptSummary::default();
        for receipt in tables.receipts.values().filter(|r| r.user_id == user) {
            summary.count += 1;
            if let (ReceiptStatus::Processed, Some(data)) = (receipt.status, &receipt.data) {
                summary.processed += 1;
                summary.total_spent += data.total;
                summary.total_tax += data.tax;
            }
        }
        Ok(summary)
    }
}
