// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared table set behind [`MemoryStore`].

use std::collections::HashMap;

use async_trait::async_trait;
use pantry_core::error::PantryError;
use pantry_core::traits::PluginAdapter;
use pantry_core::types::{
    Family, HealthStatus, Receipt, ShoppingItem, ShoppingList, User, UserId,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub users: HashMap<UserId, User>,
    pub families: HashMap<Uuid, Family>,
    pub lists: HashMap<Uuid, ShoppingList>,
    /// Items in insertion order.
    pub items: Vec<ShoppingItem>,
    pub receipts: HashMap<Uuid, Receipt>,
}

impl Tables {
    pub fn is_member(&self, user: UserId, family_id: Uuid) -> bool {
        self.families
            .get(&family_id)
            .is_some_and(|f| f.members.contains(&user))
    }

    pub fn list(&self, list_id: Uuid) -> Result<&ShoppingList, PantryError> {
        self.lists
            .get(&list_id)
            .ok_or_else(|| PantryError::not_found("list", list_id.to_string()))
    }

    pub fn item_mut(&mut self, item_id: Uuid) -> Result<&mut ShoppingItem, PantryError> {
        self.items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| PantryError::not_found("item", item_id.to_string()))
    }

    pub fn user_mut(&mut self, user: UserId) -> Result<&mut User, PantryError> {
        self.users
            .get_mut(&user)
            .ok_or_else(|| PantryError::not_found("user", user.to_string()))
    }
}

/// In-memory implementation of every storage collaborator.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> Result<HealthStatus, PantryError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PantryError> {
        let tables = self.tables.read().await;
        debug!(
            users = tables.users.len(),
            lists = tables.lists.len(),
            items = tables.items.len(),
            receipts = tables.receipts.len(),
            "memory store dropped on shutdown"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn implements_plugin_adapter() {
        let store = MemoryStore::new();
        assert_eq!(store.name(), "memory");
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
        store.shutdown().await.unwrap();
    }
}
