// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shopping list persistence collaborator.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PantryError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ItemPatch, NewItem, NewList, ShoppingItem, ShoppingList, UserId};

/// Owner of lists and items.
///
/// Implementations report `NotFound`, `AccessDenied`, `Conflict` or a
/// transport-class error (`Storage`). Cancellation is dropping the future.
#[async_trait]
pub trait ListStore: PluginAdapter {
    /// Creates a list; a name already used in the same family (or among the
    /// owner's personal lists) is a `Conflict`.
    async fn create_list(&self, new: NewList) -> Result<ShoppingList, PantryError>;

    async fn get_list(&self, list_id: Uuid) -> Result<ShoppingList, PantryError>;

    /// Lists the user owns plus lists of every family the user belongs to.
    async fn user_lists(&self, user: UserId) -> Result<Vec<ShoppingList>, PantryError>;

    async fn family_lists(&self, family_id: Uuid) -> Result<Vec<ShoppingList>, PantryError>;

    async fn can_access(&self, user: UserId, list_id: Uuid) -> Result<bool, PantryError>;

    /// Appends already-parsed items; they are stored with `ParsingStatus::Parsed`.
    async fn add_items_parsed(
        &self,
        list_id: Uuid,
        added_by: UserId,
        items: Vec<NewItem>,
    ) -> Result<Vec<ShoppingItem>, PantryError>;

    /// Items of a list in insertion order.
    async fn list_items(&self, list_id: Uuid) -> Result<Vec<ShoppingItem>, PantryError>;

    async fn update_item(
        &self,
        item_id: Uuid,
        patch: ItemPatch,
    ) -> Result<ShoppingItem, PantryError>;

    /// Marks an item completed, setting `completed_by` and `completed_at` together.
    async fn complete_item(
        &self,
        item_id: Uuid,
        by: UserId,
    ) -> Result<ShoppingItem, PantryError>;

    /// Clears completion, resetting `completed_by` and `completed_at` together.
    async fn uncomplete_item(&self, item_id: Uuid) -> Result<ShoppingItem, PantryError>;

    async fn delete_item(&self, item_id: Uuid) -> Result<(), PantryError>;

    async fn delete_list(&self, list_id: Uuid) -> Result<(), PantryError>;
}
