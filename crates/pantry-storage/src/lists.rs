// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ListStore`] over the in-memory tables.

use async_trait::async_trait;
use chrono::Utc;
use pantry_core::error::PantryError;
use pantry_core::traits::ListStore;
use pantry_core::types::{
    ItemPatch, NewItem, NewList, ParsingStatus, ShoppingItem, ShoppingList, UserId,
};
use tracing::debug;
use uuid::Uuid;

use crate::store::{MemoryStore, Tables};

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn accessible(tables: &Tables, user: UserId, list: &ShoppingList) -> bool {
    list.owner_id == user
        || list
            .family_id
            .is_some_and(|family| tables.is_member(user, family))
}

impl MemoryStore {
    /// Inserts a list exactly as given, id and timestamps included, e.g. to
    /// reload an exported list. An existing list with that id is replaced.
    pub async fn restore_list(&self, list: ShoppingList) -> ShoppingList {
        let mut tables = self.tables.write().await;
        debug!(list_id = %list.id, "list restored");
        tables.lists.insert(list.id, list.clone());
        list
    }
}

#[async_trait]
impl ListStore for MemoryStore {
    async fn create_list(&self, new: NewList) -> Result<ShoppingList, PantryError> {
        let mut tables = self.tables.write().await;

        let taken = tables.lists.values().any(|l| {
            same_name(&l.name, &new.name)
                && match new.family_id {
                    Some(family) => l.family_id == Some(family),
                    None => l.family_id.is_none() && l.owner_id == new.owner_id,
                }
        });
        if taken {
            return Err(PantryError::Conflict(format!(
                "a list named `{}` already exists",
                new.name.trim()
            )));
        }

        let list = ShoppingList {
            id: Uuid::new_v4(),
            name: new.name.trim().to_string(),
            family_id: new.family_id,
            owner_id: new.owner_id,
            is_shared: new.family_id.is_some(),
            created_at: Utc::now(),
        };
        tables.lists.insert(list.id, list.clone());
        debug!(list_id = %list.id, "list created");
        Ok(list)
    }

    async fn get_list(&self, list_id: Uuid) -> Result<ShoppingList, PantryError> {
        self.tables.read().await.list(list_id).cloned()
    }

    async fn user_lists(&self, user: UserId) -> Result<Vec<ShoppingList>, PantryError> {
        let tables = self.tables.read().await;
        let mut lists: Vec<ShoppingList> = tables
            .lists
            .values()
            .filter(|l| accessible(&tables, user, l))
            .cloned()
            .collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(lists)
    }

    async fn family_lists(&self, family_id: Uuid) -> Result<Vec<ShoppingList>, PantryError> {
        let tables = self.tables.read().await;
        let mut lists: Vec<ShoppingList> = tables
            .lists
            .values()
            .filter(|l| l.family_id == Some(family_id))
            .cloned()
            .collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(lists)
    }

    async fn can_access(&self, user: UserId, list_id: Uuid) -> Result<bool, PantryError> {
        let tables = self.tables.read().await;
        let list = tables.list(list_id)?;
        Ok(accessible(&tables, user, list))
    }

    async fn add_items_parsed(
        &self,
        list_id: Uuid,
        added_by: UserId,
        items: Vec<NewItem>,
    ) -> Result<Vec<ShoppingItem>, PantryError> {
        let mut tables = self.tables.write().await;
        tables.list(list_id)?;

        let now = Utc::now();
        let created: Vec<ShoppingItem> = items
            .into_iter()
            .map(|item| ShoppingItem {
                id: Uuid::new_v4(),
                list_id,
                display_name: item.display_name,
                canonical_name: Some(item.canonical_name),
                quantity: item.quantity,
                category: item.category,
                completed: false,
                completed_by: None,
                completed_at: None,
                parsing_status: ParsingStatus::Parsed,
                notes: item.notes,
                added_by,
                created_at: now,
            })
            .collect();
        tables.items.extend(created.iter().cloned());
        debug!(%list_id, count = created.len(), "items added");
        Ok(created)
    }

    async fn list_items(&self, list_id: Uuid) -> Result<Vec<ShoppingItem>, PantryError> {
        let tables = self.tables.read().await;
        tables.list(list_id)?;
        Ok(tables
            .items
            .iter()
            .filter(|i| i.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn update_item(
        &self,
        item_id: Uuid,
        patch: ItemPatch,
    ) -> Result<ShoppingItem, PantryError> {
        let mut tables = self.tables.write().await;
        let item = tables.item_mut(item_id)?;
        item.canonical_name = Some(patch.canonical_name);
        item.quantity = patch.quantity;
        item.parsing_status = ParsingStatus::Parsed;
        Ok(item.clone())
    }

    async fn complete_item(
        &self,
        item_id: Uuid,
        by: UserId,
    ) -> Result<ShoppingItem, PantryError> {
        let mut tables = self.tables.write().await;
        let item = tables.item_mut(item_id)?;
        item.completed = true;
        item.completed_by = Some(by);
        item.completed_at = Some(Utc::now());
        Ok(item.clone())
    }

    async fn uncomplete_item(&self, item_id: Uuid) -> Result<ShoppingItem, PantryError> {
        let mut tables = self.tables.write().await;
        let item = tables.item_mut(item_id)?;
        item.completed = false;
        item.completed_by = None;
        item.completed_at = None;
        Ok(item.clone())
    }

    async fn delete_item(&self, item_id: Uuid) -> Result<(), PantryError> {
        let mut tables = self.tables.write().await;
        let before = tables.items.len();
        tables.items.retain(|i| i.id != item_id);
        if tables.items.len() == before {
            return Err(PantryError::not_found("item", item_id.to_string()));
        }
        Ok(())
    }

    async fn delete_list(&self, list_id: Uuid) -> Result<(), PantryError> {
        let mut tables = self.tables.write().await;
        if tables.lists.remove(&list_id).is_none() {
            return Err(PantryError::not_found("list", list_id.to_string()));
        }
        tables.items.retain(|i| i.list_id != list_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::error::ErrorKind;

    fn new_item(name: &str) -> NewItem {
        NewItem {
            display_name: name.to_string(),
            canonical_name: name.to_string(),
            quantity: None,
            category: None,
            notes: None,
        }
    }

    async fn personal_list(store: &MemoryStore, owner: UserId, name: &str) -> ShoppingList {
        store
            .create_list(NewList {
                name: name.into(),
                family_id: None,
                owner_id: owner,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn restored_lists_keep_their_ids() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        let id = Uuid::from_u128(42);
        store
            .restore_list(ShoppingList {
                id,
                name: "Archive".into(),
                family_id: None,
                owner_id: owner,
                is_shared: false,
                created_at: Utc::now(),
            })
            .await;
        assert_eq!(store.get_list(id).await.unwrap().name, "Archive");
        assert!(store.can_access(owner, id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_personal_name_conflicts() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        personal_list(&store, owner, "Weekly").await;

        let err = store
            .create_list(NewList {
                name: " weekly ".into(),
                family_id: None,
                owner_id: owner,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        // Someone else may reuse the name.
        personal_list(&store, UserId::new(), "Weekly").await;
    }

    #[tokio::test]
    async fn toggle_round_trip_resets_completion() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        let list = personal_list(&store, owner, "Weekly").await;
        let items = store
            .add_items_parsed(list.id, owner, vec![new_item("milk")])
            .await
            .unwrap();
        let original = items[0].clone();

        let done = store.complete_item(original.id, owner).await.unwrap();
        assert!(done.completed);
        assert_eq!(done.completed_by, Some(owner));
        assert!(done.completed_at.is_some());

        let undone = store.uncomplete_item(original.id).await.unwrap();
        assert_eq!(undone, original);
    }

    #[tokio::test]
    async fn items_keep_insertion_order_and_parsed_status() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        let list = personal_list(&store, owner, "Weekly").await;
        store
            .add_items_parsed(list.id, owner, vec![new_item("milk"), new_item("bread")])
            .await
            .unwrap();

        let items = store.list_items(list.id).await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.display_name.as_str()).collect();
        assert_eq!(names, ["milk", "bread"]);
        assert!(items.iter().all(|i| i.parsing_status == ParsingStatus::Parsed));
    }

    #[tokio::test]
    async fn update_replaces_name_and_quantity() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        let list = personal_list(&store, owner, "Weekly").await;
        let item = store
            .add_items_parsed(list.id, owner, vec![new_item("bread")])
            .await
            .unwrap()
            .remove(0);

        let updated = store
            .update_item(
                item.id,
                ItemPatch {
                    canonical_name: "bread".into(),
                    quantity: Some("2 loaves".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.quantity.as_deref(), Some("2 loaves"));
        assert_eq!(updated.display_name, "bread");
    }

    #[tokio::test]
    async fn delete_list_removes_items() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        let list = personal_list(&store, owner, "Weekly").await;
        store
            .add_items_parsed(list.id, owner, vec![new_item("milk")])
            .await
            .unwrap();

        store.delete_list(list.id).await.unwrap();
        assert!(store.list_items(list.id).await.is_err());
        assert_eq!(
            store.delete_list(list.id).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn strangers_cannot_access_personal_lists() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        let list = personal_list(&store, owner, "Weekly").await;
        assert!(store.can_access(owner, list.id).await.unwrap());
        assert!(!store.can_access(UserId::new(), list.id).await.unwrap());
    }
}
