// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`UserDirectory`] over the in-memory tables.

use async_trait::async_trait;
use chrono::Utc;
use pantry_core::error::PantryError;
use pantry_core::traits::{UserDirectory, UserProfile};
use pantry_core::types::{DirectoryStats, Family, Locale, User, UserId};
use tracing::info;
use uuid::Uuid;

use crate::store::MemoryStore;

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn get_or_create_user(&self, profile: UserProfile) -> Result<User, PantryError> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables
            .users
            .values()
            .find(|u| u.telegram_id == profile.telegram_id)
        {
            return Ok(user.clone());
        }

        let user = User {
            id: UserId::new(),
            telegram_id: profile.telegram_id,
            username: profile.username,
            first_name: profile.first_name,
            locale: profile.locale,
            is_authorized: profile.is_authorized,
            is_admin: profile.is_admin,
            created_at: Utc::now(),
        };
        info!(
            user_id = %user.id,
            telegram_id = user.telegram_id,
            authorized = user.is_authorized,
            "user registered"
        );
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, PantryError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, PantryError> {
        let wanted = username.trim().trim_start_matches('@');
        if wanted.is_empty() {
            return Ok(None);
        }
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| {
                u.username
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(wanted))
            })
            .cloned())
    }

    async fn set_locale(&self, user: UserId, locale: Locale) -> Result<User, PantryError> {
        let mut tables = self.tables.write().await;
        let user = tables.user_mut(user)?;
        user.locale = locale;
        Ok(user.clone())
    }

    async fn set_authorized(
        &self,
        telegram_id: i64,
        authorized: bool,
    ) -> Result<User, PantryError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .values_mut()
            .find(|u| u.telegram_id == telegram_id)
            .ok_or_else(|| PantryError::not_found("user", telegram_id.to_string()))?;
        user.is_authorized = authorized;
        Ok(user.clone())
    }

    async fn list_users(&self) -> Result<Vec<User>, PantryError> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn create_family(&self, name: &str, creator: UserId) -> Result<Family, PantryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PantryError::Validation("family name is empty".into()));
        }
        let mut tables = self.tables.write().await;
        tables.user_mut(creator)?;

        let family = Family {
            id: Uuid::new_v4(),
            name: name.to_string(),
            members: vec![creator],
            created_by: creator,
        };
        tables.families.insert(family.id, family.clone());
        Ok(family)
    }

    async fn get_family(&self, family_id: Uuid) -> Result<Family, PantryError> {
        self.tables
            .read()
            .await
            .families
            .get(&family_id)
            .cloned()
            .ok_or_else(|| PantryError::not_found("family", family_id.to_string()))
    }

    async fn add_family_member(
        &self,
        family_id: Uuid,
        member: UserId,
        added_by: UserId,
    ) -> Result<Family, PantryError> {
        let mut tables = self.tables.write().await;
        tables.user_mut(member)?;
        let family = tables
            .families
            .get_mut(&family_id)
            .ok_or_else(|| PantryError::not_found("family", family_id.to_string()))?;
        if family.created_by != added_by {
            return Err(PantryError::AccessDenied(format!(
                "user {added_by} does not administer family {family_id}"
            )));
        }
        if family.members.contains(&member) {
            return Err(PantryError::Conflict(format!(
                "user {member} is already in family {family_id}"
            )));
        }
        family.members.push(member);
        info!(%family_id, member_id = %member, "family member added");
        Ok(family.clone())
    }

    async fn user_families(&self, user: UserId) -> Result<Vec<Family>, PantryError> {
        let tables = self.tables.read().await;
        let mut families: Vec<Family> = tables
            .families
            .values()
            .filter(|f| f.members.contains(&user))
            .cloned()
            .collect();
        families.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(families)
    }

    async fn is_family_member(&self, user: UserId, family_id: Uuid) -> Result<bool, PantryError> {
        Ok(self.tables.read().await.is_member(user, family_id))
    }

    async fn stats(&self) -> Result<DirectoryStats, PantryError> {
        let tables = self.tables.read().await;
        Ok(DirectoryStats {
            users: tables.users.len(),
            authorized: tables.users.values().filter(|u| u.is_authorized).count(),
            admins: tables.users.values().filter(|u| u.is_admin).count(),
            families: tables.families.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::traits::ListStore;
    use pantry_core::types::NewList;

    fn profile(telegram_id: i64) -> UserProfile {
        UserProfile {
            telegram_id,
            username: Some("ann".into()),
            first_name: "Ann".into(),
            locale: Locale::Uk,
            is_authorized: false,
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn first_contact_creates_unauthorized_user_once() {
        let store = MemoryStore::new();
        let first = store.get_or_create_user(profile(42)).await.unwrap();
        assert!(!first.is_authorized);
        assert_eq!(first.locale, Locale::Uk);

        let mut changed = profile(42);
        changed.first_name = "Other".into();
        let again = store.get_or_create_user(changed).await.unwrap();
        assert_eq!(again, first);
    }

    #[tokio::test]
    async fn authorize_and_revoke_by_chat_identity() {
        let store = MemoryStore::new();
        store.get_or_create_user(profile(7)).await.unwrap();

        assert!(store.set_authorized(7, true).await.unwrap().is_authorized);
        assert!(!store.set_authorized(7, false).await.unwrap().is_authorized);
        assert!(store.set_authorized(8, true).await.is_err());
    }

    #[tokio::test]
    async fn family_members_see_family_lists() {
        let store = MemoryStore::new();
        let ann = store.get_or_create_user(profile(1)).await.unwrap();
        let bob = store.get_or_create_user(profile(2)).await.unwrap();
        let family = store.create_family("Home", ann.id).await.unwrap();

        let list = store
            .create_list(NewList {
                name: "Groceries".into(),
                family_id: Some(family.id),
                owner_id: ann.id,
            })
            .await
            .unwrap();
        assert!(list.is_shared);

        assert!(store.is_family_member(ann.id, family.id).await.unwrap());
        assert!(!store.is_family_member(bob.id, family.id).await.unwrap());
        assert_eq!(store.user_lists(ann.id).await.unwrap().len(), 1);
        assert!(store.user_lists(bob.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn creator_adds_members_who_then_see_family_lists() {
        let store = MemoryStore::new();
        let ann = store.get_or_create_user(profile(1)).await.unwrap();
        let mut bob = profile(2);
        bob.username = Some("Bob".into());
        let bob = store.get_or_create_user(bob).await.unwrap();
        let family = store.create_family("Home", ann.id).await.unwrap();
        store
            .create_list(NewList {
                name: "Groceries".into(),
                family_id: Some(family.id),
                owner_id: ann.id,
            })
            .await
            .unwrap();

        assert_eq!(store.user_by_username("@bob").await.unwrap(), Some(bob.clone()));
        assert!(matches!(
            store.add_family_member(family.id, ann.id, bob.id).await,
            Err(PantryError::AccessDenied(_))
        ));

        let family = store.add_family_member(family.id, bob.id, ann.id).await.unwrap();
        assert_eq!(family.members, vec![ann.id, bob.id]);
        assert_eq!(store.user_lists(bob.id).await.unwrap().len(), 1);
        assert!(matches!(
            store.add_family_member(family.id, bob.id, ann.id).await,
            Err(PantryError::Conflict(_))
        ));
        assert!(store.add_family_member(Uuid::new_v4(), bob.id, ann.id).await.is_err());
    }

    #[tokio::test]
    async fn stats_count_roles() {
        let store = MemoryStore::new();
        let mut admin = profile(1);
        admin.is_admin = true;
        admin.is_authorized = true;
        let admin = store.get_or_create_user(admin).await.unwrap();
        store.get_or_create_user(profile(2)).await.unwrap();
        store.create_family("Home", admin.id).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(
            stats,
            DirectoryStats {
                users: 2,
                authorized: 1,
                admins: 1,
                families: 1
            }
        );
    }

    #[tokio::test]
    async fn set_locale_persists() {
        let store = MemoryStore::new();
        let user = store.get_or_create_user(profile(3)).await.unwrap();
        store.set_locale(user.id, Locale::Ru).await.unwrap();
        let reloaded = store.user_by_telegram_id(3).await.unwrap().unwrap();
        assert_eq!(reloaded.locale, Locale::Ru);
    }
}
