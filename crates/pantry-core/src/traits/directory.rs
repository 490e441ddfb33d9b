// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User and family directory collaborator.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::PantryError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{DirectoryStats, Family, Locale, User, UserId};

/// Profile used when a chat identity is seen for the first time.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub locale: Locale,
    pub is_authorized: bool,
    pub is_admin: bool,
}

/// Authentication and family membership data.
#[async_trait]
pub trait UserDirectory: PluginAdapter {
    /// Returns the existing user for `profile.telegram_id` or creates one from
    /// the profile. Existing users are returned unchanged.
    async fn get_or_create_user(&self, profile: UserProfile) -> Result<User, PantryError>;

    async fn user_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, PantryError>;

    /// Looks a user up by chat username, ignoring case and a leading `@`.
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, PantryError>;

    async fn set_locale(&self, user: UserId, locale: Locale) -> Result<User, PantryError>;

    /// Grants or revokes authorization for the user with the given chat identity.
    async fn set_authorized(
        &self,
        telegram_id: i64,
        authorized: bool,
    ) -> Result<User, PantryError>;

    async fn list_users(&self) -> Result<Vec<User>, PantryError>;

    /// Creates a family with the creator as its first member.
    async fn create_family(&self, name: &str, creator: UserId) -> Result<Family, PantryError>;

    async fn get_family(&self, family_id: Uuid) -> Result<Family, PantryError>;

    /// Adds `member` to a family. Only the family's creator may add members
    /// (`AccessDenied`); an existing member is a `Conflict`.
    async fn add_family_member(
        &self,
        family_id: Uuid,
        member: UserId,
        added_by: UserId,
    ) -> Result<Family, PantryError>;

    async fn user_families(&self, user: UserId) -> Result<Vec<Family>, PantryError>;

    async fn is_family_member(&self, user: UserId, family_id: Uuid) -> Result<bool, PantryError>;

    async fn stats(&self) -> Result<DirectoryStats, PantryError>;
}
