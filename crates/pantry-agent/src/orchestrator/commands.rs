// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slash commands.

use pantry_core::error::{ErrorKind, PantryError};
use pantry_core::types::User;
use tracing::info;

use super::{Orchestrator, Turn};
use crate::i18n::{Msg, escape, render};
use crate::keyboards;

/// Commands anyone may run.
const PUBLIC_COMMANDS: [&str; 4] = ["start", "help", "status", "myid"];

const ADMIN_COMMANDS: [&str; 4] = ["users", "stats", "authorize", "revoke"];

impl Orchestrator {
    pub(super) async fn on_command(
        &self,
        turn: &Turn,
        name: &str,
        args: &str,
    ) -> Result<(), PantryError> {
        if !PUBLIC_COMMANDS.contains(&name) && !turn.authorized() {
            info!(target: "pantry::audit", command = name, user_id = %turn.id(), reason = "unauthorized", "command ignored");
            return Ok(());
        }
        if ADMIN_COMMANDS.contains(&name) && !turn.is_admin {
            info!(target: "pantry::audit", command = name, user_id = %turn.id(), reason = "not_admin", "command ignored");
            return Ok(());
        }
        info!(user_id = %turn.id(), command = name, "command");

        match name {
            "start" => self.cmd_start(turn).await,
            "help" => self.show_page(turn, None, turn.text(Msg::Help)).await,
            "status" => self.show_status(turn, None).await,
            "myid" => self.show_my_id(turn, None).await,
            "lists" => self.show_lists(turn, None).await,
            "createlist" => self.start_create_list(turn, None).await,
            "createfamily" => self.cmd_create_family(turn, args).await,
            "addfamilymember" => self.cmd_add_family_member(turn, args).await,
            "families" => self.show_families(turn, None).await,
            "receipts" => self.show_receipts_menu(turn, None).await,
            "users" => self.show_users(turn, None).await,
            "stats" => self.show_stats(turn, None).await,
            "authorize" => self.cmd_set_authorized(turn, args, true).await,
            "revoke" => self.cmd_set_authorized(turn, args, false).await,
            _ => {
                self.surface
                    .send(turn.chat_id, turn.text(Msg::UnknownCommand))
                    .await?;
                Ok(())
            }
        }
    }

    async fn cmd_start(&self, turn: &Turn) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        if !turn.authorized() {
            return self.show_unauthorized(turn, None).await;
        }
        let body = turn.render(Msg::Welcome, &[("name", &escape(&turn.user.display_name()))]);
        let keyboard = keyboards::main_menu(turn.locale(), turn.is_admin);
        self.present(turn, None, &body, &keyboard).await?;
        Ok(())
    }

    async fn cmd_create_family(&self, turn: &Turn, args: &str) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        let name = args.trim();
        if name.is_empty() {
            self.surface
                .send(turn.chat_id, turn.text(Msg::FamilyUsage))
                .await?;
            return Ok(());
        }
        let family = self.directory.create_family(name, turn.id()).await?;
        info!(user_id = %turn.id(), family_id = %family.id, "family created");
        let body = turn.render(Msg::FamilyCreated, &[("name", &escape(&family.name))]);
        self.present(turn, None, &body, &keyboards::back_to_menu(turn.locale()))
            .await?;
        Ok(())
    }

    /// `/addfamilymember <family> <@username|telegram_id>`. The family is
    /// matched by name, case-insensitively, among the caller's families.
    async fn cmd_add_family_member(&self, turn: &Turn, args: &str) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        let Some((family_name, who)) = args
            .trim()
            .rsplit_once(char::is_whitespace)
            .map(|(family, who)| (family.trim(), who.trim()))
            .filter(|(family, who)| !family.is_empty() && !who.is_empty())
        else {
            self.surface
                .send(turn.chat_id, turn.text(Msg::AddMemberUsage))
                .await?;
            return Ok(());
        };

        let family = self
            .directory
            .user_families(turn.id())
            .await?
            .into_iter()
            .find(|f| f.name.to_lowercase() == family_name.to_lowercase());
        let Some(family) = family else {
            let body = turn.render(Msg::FamilyNotFound, &[("name", &escape(family_name))]);
            self.surface.send(turn.chat_id, &body).await?;
            return Ok(());
        };
        let family_label = escape(&family.name);
        if family.created_by != turn.id() {
            let body = turn.render(Msg::FamilyAdminRequired, &[("name", &family_label)]);
            self.surface.send(turn.chat_id, &body).await?;
            return Ok(());
        }

        let Some(member) = self.find_user(who).await? else {
            let body = turn.render(Msg::MemberNotFound, &[("who", &escape(who))]);
            self.surface.send(turn.chat_id, &body).await?;
            return Ok(());
        };
        let member_label = escape(&member.display_name());
        let reply = match self
            .directory
            .add_family_member(family.id, member.id, turn.id())
            .await
        {
            Ok(_) => {
                info!(
                    user_id = %turn.id(),
                    family_id = %family.id,
                    member_id = %member.id,
                    "family member added"
                );
                let notice = render(
                    member.locale,
                    Msg::AddedToFamily,
                    &[
                        ("admin", &escape(&turn.user.display_name())),
                        ("family", &family_label),
                    ],
                );
                self.notify(member.telegram_id, &notice).await;
                Msg::MemberAdded
            }
            Err(PantryError::Conflict(_)) => Msg::AlreadyMember,
            Err(e) => return Err(e),
        };
        let body = turn.render(reply, &[("member", &member_label), ("family", &family_label)]);
        self.present(turn, None, &body, &keyboards::back_to_menu(turn.locale()))
            .await?;
        Ok(())
    }

    /// Resolves `@username` or a numeric Telegram id to a known user.
    async fn find_user(&self, who: &str) -> Result<Option<User>, PantryError> {
        if who.starts_with('@') {
            return self.directory.user_by_username(who).await;
        }
        match who.parse::<i64>() {
            Ok(telegram_id) => self.directory.user_by_telegram_id(telegram_id).await,
            Err(_) => self.directory.user_by_username(who).await,
        }
    }

    async fn cmd_set_authorized(
        &self,
        turn: &Turn,
        args: &str,
        authorized: bool,
    ) -> Result<(), PantryError> {
        self.enter_top_level(turn);
        let Ok(telegram_id) = args.trim().parse::<i64>() else {
            self.surface
                .send(turn.chat_id, turn.text(Msg::AuthorizeUsage))
                .await?;
            return Ok(());
        };
        let id = telegram_id.to_string();
        let reply = match self.directory.set_authorized(telegram_id, authorized).await {
            Ok(user) => {
                info!(
                    target: "pantry::audit",
                    admin_id = %turn.id(),
                    telegram_id,
                    authorized,
                    "authorization changed"
                );
                let msg = if authorized {
                    let notice = render(
                        user.locale,
                        Msg::AuthorizationGranted,
                        &[("name", &escape(&user.display_name()))],
                    );
                    self.notify(user.telegram_id, &notice).await;
                    Msg::UserAuthorized
                } else {
                    Msg::UserRevoked
                };
                turn.render(msg, &[("id", &id)])
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                turn.render(Msg::UserNotFound, &[("id", &id)])
            }
            Err(e) => return Err(e),
        };
        self.surface.send(turn.chat_id, &reply).await?;
        Ok(())
    }
}
