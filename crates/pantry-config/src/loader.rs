// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./pantry.toml` > `~/.config/pantry/pantry.toml` > `/etc/pantry/pantry.toml`,
//! with `PANTRY_` environment variables overriding all files.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PantryConfig;

const SYSTEM_CONFIG: &str = "/etc/pantry/pantry.toml";
const LOCAL_CONFIG: &str = "pantry.toml";

/// Sections that environment variables may address.
const ENV_SECTIONS: &[&str] = &[
    "agent",
    "telegram",
    "openai",
    "speech",
    "receipts",
    "classifier",
    "lists",
];

fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("pantry/pantry.toml"))
        .unwrap_or_default()
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pantry/pantry.toml`
/// 3. `~/.config/pantry/pantry.toml`
/// 4. `./pantry.toml`
/// 5. `PANTRY_*` environment variables
pub fn load_config() -> Result<PantryConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PantryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PantryConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PantryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PantryConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PantryConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `PANTRY_TELEGRAM_BOT_TOKEN` maps to `telegram.bot_token`.
fn env_provider() -> Env {
    Env::prefixed("PANTRY_").map(|key| {
        let key_str = key.as_str();
        let mapped = ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|field| format!("{section}.{field}"))
            })
            .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}
