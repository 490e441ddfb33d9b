// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a mistyped key fails
//! at startup with a suggestion instead of being silently ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Pantry configuration.
///
/// Every section is optional and falls back to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PantryConfig {
    /// Process identity, logging and locale defaults.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Telegram bot settings and user pre-authorization.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Language model settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Speech-to-text service settings.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Receipt analyzer settings.
    #[serde(default)]
    pub receipts: ReceiptsConfig,

    /// Intent classification thresholds.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// List naming and selection limits.
    #[serde(default)]
    pub lists: ListsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Name used in logs and health output.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Locale used when a user's language cannot be determined.
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Seconds in-flight handlers get to finish after a shutdown signal.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            default_locale: default_locale(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

impl AgentConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

fn default_agent_name() -> String {
    "pantry".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_shutdown_grace_secs() -> u64 {
    10
}

/// Telegram bot configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TelegramConfig {
    /// Bot API token. `None` disables the Telegram transport.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// Telegram user ids or usernames authorized on first contact.
    #[serde(default)]
    pub allowed_users: Vec<String>,

    /// Telegram user ids or usernames created as authorized admins.
    #[serde(default)]
    pub admin_users: Vec<String>,
}

impl TelegramConfig {
    /// True when `telegram_id` or `username` appears in `allowed_users` or `admin_users`.
    pub fn is_allowed(&self, telegram_id: i64, username: Option<&str>) -> bool {
        self.is_admin(telegram_id, username)
            || matches_identity(&self.allowed_users, telegram_id, username)
    }

    pub fn is_admin(&self, telegram_id: i64, username: Option<&str>) -> bool {
        matches_identity(&self.admin_users, telegram_id, username)
    }
}

fn matches_identity(entries: &[String], telegram_id: i64, username: Option<&str>) -> bool {
    let id = telegram_id.to_string();
    entries.iter().any(|entry| {
        let entry = entry.trim().trim_start_matches('@');
        entry == id || username.is_some_and(|u| u.eq_ignore_ascii_case(entry))
    })
}

/// OpenAI Responses API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Value of the request `store` flag; also enables the parse cache.
    #[serde(default = "default_true")]
    pub store: bool,

    /// Per-call deadline in seconds.
    #[serde(default = "default_openai_timeout_secs")]
    pub timeout_secs: u64,

    /// How long identical parse requests are served from cache.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Retries for 429/500/503 responses.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_openai_model(),
            store: true,
            timeout_secs: default_openai_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl OpenAiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-5-nano".to_string()
}

fn default_true() -> bool {
    true
}

fn default_openai_timeout_secs() -> u64 {
    20
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_max_retries() -> u32 {
    1
}

/// Speech-to-text service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpeechConfig {
    /// Service root. `None` disables voice messages.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_speech_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_speech_timeout_secs(),
        }
    }
}

impl SpeechConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_speech_timeout_secs() -> u64 {
    30
}

/// Receipt analyzer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReceiptsConfig {
    /// Document-analysis endpoint. Receipts are disabled unless both
    /// `endpoint` and `api_key` are set.
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_receipt_model")]
    pub model: String,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Receipts per page in the receipts browser.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ReceiptsConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_version: default_api_version(),
            model: default_receipt_model(),
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_attempts: default_max_poll_attempts(),
            page_size: default_page_size(),
        }
    }
}

impl ReceiptsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Upper bound on the time spent polling one analysis.
    pub fn poll_budget(&self) -> Duration {
        self.poll_interval() * self.max_poll_attempts
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }
}

fn default_api_version() -> String {
    "2024-11-30".to_string()
}

fn default_receipt_model() -> String {
    "prebuilt-receipt".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_max_poll_attempts() -> u32 {
    12
}

fn default_page_size() -> usize {
    5
}

/// Intent classification thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Minimum confidence for a positive detection to count as a product list.
    #[serde(default = "default_candidate_threshold")]
    pub candidate_threshold: f64,

    /// Lower bound of the band where a negative detection still earns a nudge.
    #[serde(default = "default_nudge_threshold")]
    pub nudge_threshold: f64,

    /// Parsed items below this confidence are folded into notes.
    #[serde(default = "default_item_confidence_floor")]
    pub item_confidence_floor: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            candidate_threshold: default_candidate_threshold(),
            nudge_threshold: default_nudge_threshold(),
            item_confidence_floor: default_item_confidence_floor(),
        }
    }
}

fn default_candidate_threshold() -> f64 {
    0.5
}

fn default_nudge_threshold() -> f64 {
    0.3
}

fn default_item_confidence_floor() -> f64 {
    0.6
}

/// List naming and selection limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ListsConfig {
    #[serde(default = "default_min_name_len")]
    pub min_name_len: usize,

    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Lists offered when a product list arrives with no active workflow.
    #[serde(default = "default_max_selection_lists")]
    pub max_selection_lists: usize,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            min_name_len: default_min_name_len(),
            max_name_len: default_max_name_len(),
            max_selection_lists: default_max_selection_lists(),
        }
    }
}

fn default_min_name_len() -> usize {
    2
}

fn default_max_name_len() -> usize {
    100
}

fn default_max_selection_lists() -> usize {
    5
}
