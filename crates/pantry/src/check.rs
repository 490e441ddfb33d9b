// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pantry check` command implementation.
//!
//! Verifies that every collaborator `serve` needs can be constructed from
//! the loaded configuration and, unless `--offline`, that each one answers
//! its health check.

use std::time::{Duration, Instant};

use pantry_ai::OpenAiModel;
use pantry_config::PantryConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::PluginAdapter;
use pantry_core::types::HealthStatus;
use pantry_telegram::TelegramTransport;

use crate::serve::{analyzer_from_config, speech_from_config};

/// Status of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    /// Optional feature disabled or degraded.
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, started: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: started.elapsed(),
        }
    }

    /// One output line, e.g. `  [OK]   telegram             bot reachable (12ms)`.
    pub fn line(&self) -> String {
        let tag = match self.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({}ms)",
            self.name,
            self.message,
            self.duration.as_millis()
        )
    }
}

async fn probe<A: PluginAdapter + ?Sized>(
    name: &str,
    adapter: &A,
    offline: bool,
    started: Instant,
) -> CheckResult {
    if offline {
        return CheckResult::new(name, CheckStatus::Pass, "configured", started);
    }
    match adapter.health_check().await {
        Ok(HealthStatus::Healthy) => CheckResult::new(name, CheckStatus::Pass, "healthy", started),
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new(name, CheckStatus::Warn, reason, started)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new(name, CheckStatus::Fail, reason, started)
        }
        Err(e) => CheckResult::new(name, CheckStatus::Fail, e.to_string(), started),
    }
}

fn failed(name: &str, e: PantryError, started: Instant) -> CheckResult {
    CheckResult::new(name, CheckStatus::Fail, e.to_string(), started)
}

async fn check_telegram(config: &PantryConfig, offline: bool) -> CheckResult {
    let started = Instant::now();
    match TelegramTransport::new(&config.telegram) {
        Ok(transport) => probe("telegram", &transport, offline, started).await,
        Err(e) => failed("telegram", e, started),
    }
}

async fn check_openai(config: &PantryConfig, offline: bool) -> CheckResult {
    let started = Instant::now();
    match OpenAiModel::new(&config.openai) {
        Ok(model) => probe("openai", &model, offline, started).await,
        Err(e) => failed("openai", e, started),
    }
}

async fn check_speech(config: &PantryConfig, offline: bool) -> CheckResult {
    let started = Instant::now();
    match speech_from_config(config) {
        Ok(Some(speech)) => probe("speech", speech.as_ref(), offline, started).await,
        Ok(None) => CheckResult::new(
            "speech",
            CheckStatus::Warn,
            "not configured, voice messages disabled",
            started,
        ),
        Err(e) => failed("speech", e, started),
    }
}

async fn check_receipts(config: &PantryConfig, offline: bool) -> CheckResult {
    let started = Instant::now();
    match analyzer_from_config(config) {
        Ok(Some(analyzer)) => probe("receipts", analyzer.as_ref(), offline, started).await,
        Ok(None) => CheckResult::new(
            "receipts",
            CheckStatus::Warn,
            "not configured, receipt uploads disabled",
            started,
        ),
        Err(e) => failed("receipts", e, started),
    }
}

/// Runs every check and returns the results in display order.
pub async fn collect(config: &PantryConfig, offline: bool) -> Vec<CheckResult> {
    vec![
        check_telegram(config, offline).await,
        check_openai(config, offline).await,
        check_speech(config, offline).await,
        check_receipts(config, offline).await,
    ]
}

/// Runs the `pantry check` command. Fails when any check fails.
pub async fn run_check(config: &PantryConfig, offline: bool) -> Result<(), PantryError> {
    let results = collect(config, offline).await;

    println!();
    println!("  pantry check");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", result.line());
    }

    let fail_count = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warn_count = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();
    println!();
    println!("  {fail_count} failed, {warn_count} warnings");

    if fail_count > 0 {
        return Err(PantryError::Config(format!("{fail_count} check(s) failed")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckStatus {
        &results
            .iter()
            .find(|r| r.name == name)
            .expect("check should be present")
            .status
    }

    #[tokio::test]
    async fn missing_token_fails_telegram() {
        let results = collect(&PantryConfig::default(), true).await;
        assert_eq!(status_of(&results, "telegram"), &CheckStatus::Fail);
    }

    #[tokio::test]
    async fn offline_check_passes_complete_config() {
        let config = pantry_config::load_and_validate_str(
            r#"
            [telegram]
            bot_token = "123456:ABC-DEF"

            [openai]
            api_key = "sk-test"

            [speech]
            base_url = "http://localhost:9000"

            [receipts]
            endpoint = "https://receipts.example.com"
            api_key = "secret"
            "#,
        )
        .unwrap();
        let results = collect(&config, true).await;
        assert!(results.iter().all(|r| r.status == CheckStatus::Pass), "{results:?}");
        assert!(run_check(&config, true).await.is_ok());
    }

    #[tokio::test]
    async fn missing_optional_collaborators_only_warn() {
        let config = pantry_config::load_and_validate_str(
            r#"
            [telegram]
            bot_token = "123456:ABC-DEF"

            [openai]
            api_key = "sk-test"
            "#,
        )
        .unwrap();
        let results = collect(&config, true).await;
        assert_eq!(status_of(&results, "speech"), &CheckStatus::Warn);
        assert_eq!(status_of(&results, "receipts"), &CheckStatus::Warn);
        assert!(run_check(&config, true).await.is_ok());
    }

    #[test]
    fn line_renders_tag_and_name() {
        let result = CheckResult {
            name: "openai".into(),
            status: CheckStatus::Warn,
            message: "slow".into(),
            duration: Duration::from_millis(42),
        };
        let line = result.line();
        assert!(line.contains("[WARN]"));
        assert!(line.contains("openai"));
        assert!(line.ends_with("slow (42ms)"));
    }
}
