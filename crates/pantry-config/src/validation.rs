// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::str::FromStr;

use pantry_core::types::Locale;

use crate::diagnostic::ConfigError;
use crate::model::PantryConfig;

/// Largest poll budget (`poll_interval_secs * max_poll_attempts`) in seconds.
pub const MAX_POLL_BUDGET_SECS: u64 = 300;

/// Validates semantic constraints that serde cannot express.
///
/// Collects every violation rather than stopping at the first.
pub fn validate_config(config: &PantryConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if Locale::from_str(&config.agent.default_locale).is_err() {
        errors.push(ConfigError::validation(format!(
            "agent.default_locale must be one of en, uk, ru, got `{}`",
            config.agent.default_locale
        )));
    }

    let classifier = &config.classifier;
    for (key, value) in [
        ("classifier.candidate_threshold", classifier.candidate_threshold),
        ("classifier.nudge_threshold", classifier.nudge_threshold),
        ("classifier.item_confidence_floor", classifier.item_confidence_floor),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::validation(format!(
                "{key} must be within [0, 1], got {value}"
            )));
        }
    }
    if classifier.nudge_threshold > classifier.candidate_threshold {
        errors.push(ConfigError::validation(format!(
            "classifier.nudge_threshold ({}) must not exceed classifier.candidate_threshold ({})",
            classifier.nudge_threshold, classifier.candidate_threshold
        )));
    }

    let lists = &config.lists;
    if lists.min_name_len < 1 {
        errors.push(ConfigError::validation("lists.min_name_len must be at least 1"));
    }
    if lists.min_name_len > lists.max_name_len {
        errors.push(ConfigError::validation(format!(
            "lists.min_name_len ({}) must not exceed lists.max_name_len ({})",
            lists.min_name_len, lists.max_name_len
        )));
    }
    if lists.max_selection_lists == 0 {
        errors.push(ConfigError::validation(
            "lists.max_selection_lists must be at least 1",
        ));
    }

    let receipts = &config.receipts;
    let budget = receipts
        .poll_interval_secs
        .saturating_mul(u64::from(receipts.max_poll_attempts));
    if budget > MAX_POLL_BUDGET_SECS {
        errors.push(ConfigError::validation(format!(
            "receipts.poll_interval_secs * receipts.max_poll_attempts must not exceed \
             {MAX_POLL_BUDGET_SECS}s, got {budget}s"
        )));
    }
    if receipts.max_poll_attempts == 0 {
        errors.push(ConfigError::validation(
            "receipts.max_poll_attempts must be at least 1",
        ));
    }
    if receipts.page_size == 0 {
        errors.push(ConfigError::validation("receipts.page_size must be at least 1"));
    }

    for (key, value) in [
        ("openai.timeout_secs", config.openai.timeout_secs),
        ("speech.timeout_secs", config.speech.timeout_secs),
        ("receipts.poll_interval_secs", receipts.poll_interval_secs),
    ] {
        if value == 0 {
            errors.push(ConfigError::validation(format!("{key} must be positive")));
        }
    }

    check_url(&mut errors, "openai.base_url", Some(&config.openai.base_url));
    check_url(&mut errors, "speech.base_url", config.speech.base_url.as_deref());
    check_url(&mut errors, "receipts.endpoint", receipts.endpoint.as_deref());

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ConfigError>, key: &str, value: Option<&str>) {
    if let Some(url) = value
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        errors.push(ConfigError::validation(format!(
            "{key} must start with http:// or https://, got `{url}`"
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&PantryConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let mut config = PantryConfig::default();
        config.agent.default_locale = "de".into();
        config.classifier.nudge_threshold = 0.8;
        config.lists.min_name_len = 0;
        config.openai.base_url = "ftp://example".into();

        let errors = validate_config(&config).expect_err("invalid");
        let text: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(errors.len(), 4, "{text:?}");
        assert!(text.iter().any(|e| e.contains("default_locale")));
        assert!(text.iter().any(|e| e.contains("nudge_threshold")));
        assert!(text.iter().any(|e| e.contains("min_name_len")));
        assert!(text.iter().any(|e| e.contains("openai.base_url")));
    }

    #[test]
    fn poll_budget_is_bounded() {
        let mut config = PantryConfig::default();
        config.receipts.poll_interval_secs = 30;
        config.receipts.max_poll_attempts = 11;
        let errors = validate_config(&config).expect_err("over budget");
        assert!(errors[0].to_string().contains("330s"));
    }
}
