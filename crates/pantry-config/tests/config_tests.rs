// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Pantry configuration system.

use pantry_config::diagnostic::ConfigError;
use pantry_config::model::PantryConfig;
use pantry_config::{load_and_validate_str, load_config_from_str};

#[test]
fn full_config_deserializes() {
    let toml = r#"
[agent]
name = "kitchen"
log_level = "debug"
default_locale = "ru"

[telegram]
bot_token = "123:ABC"
allowed_users = ["111", "alice"]
admin_users = ["222"]

[openai]
api_key = "sk-test"
model = "gpt-5-mini"
store = false
timeout_secs = 15

[speech]
base_url = "http://stt.local:8000"

[receipts]
endpoint = "https://receipts.example.com"
api_key = "azure-key"
poll_interval_secs = 2
max_poll_attempts = 20

[classifier]
candidate_threshold = 0.6

[lists]
max_name_len = 40
"#;

    let config = load_and_validate_str(toml).expect("valid config");
    assert_eq!(config.agent.name, "kitchen");
    assert_eq!(config.agent.default_locale, "ru");
    assert_eq!(config.telegram.admin_users, vec!["222"]);
    assert_eq!(config.openai.model, "gpt-5-mini");
    assert!(!config.openai.store);
    assert_eq!(config.speech.base_url.as_deref(), Some("http://stt.local:8000"));
    assert!(config.receipts.is_enabled());
    assert_eq!(config.receipts.poll_budget().as_secs(), 40);
    assert_eq!(config.classifier.candidate_threshold, 0.6);
    assert_eq!(config.classifier.nudge_threshold, 0.3);
    assert_eq!(config.lists.max_name_len, 40);
}

#[test]
fn empty_input_yields_defaults() {
    let config = load_config_from_str("").expect("defaults");
    let defaults = PantryConfig::default();
    assert_eq!(config.agent.name, defaults.agent.name);
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.openai.cache_ttl_secs, 300);
    assert_eq!(config.receipts.api_version, "2024-11-30");
    assert_eq!(config.receipts.model, "prebuilt-receipt");
    assert!(config.telegram.bot_token.is_none());
}

#[test]
fn unknown_key_gets_suggestion_and_section() {
    let toml = "[receipts]\npage_sise = 3\n";
    let errors = load_and_validate_str(toml).expect_err("unknown key");
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            section,
            suggestion,
            ..
        } => {
            assert_eq!(key, "page_sise");
            assert_eq!(section, "receipts");
            assert_eq!(suggestion.as_deref(), Some("page_size"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[anthropic]\napi_key = \"x\"\n").expect_err("bad section");
    assert!(matches!(errors[0], ConfigError::UnknownKey { .. }));
}

#[test]
fn wrong_type_is_reported() {
    let errors =
        load_and_validate_str("[lists]\nmin_name_len = \"two\"\n").expect_err("wrong type");
    match &errors[0] {
        ConfigError::InvalidType { key, .. } => assert!(key.contains("min_name_len")),
        other => panic!("expected InvalidType, got {other:?}"),
    }
}

#[test]
fn semantic_errors_surface_after_deserialization() {
    let toml = r#"
[classifier]
candidate_threshold = 1.5

[speech]
base_url = "stt.local"
"#;
    let errors = load_and_validate_str(toml).expect_err("invalid values");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

#[test]
fn serialized_defaults_reload_unchanged() {
    let defaults = PantryConfig::default();
    let rendered = toml::to_string(&defaults).expect("defaults should serialize");
    let reloaded = load_and_validate_str(&rendered).expect("rendered defaults should validate");

    assert_eq!(reloaded.agent.name, "pantry");
    assert_eq!(reloaded.openai.model, defaults.openai.model);
    assert_eq!(reloaded.receipts.max_poll_attempts, defaults.receipts.max_poll_attempts);
    assert_eq!(reloaded.lists.max_name_len, defaults.lists.max_name_len);
    assert!(reloaded.telegram.bot_token.is_none());
}

#[test]
fn explicit_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    std::io::Write::write_all(
        &mut file,
        b"[agent]\nname = \"from-file\"\n\n[receipts]\npage_size = 3\n",
    )
    .expect("write config");

    let config = pantry_config::load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.agent.name, "from-file");
    assert_eq!(config.receipts.page_size, 3);
}

#[test]
fn explicit_file_errors_are_collected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    std::io::Write::write_all(&mut file, b"[lists]\nmin_name_len = 0\n").expect("write config");

    let errors = pantry_config::load_and_validate_path(file.path()).expect_err("invalid value");
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}
