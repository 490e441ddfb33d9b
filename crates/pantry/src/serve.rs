// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `pantry serve` command implementation.
//!
//! Wires the Telegram transport, the OpenAI-backed gateway, the optional
//! speech and receipt collaborators and the in-memory stores into an
//! orchestrator, then runs the dispatch loop until a shutdown signal.

use std::sync::Arc;

use pantry_agent::{AgentLoop, Orchestrator, Services, install_signal_handler, telemetry};
use pantry_ai::{AiGateway, GatewaySettings, OpenAiModel};
use pantry_config::PantryConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::{ChatTransport, ReceiptAnalyzer, SpeechToText};
use pantry_media::{ReceiptClient, ReceiptClientSettings, SpeechClient};
use pantry_state::StateStore;
use pantry_storage::MemoryStore;
use pantry_telegram::TelegramTransport;
use tracing::{info, warn};

/// Builds the optional speech-to-text collaborator.
pub fn speech_from_config(
    config: &PantryConfig,
) -> Result<Option<Arc<dyn SpeechToText>>, PantryError> {
    Ok(SpeechClient::from_config(&config.speech)?.map(|c| Arc::new(c) as Arc<dyn SpeechToText>))
}

/// Builds the optional receipt analyzer.
pub fn analyzer_from_config(
    config: &PantryConfig,
) -> Result<Option<Arc<dyn ReceiptAnalyzer>>, PantryError> {
    match ReceiptClientSettings::from_config(&config.receipts) {
        Some(settings) => Ok(Some(Arc::new(ReceiptClient::new(settings)?))),
        None => Ok(None),
    }
}

/// Runs the `pantry serve` command.
pub async fn run_serve(config: PantryConfig) -> Result<(), PantryError> {
    init_tracing(&config.agent.log_level);
    info!(name = config.agent.name.as_str(), "starting pantry serve");
    telemetry::register_metrics();

    let mut telegram = TelegramTransport::new(&config.telegram)?;
    telegram.connect().await?;
    let transport: Arc<dyn ChatTransport> = Arc::new(telegram);

    let model = Arc::new(OpenAiModel::new(&config.openai)?);
    let gateway = Arc::new(AiGateway::new(model, GatewaySettings::from_config(&config)));

    let speech = speech_from_config(&config)?;
    if speech.is_none() {
        warn!("speech.base_url not set, voice messages are disabled");
    }
    let analyzer = analyzer_from_config(&config)?;
    if analyzer.is_none() {
        warn!("receipts endpoint or key not set, receipt uploads are disabled");
    }

    let store = Arc::new(MemoryStore::new());
    let services = Services {
        transport: transport.clone(),
        lists: store.clone(),
        directory: store.clone(),
        receipts: store,
        gateway,
        speech,
        analyzer,
        state: Arc::new(StateStore::new()),
    };
    let orchestrator = Arc::new(Orchestrator::new(services, &config));

    let cancel = install_signal_handler();
    AgentLoop::new(transport.clone(), orchestrator, &config)
        .run(cancel)
        .await?;

    transport.shutdown().await?;
    info!("pantry stopped");
    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pantry={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborators_are_optional() {
        let config = PantryConfig::default();
        assert!(speech_from_config(&config).unwrap().is_none());
        assert!(analyzer_from_config(&config).unwrap().is_none());
    }

    #[test]
    fn configured_collaborators_are_built() {
        let config = pantry_config::load_and_validate_str(
            r#"
            [speech]
            base_url = "http://localhost:9000"

            [receipts]
            endpoint = "https://receipts.example.com"
            api_key = "secret"
            "#,
        )
        .unwrap();
        let speech = speech_from_config(&config).unwrap().unwrap();
        assert_eq!(speech.name(), "speech");
        assert!(analyzer_from_config(&config).unwrap().is_some());
    }
}
