// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch loop and workflow orchestration for the Pantry assistant.
//!
//! The [`AgentLoop`] is the central coordinator that:
//! - Receives events from the chat transport
//! - Runs each event as an independent turn on its own task
//! - Lets the [`Orchestrator`] serialize turns of the same user
//! - Drains in-flight turns on shutdown

pub mod canonical;
pub mod duplicates;
pub mod i18n;
pub mod keyboards;
pub mod normalizer;
pub mod orchestrator;
pub mod shutdown;
pub mod surface;
pub mod telemetry;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use pantry_config::PantryConfig;
use pantry_core::error::PantryError;
use pantry_core::traits::ChatTransport;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub use orchestrator::{Orchestrator, Services};
pub use shutdown::install_signal_handler;

/// Receives inbound events and hands each one to the orchestrator.
pub struct AgentLoop {
    transport: Arc<dyn ChatTransport>,
    orchestrator: Arc<Orchestrator>,
    grace: Duration,
}

impl AgentLoop {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        orchestrator: Arc<Orchestrator>,
        config: &PantryConfig,
    ) -> Self {
        info!(agent_name = config.agent.name.as_str(), "agent loop initialized");
        Self {
            transport,
            orchestrator,
            grace: config.agent.shutdown_grace(),
        }
    }

    /// Runs until the transport closes or `cancel` fires.
    ///
    /// 1. Receives the next event from the transport
    /// 2. Spawns a turn for it so slow collaborators never block other users
    /// 3. Reaps finished turns as it goes
    /// 4. On exit, drains in-flight turns for up to the grace period
    pub async fn run(self, cancel: CancellationToken) -> Result<(), PantryError> {
        info!("agent loop running");
        let mut turns = JoinSet::new();

        loop {
            tokio::select! {
                event = self.transport.receive() => {
                    match event {
                        Ok(event) => {
                            let orchestrator = Arc::clone(&self.orchestrator);
                            turns.spawn(async move {
                                if let Err(e) = orchestrator.handle(event).await {
                                    error!(error = %e, "turn failed");
                                }
                            });
                        }
                        Err(e) => {
                            if e.to_string().contains("closed") {
                                info!("transport closed");
                                break;
                            }
                            warn!(error = %e, "failed to receive event");
                        }
                    }
                }
                Some(joined) = turns.join_next(), if !turns.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "turn task panicked");
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown requested");
                    break;
                }
            }
        }

        let interrupted = shutdown::drain_tasks(&mut turns, self.grace).await;
        debug!(interrupted, "agent loop stopped");
        Ok(())
    }
}
