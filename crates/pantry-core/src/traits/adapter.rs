// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle shared by every collaborator.

use async_trait::async_trait;

use crate::error::PantryError;
use crate::types::HealthStatus;

/// Name, health and shutdown of a collaborator.
///
/// `pantry check` asks each configured collaborator for its health;
/// `pantry serve` shuts the transport down once the dispatch loop ends.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Label used in logs and check output.
    fn name(&self) -> &str;

    async fn health_check(&self) -> Result<HealthStatus, PantryError>;

    /// Stops background work. Stateless collaborators keep the default.
    async fn shutdown(&self) -> Result<(), PantryError> {
        Ok(())
    }
}
