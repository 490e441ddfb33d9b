// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Pantry assistant.

use thiserror::Error;

/// The primary error type used across all Pantry collaborator traits and core operations.
#[derive(Debug, Error)]
pub enum PantryError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (list store, directory, receipt store).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat transport errors (send, edit, delete, download).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// External model or media service errors (LLM, speech-to-text, receipt analyzer).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// A referenced entity does not exist (list, item, message, receipt).
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The acting user may not touch the referenced entity.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The write would collide with an existing entity (duplicate list name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// User input failed validation (list name length, empty item text).
    #[error("validation error: {0}")]
    Validation(String),

    /// A callback referenced workflow state that no longer exists.
    #[error("workflow state `{slot}` expired")]
    StateExpired { slot: String },

    /// A collaborator answered successfully but with nothing usable (no speech).
    #[error("empty result: {0}")]
    EmptyResult(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse error classes that decide what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Chat transport or collaborator network failure.
    Transport,
    /// Speech-to-text or model service is down or slow.
    CollaboratorUnavailable,
    /// A collaborator returned no usable content.
    CollaboratorEmpty,
    /// Corrective prompt; the active slot stays.
    Validation,
    /// Terminal for the turn.
    AccessDenied,
    /// Referenced entity is gone.
    NotFound,
    /// Callback outlived its workflow.
    StateExpired,
    /// Duplicate name and similar collisions.
    Conflict,
    /// Invariant violated; all user state is dropped.
    Fatal,
}

impl PantryError {
    /// Classifies this error for user-facing rendering.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PantryError::Channel { .. } | PantryError::Storage { .. } => ErrorKind::Transport,
            PantryError::Provider { .. } | PantryError::Timeout { .. } => {
                ErrorKind::CollaboratorUnavailable
            }
            PantryError::EmptyResult(_) => ErrorKind::CollaboratorEmpty,
            PantryError::Validation(_) => ErrorKind::Validation,
            PantryError::AccessDenied(_) => ErrorKind::AccessDenied,
            PantryError::NotFound { .. } => ErrorKind::NotFound,
            PantryError::StateExpired { .. } => ErrorKind::StateExpired,
            PantryError::Conflict(_) => ErrorKind::Conflict,
            PantryError::Config(_) | PantryError::Internal(_) => ErrorKind::Fatal,
        }
    }

    /// Shorthand for a [`PantryError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        PantryError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// True when a transport reported that the target message no longer exists.
    pub fn is_missing_message(&self) -> bool {
        matches!(self, PantryError::NotFound { entity: "message", .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_maps_to_a_kind() {
        let cases = [
            (PantryError::Config("x".into()), ErrorKind::Fatal),
            (
                PantryError::Storage {
                    source: Box::new(std::io::Error::other("db")),
                },
                ErrorKind::Transport,
            ),
            (
                PantryError::Channel {
                    message: "x".into(),
                    source: None,
                },
                ErrorKind::Transport,
            ),
            (
                PantryError::Provider {
                    message: "x".into(),
                    source: None,
                },
                ErrorKind::CollaboratorUnavailable,
            ),
            (
                PantryError::Timeout {
                    duration: std::time::Duration::from_secs(30),
                },
                ErrorKind::CollaboratorUnavailable,
            ),
            (PantryError::not_found("list", "abc"), ErrorKind::NotFound),
            (PantryError::AccessDenied("x".into()), ErrorKind::AccessDenied),
            (PantryError::Conflict("x".into()), ErrorKind::Conflict),
            (PantryError::Validation("x".into()), ErrorKind::Validation),
            (
                PantryError::StateExpired {
                    slot: "duplicate_resolution".into(),
                },
                ErrorKind::StateExpired,
            ),
            (PantryError::EmptyResult("x".into()), ErrorKind::CollaboratorEmpty),
            (PantryError::Internal("x".into()), ErrorKind::Fatal),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn missing_message_only_matches_message_entity() {
        assert!(PantryError::not_found("message", "1:2").is_missing_message());
        assert!(!PantryError::not_found("list", "1").is_missing_message());
    }

    #[test]
    fn state_expired_display_names_slot() {
        let err = PantryError::StateExpired {
            slot: "product_list_selection".into(),
        };
        assert_eq!(
            err.to_string(),
            "workflow state `product_list_selection` expired"
        );
    }
}
