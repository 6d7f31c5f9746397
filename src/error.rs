//! Error types for option building, host calls and scene application.
//!
//! Merging never fails and the task queue returns task errors unchanged, so
//! only the layers built on top of them define errors here.

use thiserror::Error;

/// Failure to turn a caller's option object into engine options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("{kind} option '{field}' is required")]
    MissingField { kind: &'static str, field: &'static str },

    #[error("{kind} '{name}' needs at least {min} points, got {got}")]
    TooFewPoints {
        kind: &'static str,
        name: String,
        min: usize,
        got: usize,
    },

    #[error("invalid colour '{0}': expected #rrggbb, #rrggbbaa, a colour name or [r, g, b(, a)]")]
    InvalidColour(String),

    #[error("invalid node path '{name}': {reason}")]
    InvalidPath { name: String, reason: String },

    #[error("malformed {kind} options: {source}")]
    Deserialize {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reported by a scene host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("host rejected {operation} for '{target}': {reason}")]
    Rejected {
        operation: &'static str,
        target: String,
        reason: String,
    },

    #[error("host unavailable: {0}")]
    Unavailable(String),
}

impl HostError {
    pub fn rejected(
        operation: &'static str,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            operation,
            target: target.into(),
            reason: reason.into(),
        }
    }
}

/// Failure while applying a scene plan.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("no node path named '{0}' is registered")]
    UnknownPath(String),
}

/// Result type for option building.
pub type OptionsResult<T> = std::result::Result<T, OptionsError>;
