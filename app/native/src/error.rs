//! Error types for Foresight.
//!
//! This module provides the unified error type returned by the library
//! entry points and the CLI.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running Foresight.
#[derive(Debug, Error)]
pub enum ForesightError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A replay script is malformed.
    #[error("Replay error: {0}")]
    Replay(String),
    /// The overview actor is no longer running.
    #[error("Overview actor has stopped")]
    ActorStopped,
}

/// Serializable summary of an error, for `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum ErrorReport {
    /// See [`ForesightError::Config`].
    Config(String),
    /// See [`ForesightError::Io`].
    Io(String),
    /// See [`ForesightError::Json`].
    Json(String),
    /// See [`ForesightError::Replay`].
    Replay(String),
    /// See [`ForesightError::ActorStopped`].
    ActorStopped(String),
}

impl From<&ForesightError> for ErrorReport {
    fn from(err: &ForesightError) -> Self {
        let message = err.to_string();
        match err {
            ForesightError::Config(_) => Self::Config(message),
            ForesightError::Io(_) => Self::Io(message),
            ForesightError::Json(_) => Self::Json(message),
            ForesightError::Replay(_) => Self::Replay(message),
            ForesightError::ActorStopped => Self::ActorStopped(message),
        }
    }
}

impl From<String> for ForesightError {
    fn from(msg: String) -> Self { Self::Replay(msg) }
}

impl From<&str> for ForesightError {
    fn from(msg: &str) -> Self { Self::Replay(msg.to_string()) }
}
