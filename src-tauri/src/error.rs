//! Error types shared across the backend.
//!
//! Only the fatal tier is represented as an error value. Login failures during
//! reconnect or platform switching are reported as `bool` together with the
//! session's `connection_failed` flag, and missing or corrupt local data is
//! replaced by defaults without surfacing anything.

use std::path::PathBuf;

/// Failures while resolving or writing the pin file.
#[derive(Debug, thiserror::Error)]
pub enum PinError {
    #[error("failed to resolve the user home directory")]
    HomeDir,

    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize pins: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write pin file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures reported by a presence client.
#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    #[error("invalid client id: {0}")]
    InvalidClientId(String),

    #[error("Discord not available: {0}")]
    Unavailable(String),

    #[error("Discord handshake failed: {0}")]
    Handshake(String),

    #[error("Discord handshake timed out")]
    Timeout,

    #[error("not connected to Discord")]
    NotConnected,

    #[error("failed to update activity: {0}")]
    Activity(String),
}

/// Errors that end the current operation and are surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("pin storage error: {0}")]
    Storage(#[from] PinError),

    #[error("activity update failed: {0}")]
    Activity(#[source] PresenceError),
}
