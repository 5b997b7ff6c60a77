use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a `GET /api/scan` round trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("invalid scan response: {0}")]
    Malformed(String),

    #[error("scan timed out after {0} s")]
    TimedOut(u64),
}

/// Failure of a `POST /api/update/{ip}` round trip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum UpdateError {
    /// The server answered but refused or failed the update
    #[error("{0}")]
    Rejected(String),

    /// The request could not be completed
    #[error("{0}")]
    Transport(String),
}

impl UpdateError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Failure to load a translation table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("failed to fetch translations for {language}: {reason}")]
    Fetch { language: String, reason: String },

    #[error("invalid translation table for {language}: {reason}")]
    Malformed { language: String, reason: String },
}

/// Rejected `CoreConfig`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);
