//! Error types for AgrowMart
//!
//! All modules use `AgrowResult<T>` as their return type.

use crate::validate::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for AgrowMart operations
pub type AgrowResult<T> = Result<T, AgrowError>;

/// All errors that can occur in AgrowMart
#[derive(Error, Debug)]
pub enum AgrowError {
    // Input errors, raised before any network call
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // Backend errors
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] ureq::Error),

    #[error("Unexpected response from {endpoint}: {reason}")]
    UnexpectedResponse { endpoint: String, reason: String },

    // Session errors
    #[error("Not logged in")]
    NotAuthenticated,

    /// The backend rejected the bearer credential of an authenticated call
    #[error("{message}")]
    SessionExpired { message: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl AgrowError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an API error from a status code and a human-readable message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Failure reply from the backend. A 401/403 to a call that carried an
    /// access credential means that credential is no longer accepted.
    pub fn from_reply(status: u16, message: impl Into<String>, authenticated: bool) -> Self {
        match status {
            401 | 403 if authenticated => Self::SessionExpired {
                message: message.into(),
            },
            _ => Self::api(status, message),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotAuthenticated => Some("Run: agrowmart login"),
            Self::SessionExpired { .. } => Some("Your session has expired. Run: agrowmart login"),
            Self::Transport(_) => Some("Check that the API is reachable (see --api-url)"),
            Self::ConfigInvalid { .. } => Some("Run: agrowmart config init --force"),
            _ => None,
        }
    }
}
