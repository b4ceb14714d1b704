//! Session state and outcomes

use crate::api::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication state of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("unauthenticated"),
            Self::Authenticated => f.write_str("authenticated"),
        }
    }
}

/// Result of trying to restore a session from the refresh credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// An access credential was already held; nothing was sent
    AlreadyActive,
    /// A new access credential was obtained and stored
    Refreshed,
    /// No refresh credential is stored
    NoRefreshCredential,
    /// The exchange was attempted and did not yield a usable credential
    Failed(String),
}

impl RefreshOutcome {
    /// Whether the session holds an access credential afterwards
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::AlreadyActive | Self::Refreshed)
    }

    /// Short label for logs and audit records
    pub fn label(&self) -> &'static str {
        match self {
            Self::AlreadyActive => "already_active",
            Self::Refreshed => "refreshed",
            Self::NoRefreshCredential => "no_refresh_credential",
            Self::Failed(_) => "failed",
        }
    }
}

/// Login identifier remembered for re-filling the login form.
///
/// Passwords are never remembered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedLogin {
    pub identifier: Identifier,
}
