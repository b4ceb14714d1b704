//! Audit trail for account and session events
//!
//! One JSON object per line in `<state_dir>/agrowmart/audit.log`. Events are
//! typed and carry only flags and labels, so passwords, reset codes and
//! tokens have nowhere to go.

use crate::config::{schema::Config, ConfigManager};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Something worth recording about an account or session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AuditEvent {
    Signup { with_email: bool },
    Login { identifier: &'static str, persist: bool },
    Refresh { outcome: &'static str },
    Logout { forget: bool },
    ProfileUpdated { picture: bool },
    AccountDeleted,
    ResetRequested,
    PasswordReset,
}

impl AuditEvent {
    /// Dotted event name written to the `event` field
    pub fn name(&self) -> &'static str {
        match self {
            Self::Signup { .. } => "account.signup",
            Self::Login { .. } => "auth.login",
            Self::Refresh { .. } => "auth.refresh",
            Self::Logout { .. } => "auth.logout",
            Self::ProfileUpdated { .. } => "account.updated",
            Self::AccountDeleted => "account.deleted",
            Self::ResetRequested => "password.reset_requested",
            Self::PasswordReset => "password.reset",
        }
    }
}

#[derive(Serialize)]
struct Entry<'a> {
    timestamp: DateTime<Utc>,
    event: &'static str,
    data: &'a AuditEvent,
}

fn entry_line(event: &AuditEvent, at: DateTime<Utc>) -> serde_json::Result<String> {
    let entry = Entry {
        timestamp: at,
        event: event.name(),
        data: event,
    };
    let mut line = serde_json::to_string(&entry)?;
    line.push('\n');
    Ok(line)
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}

/// Appends events to the audit file; a disabled log drops them
pub struct AuditLog {
    path: Option<PathBuf>,
}

impl AuditLog {
    pub fn new(config: &Config) -> Self {
        Self::at(
            config
                .general
                .audit_log
                .then(ConfigManager::audit_log_path),
        )
    }

    fn at(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Record `event`. Write failures are logged and the flow carries on.
    pub async fn record(&self, event: AuditEvent) {
        let Some(path) = &self.path else {
            return;
        };

        let result = match entry_line(&event, Utc::now()) {
            Ok(line) => append_line(path, &line).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            warn!("Dropping {} audit event ({}): {}", event.name(), path.display(), e);
        }
    }
}
