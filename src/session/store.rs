//! Key-value credential storage
//!
//! Two scopes back the session: a session-scoped store that disappears when
//! the user's login session ends, and a durable store that survives restarts.
//! Both are addressed by the fixed names in [`keys`].

use crate::error::{AgrowError, AgrowResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tracing::debug;

/// Fixed storage keys
pub mod keys {
    /// Session scope: bearer token for the current session
    pub const ACCESS_TOKEN: &str = "access-token";
    /// Session scope: name shown for the signed-in user
    pub const USERNAME: &str = "username";
    /// Durable scope: long-lived refresh token
    pub const REFRESH_TOKEN: &str = "refresh-token";
    /// Durable scope: identifier remembered for the login form
    pub const LOGIN_DATA: &str = "login-data";
}

/// A string-valued key-value store
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read a value, `None` when absent
    async fn get(&self, key: &str) -> AgrowResult<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> AgrowResult<()>;

    /// Remove a value; absent keys are not an error
    async fn remove(&self, key: &str) -> AgrowResult<()>;

    /// Remove every value in this store
    async fn clear(&self) -> AgrowResult<()>;
}

/// On-disk entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    stored_at: DateTime<Utc>,
}

/// Directory-backed store, one owner-only JSON file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a store rooted at `dir`
    pub async fn open(dir: impl Into<PathBuf>) -> AgrowResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AgrowError::io(format!("creating storage dir {}", dir.display()), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            std::fs::set_permissions(&dir, perms)
                .map_err(|e| AgrowError::io("setting storage dir permissions", e))?;
        }

        Ok(Self { dir })
    }

    /// Directory this store writes to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> AgrowResult<Option<String>> {
        let path = self.entry_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| AgrowError::io(format!("reading {}", path.display()), e))?;

        let entry: StoredValue = serde_json::from_str(&content)?;
        Ok(Some(entry.value))
    }

    async fn set(&self, key: &str, value: &str) -> AgrowResult<()> {
        let path = self.entry_path(key);
        let entry = StoredValue {
            value: value.to_string(),
            stored_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&entry)?;

        fs::write(&path, content)
            .await
            .map_err(|e| AgrowError::io(format!("writing {}", path.display()), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, perms)
                .map_err(|e| AgrowError::io("setting storage file permissions", e))?;
        }

        debug!("Stored {} in {}", key, self.dir.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AgrowResult<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| AgrowError::io(format!("removing {}", path.display()), e))?;
        }
        Ok(())
    }

    async fn clear(&self) -> AgrowResult<()> {
        if !self.dir.exists() {
            return Ok(());
        }

        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| AgrowError::io("reading storage directory", e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AgrowError::io("reading storage entry", e))?
        {
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(entry.path())
                    .await
                    .map_err(|e| AgrowError::io("removing storage file", e))?;
            }
        }

        Ok(())
    }
}

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AgrowResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| AgrowError::Internal("memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> AgrowResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AgrowResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AgrowResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    async fn clear(&self) -> AgrowResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}
