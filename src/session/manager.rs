//! Session lifecycle management
//!
//! The session manager is the only writer of credentials. It owns the
//! access credential (session scope) and the refresh credential plus the
//! remembered login identifier (durable scope).

use crate::api::{
    AuthApi, HttpAuthApi, LoginCredentials, LoginResponse, RefreshResponse, UserSummary,
};
use crate::config::{Config, ConfigManager};
use crate::error::AgrowResult;
use crate::session::state::{RefreshOutcome, RememberedLogin, SessionState};
use crate::session::store::{keys, FileStorage, Storage};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the client's authentication state
pub struct SessionManager {
    api: Arc<dyn AuthApi>,
    session: Box<dyn Storage>,
    durable: Box<dyn Storage>,
}

impl SessionManager {
    /// Create a session manager over explicit API and storage backends
    pub fn new(api: Arc<dyn AuthApi>, session: Box<dyn Storage>, durable: Box<dyn Storage>) -> Self {
        Self {
            api,
            session,
            durable,
        }
    }

    /// Open the per-user session using the configured backend
    pub async fn open(config: &Config) -> AgrowResult<Self> {
        let api = Arc::new(HttpAuthApi::from_config(&config.api));
        let session = FileStorage::open(ConfigManager::session_dir()).await?;
        let durable = FileStorage::open(ConfigManager::credentials_dir()).await?;
        Ok(Self::new(api, Box::new(session), Box::new(durable)))
    }

    /// Backend used by this session
    pub fn api(&self) -> &dyn AuthApi {
        self.api.as_ref()
    }

    /// Current access credential, if any
    pub async fn access_token(&self) -> Option<String> {
        read_non_empty(self.session.as_ref(), keys::ACCESS_TOKEN).await
    }

    /// Name shown for the signed-in user
    pub async fn display_name(&self) -> Option<String> {
        read_non_empty(self.session.as_ref(), keys::USERNAME).await
    }

    /// Whether a refresh credential is stored
    pub async fn has_refresh_credential(&self) -> bool {
        read_non_empty(self.durable.as_ref(), keys::REFRESH_TOKEN)
            .await
            .is_some()
    }

    /// Identifier remembered from the last persistent login
    pub async fn remembered_login(&self) -> Option<RememberedLogin> {
        let raw = read_non_empty(self.durable.as_ref(), keys::LOGIN_DATA).await?;
        match serde_json::from_str(&raw) {
            Ok(remembered) => Some(remembered),
            Err(e) => {
                warn!("Ignoring unreadable remembered login: {}", e);
                None
            }
        }
    }

    /// Authentication state of this session
    pub async fn state(&self) -> SessionState {
        if self.access_token().await.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Make sure the session has an access credential if one can be had.
    ///
    /// With an access credential present this is a no-op. Otherwise a stored
    /// refresh credential is exchanged exactly once. Failures leave the
    /// session unauthenticated and the refresh credential untouched; they
    /// are reported in the outcome, never raised.
    pub async fn ensure_session(&self) -> RefreshOutcome {
        if self.access_token().await.is_some() {
            debug!("Access credential present, skipping refresh");
            return RefreshOutcome::AlreadyActive;
        }

        let Some(refresh_token) = read_non_empty(self.durable.as_ref(), keys::REFRESH_TOKEN).await
        else {
            return RefreshOutcome::NoRefreshCredential;
        };

        let outcome = match self.api.refresh(&refresh_token).await {
            Ok(RefreshResponse {
                access_token: Some(token),
            }) if !token.is_empty() => match self.session.set(keys::ACCESS_TOKEN, &token).await {
                Ok(()) => RefreshOutcome::Refreshed,
                Err(e) => RefreshOutcome::Failed(format!("storing access credential: {}", e)),
            },
            Ok(_) => RefreshOutcome::Failed("refresh response carried no access token".to_string()),
            Err(e) => RefreshOutcome::Failed(e.to_string()),
        };

        match &outcome {
            RefreshOutcome::Failed(reason) => debug!("Session refresh failed: {}", reason),
            _ => info!("Session restored from refresh credential"),
        }
        outcome
    }

    /// Log in and store the resulting credentials.
    ///
    /// With `persist` the refresh credential and the login identifier are
    /// kept in durable storage; without it any previously persisted ones are
    /// removed. Nothing is written when the backend rejects the login, and a
    /// storage failure part way through leaves the session logged out with
    /// no persisted credentials.
    pub async fn login(
        &self,
        credentials: &LoginCredentials,
        persist: bool,
    ) -> AgrowResult<UserSummary> {
        let response = self.api.login(credentials).await?;

        if let Err(e) = self.store_login(credentials, &response, persist).await {
            warn!("Storing login failed, rolling back: {}", e);
            self.end_session().await;
            self.forget().await;
            return Err(e);
        }

        info!(
            "Logged in by {} (persistent: {})",
            credentials.identifier.kind(),
            persist
        );
        Ok(response.user)
    }

    /// Durable scope first, so the access credential is only ever written
    /// once everything it depends on is in place.
    async fn store_login(
        &self,
        credentials: &LoginCredentials,
        response: &LoginResponse,
        persist: bool,
    ) -> AgrowResult<()> {
        if persist {
            match response.refresh_token.as_deref() {
                Some(token) if !token.is_empty() => {
                    self.durable.set(keys::REFRESH_TOKEN, token).await?
                }
                _ => self.durable.remove(keys::REFRESH_TOKEN).await?,
            }
            let remembered = RememberedLogin {
                identifier: credentials.identifier.clone(),
            };
            self.durable
                .set(keys::LOGIN_DATA, &serde_json::to_string(&remembered)?)
                .await?;
        } else {
            self.clear_durable().await?;
        }

        self.session
            .set(keys::ACCESS_TOKEN, &response.access_token)
            .await?;
        self.session
            .set(keys::USERNAME, &response.user.display_name())
            .await
    }

    /// Drop the access credential and display name. Never fails.
    pub async fn logout(&self) {
        for key in [keys::ACCESS_TOKEN, keys::USERNAME] {
            if let Err(e) = self.session.remove(key).await {
                warn!("Failed to clear {}: {}", key, e);
            }
        }
        info!("Logged out");
    }

    /// Drop the refresh credential and remembered login. Never fails.
    pub async fn forget(&self) {
        if let Err(e) = self.clear_durable().await {
            warn!("Failed to clear durable credentials: {}", e);
        }
    }

    /// Drop everything held for this session. Never fails.
    pub async fn end_session(&self) {
        if let Err(e) = self.session.clear().await {
            warn!("Failed to clear session storage: {}", e);
        }
    }

    async fn clear_durable(&self) -> AgrowResult<()> {
        self.durable.remove(keys::REFRESH_TOKEN).await?;
        self.durable.remove(keys::LOGIN_DATA).await?;
        Ok(())
    }
}

async fn read_non_empty(store: &dyn Storage, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(e) => {
            warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}
