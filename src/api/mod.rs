//! Account API client
//!
//! `AuthApi` is the seam between the session/profile logic and the remote
//! backend. `HttpAuthApi` is the production implementation; tests substitute
//! in-memory fakes.

#[cfg(test)]
pub(crate) mod fake;
mod http;
pub mod types;

pub use http::HttpAuthApi;
pub use types::{
    Identifier, LoginCredentials, LoginResponse, Profile, ProfileUpdate, RefreshResponse,
    ResetPasswordRequest, SignupForm, SignupRequest, UserSummary,
};

use crate::error::AgrowResult;
use async_trait::async_trait;

/// Endpoints exposed by the account backend
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/signup`
    async fn signup(&self, request: &SignupRequest) -> AgrowResult<()>;

    /// `POST /auth/login`
    async fn login(&self, credentials: &LoginCredentials) -> AgrowResult<LoginResponse>;

    /// `POST /auth/token/refresh`
    async fn refresh(&self, refresh_token: &str) -> AgrowResult<RefreshResponse>;

    /// `GET /auth/me`
    async fn me(&self, access_token: &str) -> AgrowResult<Profile>;

    /// `PUT /auth/me`
    async fn update_profile(&self, access_token: &str, update: &ProfileUpdate) -> AgrowResult<()>;

    /// `DELETE /auth/me`, confirmed by the account's phone number
    async fn delete_account(&self, access_token: &str, phone: &str) -> AgrowResult<()>;

    /// `POST /auth/forgot-password`
    async fn forgot_password(&self, phone: &str) -> AgrowResult<()>;

    /// `POST /auth/reset-password`
    async fn reset_password(&self, request: &ResetPasswordRequest) -> AgrowResult<()>;
}
