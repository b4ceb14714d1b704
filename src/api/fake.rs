//! In-memory backend for unit tests

use super::types::{
    LoginCredentials, LoginResponse, Profile, ProfileUpdate, RefreshResponse,
    ResetPasswordRequest, SignupRequest,
};
use super::AuthApi;
use crate::error::{AgrowError, AgrowResult};
use async_trait::async_trait;
use std::sync::Mutex;

/// Scriptable stand-in for the account backend
pub(crate) struct FakeApi {
    calls: Mutex<Vec<&'static str>>,
    /// Refresh token the backend accepts
    pub valid_refresh: String,
    /// Access token minted by a refresh
    pub issued_access: String,
    /// Login reply: JSON body or (status, message)
    pub login_reply: Result<serde_json::Value, (u16, String)>,
    /// Phone number on the account
    pub phone: String,
    pub profile: Mutex<Profile>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            valid_refresh: "R".to_string(),
            issued_access: "A2".to_string(),
            login_reply: Ok(serde_json::json!({
                "accessToken": "A",
                "refreshToken": "R",
                "user": {"firstName": "Avi"}
            })),
            phone: "9876543210".to_string(),
            profile: Mutex::new(Profile {
                first_name: "Avi".to_string(),
                last_name: "Sharma".to_string(),
                email: "avi@farm.in".to_string(),
                location: String::new(),
                profile_image: String::new(),
            }),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn authorize(&self, access_token: &str) -> AgrowResult<()> {
        if access_token == "A" || access_token == self.issued_access {
            Ok(())
        } else {
            Err(AgrowError::from_reply(401, "Invalid or expired token", true))
        }
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn signup(&self, request: &SignupRequest) -> AgrowResult<()> {
        self.record("signup");
        if request.phone == self.phone {
            return Err(AgrowError::api(409, "Phone already registered"));
        }
        Ok(())
    }

    async fn login(&self, _credentials: &LoginCredentials) -> AgrowResult<LoginResponse> {
        self.record("login");
        match &self.login_reply {
            Ok(body) => Ok(serde_json::from_value(body.clone())?),
            Err((status, message)) => Err(AgrowError::api(*status, message.clone())),
        }
    }

    async fn refresh(&self, refresh_token: &str) -> AgrowResult<RefreshResponse> {
        self.record("refresh");
        if refresh_token != self.valid_refresh {
            return Err(AgrowError::api(401, "Invalid refresh token"));
        }
        Ok(RefreshResponse {
            access_token: Some(self.issued_access.clone()),
        })
    }

    async fn me(&self, access_token: &str) -> AgrowResult<Profile> {
        self.record("me");
        self.authorize(access_token)?;
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn update_profile(&self, access_token: &str, update: &ProfileUpdate) -> AgrowResult<()> {
        self.record("update_profile");
        self.authorize(access_token)?;
        let mut profile = self.profile.lock().unwrap();
        profile.first_name = update.first_name.clone();
        profile.last_name = update.last_name.clone();
        profile.email = update.email.clone();
        profile.location = update.location.clone();
        if let Some(picture) = &update.profile_picture {
            profile.profile_image = picture.clone();
        }
        Ok(())
    }

    async fn delete_account(&self, access_token: &str, phone: &str) -> AgrowResult<()> {
        self.record("delete_account");
        self.authorize(access_token)?;
        if phone != self.phone {
            return Err(AgrowError::api(400, "Phone number does not match"));
        }
        Ok(())
    }

    async fn forgot_password(&self, _phone: &str) -> AgrowResult<()> {
        self.record("forgot_password");
        Ok(())
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> AgrowResult<()> {
        self.record("reset_password");
        if request.code != "1234" {
            return Err(AgrowError::api(400, "Invalid or expired code"));
        }
        Ok(())
    }
}
