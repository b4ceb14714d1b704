//! Request and response bodies exchanged with the account API

use crate::validate::{self, ValidationError};
use serde::{Deserialize, Serialize};

/// How the user identifies themselves at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Identifier {
    Email(String),
    Phone(String),
}

impl Identifier {
    /// Pick the login identifier from raw form input.
    ///
    /// A non-empty email wins over a phone number. Phone numbers are sent
    /// digits-only.
    pub fn from_input(email: Option<&str>, phone: Option<&str>) -> Result<Self, ValidationError> {
        let email = email.map(str::trim).filter(|s| !s.is_empty());
        let phone = phone.map(str::trim).filter(|s| !s.is_empty());

        if let Some(email) = email {
            if !validate::is_valid_email(email) {
                return Err(ValidationError::InvalidEmail);
            }
            return Ok(Self::Email(email.to_string()));
        }

        if let Some(phone) = phone {
            if !validate::is_valid_login_phone(phone) {
                return Err(ValidationError::InvalidPhone);
            }
            return Ok(Self::Phone(validate::sanitize_phone(phone)));
        }

        Err(ValidationError::MissingIdentifier)
    }

    /// Short label for the identifier kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
        }
    }

    /// The identifier value itself
    pub fn value(&self) -> &str {
        match self {
            Self::Email(v) | Self::Phone(v) => v,
        }
    }
}

/// Login form contents
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub identifier: Identifier,
    pub password: String,
}

impl LoginCredentials {
    /// Validate raw login form input
    pub fn new(
        email: Option<&str>,
        phone: Option<&str>,
        password: &str,
    ) -> Result<Self, ValidationError> {
        Self::from_parts(Identifier::from_input(email, phone)?, password)
    }

    /// Pair an already-validated identifier with a password
    pub fn from_parts(identifier: Identifier, password: &str) -> Result<Self, ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        Ok(Self {
            identifier,
            password: password.to_string(),
        })
    }

    /// Wire body for `POST /auth/login`
    pub fn request(&self) -> LoginRequest<'_> {
        let (email, phone) = match &self.identifier {
            Identifier::Email(e) => (Some(e.as_str()), None),
            Identifier::Phone(p) => (None, Some(p.as_str())),
        };
        LoginRequest {
            email,
            phone,
            password: &self.password,
        }
    }
}

/// `POST /auth/login` body
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    pub password: &'a str,
}

/// Minimal user record returned with a login
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSummary {
    pub first_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UserSummary {
    /// Name shown for the signed-in user
    pub fn display_name(&self) -> String {
        [&self.first_name, &self.name, &self.email, &self.phone]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| "User".to_string())
    }
}

/// `POST /auth/login` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: UserSummary,
}

/// `POST /auth/token/refresh` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// `POST /auth/token/refresh` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshResponse {
    pub access_token: Option<String>,
}

/// Signup form contents
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Validate the form and build the wire body
    pub fn validate(&self) -> Result<SignupRequest, ValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(ValidationError::MissingFirstName);
        }
        if !validate::is_valid_signup_phone(&self.phone) {
            return Err(ValidationError::InvalidSignupPhone);
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingPassword);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        let email = self.email.trim();
        if !email.is_empty() && !validate::is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(SignupRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: validate::sanitize_phone(&self.phone),
            email: (!email.is_empty()).then(|| email.to_string()),
            password: self.password.clone(),
        })
    }
}

/// `POST /auth/signup` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

/// Profile as held by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
    #[serde(alias = "profilePicture")]
    pub profile_image: String,
}

/// `PUT /auth/me` body: the full edited profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// `DELETE /auth/me` body
#[derive(Debug, Serialize)]
pub struct DeleteAccountRequest<'a> {
    pub phone: &'a str,
}

/// `POST /auth/forgot-password` body
#[derive(Debug, Serialize)]
pub struct ForgotPasswordRequest<'a> {
    pub phone: &'a str,
}

/// `POST /auth/reset-password` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub phone: String,
    pub code: String,
    pub new_password: String,
}
