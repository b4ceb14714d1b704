//! Form validation for account flows
//!
//! Every check here runs before any request leaves the machine. Messages are
//! shown to the user as-is.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum length of a reset code
pub const MIN_RESET_CODE_LEN: usize = 4;

/// Minimum length of a new password set through password reset
pub const MIN_PASSWORD_LEN: usize = 6;

/// Input rejected before reaching the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter a valid phone number.")]
    InvalidPhone,

    #[error("Please enter email or phone number.")]
    MissingIdentifier,

    #[error("Please enter your password.")]
    MissingPassword,

    #[error("Please enter your first name.")]
    MissingFirstName,

    #[error("Please enter a valid 10-digit phone number.")]
    InvalidSignupPhone,

    #[error("Passwords do not match!")]
    PasswordMismatch,

    #[error("Enter valid phone number (10-14 digits)")]
    InvalidRecoveryPhone,

    #[error("Enter the code you received")]
    InvalidResetCode,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

/// Strip everything except ASCII digits.
pub fn sanitize_phone(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Phone check used by login: a 10-digit local number or an 11-14 digit
/// number that already carries a country code.
pub fn is_valid_login_phone(value: &str) -> bool {
    let digits = sanitize_phone(value);
    digits.len() == 10 || (11..=14).contains(&digits.len())
}

/// Phone check used by password recovery: 10-14 digits.
pub fn is_valid_recovery_phone(value: &str) -> bool {
    (10..=14).contains(&sanitize_phone(value).len())
}

/// Phone check used by signup: exactly 10 digits.
pub fn is_valid_signup_phone(value: &str) -> bool {
    sanitize_phone(value).len() == 10
}

/// Something, `@`, something, `.`, something, with no whitespace inside
/// the match.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Normalize a phone number to international form.
///
/// Input that already starts with `+` keeps its own country code; anything
/// else gets `country_code` prepended.
pub fn international_phone(value: &str, country_code: &str) -> String {
    let digits = sanitize_phone(value);
    if value.trim().starts_with('+') {
        format!("+{}", digits)
    } else {
        format!("{}{}", country_code, digits)
    }
}

/// Check a password reset submission.
pub fn validate_reset(code: &str, new_password: &str) -> Result<(), ValidationError> {
    if code.trim().len() < MIN_RESET_CODE_LEN {
        return Err(ValidationError::InvalidResetCode);
    }
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Check a recovery phone and return it in international form.
pub fn recovery_phone(value: &str, country_code: &str) -> Result<String, ValidationError> {
    if !is_valid_recovery_phone(value) {
        return Err(ValidationError::InvalidRecoveryPhone);
    }
    Ok(international_phone(value, country_code))
}
