//! Profile management for the signed-in user
//!
//! Every operation passes the `/profile` route guard first: without an
//! access credential the caller is sent to log in.

pub mod geocode;

pub use geocode::ReverseGeocoder;

use crate::api::{Profile, ProfileUpdate};
use crate::error::{AgrowError, AgrowResult};
use crate::routes::{self, Navigation, Route};
use crate::session::SessionManager;
use crate::validate::ValidationError;
use tracing::info;

/// Cities offered when picking a profile location
pub const LOCATION_SUGGESTIONS: [&str; 20] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Ahmedabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "Jaipur",
    "Lucknow",
    "Kanpur",
    "Nagpur",
    "Indore",
    "Thane",
    "Bhopal",
    "Visakhapatnam",
    "Patna",
    "Vadodara",
    "Ghaziabad",
    "Ludhiana",
];

/// Suggested locations starting with `prefix` (case-insensitive)
pub fn suggest_locations(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim().to_lowercase();
    LOCATION_SUGGESTIONS
        .into_iter()
        .filter(|city| city.to_lowercase().starts_with(&prefix))
        .collect()
}

/// Field changes requested by the user; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,
}

impl ProfileEdit {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.location.is_none()
            && self.profile_picture.is_none()
    }

    /// Apply the edit on top of `current`, producing the full update body
    pub fn apply(&self, current: &Profile) -> ProfileUpdate {
        let pick = |edit: &Option<String>, current: &str| {
            edit.as_deref().unwrap_or(current).trim().to_string()
        };

        ProfileUpdate {
            first_name: pick(&self.first_name, &current.first_name),
            last_name: pick(&self.last_name, &current.last_name),
            email: pick(&self.email, &current.email),
            location: pick(&self.location, &current.location),
            profile_picture: self.profile_picture.as_deref().map(|p| p.trim().to_string()),
        }
    }
}

/// Profile operations bound to a session
pub struct ProfileService<'a> {
    session: &'a SessionManager,
}

impl<'a> ProfileService<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    async fn access_token(&self) -> AgrowResult<String> {
        let token = self.session.access_token().await;
        match (routes::guard(Route::Profile, token.is_some()), token) {
            (Navigation::Render(_), Some(token)) => Ok(token),
            _ => Err(AgrowError::NotAuthenticated),
        }
    }

    /// Fetch the current profile
    pub async fn fetch(&self) -> AgrowResult<Profile> {
        let token = self.access_token().await?;
        self.session.api().me(&token).await
    }

    /// Replace the profile with `update`
    pub async fn update(&self, update: &ProfileUpdate) -> AgrowResult<()> {
        let token = self.access_token().await?;
        self.session.api().update_profile(&token, update).await?;
        info!("Profile updated");
        Ok(())
    }

    /// Fetch, apply `edit`, and save. Returns the update that was sent.
    pub async fn edit(&self, edit: &ProfileEdit) -> AgrowResult<ProfileUpdate> {
        let current = self.fetch().await?;
        let update = edit.apply(&current);
        self.update(&update).await?;
        Ok(update)
    }

    /// Delete the account, confirmed by its phone number.
    ///
    /// On success every stored credential is dropped.
    pub async fn delete_account(&self, phone: &str) -> AgrowResult<()> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(ValidationError::InvalidPhone.into());
        }

        let token = self.access_token().await?;
        self.session.api().delete_account(&token, phone).await?;

        self.session.end_session().await;
        self.session.forget().await;
        info!("Account deleted");
        Ok(())
    }
}
