//! Configuration schema for AgrowMart
//!
//! Configuration is stored at `~/.config/agrowmart/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Backend API settings
    pub api: ApiConfig,

    /// Account flow settings
    pub account: AccountConfig,

    /// Profile editing settings
    pub profile: ProfileConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,

    /// Record authentication events in the audit log
    pub audit_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
            audit_log: true,
        }
    }
}

/// Backend API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the account API
    pub base_url: String,

    /// Per-request timeout in seconds (unset = wait indefinitely)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            timeout_secs: None,
        }
    }
}

/// Account flow settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Country code prepended to phone numbers entered without one
    pub default_country_code: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            default_country_code: "+91".to_string(),
        }
    }
}

/// Profile editing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Nominatim-compatible reverse geocoding endpoint
    pub geocoder_url: String,

    /// User-Agent sent to the geocoder
    pub geocoder_user_agent: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            geocoder_user_agent: concat!("agrowmart/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
