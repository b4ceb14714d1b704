//! Reverse geocoding for the profile location hint
//!
//! Lookups are best-effort: any failure means "no hint".

use crate::config::schema::ProfileConfig;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use ureq::http::header;
use ureq::Agent;

/// Lookup timeout; a hint is not worth waiting long for
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Nominatim-compatible reverse geocoder
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    base_url: String,
    user_agent: String,
    agent: Agent,
}

impl ReverseGeocoder {
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(LOOKUP_TIMEOUT))
            .build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            agent: config.into(),
        }
    }

    pub fn from_config(config: &ProfileConfig) -> Self {
        Self::new(&config.geocoder_url, &config.geocoder_user_agent)
    }

    /// Best guess at the place name for a coordinate pair
    pub async fn locate(&self, latitude: f64, longitude: f64) -> Option<String> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            debug!("Ignoring out-of-range coordinates {}, {}", latitude, longitude);
            return None;
        }

        let agent = self.agent.clone();
        let url = format!("{}/reverse", self.base_url);
        let user_agent = self.user_agent.clone();

        let lookup = tokio::task::spawn_blocking(move || -> Result<Value, ureq::Error> {
            let mut response = agent
                .get(&url)
                .header(header::USER_AGENT, user_agent)
                .query("format", "json")
                .query("lat", latitude.to_string())
                .query("lon", longitude.to_string())
                .call()?;
            let body = response.body_mut().read_json::<Value>()?;
            Ok(body)
        })
        .await;

        match lookup {
            Ok(Ok(body)) => place_name(&body),
            Ok(Err(e)) => {
                debug!("Reverse geocoding failed: {}", e);
                None
            }
            Err(e) => {
                debug!("Reverse geocoding task failed: {}", e);
                None
            }
        }
    }
}

/// City, then town, then village, then state from a reverse lookup reply
pub fn place_name(body: &Value) -> Option<String> {
    let address = body.get("address")?;
    ["city", "town", "village", "state"]
        .iter()
        .filter_map(|key| address.get(key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}
