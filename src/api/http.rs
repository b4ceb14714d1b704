//! Blocking `ureq` transport driven from the tokio runtime

use super::types::{
    DeleteAccountRequest, ForgotPasswordRequest, LoginCredentials, LoginResponse, Profile,
    ProfileUpdate, RefreshRequest, RefreshResponse, ResetPasswordRequest, SignupRequest,
};
use super::AuthApi;
use crate::config::schema::ApiConfig;
use crate::error::{AgrowError, AgrowResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use ureq::http::{header, StatusCode};
use ureq::{Agent, RequestBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One request to the backend
#[derive(Debug)]
struct Call {
    method: Method,
    path: &'static str,
    bearer: Option<String>,
    body: Option<serde_json::Value>,
}

impl Call {
    fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            bearer: None,
            body: None,
        }
    }

    fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    fn json<T: Serialize>(mut self, body: &T) -> AgrowResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
enum Reply {
    Json(serde_json::Value),
    Text(String),
}

/// HTTP implementation of [`AuthApi`]
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    base_url: String,
    agent: Agent,
}

impl HttpAuthApi {
    /// Create a client for `base_url`. `timeout` of `None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: config.into(),
        }
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url, config.timeout_secs.map(Duration::from_secs))
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, call: Call) -> AgrowResult<Reply> {
        let agent = self.agent.clone();
        let url = format!("{}{}", self.base_url, call.path);
        debug!("{} {}", call.method, url);

        tokio::task::spawn_blocking(move || execute(&agent, &url, &call))
            .await
            .map_err(|e| AgrowError::Internal(format!("Request task failed: {}", e)))?
    }
}

fn authorize<B>(request: RequestBuilder<B>, bearer: Option<&str>) -> RequestBuilder<B> {
    let request = request.header(header::ACCEPT, "application/json");
    match bearer {
        Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => request,
    }
}

fn execute(agent: &Agent, url: &str, call: &Call) -> AgrowResult<Reply> {
    let bearer = call.bearer.as_deref();
    let result = match (call.method, &call.body) {
        (Method::Get, _) => authorize(agent.get(url), bearer).call(),
        (Method::Delete, None) => authorize(agent.delete(url), bearer).call(),
        (Method::Delete, Some(body)) => authorize(agent.delete(url), bearer)
            .force_send_body()
            .send_json(body),
        (Method::Post, Some(body)) => authorize(agent.post(url), bearer).send_json(body),
        (Method::Post, None) => authorize(agent.post(url), bearer).send_empty(),
        (Method::Put, Some(body)) => authorize(agent.put(url), bearer).send_json(body),
        (Method::Put, None) => authorize(agent.put(url), bearer).send_empty(),
    };
    let mut response = result?;

    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    let text = response.body_mut().read_to_string()?;

    let reply = if is_json {
        serde_json::from_str(&text)
            .map(Reply::Json)
            .unwrap_or(Reply::Text(text))
    } else {
        Reply::Text(text)
    };

    if !status.is_success() {
        let message = error_message(status, &reply);
        debug!("{} {} failed: {} {}", call.method, url, status.as_u16(), message);
        return Err(AgrowError::from_reply(
            status.as_u16(),
            message,
            bearer.is_some(),
        ));
    }

    Ok(reply)
}

/// Human-readable message for a failed response: the body's `error` field,
/// then its `message` field, then the status reason phrase.
fn error_message(status: StatusCode, reply: &Reply) -> String {
    let reason = || status.canonical_reason().unwrap_or("Request failed").to_string();

    match reply {
        Reply::Json(data) => ["error", "message"]
            .iter()
            .filter_map(|key| data.get(key).and_then(|v| v.as_str()))
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(reason),
        Reply::Text(_) => reason(),
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, reply: Reply) -> AgrowResult<T> {
    match reply {
        Reply::Json(value) => {
            serde_json::from_value(value).map_err(|e| AgrowError::UnexpectedResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })
        }
        Reply::Text(_) => Err(AgrowError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            reason: "expected a JSON body".to_string(),
        }),
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn signup(&self, request: &SignupRequest) -> AgrowResult<()> {
        self.send(Call::new(Method::Post, "/auth/signup").json(request)?)
            .await?;
        Ok(())
    }

    async fn login(&self, credentials: &LoginCredentials) -> AgrowResult<LoginResponse> {
        const PATH: &str = "/auth/login";
        let reply = self
            .send(Call::new(Method::Post, PATH).json(&credentials.request())?)
            .await?;
        decode(PATH, reply)
    }

    async fn refresh(&self, refresh_token: &str) -> AgrowResult<RefreshResponse> {
        const PATH: &str = "/auth/token/refresh";
        let reply = self
            .send(Call::new(Method::Post, PATH).json(&RefreshRequest { refresh_token })?)
            .await?;
        decode(PATH, reply)
    }

    async fn me(&self, access_token: &str) -> AgrowResult<Profile> {
        const PATH: &str = "/auth/me";
        let reply = self
            .send(Call::new(Method::Get, PATH).bearer(access_token))
            .await?;
        decode(PATH, reply)
    }

    async fn update_profile(&self, access_token: &str, update: &ProfileUpdate) -> AgrowResult<()> {
        self.send(
            Call::new(Method::Put, "/auth/me")
                .bearer(access_token)
                .json(update)?,
        )
        .await?;
        Ok(())
    }

    async fn delete_account(&self, access_token: &str, phone: &str) -> AgrowResult<()> {
        self.send(
            Call::new(Method::Delete, "/auth/me")
                .bearer(access_token)
                .json(&DeleteAccountRequest { phone })?,
        )
        .await?;
        Ok(())
    }

    async fn forgot_password(&self, phone: &str) -> AgrowResult<()> {
        self.send(Call::new(Method::Post, "/auth/forgot-password").json(&ForgotPasswordRequest { phone })?)
            .await?;
        Ok(())
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> AgrowResult<()> {
        self.send(Call::new(Method::Post, "/auth/reset-password").json(request)?)
            .await?;
        Ok(())
    }
}
