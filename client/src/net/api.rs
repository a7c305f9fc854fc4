//! REST API helpers for communicating with the backend through the edge.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Host builds (tests, tooling): the HTTP types exist but report that no
//! browser is available, so pure logic stays testable without WASM.
//!
//! ERROR HANDLING
//! ==============
//! Callers get typed `Result` outputs instead of panics. Classification of
//! status codes lives in plain functions so it is covered by host tests.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{LoginRedirect, User};
use crate::state::auth::{SessionError, SessionSource};
use crate::state::login::{LoginApi, LoginError};

/// Backend endpoint that returns the Google consent URL.
pub const LOGIN_ENDPOINT: &str = "/api/v1/google-login";

pub const DEFAULT_LOGIN_TIMEOUT_MS: u32 = 15_000;

/// How a session-check HTTP status should be read.
#[cfg(any(test, feature = "csr"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SessionStatus {
    /// Body carries the user.
    SignedIn,
    /// The backend positively reports no session.
    SignedOut,
    Failed,
}

#[cfg(any(test, feature = "csr"))]
pub(crate) fn classify_session_status(status: u16) -> SessionStatus {
    match status {
        200..=299 => SessionStatus::SignedIn,
        401 | 403 | 404 => SessionStatus::SignedOut,
        _ => SessionStatus::Failed,
    }
}

#[cfg(any(test, feature = "csr"))]
pub(crate) fn classify_login_status(status: u16) -> Result<(), LoginError> {
    if (200..300).contains(&status) { Ok(()) } else { Err(LoginError::Status(status)) }
}

/// Parse a timeout override in milliseconds, falling back to the default.
pub(crate) fn parse_timeout_ms(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|ms| *ms > 0)
        .unwrap_or(DEFAULT_LOGIN_TIMEOUT_MS)
}

/// `POST /api/v1/google-login` with a hard timeout.
#[derive(Clone, Copy, Debug)]
pub struct HttpLoginApi {
    timeout_ms: u32,
}

impl HttpLoginApi {
    #[must_use]
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    #[must_use]
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

impl Default for HttpLoginApi {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_TIMEOUT_MS)
    }
}

#[async_trait(?Send)]
impl LoginApi for HttpLoginApi {
    async fn request_redirect(&self) -> Result<LoginRedirect, LoginError> {
        #[cfg(feature = "csr")]
        {
            let request = async {
                let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
                    .send()
                    .await
                    .map_err(|e| LoginError::Network(e.to_string()))?;
                classify_login_status(resp.status())?;
                resp.json::<LoginRedirect>()
                    .await
                    .map_err(|e| LoginError::InvalidResponse(e.to_string()))
            };
            let timeout = gloo_timers::future::TimeoutFuture::new(self.timeout_ms);
            futures::pin_mut!(request, timeout);
            match futures::future::select(request, timeout).await {
                futures::future::Either::Left((outcome, _)) => outcome,
                futures::future::Either::Right(((), _)) => Err(LoginError::Timeout),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(LoginError::Network("not available outside the browser".to_owned()))
        }
    }
}

/// Cookie policy for the session check (fetch `credentials`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Credentials {
    /// Send cookies to any origin, so a cross-origin session endpoint still sees them.
    #[default]
    Include,
    SameOrigin,
}

#[cfg(feature = "csr")]
impl From<Credentials> for web_sys::RequestCredentials {
    fn from(value: Credentials) -> Self {
        match value {
            Credentials::Include => Self::Include,
            Credentials::SameOrigin => Self::SameOrigin,
        }
    }
}

/// `GET <endpoint>` returning the signed-in user.
#[derive(Clone, Debug)]
pub struct HttpSessionSource {
    endpoint: String,
    credentials: Credentials,
}

impl HttpSessionSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), credentials: Credentials::default() }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn credentials(&self) -> Credentials {
        self.credentials
    }
}

#[async_trait(?Send)]
impl SessionSource for HttpSessionSource {
    async fn current_session(&self) -> Result<Option<User>, SessionError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(&self.endpoint)
                .credentials(self.credentials.into())
                .send()
                .await
                .map_err(|e| SessionError::Network(e.to_string()))?;
            match classify_session_status(resp.status()) {
                SessionStatus::SignedIn => resp
                    .json::<User>()
                    .await
                    .map(Some)
                    .map_err(|e| SessionError::InvalidResponse(e.to_string())),
                SessionStatus::SignedOut => Ok(None),
                SessionStatus::Failed => Err(SessionError::Status(resp.status())),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(SessionError::Network(format!("{} is not reachable outside the browser", self.endpoint)))
        }
    }
}
