//! Login-initiation flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signing in is a hand-off: one `POST` asks the backend for an OAuth
//! consent URL and the browser leaves the app for it. The flow is an explicit
//! state machine so the page can render each state and tests can drive it
//! without a browser.
//!
//! ```text
//! Idle --submit--> Pending --ok--> Redirected (terminal)
//!                     |
//!                     +--error/timeout--> Failed --submit--> Pending
//! ```
//!
//! There is no cancel transition. While `Pending`, further submits are no-ops.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::net::types::LoginRedirect;
use crate::util::navigate::Navigator;

const SIGN_IN_LABEL: &str = "Sign in with Google";
const REDIRECTING_LABEL: &str = "Redirecting...";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("login request failed: {0}")]
    Network(String),
    #[error("login request returned status {0}")]
    Status(u16),
    #[error("login request timed out")]
    Timeout,
    #[error("login response was invalid: {0}")]
    InvalidResponse(String),
    #[error("browser navigation failed: {0}")]
    Navigation(String),
}

impl LoginError {
    /// Message shown under the sign-in button.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "We couldn't reach Trego. Check your connection and try again.",
            Self::Status(status) if *status >= 500 => {
                "Sign-in is temporarily unavailable. Please try again in a moment."
            }
            Self::Status(_) => "Sign-in was refused by the server. Please try again.",
            Self::Timeout => "Sign-in is taking too long to respond. Please try again.",
            Self::InvalidResponse(_) | Self::Navigation(_) => {
                "Something went wrong starting sign-in. Please try again."
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoginFlow {
    #[default]
    Idle,
    Pending,
    Redirected {
        url: String,
    },
    Failed {
        error: LoginError,
    },
}

impl LoginFlow {
    /// Whether the sign-in affordance is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed { .. })
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Idle | Self::Failed { .. } => SIGN_IN_LABEL,
            Self::Pending | Self::Redirected { .. } => REDIRECTING_LABEL,
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Failed { error } => Some(error.user_message()),
            _ => None,
        }
    }

    /// `Idle`/`Failed` -> `Pending`. Returns false (and changes nothing) otherwise.
    pub fn begin(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        *self = Self::Pending;
        true
    }

    /// Settle a pending attempt. Returns the URL to navigate to on success.
    pub fn settle(&mut self, outcome: Result<LoginRedirect, LoginError>) -> Option<String> {
        if !self.is_pending() {
            return None;
        }
        match outcome.and_then(validate_redirect) {
            Ok(url) => {
                *self = Self::Redirected { url: url.clone() };
                Some(url)
            }
            Err(error) => {
                log::warn!("google login failed: {error}");
                *self = Self::Failed { error };
                None
            }
        }
    }
}

/// Accept only absolute http(s) URLs with a host.
pub(crate) fn validate_redirect(redirect: LoginRedirect) -> Result<String, LoginError> {
    let url = redirect.redirect_url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| LoginError::InvalidResponse(format!("redirect url is not absolute: {url:?}")))?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || url.chars().any(char::is_whitespace) {
        return Err(LoginError::InvalidResponse(format!("redirect url is malformed: {url:?}")));
    }
    Ok(url.to_owned())
}

/// Backend call that starts the OAuth flow.
#[async_trait(?Send)]
pub trait LoginApi {
    async fn request_redirect(&self) -> Result<LoginRedirect, LoginError>;
}

/// Drives [`LoginFlow`] against a [`LoginApi`] and a [`Navigator`].
///
/// Clones share one flow, so every handle sees the same `Pending` guard.
#[derive(Clone)]
pub struct LoginController {
    flow: Rc<RefCell<LoginFlow>>,
    api: Rc<dyn LoginApi>,
    navigator: Rc<dyn Navigator>,
    observer: Option<Rc<dyn Fn(&LoginFlow)>>,
}

impl LoginController {
    pub fn new(api: Rc<dyn LoginApi>, navigator: Rc<dyn Navigator>) -> Self {
        Self { flow: Rc::new(RefCell::new(LoginFlow::Idle)), api, navigator, observer: None }
    }

    /// Called with the new state after every transition.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&LoginFlow) + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    #[must_use]
    pub fn flow(&self) -> LoginFlow {
        self.flow.borrow().clone()
    }

    /// Handle one press of the sign-in affordance.
    ///
    /// Issues exactly one backend request unless an attempt is already in
    /// flight, in which case this returns immediately.
    pub async fn submit(&self) {
        let began = self.flow.borrow_mut().begin();
        if !began {
            return;
        }
        self.notify();

        let outcome = self.api.request_redirect().await;
        let target = self.flow.borrow_mut().settle(outcome);
        self.notify();

        let Some(url) = target else {
            return;
        };
        if let Err(e) = self.navigator.assign(&url) {
            let error = LoginError::Navigation(e);
            log::warn!("google login failed: {error}");
            *self.flow.borrow_mut() = LoginFlow::Failed { error };
            self.notify();
        }
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            let snapshot = self.flow();
            observer(&snapshot);
        }
    }
}
