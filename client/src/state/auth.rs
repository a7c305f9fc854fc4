//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is determined once per page load by an [`AuthBootstrap`] and
//! never mutated by the client afterwards. The route outlet blocks on
//! [`AuthState::Loading`] so no route content paints before the answer
//! arrives, whether that answer is a user or the absence of one.
//!
//! ERROR HANDLING
//! ==============
//! A failed session check is not the same as "no session". It resolves to
//! [`Session::Unknown`], which guards treat as signed out while the landing
//! page keeps rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::rc::Rc;

use async_trait::async_trait;

use crate::net::types::User;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session check failed: {0}")]
    Network(String),
    #[error("session check returned status {0}")]
    Status(u16),
    #[error("session check returned an unreadable body: {0}")]
    InvalidResponse(String),
}

/// Outcome of the auth bootstrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Session {
    SignedIn(User),
    Anonymous,
    /// The session source could not answer.
    Unknown { reason: String },
}

impl Session {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Anonymous | Self::Unknown { .. } => None,
        }
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }
}

/// Authentication state shared through context as `RwSignal<AuthState>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Loading,
    Resolved(Session),
}

impl AuthState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Loading => None,
            Self::Resolved(session) => Some(session),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session().and_then(Session::user)
    }
}

/// Where the "current session" answer comes from.
#[async_trait(?Send)]
pub trait SessionSource {
    /// `Ok(None)` means the backend positively reported no session.
    async fn current_session(&self) -> Result<Option<User>, SessionError>;
}

/// Source that always reports no session.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSession;

#[async_trait(?Send)]
impl SessionSource for NoSession {
    async fn current_session(&self) -> Result<Option<User>, SessionError> {
        Ok(None)
    }
}

/// One-shot session check for a single page load.
pub struct AuthBootstrap {
    source: Rc<dyn SessionSource>,
    started: bool,
}

impl AuthBootstrap {
    pub fn new(source: Rc<dyn SessionSource>) -> Self {
        Self { source, started: false }
    }

    /// Query the source on the first call; later calls return `None` without
    /// touching the source.
    pub async fn run_once(&mut self) -> Option<Session> {
        if self.started {
            return None;
        }
        self.started = true;
        Some(resolve_session(self.source.as_ref()).await)
    }

    /// Run the check and hand the resolved state to `publish`.
    ///
    /// `publish` is called at most once, and only after the source answers.
    pub async fn publish(mut self, publish: impl FnOnce(AuthState)) {
        if let Some(session) = self.run_once().await {
            publish(AuthState::Resolved(session));
        }
    }
}

/// Map a source answer onto a [`Session`], logging failures.
pub async fn resolve_session(source: &dyn SessionSource) -> Session {
    match source.current_session().await {
        Ok(Some(user)) => Session::SignedIn(user),
        Ok(None) => Session::Anonymous,
        Err(e) => {
            log::warn!("{e}; continuing without a session");
            Session::Unknown { reason: e.to_string() }
        }
    }
}
