//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! edge is stateless per request: it only carries immutable config and the
//! upstream HTTP client, both cheap to clone.

use std::sync::Arc;

use crate::config::EdgeConfig;
use crate::proxy::{ProxyError, Upstream};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EdgeConfig>,
    pub upstream: Upstream,
}

impl AppState {
    /// # Errors
    ///
    /// Returns an error if the upstream client cannot be built from `config`.
    pub fn new(config: EdgeConfig) -> Result<Self, ProxyError> {
        let upstream = Upstream::new(&config)?;
        Ok(Self { config: Arc::new(config), upstream })
    }
}
