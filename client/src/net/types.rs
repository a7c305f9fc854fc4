//! Wire types exchanged with the backend.
//!
//! Both shapes are owned by the backend; the client only reads them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the session check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque backend identifier.
    pub id: String,
    pub email: String,
    pub username: String,
}

/// Body of a successful `POST /api/v1/google-login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRedirect {
    /// Absolute URL of the OAuth provider consent screen.
    pub redirect_url: String,
}
