//! # trego-client
//!
//! Leptos + WASM frontend for the Trego marketing site.
//!
//! This crate contains the landing, login and dashboard pages, the auth
//! bootstrap, the Google sign-in hand-off, and the route table that gates
//! pages on the resolved session. Browser-only code sits behind the `csr`
//! feature so everything else builds and tests on the host.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;
