//! Client state machines, kept free of Leptos so they test on the host.

pub mod auth;
pub mod login;
