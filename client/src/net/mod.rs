//! Networking modules for the backend REST surface.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` issues the session check and the sign-in request through the edge
//! proxy, and `types` defines the shared wire schema.

pub mod api;
pub mod types;
