//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Guarding happens before a page mounts, in `router`.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod not_found;
