//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the marketing sections and dashboard chrome. Copy lives
//! in `const` tables next to each section so the page shape is testable.

pub mod boot_splash;
pub mod features_section;
pub mod footer;
pub mod hero;
pub mod problem_section;
pub mod stat_card;
pub mod target_users_section;
