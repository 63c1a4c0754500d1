//! Domain logic shared by the database and API layers.
//!
//! Everything in this crate is pure: no I/O, no database, no HTTP.

pub mod error;
pub mod gradebook_settings;
pub mod permissions;
pub mod plannable;
pub mod planner;
pub mod preferences;
pub mod status_colors;
pub mod submission_status;
pub mod types;
