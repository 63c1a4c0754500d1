//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Conversions into the `lms_core` domain types where the row feeds the
//!   planner

pub mod assignment;
pub mod course;
pub mod discussion_topic;
pub mod enrollment;
pub mod planner;
pub mod planner_note;
pub mod planner_override;
pub mod quiz;
pub mod submission;
pub mod user;
pub mod wiki_page;
