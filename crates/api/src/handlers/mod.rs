pub mod gradebook_settings;
pub mod planner;
