//! Query parameters for planner item listing.

use lms_core::types::Timestamp;
use serde::Deserialize;

/// `?start_date=&end_date=` window; both ends optional. `start_date` is
/// inclusive, `end_date` exclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerItemsQuery {
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}
