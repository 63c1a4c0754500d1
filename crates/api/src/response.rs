//! Shared response envelope types for API handlers.
//!
//! List and read endpoints answer with a `{ "data": ... }` envelope. The
//! gradebook settings endpoint is the exception: its body is the settings
//! object itself.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
