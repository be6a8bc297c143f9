//! API Response types
//!
//! Error envelope used by every failing booking-server response.

use serde::{Deserialize, Serialize};

/// Unified API error structure
///
/// ```json
/// {
///     "code": "E0002",
///     "message": "Booking failed: Invalid data."
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (E0000 = success, others = error codes)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create an error response without payload
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}
