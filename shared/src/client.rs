//! Client-related types shared between server and client
//!
//! Request bodies are lenient: every field is optional so the server can
//! answer a missing field with its own 400 message. A body that is not the
//! expected JSON shape at all (wrong field types, broken JSON) is rejected
//! by the server's body extractor, also with a 400.

use serde::{Deserialize, Serialize};

use crate::models::{Feedback, Role};
use crate::serde_helpers::NumberOrString;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Signup request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    pub phone: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Session check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub is_logged_in: bool,
    pub role: Option<Role>,
    pub username: Option<String>,
    pub user_id: Option<String>,
}

impl SessionInfo {
    pub fn anonymous() -> Self {
        Self {
            is_logged_in: false,
            role: None,
            username: None,
            user_id: None,
        }
    }
}

/// Logout response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub ok: bool,
}

/// Generic `{ "message": ... }` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// Reservation API DTOs
// =============================================================================

/// Booking form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingRequest {
    pub guests: Option<NumberOrString>,
    pub date: Option<String>,
    pub time: Option<String>,
    /// Dietary notes, stored as the reservation comment
    pub diet: Option<String>,
}

/// Customer edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateReservationRequest {
    pub reservation_id: Option<NumberOrString>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub guests: Option<NumberOrString>,
    pub comment: Option<String>,
}

/// Manager edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagerUpdateReservationRequest {
    pub reservation_id: Option<NumberOrString>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub guests: Option<NumberOrString>,
    pub comment: Option<String>,
    pub status: Option<String>,
    pub table_id: Option<String>,
}

// =============================================================================
// Payment API DTOs
// =============================================================================

/// Deposit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRequest {
    pub deposit_amount: Option<NumberOrString>,
    /// Reservation to pay for; defaults to the latest pending one
    pub reservation_id: Option<NumberOrString>,
}

/// Deposit result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Feedback API DTOs
// =============================================================================

/// Feedback form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackRequest {
    pub rating: Option<NumberOrString>,
    pub text: Option<String>,
    pub date: Option<String>,
}

/// Feedback created response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackCreated {
    pub message: String,
    pub feedback: Feedback,
}
