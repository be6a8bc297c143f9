//! Feedback Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CustomerId, FeedbackId};

/// Lowest accepted star rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating
pub const MAX_RATING: u8 = 5;

/// Customer feedback entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: FeedbackId,
    pub customer_id: CustomerId,
    pub rating: u8,
    #[serde(default)]
    pub text: String,
    pub date: NaiveDate,
}
