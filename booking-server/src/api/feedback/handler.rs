//! Feedback API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::client::{FeedbackCreated, FeedbackRequest};
use shared::models::Feedback;

use crate::api::convert::{customer_id_of, rating};
use crate::api::extract::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{FeedbackCreate, FeedbackRepository};
use crate::utils::time::{parse_date, today};
use crate::utils::validation::{MAX_NOTE_LEN, non_blank, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// POST /api/feedback - 提交评价
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(req): AppJson<FeedbackRequest>,
) -> AppResult<(StatusCode, Json<FeedbackCreated>)> {
    let customer_id = customer_id_of(&user)?;
    let rating = rating(&req.rating).ok_or_else(|| AppError::validation("Invalid rating."))?;
    validate_optional_text(&req.text, "text", MAX_NOTE_LEN)?;
    let date = match non_blank(&req.date) {
        Some(d) => parse_date(d)?,
        None => today(),
    };

    let repo = FeedbackRepository::new(state.get_db());
    let feedback = repo.create(FeedbackCreate {
        customer_id,
        rating,
        text: req.text.unwrap_or_default(),
        date,
    })?;

    tracing::info!(feedback_id = %feedback.id, customer_id = %customer_id, rating, "Feedback saved");
    Ok((
        StatusCode::CREATED,
        Json(FeedbackCreated {
            message: "Feedback saved.".to_string(),
            feedback,
        }),
    ))
}

/// GET /api/my-feedback - 当前顾客的评价
pub async fn mine(State(state): State<ServerState>, user: CurrentUser) -> Json<Vec<Feedback>> {
    let repo = FeedbackRepository::new(state.get_db());
    Json(match user.customer_id() {
        Some(id) => repo.find_by_customer(id),
        None => Vec::new(),
    })
}
