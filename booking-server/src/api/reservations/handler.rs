//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::{BookingRequest, UpdateReservationRequest};
use shared::models::{Reservation, ReservationId};

use crate::api::convert::{customer_id_of, reservation_id};
use crate::api::extract::AppJson;
use crate::auth::CurrentUser;
use crate::db::repository::{ReservationChanges, ReservationDraft, ReservationRepository};
use crate::core::ServerState;
use crate::utils::time::{normalize_date, normalize_time};
use crate::utils::validation::{MAX_NOTE_LEN, non_blank, party_size_from, validate_optional_text};
use crate::utils::{AppError, AppResult};

const BOOKING_INVALID: &str = "Booking failed: Invalid data.";

/// POST /book-reservation - 预订餐桌
///
/// 人数、日期、时间缺失或无效时返回 400；没有空桌时返回分配失败信息。
pub async fn book(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<AppJson<BookingRequest>, AppError>,
) -> AppResult<&'static str> {
    let customer_id = customer_id_of(&user)?;
    let AppJson(req) = payload.map_err(|_| AppError::validation(BOOKING_INVALID))?;

    let party_size = req.guests.as_ref().and_then(|g| g.as_i64()).and_then(party_size_from);
    let date = non_blank(&req.date).and_then(normalize_date);
    let time = non_blank(&req.time).and_then(normalize_time);
    let (Some(party_size), Some(date), Some(time)) = (party_size, date, time) else {
        return Err(AppError::validation(BOOKING_INVALID));
    };
    validate_optional_text(&req.diet, "diet", MAX_NOTE_LEN)?;

    let repo = ReservationRepository::new(state.get_db());
    let reservation = repo.create(
        customer_id,
        ReservationDraft {
            party_size,
            date,
            time,
            comment: non_blank(&req.diet).unwrap_or_default().to_string(),
        },
    )?;

    tracing::info!(
        reservation_id = %reservation.id,
        table_id = %reservation.table_id,
        party_size,
        "Reservation created"
    );
    Ok("Success")
}

/// GET /api/my-reservations - 当前顾客的预订
pub async fn my_reservations(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Reservation>>> {
    let repo = ReservationRepository::new(state.get_db());
    let reservations = match user.customer_id() {
        Some(id) => repo.find_by_customer(id),
        None => Vec::new(),
    };
    Ok(Json(reservations))
}

/// POST /api/update-reservation - 修改预订
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(req): AppJson<UpdateReservationRequest>,
) -> AppResult<&'static str> {
    let id = reservation_id(&req.reservation_id)
        .ok_or_else(|| AppError::validation("Missing reservationId."))?;
    let changes = ReservationChanges::try_from(&req)?;
    let actor = user.actor().ok_or_else(AppError::unauthorized)?;

    let repo = ReservationRepository::new(state.get_db());
    let reservation = repo.edit(id, actor, changes)?;

    tracing::info!(
        reservation_id = %reservation.id,
        table_id = %reservation.table_id,
        user_id = %user.id,
        "Reservation updated"
    );
    Ok("Update successful")
}

/// POST /api/cancel-reservation/{id} - 取消预订并释放餐桌
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<&'static str> {
    let id: ReservationId = id
        .parse()
        .map_err(|_| AppError::validation("Invalid reservation id."))?;
    let actor = user.actor().ok_or_else(AppError::unauthorized)?;

    let repo = ReservationRepository::new(state.get_db());
    let reservation = repo.cancel(id, actor)?;

    tracing::info!(reservation_id = %reservation.id, user_id = %user.id, "Reservation cancelled");
    Ok("Cancelled")
}
