//! Manager API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::client::{ManagerUpdateReservationRequest, MessageResponse};
use shared::models::{
    CustomerId, CustomerSummary, DiningTable, DiningTableUpdate, Feedback, Reservation,
    ReservationView, TableId,
};

use crate::api::convert::reservation_id;
use crate::api::extract::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{
    CustomerRepository, DiningTableRepository, FeedbackRepository, ManagerReservationChanges,
    ReservationRepository,
};
use crate::utils::{AppError, AppResult};

const CUSTOMER_NOT_FOUND: &str = "Customer not found.";

fn parse_customer_id(raw: &str) -> AppResult<CustomerId> {
    raw.parse::<CustomerId>()
        .or_else(|_| raw.parse::<u64>().map(CustomerId))
        .map_err(|_| AppError::not_found(CUSTOMER_NOT_FOUND))
}

fn parse_table_id(raw: &str) -> AppResult<TableId> {
    raw.parse::<TableId>()
        .or_else(|_| raw.parse::<u64>().map(TableId))
        .map_err(|_| AppError::not_found("Table not found."))
}

// ============ Customers ============

/// GET /api/manager/customers - 所有顾客
pub async fn list_customers(State(state): State<ServerState>) -> Json<Vec<CustomerSummary>> {
    let repo = CustomerRepository::new(state.get_db());
    Json(repo.find_all().iter().map(|c| c.summary()).collect())
}

/// GET /api/manager/customers/{id}/reservations - 顾客的预订 (含联系电话)
pub async fn customer_reservations(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let id = parse_customer_id(&id)?;
    let customer = CustomerRepository::new(state.get_db())
        .find_by_id(id)
        .ok_or_else(|| AppError::not_found(CUSTOMER_NOT_FOUND))?;

    let views = ReservationRepository::new(state.get_db())
        .find_by_customer(id)
        .iter()
        .map(|r| ReservationView::new(r, customer.phone_display()))
        .collect();
    Ok(Json(views))
}

/// GET /api/manager/customers/{id}/feedback - 顾客的评价
pub async fn customer_feedback(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Feedback>>> {
    let id = parse_customer_id(&id)?;
    if CustomerRepository::new(state.get_db()).find_by_id(id).is_none() {
        return Err(AppError::not_found(CUSTOMER_NOT_FOUND));
    }
    Ok(Json(FeedbackRepository::new(state.get_db()).find_by_customer(id)))
}

/// DELETE /api/manager/customers/{id} - 删除顾客及其预订、评价、付款
pub async fn delete_customer(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_customer_id(&id)?;
    let removed = CustomerRepository::new(state.get_db()).delete(id)?;

    tracing::info!(
        customer_id = %id,
        manager = %user.username,
        reservations = removed.reservations,
        tables_released = removed.tables_released,
        feedback = removed.feedback,
        payments = removed.payments,
        "Customer deleted"
    );
    Ok(Json(MessageResponse::new("Customer deleted.")))
}

// ============ Reservations ============

/// GET /api/manager/reservations - 所有预订
pub async fn list_reservations(State(state): State<ServerState>) -> Json<Vec<Reservation>> {
    Json(ReservationRepository::new(state.get_db()).find_all())
}

/// POST /api/manager/update-reservation - 经理修改预订
///
/// 可指定餐桌和状态；改为 CANCELLED 时释放餐桌。
pub async fn update_reservation(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(req): AppJson<ManagerUpdateReservationRequest>,
) -> AppResult<Json<MessageResponse>> {
    let id = reservation_id(&req.reservation_id)
        .ok_or_else(|| AppError::validation("Missing reservationId."))?;
    let edit = ManagerReservationChanges::try_from(&req)?;

    let reservation = ReservationRepository::new(state.get_db()).manager_edit(id, edit)?;

    tracing::info!(
        reservation_id = %reservation.id,
        table_id = %reservation.table_id,
        status = reservation.status.as_str(),
        manager = %user.username,
        "Reservation updated by manager"
    );
    Ok(Json(MessageResponse::new("Update successful")))
}

// ============ Tables ============

/// GET /api/manager/tables - 所有餐桌
pub async fn list_tables(State(state): State<ServerState>) -> Json<Vec<DiningTable>> {
    Json(DiningTableRepository::new(state.get_db()).find_all())
}

/// PUT /api/manager/tables/{id} - 修改餐桌状态或容量
pub async fn update_table(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let id = parse_table_id(&id)?;
    let table = DiningTableRepository::new(state.get_db()).update(id, payload)?;

    tracing::info!(
        table_id = %table.id,
        capacity = table.capacity,
        status = table.status.as_str(),
        "Table updated"
    );
    Ok(Json(table))
}
