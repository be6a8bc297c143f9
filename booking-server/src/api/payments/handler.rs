//! Payment API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::client::{PaymentRequest, PaymentResponse};
use shared::models::{PaymentStatus, Role};

use crate::api::convert::{customer_id_of, deposit_amount, reservation_id};
use crate::api::extract::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::PaymentRepository;
use crate::utils::AppResult;

/// POST /process-payment - 支付押金
///
/// 押金不低于最低金额时确认预订并返回仪表盘跳转；低于时记录失败并返回 400。
pub async fn process(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(req): AppJson<PaymentRequest>,
) -> AppResult<(StatusCode, Json<PaymentResponse>)> {
    let customer_id = customer_id_of(&user)?;
    let minimum = state.config.min_deposit;
    let amount = deposit_amount(&req.deposit_amount, minimum);

    let repo = PaymentRepository::new(state.get_db());
    let payment = repo.process_deposit(customer_id, reservation_id(&req.reservation_id), amount, minimum)?;

    if payment.status == PaymentStatus::Completed {
        tracing::info!(
            payment_id = %payment.id,
            reservation_id = %payment.reservation_id,
            amount = %payment.deposit_amount,
            "Deposit completed, reservation confirmed"
        );
        return Ok((
            StatusCode::OK,
            Json(PaymentResponse {
                success: true,
                redirect: Some(Role::Customer.dashboard_path().to_string()),
                message: None,
            }),
        ));
    }

    tracing::warn!(
        payment_id = %payment.id,
        reservation_id = %payment.reservation_id,
        amount = %payment.deposit_amount,
        "Deposit below minimum"
    );
    Ok((
        StatusCode::BAD_REQUEST,
        Json(PaymentResponse {
            success: false,
            redirect: None,
            message: Some(format!("Deposit must be at least {minimum}.")),
        }),
    ))
}
