use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use unimart_core::services::withdrawal_service::WithdrawalService;
use unimart_core::AppState;
use unimart_primitives::error::{ApiError, ApiErrorResponse};
use unimart_primitives::models::dtos::withdrawal_dto::{WithdrawRequest, WithdrawResponse};

#[utoipa::path(
    post,
    path = "/api/withdrawals",
    request_body = WithdrawRequest,
    responses(
        (status = 200, description = "Withdrawal accepted, payout in flight", body = WithdrawResponse),
        (status = 402, description = "Insufficient balance", body = ApiErrorResponse),
        (status = 502, description = "Gateway unavailable", body = ApiErrorResponse)
    ),
    tag = "Payments"
)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WithdrawRequest>,
) -> Result<Json<WithdrawResponse>, ApiError> {
    let response = WithdrawalService::initialize_withdrawal(&state, req).await?;
    Ok(Json(response))
}
