use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use unimart_core::services::deposit_service::DepositService;
use unimart_core::services::reconciliation_service::{ReconcileOutcome, ReconciliationService};
use unimart_core::AppState;
use unimart_primitives::error::{ApiError, ApiErrorResponse};
use unimart_primitives::models::dtos::deposit_dto::{
    DepositRequest, DepositResponse, VerifyDepositResponse,
};
use unimart_primitives::models::entities::enum_types::PaymentStatus;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/deposits",
    request_body = DepositRequest,
    responses(
        (status = 200, description = "Checkout session created", body = DepositResponse),
        (status = 400, description = "Invalid request", body = ApiErrorResponse),
        (status = 502, description = "Gateway unavailable", body = ApiErrorResponse)
    ),
    tag = "Payments"
)]
pub async fn initialize_deposit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DepositRequest>,
) -> Result<Json<DepositResponse>, ApiError> {
    let response = DepositService::initialize_deposit(&state, req).await?;
    Ok(Json(response))
}

/// Polling fallback for a missed webhook: asks the gateway for the charge
/// outcome and applies it through the same idempotent path.
#[utoipa::path(
    get,
    path = "/api/deposits/{reference}/verify",
    params(("reference" = Uuid, Path, description = "Transaction reference")),
    responses(
        (status = 200, description = "Current charge status", body = VerifyDepositResponse),
        (status = 404, description = "Unknown reference", body = ApiErrorResponse)
    ),
    tag = "Payments"
)]
pub async fn verify_deposit(
    State(state): State<Arc<AppState>>,
    Path(reference): Path<Uuid>,
) -> Result<Json<VerifyDepositResponse>, ApiError> {
    let outcome = ReconciliationService::verify_deposit(&state, reference).await?;
    let status = match outcome {
        ReconcileOutcome::Applied(status) => status,
        ReconcileOutcome::StillPending => PaymentStatus::Pending,
        ReconcileOutcome::Duplicate => {
            // Already settled earlier; report the stored terminal status.
            let mut conn = state.db.get()?;
            unimart_core::repositories::gateway_payment_repository::GatewayPaymentRepository::find_by_ref(
                &mut conn, reference,
            )?
            .map(|p| p.status)
            .ok_or_else(|| ApiError::NotFound("Unknown transaction reference".into()))?
        }
        ReconcileOutcome::Unmatched => {
            return Err(ApiError::NotFound("Unknown transaction reference".into()))
        }
    };
    Ok(Json(VerifyDepositResponse { reference, status }))
}
