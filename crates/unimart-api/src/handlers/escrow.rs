use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use tracing::info;
use unimart_core::services::escrow_service::EscrowService;
use unimart_core::AppState;
use unimart_primitives::error::{ApiError, ApiErrorResponse};
use unimart_primitives::models::dtos::escrow_dto::{
    ConfirmEscrowRequest, CreateEscrowRequest, EscrowDto, ResolveEscrowRequest,
};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/escrows",
    request_body = CreateEscrowRequest,
    responses(
        (status = 200, description = "Funds held in escrow", body = EscrowDto),
        (status = 402, description = "Buyer has insufficient balance", body = ApiErrorResponse)
    ),
    tag = "Escrow"
)]
pub async fn create_escrow(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateEscrowRequest>,
) -> Result<Json<EscrowDto>, ApiError> {
    let escrow = EscrowService::create(&state, req).await?;
    Ok(Json(escrow))
}

/// Sets the caller's confirmation flag. When both parties have confirmed,
/// the order flow auto-releases; that orchestration lives here, not in
/// the engine.
#[utoipa::path(
    post,
    path = "/api/escrows/{id}/confirm",
    params(("id" = Uuid, Path, description = "Escrow transaction")),
    request_body = ConfirmEscrowRequest,
    responses(
        (status = 200, description = "Flag recorded (and escrow released if both set)", body = EscrowDto),
        (status = 409, description = "Escrow not in held state", body = ApiErrorResponse)
    ),
    tag = "Escrow"
)]
pub async fn confirm_escrow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ConfirmEscrowRequest>,
) -> Result<Json<EscrowDto>, ApiError> {
    let escrow = EscrowService::confirm(&state, id, req.party).await?;

    if escrow.buyer_confirmed && escrow.seller_confirmed {
        info!(escrow_id = %id, "both parties confirmed, auto-releasing");
        let released = EscrowService::release(&state, id).await?;
        return Ok(Json(released));
    }
    Ok(Json(escrow))
}

#[utoipa::path(
    post,
    path = "/api/escrows/{id}/release",
    params(("id" = Uuid, Path, description = "Escrow transaction")),
    responses(
        (status = 200, description = "Seller credited, fee taken", body = EscrowDto),
        (status = 409, description = "Escrow not in held state", body = ApiErrorResponse)
    ),
    tag = "Escrow"
)]
pub async fn release_escrow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EscrowDto>, ApiError> {
    let escrow = EscrowService::release(&state, id).await?;
    Ok(Json(escrow))
}

#[utoipa::path(
    post,
    path = "/api/escrows/{id}/refund",
    params(("id" = Uuid, Path, description = "Escrow transaction")),
    responses(
        (status = 200, description = "Buyer refunded in full", body = EscrowDto),
        (status = 409, description = "Escrow not in held state", body = ApiErrorResponse)
    ),
    tag = "Escrow"
)]
pub async fn refund_escrow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EscrowDto>, ApiError> {
    let escrow = EscrowService::refund(&state, id).await?;
    Ok(Json(escrow))
}

#[utoipa::path(
    post,
    path = "/api/escrows/{id}/dispute",
    params(("id" = Uuid, Path, description = "Escrow transaction")),
    responses(
        (status = 200, description = "Escrow frozen pending arbitration", body = EscrowDto),
        (status = 409, description = "Escrow not in held state", body = ApiErrorResponse)
    ),
    tag = "Escrow"
)]
pub async fn dispute_escrow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EscrowDto>, ApiError> {
    let escrow = EscrowService::dispute(&state, id).await?;
    Ok(Json(escrow))
}

/// Arbitration decision for a disputed escrow.
#[utoipa::path(
    post,
    path = "/api/escrows/{id}/resolve",
    params(("id" = Uuid, Path, description = "Escrow transaction")),
    request_body = ResolveEscrowRequest,
    responses(
        (status = 200, description = "Dispute settled", body = EscrowDto),
        (status = 409, description = "Escrow not disputed", body = ApiErrorResponse)
    ),
    tag = "Escrow"
)]
pub async fn resolve_escrow(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResolveEscrowRequest>,
) -> Result<Json<EscrowDto>, ApiError> {
    let escrow = EscrowService::resolve(&state, id, req.outcome).await?;
    Ok(Json(escrow))
}
