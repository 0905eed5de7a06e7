use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use unimart_core::services::wallet_service::WalletService;
use unimart_core::AppState;
use unimart_primitives::error::{ApiError, ApiErrorResponse};
use unimart_primitives::models::dtos::wallet_dto::TransactionsResponse;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/transactions/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Wallet owner"),
        ("limit" = Option<i64>, Query, description = "Max rows, default 50")
    ),
    responses(
        (status = 200, description = "Recent ledger entries", body = TransactionsResponse),
        (status = 500, description = "Internal error", body = ApiErrorResponse)
    ),
    tag = "Wallet"
)]
pub async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let transactions = WalletService::get_transactions(&state, user_id, limit).await?;
    Ok(Json(transactions))
}
