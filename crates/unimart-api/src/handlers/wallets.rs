use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;
use unimart_core::services::wallet_service::WalletService;
use unimart_core::AppState;
use unimart_primitives::error::{ApiError, ApiErrorResponse};
use unimart_primitives::models::dtos::wallet_dto::WalletDto;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/wallets/{user_id}",
    params(("user_id" = Uuid, Path, description = "Wallet owner")),
    responses(
        (status = 200, description = "Wallet (created lazily if absent)", body = WalletDto),
        (status = 500, description = "Internal error", body = ApiErrorResponse)
    ),
    tag = "Wallet"
)]
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<WalletDto>, ApiError> {
    let wallet = WalletService::get_wallet(&state, user_id).await?;
    Ok(Json(wallet))
}
