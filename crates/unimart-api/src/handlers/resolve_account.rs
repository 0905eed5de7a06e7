use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;
use unimart_core::services::bank_service::BankService;
use unimart_core::AppState;
use unimart_primitives::error::{ApiError, ApiErrorResponse};
use unimart_primitives::models::dtos::bank_dto::{ResolveAccountQuery, ResolveAccountResponse};

#[utoipa::path(
    get,
    path = "/api/resolve_account",
    params(
        ("account_number" = String, Query, description = "10-digit NUBAN"),
        ("bank_code" = String, Query, description = "Bank code")
    ),
    responses(
        (status = 200, description = "Resolved account name", body = ResolveAccountResponse),
        (status = 400, description = "Gateway rejected the account", body = ApiErrorResponse)
    ),
    tag = "Payments"
)]
pub async fn resolve_account(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ResolveAccountQuery>,
) -> Result<Json<ResolveAccountResponse>, ApiError> {
    let resolved = BankService::resolve_account(&state, query).await?;
    Ok(Json(resolved))
}
