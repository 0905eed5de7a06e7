use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use http::StatusCode;
use std::sync::Arc;
use tracing::info;
use unimart_core::services::reconciliation_service::{ReconcileOutcome, ReconciliationService};
use unimart_core::AppState;
use unimart_primitives::error::{ApiError, ApiErrorResponse};

/// Raw-body endpoint: the signature is computed over the exact bytes, so
/// nothing may parse the payload before verification. Duplicates return
/// 200 so the gateway does not retry-storm; only a bad signature or an
/// unparseable body is an error.
#[utoipa::path(
    post,
    path = "/webhooks/paystack",
    request_body = String,
    responses(
        (status = 200, description = "Event applied or acknowledged as duplicate"),
        (status = 400, description = "Unparseable payload", body = ApiErrorResponse),
        (status = 401, description = "Signature mismatch", body = ApiErrorResponse)
    ),
    tag = "Webhooks"
)]
pub async fn paystack_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let signature = headers
        .get("x-paystack-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::InvalidSignature)?;

    match ReconciliationService::handle_webhook(&state, &body, signature).await? {
        ReconcileOutcome::Applied(status) => {
            info!(?status, "webhook applied");
        }
        ReconcileOutcome::Duplicate => {
            info!("webhook acknowledged as duplicate");
        }
        ReconcileOutcome::StillPending => {
            info!("webhook reported non-terminal status, nothing applied");
        }
        ReconcileOutcome::Unmatched => {
            info!("webhook did not match any internal record");
        }
    }
    Ok(StatusCode::OK)
}
