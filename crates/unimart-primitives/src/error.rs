use crate::models::entities::enum_types::EscrowStatus;
use crate::money::format_naira;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Failure classification for outbound gateway calls.
///
/// Retryable variants are transient infrastructure failures; the rest are
/// final and surface to the caller on the first attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Connection-level failure before an HTTP status was obtained.
    Network(String),
    /// The request hit the client-side deadline.
    Timeout,
    /// HTTP 429 from the gateway.
    RateLimited,
    /// HTTP 5xx from the gateway.
    Server(u16),
    /// HTTP 401/403: credentials problem, retrying cannot help.
    Auth(String),
    /// Gateway rejected the request (validation, insufficient gateway
    /// balance, unknown reference).
    Rejected { status: u16, message: String },
    /// Response body did not match the expected envelope.
    InvalidResponse(String),
    /// Retry budget exhausted on a retryable failure.
    Unavailable,
}

impl GatewayError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::Network(_)
                | GatewayError::Timeout
                | GatewayError::RateLimited
                | GatewayError::Server(_)
        )
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Network(e) => write!(f, "gateway network error: {}", e),
            GatewayError::Timeout => write!(f, "gateway request timed out"),
            GatewayError::RateLimited => write!(f, "gateway rate limit hit"),
            GatewayError::Server(code) => write!(f, "gateway server error ({})", code),
            GatewayError::Auth(e) => write!(f, "gateway auth failure: {}", e),
            GatewayError::Rejected { status, message } => {
                write!(f, "gateway rejected request ({}): {}", status, message)
            }
            GatewayError::InvalidResponse(e) => write!(f, "invalid gateway response: {}", e),
            GatewayError::Unavailable => write!(f, "gateway unavailable after retries"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Database(diesel::result::Error),
    DatabaseConnection(String),
    Validation(validator::ValidationErrors),
    /// Debit would overdraw the wallet. Domain error, never retried.
    InsufficientFunds { available: i64, requested: i64 },
    /// Escrow operation applied to a state that does not permit it.
    InvalidStateTransition {
        action: &'static str,
        from: EscrowStatus,
    },
    /// Referral bonus already paid out for this referral.
    DuplicateReferral,
    /// Login-streak reward already claimed for today.
    AlreadyClaimedToday,
    /// Webhook signature did not match the payload.
    InvalidSignature,
    /// Webhook body could not be parsed.
    MalformedPayload(String),
    Gateway(GatewayError),
    /// Retry budget exhausted talking to the payment gateway.
    GatewayUnavailable,
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::InsufficientFunds {
                available,
                requested,
            } => write!(
                f,
                "Insufficient funds: requested {}, available {}",
                format_naira(*requested),
                format_naira(*available)
            ),
            ApiError::InvalidStateTransition { action, from } => {
                write!(f, "Cannot {} an escrow in state {}", action, from)
            }
            ApiError::DuplicateReferral => write!(f, "Referral bonus already paid"),
            ApiError::AlreadyClaimedToday => write!(f, "Streak reward already claimed today"),
            ApiError::InvalidSignature => write!(f, "Webhook signature mismatch"),
            ApiError::MalformedPayload(e) => write!(f, "Malformed webhook payload: {}", e),
            ApiError::Gateway(e) => write!(f, "Gateway error: {}", e),
            ApiError::GatewayUnavailable => write!(f, "Payment gateway unavailable"),
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::NotFound(e) => write!(f, "Not found: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Database(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Gateway(e) => Some(e),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<r2d2::PoolError> for ApiError {
    fn from(err: r2d2::PoolError) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unavailable => ApiError::GatewayUnavailable,
            other => ApiError::Gateway(other),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// User-facing status and message. Internal diagnostics stay in the logs;
/// the body never carries stack traces or gateway secrets.
impl From<ApiError> for (StatusCode, String) {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Database(e) => match e {
                diesel::result::Error::NotFound => {
                    (StatusCode::NOT_FOUND, "Record not found".to_string())
                }
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => (StatusCode::CONFLICT, "Duplicate record".to_string()),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                ),
            },
            ApiError::DatabaseConnection(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Service temporarily unavailable".to_string(),
            ),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                format!("Validation error: {}", errors),
            ),
            ApiError::InsufficientFunds { available, .. } => (
                StatusCode::PAYMENT_REQUIRED,
                format!("Insufficient balance, available {}", format_naira(available)),
            ),
            ApiError::InvalidStateTransition { action, from } => (
                StatusCode::CONFLICT,
                format!("Cannot {} an escrow in state {}", action, from),
            ),
            ApiError::DuplicateReferral => (
                StatusCode::CONFLICT,
                "Referral bonus already paid".to_string(),
            ),
            ApiError::AlreadyClaimedToday => (
                StatusCode::CONFLICT,
                "Streak reward already claimed today".to_string(),
            ),
            ApiError::InvalidSignature => {
                (StatusCode::UNAUTHORIZED, "Invalid signature".to_string())
            }
            ApiError::MalformedPayload(_) => {
                (StatusCode::BAD_REQUEST, "Invalid payload".to_string())
            }
            ApiError::Gateway(GatewayError::Rejected { message, .. }) => {
                (StatusCode::BAD_REQUEST, format!("Payment failed: {}", message))
            }
            ApiError::Gateway(_) | ApiError::GatewayUnavailable => (
                StatusCode::BAD_GATEWAY,
                "Payment service unavailable, please try again later".to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error): (StatusCode, String) = self.into();
        (status, Json(ApiErrorResponse { error })).into_response()
    }
}
