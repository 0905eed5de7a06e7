use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DepositRequest {
    pub user_id: Uuid,
    /// Amount in naira.
    #[validate(range(min = 100.0, max = 10000000.0))]
    pub amount: f64,
    #[validate(email)]
    pub email: String,
    /// Preferred payment channel (card, bank, ussd, ...). Gateway default
    /// when absent.
    pub channel: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositResponse {
    pub reference: Uuid,
    pub checkout_url: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyDepositResponse {
    pub reference: Uuid,
    pub status: crate::models::entities::enum_types::PaymentStatus,
}
