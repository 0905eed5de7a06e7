use crate::models::entities::enum_types::WithdrawalStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WithdrawRequest {
    pub user_id: Uuid,
    /// Amount in naira.
    #[validate(range(min = 500.0, max = 10000000.0))]
    pub amount: f64,
    #[validate(length(min = 3, max = 10))]
    pub bank_code: String,
    #[validate(length(equal = 10))]
    pub account_number: String,
    /// Skips the resolve call when the caller already verified the name.
    pub account_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawResponse {
    pub withdrawal_id: Uuid,
    pub transfer_ref: Uuid,
    pub status: WithdrawalStatus,
}
