use crate::models::entities::enum_types::EscrowStatus;
use crate::models::entities::escrow::EscrowTransaction;
use crate::money::kobo_to_naira;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEscrowRequest {
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    /// Trade amount in naira.
    #[validate(range(min = 100.0, max = 10000000.0))]
    pub amount: f64,
    /// Platform fee in basis points; clamped to the configured 3–6% band.
    pub fee_bps: Option<i32>,
    #[validate(length(max = 128))]
    pub product_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmingParty {
    Buyer,
    Seller,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmEscrowRequest {
    pub party: ConfirmingParty,
}

/// Arbitration outcome for a disputed escrow.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DisputeResolution {
    Release,
    Refund,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ResolveEscrowRequest {
    pub outcome: DisputeResolution,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EscrowDto {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub product_ref: Option<String>,
    pub amount: f64,
    pub platform_fee: f64,
    pub status: EscrowStatus,
    pub buyer_confirmed: bool,
    pub seller_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
}

impl From<EscrowTransaction> for EscrowDto {
    fn from(e: EscrowTransaction) -> Self {
        Self {
            id: e.id,
            buyer_id: e.buyer_id,
            seller_id: e.seller_id,
            product_ref: e.product_ref,
            amount: kobo_to_naira(e.amount),
            platform_fee: kobo_to_naira(e.platform_fee),
            status: e.status,
            buyer_confirmed: e.buyer_confirmed,
            seller_confirmed: e.seller_confirmed,
            created_at: e.created_at,
            released_at: e.released_at,
        }
    }
}
