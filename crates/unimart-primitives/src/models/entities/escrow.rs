use crate::models::entities::enum_types::EscrowStatus;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Funds in transit for a single trade. The amount has already left the
/// buyer's wallet; it sits against the seller's escrow sub-balance until
/// release or refund.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::escrow_transactions)]
pub struct EscrowTransaction {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub product_ref: Option<String>,
    pub amount: i64,
    pub platform_fee: i64,
    pub fee_bps: i32,
    pub status: EscrowStatus,
    pub buyer_confirmed: bool,
    pub seller_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub released_at: Option<DateTime<Utc>>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::escrow_transactions)]
pub struct NewEscrowTransaction {
    pub buyer_id: Uuid,
    pub seller_id: Uuid,
    pub product_ref: Option<String>,
    pub amount: i64,
    pub platform_fee: i64,
    pub fee_bps: i32,
    pub status: EscrowStatus,
}
