use crate::models::entities::enum_types::WithdrawalStatus;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// User-initiated payout. The wallet is debited up front; the gateway's
/// transfer webhook drives the row to completed or failed (failed refunds
/// the debit).
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::withdrawals)]
pub struct Withdrawal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub bank_code: String,
    pub account_number: String,
    pub account_name: String,
    pub recipient_code: Option<String>,
    pub status: WithdrawalStatus,
    pub transfer_ref: Uuid,
    pub failure_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::withdrawals)]
pub struct NewWithdrawal<'a> {
    pub user_id: Uuid,
    pub amount: i64,
    pub bank_code: &'a str,
    pub account_number: &'a str,
    pub account_name: &'a str,
    pub recipient_code: Option<&'a str>,
    pub status: WithdrawalStatus,
    pub transfer_ref: Uuid,
}
