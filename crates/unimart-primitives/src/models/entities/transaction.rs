use crate::models::entities::enum_types::{TransactionKind, TxnState};
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Immutable ledger entry. `amount` is signed: positive for credits,
/// negative for debits, so that sum(amount) over a wallet equals its
/// balance. Rows are append-only; no update path exists.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::transactions)]
pub struct Transaction {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub user_id: Uuid,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: String,
    pub reference: Option<Uuid>,
    pub txn_state: TxnState,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction<'a> {
    pub wallet_id: Uuid,
    pub user_id: Uuid,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: &'a str,
    pub reference: Option<Uuid>,
    pub txn_state: TxnState,
}
