use crate::models::entities::enum_types::{TransactionKind, TxnState};
use crate::models::entities::transaction::Transaction;
use crate::models::entities::wallet::Wallet;
use crate::money::kobo_to_naira;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Naira-facing view of a wallet.
#[derive(Debug, Serialize, ToSchema)]
pub struct WalletDto {
    pub user_id: Uuid,
    pub balance: f64,
    pub escrow_balance: f64,
    pub total_earned: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<Wallet> for WalletDto {
    fn from(w: Wallet) -> Self {
        Self {
            user_id: w.user_id,
            balance: kobo_to_naira(w.balance),
            escrow_balance: kobo_to_naira(w.escrow_balance),
            total_earned: kobo_to_naira(w.total_earned),
            updated_at: w.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionDto {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub reference: Option<Uuid>,
    pub status: TxnState,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionDto {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            kind: t.kind,
            amount: kobo_to_naira(t.amount),
            description: t.description,
            reference: t.reference,
            status: t.txn_state,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionDto>,
}
