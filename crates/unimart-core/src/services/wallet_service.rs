use crate::app_state::AppState;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::wallet_repository::WalletRepository;
use diesel::prelude::*;
use diesel::Connection;
use tracing::error;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::dtos::wallet_dto::{TransactionDto, TransactionsResponse, WalletDto};
use unimart_primitives::models::entities::enum_types::{TransactionKind, TxnState};
use unimart_primitives::models::entities::transaction::{NewTransaction, Transaction};
use unimart_primitives::models::entities::wallet::Wallet;
use uuid::Uuid;

pub struct WalletService;

impl WalletService {
    /// Credits a wallet and appends the matching ledger row. Must run
    /// inside the caller's transaction so the pair commits as one unit.
    pub fn credit_in_tx(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: i64,
        kind: TransactionKind,
        description: &str,
        reference: Option<Uuid>,
    ) -> Result<(Wallet, Transaction), ApiError> {
        if amount <= 0 {
            return Err(ApiError::BadRequest("Credit amount must be positive".into()));
        }

        WalletRepository::get_or_create(conn, user_id)?;
        let wallet = WalletRepository::credit_balance(conn, user_id, amount)?;
        let tx = TransactionRepository::record(
            conn,
            NewTransaction {
                wallet_id: wallet.id,
                user_id,
                kind,
                amount,
                description,
                reference,
                txn_state: TxnState::Completed,
            },
        )?;
        Ok((wallet, tx))
    }

    /// Debits a wallet under the `balance >= amount` guard and appends the
    /// matching (negative) ledger row. `InsufficientFunds` carries the
    /// balance observed after the failed attempt.
    pub fn debit_in_tx(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: i64,
        kind: TransactionKind,
        description: &str,
        reference: Option<Uuid>,
    ) -> Result<(Wallet, Transaction), ApiError> {
        if amount <= 0 {
            return Err(ApiError::BadRequest("Debit amount must be positive".into()));
        }

        let existing = WalletRepository::get_or_create(conn, user_id)?;
        let wallet = WalletRepository::try_debit_balance(conn, user_id, amount)?.ok_or(
            ApiError::InsufficientFunds {
                available: existing.balance,
                requested: amount,
            },
        )?;

        let tx = TransactionRepository::record(
            conn,
            NewTransaction {
                wallet_id: wallet.id,
                user_id,
                kind,
                amount: -amount,
                description,
                reference,
                txn_state: TxnState::Completed,
            },
        )?;
        Ok((wallet, tx))
    }

    pub async fn get_wallet(state: &AppState, user_id: Uuid) -> Result<WalletDto, ApiError> {
        let mut conn = state.db.get()?;
        let wallet = conn.transaction(|conn| WalletRepository::get_or_create(conn, user_id))?;
        Ok(wallet.into())
    }

    pub async fn get_transactions(
        state: &AppState,
        user_id: Uuid,
        limit: i64,
    ) -> Result<TransactionsResponse, ApiError> {
        let mut conn = state.db.get()?;
        let transactions = TransactionRepository::find_recent_by_user(&mut conn, user_id, limit)?;
        Ok(TransactionsResponse {
            transactions: transactions.into_iter().map(TransactionDto::from).collect(),
        })
    }

    /// Offline reconciliation check: the signed ledger sum must equal the
    /// stored balance. A mismatch means an atomic-unit guarantee broke
    /// somewhere, which is fatal for the wallet in question.
    pub fn check_reconciliation(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<(), ApiError> {
        let Some(wallet) = WalletRepository::find_by_user(conn, user_id)? else {
            return Ok(());
        };
        let ledger_sum = TransactionRepository::sum_for_wallet(conn, wallet.id)?;
        if ledger_sum != wallet.balance || wallet.balance < 0 {
            error!(
                %user_id,
                balance = wallet.balance,
                ledger_sum,
                "wallet reconciliation mismatch"
            );
            return Err(ApiError::Internal("Wallet ledger mismatch".into()));
        }
        Ok(())
    }
}
