use diesel::prelude::*;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::entities::transaction::{NewTransaction, Transaction};
use unimart_primitives::schema::transactions;
use uuid::Uuid;

/// Append-only recorder. There is intentionally no update or delete here;
/// a ledger row, once written, is history.
pub struct TransactionRepository;

impl TransactionRepository {
    pub fn record(
        conn: &mut PgConnection,
        new_tx: NewTransaction,
    ) -> Result<Transaction, ApiError> {
        diesel::insert_into(transactions::table)
            .values(&new_tx)
            .get_result::<Transaction>(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_reference(
        conn: &mut PgConnection,
        reference: Uuid,
    ) -> Result<Option<Transaction>, ApiError> {
        transactions::table
            .filter(transactions::reference.eq(reference))
            .first::<Transaction>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_recent_by_user(
        conn: &mut PgConnection,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Transaction>, ApiError> {
        transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order(transactions::created_at.desc())
            .limit(limit)
            .load::<Transaction>(conn)
            .map_err(ApiError::from)
    }

    /// Signed sum of all entries for a wallet. The reconciliation invariant
    /// says this equals the wallet's current balance.
    pub fn sum_for_wallet(conn: &mut PgConnection, wallet_id: Uuid) -> Result<i64, ApiError> {
        transactions::table
            .filter(transactions::wallet_id.eq(wallet_id))
            .select(diesel::dsl::sql::<diesel::sql_types::BigInt>(
                "COALESCE(SUM(amount), 0)::bigint",
            ))
            .first::<i64>(conn)
            .map_err(ApiError::from)
    }

    pub fn count_by_reference(
        conn: &mut PgConnection,
        reference: Uuid,
    ) -> Result<i64, ApiError> {
        transactions::table
            .filter(transactions::reference.eq(reference))
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::from)
    }
}
