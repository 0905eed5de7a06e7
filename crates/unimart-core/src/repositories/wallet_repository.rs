use chrono::Utc;
use diesel::prelude::*;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::entities::wallet::{NewWallet, Wallet};
use unimart_primitives::schema::wallets;
use uuid::Uuid;

/// All balance mutations are single conditional UPDATE statements so that
/// concurrent requests against the same wallet cannot overdraw it. The
/// read-then-write pattern is deliberately absent.
pub struct WalletRepository;

impl WalletRepository {
    /// Race-safe lazy creation: the unique index on `user_id` makes the
    /// insert a no-op when another request created the wallet first.
    pub fn get_or_create(conn: &mut PgConnection, user_id: Uuid) -> Result<Wallet, ApiError> {
        diesel::insert_into(wallets::table)
            .values(NewWallet { user_id })
            .on_conflict(wallets::user_id)
            .do_nothing()
            .execute(conn)?;

        wallets::table
            .filter(wallets::user_id.eq(user_id))
            .first::<Wallet>(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<Wallet>, ApiError> {
        wallets::table
            .filter(wallets::user_id.eq(user_id))
            .first::<Wallet>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn credit_balance(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: i64,
    ) -> Result<Wallet, ApiError> {
        diesel::update(wallets::table.filter(wallets::user_id.eq(user_id)))
            .set((
                wallets::balance.eq(wallets::balance + amount),
                wallets::updated_at.eq(Utc::now()),
            ))
            .get_result::<Wallet>(conn)
            .map_err(ApiError::from)
    }

    /// Debit guarded by `balance >= amount` in the statement itself.
    /// `None` means the guard failed (missing wallet or short balance);
    /// the caller turns that into `InsufficientFunds`.
    pub fn try_debit_balance(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: i64,
    ) -> Result<Option<Wallet>, ApiError> {
        diesel::update(
            wallets::table
                .filter(wallets::user_id.eq(user_id))
                .filter(wallets::balance.ge(amount)),
        )
        .set((
            wallets::balance.eq(wallets::balance - amount),
            wallets::updated_at.eq(Utc::now()),
        ))
        .get_result::<Wallet>(conn)
        .optional()
        .map_err(ApiError::from)
    }

    /// Seller side of an escrow hold: funds enter the escrow sub-balance.
    pub fn add_to_escrow(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: i64,
    ) -> Result<Wallet, ApiError> {
        diesel::update(wallets::table.filter(wallets::user_id.eq(user_id)))
            .set((
                wallets::escrow_balance.eq(wallets::escrow_balance + amount),
                wallets::updated_at.eq(Utc::now()),
            ))
            .get_result::<Wallet>(conn)
            .map_err(ApiError::from)
    }

    /// Release: escrow sub-balance drains into the spendable balance and
    /// lifetime earnings, guarded on the escrow balance covering `amount`.
    pub fn try_release_escrow(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: i64,
    ) -> Result<Option<Wallet>, ApiError> {
        diesel::update(
            wallets::table
                .filter(wallets::user_id.eq(user_id))
                .filter(wallets::escrow_balance.ge(amount)),
        )
        .set((
            wallets::escrow_balance.eq(wallets::escrow_balance - amount),
            wallets::balance.eq(wallets::balance + amount),
            wallets::total_earned.eq(wallets::total_earned + amount),
            wallets::updated_at.eq(Utc::now()),
        ))
        .get_result::<Wallet>(conn)
        .optional()
        .map_err(ApiError::from)
    }

    /// Refund: funds leave the seller's escrow sub-balance without touching
    /// their spendable balance (the buyer is credited separately).
    pub fn try_drain_escrow(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: i64,
    ) -> Result<Option<Wallet>, ApiError> {
        diesel::update(
            wallets::table
                .filter(wallets::user_id.eq(user_id))
                .filter(wallets::escrow_balance.ge(amount)),
        )
        .set((
            wallets::escrow_balance.eq(wallets::escrow_balance - amount),
            wallets::updated_at.eq(Utc::now()),
        ))
        .get_result::<Wallet>(conn)
        .optional()
        .map_err(ApiError::from)
    }
}
