#![allow(dead_code)]

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use unimart_core::repositories::wallet_repository::WalletRepository;
use unimart_core::services::wallet_service::WalletService;
use unimart_core::{AppState, DbPool};
use unimart_primitives::models::config::{
    AppConfig, EscrowInfo, PaystackInfo, RetryInfo, RewardInfo,
};
use unimart_primitives::models::entities::enum_types::TransactionKind;
use unimart_primitives::models::entities::wallet::Wallet;
use uuid::Uuid;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../../migrations");

pub const WEBHOOK_SECRET: &str = "whsec_test";

/// DB-backed tests opt in via TEST_DATABASE_URL; without it they skip so
/// the suite still runs on machines without Postgres.
pub fn test_pool() -> Option<DbPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let manager = ConnectionManager::<PgConnection>::new(url);
    Pool::builder().max_size(4).build(manager).ok()
}

pub fn test_config(paystack_url: &str) -> AppConfig {
    AppConfig {
        app_url: "http://localhost:8080".into(),
        paystack: PaystackInfo {
            secret_key: SecretString::new("sk_test_secret".into()),
            api_url: paystack_url.to_string(),
            webhook_secret: SecretString::new(WEBHOOK_SECRET.into()),
        },
        escrow: EscrowInfo {
            default_fee_bps: 500,
            min_fee_bps: 300,
            max_fee_bps: 600,
        },
        rewards: RewardInfo {
            welcome_min: 10_000,
            welcome_max: 50_000,
            referral_bonus: 20_000,
            streak_base: 1_000,
            streak_cap: 10_000,
            streak_secret: SecretString::new("streak-secret".into()),
        },
        gateway_retry: RetryInfo {
            max_attempts: 3,
            base_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
        },
        notifier_url: None,
    }
}

pub fn test_state(pool: DbPool, paystack_url: &str) -> Arc<AppState> {
    AppState::new(pool, test_config(paystack_url)).expect("failed to build test app state")
}

pub fn prepare_db(pool: &DbPool) {
    let mut conn = pool.get().expect("failed to get DB connection");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("migrations failed");
    cleanup(&mut conn);
}

pub fn cleanup(conn: &mut PgConnection) {
    diesel::sql_query(
        "TRUNCATE transactions, escrow_transactions, gateway_payments, withdrawals, \
         welcome_bonuses, referrals, streak_claims, wallets CASCADE",
    )
    .execute(conn)
    .expect("cleanup failed");
}

/// Funds a wallet through the normal credit path so the ledger invariant
/// holds for seeded balances too.
pub fn seed_wallet(conn: &mut PgConnection, user_id: Uuid, balance_kobo: i64) -> Wallet {
    conn.transaction(|conn| {
        WalletService::credit_in_tx(
            conn,
            user_id,
            balance_kobo,
            TransactionKind::Deposit,
            "test seed",
            None,
        )
        .map(|(wallet, _)| wallet)
    })
    .expect("seeding wallet failed")
}

pub fn wallet_of(conn: &mut PgConnection, user_id: Uuid) -> Wallet {
    WalletRepository::find_by_user(conn, user_id)
        .expect("wallet lookup failed")
        .expect("wallet missing")
}
