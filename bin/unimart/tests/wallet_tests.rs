mod common;

use diesel::prelude::*;
use serial_test::serial;
use unimart_core::repositories::transaction_repository::TransactionRepository;
use unimart_core::repositories::wallet_repository::WalletRepository;
use unimart_core::services::wallet_service::WalletService;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::entities::enum_types::TransactionKind;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn ledger_sum_tracks_balance_through_mixed_operations() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);

    let user = Uuid::new_v4();
    let mut conn = pool.get().unwrap();

    conn.transaction::<_, ApiError, _>(|conn| {
        WalletService::credit_in_tx(conn, user, 10_000, TransactionKind::Deposit, "d1", None)?;
        WalletService::credit_in_tx(conn, user, 2_500, TransactionKind::Deposit, "d2", None)?;
        WalletService::debit_in_tx(conn, user, 4_000, TransactionKind::Purchase, "p1", None)?;
        WalletService::credit_in_tx(conn, user, 700, TransactionKind::RewardEarned, "r1", None)?;
        WalletService::debit_in_tx(conn, user, 1_200, TransactionKind::Withdrawal, "w1", None)?;
        Ok(())
    })
    .unwrap();

    let wallet = common::wallet_of(&mut conn, user);
    assert_eq!(wallet.balance, 8_000);

    let ledger_sum = TransactionRepository::sum_for_wallet(&mut conn, wallet.id).unwrap();
    assert_eq!(ledger_sum, wallet.balance);
    WalletService::check_reconciliation(&mut conn, user).unwrap();
}

#[tokio::test]
#[serial]
async fn overdraft_fails_and_leaves_no_trace() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);

    let user = Uuid::new_v4();
    let mut conn = pool.get().unwrap();
    common::seed_wallet(&mut conn, user, 5_000);

    let err = conn
        .transaction::<_, ApiError, _>(|conn| {
            WalletService::debit_in_tx(conn, user, 5_001, TransactionKind::Purchase, "p", None)?;
            Ok(())
        })
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::InsufficientFunds {
            available: 5_000,
            requested: 5_001
        }
    ));

    let wallet = common::wallet_of(&mut conn, user);
    assert_eq!(wallet.balance, 5_000);
    let count = TransactionRepository::find_recent_by_user(&mut conn, user, 10)
        .unwrap()
        .len();
    assert_eq!(count, 1); // only the seed row

    // An exact-balance debit still goes through.
    conn.transaction::<_, ApiError, _>(|conn| {
        WalletService::debit_in_tx(conn, user, 5_000, TransactionKind::Purchase, "p", None)?;
        Ok(())
    })
    .unwrap();
    assert_eq!(common::wallet_of(&mut conn, user).balance, 0);
}

#[tokio::test]
#[serial]
async fn zero_and_negative_amounts_are_rejected() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);

    let user = Uuid::new_v4();
    let mut conn = pool.get().unwrap();

    for amount in [0_i64, -100] {
        let credit = conn.transaction::<_, ApiError, _>(|conn| {
            WalletService::credit_in_tx(conn, user, amount, TransactionKind::Deposit, "x", None)
                .map(|_| ())
        });
        assert!(matches!(credit, Err(ApiError::BadRequest(_))));

        let debit = conn.transaction::<_, ApiError, _>(|conn| {
            WalletService::debit_in_tx(conn, user, amount, TransactionKind::Purchase, "x", None)
                .map(|_| ())
        });
        assert!(matches!(debit, Err(ApiError::BadRequest(_))));
    }
}

#[tokio::test]
#[serial]
async fn get_or_create_is_stable_across_repeated_calls() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);

    let user = Uuid::new_v4();
    let mut conn = pool.get().unwrap();

    let first = WalletRepository::get_or_create(&mut conn, user).unwrap();
    assert_eq!(first.balance, 0);
    assert_eq!(first.escrow_balance, 0);

    let second = WalletRepository::get_or_create(&mut conn, user).unwrap();
    assert_eq!(first.id, second.id);
}
