mod common;

use serial_test::serial;
use unimart_core::repositories::transaction_repository::TransactionRepository;
use unimart_core::services::escrow_service::EscrowService;
use unimart_core::services::wallet_service::WalletService;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::dtos::escrow_dto::{CreateEscrowRequest, DisputeResolution};
use unimart_primitives::models::entities::enum_types::EscrowStatus;
use uuid::Uuid;

fn escrow_request(buyer: Uuid, seller: Uuid, naira: f64) -> CreateEscrowRequest {
    CreateEscrowRequest {
        buyer_id: buyer,
        seller_id: seller,
        amount: naira,
        fee_bps: Some(500),
        product_ref: Some("listing-42".into()),
    }
}

/// Buyer with ₦5000 buys a ₦3000 item at 5% fee, then the escrow is
/// released. Seller sees gross credit then fee debit.
#[tokio::test]
#[serial]
async fn escrow_release_pays_gross_then_fee() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let buyer = Uuid::new_v4();
    let seller = Uuid::new_v4();
    {
        let mut conn = pool.get().unwrap();
        common::seed_wallet(&mut conn, buyer, 500_000);
    }

    let escrow = EscrowService::create(&state, escrow_request(buyer, seller, 3000.0))
        .await
        .unwrap();
    assert_eq!(escrow.status, EscrowStatus::Held);
    assert_eq!(escrow.amount, 3000.0);
    assert_eq!(escrow.platform_fee, 150.0);

    {
        let mut conn = pool.get().unwrap();
        let buyer_wallet = common::wallet_of(&mut conn, buyer);
        assert_eq!(buyer_wallet.balance, 200_000);
        let seller_wallet = common::wallet_of(&mut conn, seller);
        assert_eq!(seller_wallet.escrow_balance, 300_000);
        assert_eq!(seller_wallet.balance, 0);
    }

    let released = EscrowService::release(&state, escrow.id).await.unwrap();
    assert_eq!(released.status, EscrowStatus::Released);
    assert!(released.released_at.is_some());

    let mut conn = pool.get().unwrap();
    let seller_wallet = common::wallet_of(&mut conn, seller);
    assert_eq!(seller_wallet.balance, 285_000); // 3000 - 150 in kobo
    assert_eq!(seller_wallet.escrow_balance, 0);
    assert_eq!(seller_wallet.total_earned, 300_000);

    // Gross credit and fee debit are separate ledger lines.
    let rows = TransactionRepository::find_recent_by_user(&mut conn, seller, 10).unwrap();
    let amounts: Vec<i64> = rows.iter().map(|t| t.amount).collect();
    assert!(amounts.contains(&300_000));
    assert!(amounts.contains(&-15_000));

    // Ledger sums match balances on both sides.
    WalletService::check_reconciliation(&mut conn, buyer).unwrap();
    WalletService::check_reconciliation(&mut conn, seller).unwrap();
}

#[tokio::test]
#[serial]
async fn escrow_refund_restores_buyer_in_full() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let buyer = Uuid::new_v4();
    let seller = Uuid::new_v4();
    {
        let mut conn = pool.get().unwrap();
        common::seed_wallet(&mut conn, buyer, 500_000);
    }

    let escrow = EscrowService::create(&state, escrow_request(buyer, seller, 3000.0))
        .await
        .unwrap();

    let refunded = EscrowService::refund(&state, escrow.id).await.unwrap();
    assert_eq!(refunded.status, EscrowStatus::Refunded);

    let mut conn = pool.get().unwrap();
    let buyer_wallet = common::wallet_of(&mut conn, buyer);
    assert_eq!(buyer_wallet.balance, 500_000);

    // Seller never saw spendable funds, no fee charged.
    let seller_wallet = common::wallet_of(&mut conn, seller);
    assert_eq!(seller_wallet.balance, 0);
    assert_eq!(seller_wallet.escrow_balance, 0);
    assert_eq!(seller_wallet.total_earned, 0);

    WalletService::check_reconciliation(&mut conn, buyer).unwrap();
}

#[tokio::test]
#[serial]
async fn create_fails_without_funds_and_mutates_nothing() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let buyer = Uuid::new_v4();
    let seller = Uuid::new_v4();
    {
        let mut conn = pool.get().unwrap();
        common::seed_wallet(&mut conn, buyer, 100_000); // ₦1000
    }

    let err = EscrowService::create(&state, escrow_request(buyer, seller, 3000.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::InsufficientFunds {
            available: 100_000,
            requested: 300_000
        }
    ));

    let mut conn = pool.get().unwrap();
    let buyer_wallet = common::wallet_of(&mut conn, buyer);
    assert_eq!(buyer_wallet.balance, 100_000);

    // The rolled-back transaction left no escrow row or ledger entries.
    let rows = TransactionRepository::find_recent_by_user(&mut conn, buyer, 10).unwrap();
    assert_eq!(rows.len(), 1); // just the seed deposit
}

#[tokio::test]
#[serial]
async fn terminal_escrow_rejects_second_settlement() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let buyer = Uuid::new_v4();
    let seller = Uuid::new_v4();
    {
        let mut conn = pool.get().unwrap();
        common::seed_wallet(&mut conn, buyer, 500_000);
    }

    let escrow = EscrowService::create(&state, escrow_request(buyer, seller, 3000.0))
        .await
        .unwrap();
    EscrowService::release(&state, escrow.id).await.unwrap();

    let before = {
        let mut conn = pool.get().unwrap();
        TransactionRepository::find_recent_by_user(&mut conn, seller, 20)
            .unwrap()
            .len()
    };

    // Second release and a refund of the released escrow must both fail.
    let err = EscrowService::release(&state, escrow.id).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::InvalidStateTransition {
            from: EscrowStatus::Released,
            ..
        }
    ));
    let err = EscrowService::refund(&state, escrow.id).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidStateTransition { .. }));

    // No additional ledger entries were produced.
    let mut conn = pool.get().unwrap();
    let after = TransactionRepository::find_recent_by_user(&mut conn, seller, 20)
        .unwrap()
        .len();
    assert_eq!(before, after);

    let seller_wallet = common::wallet_of(&mut conn, seller);
    assert_eq!(seller_wallet.balance, 285_000);
}

#[tokio::test]
#[serial]
async fn dispute_freezes_then_resolution_refunds() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let buyer = Uuid::new_v4();
    let seller = Uuid::new_v4();
    {
        let mut conn = pool.get().unwrap();
        common::seed_wallet(&mut conn, buyer, 500_000);
    }

    let escrow = EscrowService::create(&state, escrow_request(buyer, seller, 2000.0))
        .await
        .unwrap();

    let disputed = EscrowService::dispute(&state, escrow.id).await.unwrap();
    assert_eq!(disputed.status, EscrowStatus::Disputed);

    // A disputed escrow cannot be released directly.
    let err = EscrowService::release(&state, escrow.id).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidStateTransition { .. }));

    let resolved = EscrowService::resolve(&state, escrow.id, DisputeResolution::Refund)
        .await
        .unwrap();
    assert_eq!(resolved.status, EscrowStatus::Refunded);

    let mut conn = pool.get().unwrap();
    let buyer_wallet = common::wallet_of(&mut conn, buyer);
    assert_eq!(buyer_wallet.balance, 500_000);
}
