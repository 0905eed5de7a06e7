mod common;

use hmac::{Hmac, Mac};
use serial_test::serial;
use sha2::Sha512;
use unimart_core::repositories::gateway_payment_repository::GatewayPaymentRepository;
use unimart_core::repositories::transaction_repository::TransactionRepository;
use unimart_core::services::reconciliation_service::{ReconcileOutcome, ReconciliationService};
use unimart_core::services::wallet_service::WalletService;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::entities::enum_types::{PaymentPurpose, PaymentStatus};
use unimart_primitives::models::entities::gateway_payment::NewGatewayPayment;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sign(body: &[u8]) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(common::WEBHOOK_SECRET.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

fn charge_success_body(reference: Uuid, amount: i64) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "event": "charge.success",
        "data": {
            "reference": reference.to_string(),
            "status": "success",
            "amount": amount,
            "channel": "card"
        }
    }))
    .unwrap()
}

fn pending_deposit(
    pool: &unimart_core::DbPool,
    user: Uuid,
    reference: Uuid,
    amount: i64,
) {
    let mut conn = pool.get().unwrap();
    GatewayPaymentRepository::create(
        &mut conn,
        NewGatewayPayment {
            user_id: user,
            transaction_ref: reference,
            amount,
            purpose: PaymentPurpose::WalletDeposit,
            status: PaymentStatus::Pending,
            channel: None,
        },
    )
    .unwrap();
}

/// A ₦1,000 deposit whose success webhook is delivered three times credits
/// the wallet exactly once.
#[tokio::test]
#[serial]
async fn triple_delivery_credits_once() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let user = Uuid::new_v4();
    let reference = Uuid::new_v4();
    pending_deposit(&pool, user, reference, 100_000);

    let body = charge_success_body(reference, 100_000);
    let signature = sign(&body);

    let first = ReconciliationService::handle_webhook(&state, &body, &signature)
        .await
        .unwrap();
    assert_eq!(first, ReconcileOutcome::Applied(PaymentStatus::Success));

    for _ in 0..2 {
        let outcome = ReconciliationService::handle_webhook(&state, &body, &signature)
            .await
            .unwrap();
        assert_eq!(outcome, ReconcileOutcome::Duplicate);
    }

    let mut conn = pool.get().unwrap();
    let wallet = common::wallet_of(&mut conn, user);
    assert_eq!(wallet.balance, 100_000);

    let credits = TransactionRepository::count_by_reference(&mut conn, reference).unwrap();
    assert_eq!(credits, 1);
    WalletService::check_reconciliation(&mut conn, user).unwrap();
}

/// A signed event for a reference we never issued is acknowledged (the
/// gateway must not retry-storm) but applies nothing.
#[tokio::test]
#[serial]
async fn unknown_reference_is_acknowledged_without_effects() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let body = charge_success_body(Uuid::new_v4(), 100_000);
    let outcome = ReconciliationService::handle_webhook(&state, &body, &sign(&body))
        .await
        .unwrap();
    assert_eq!(outcome, ReconcileOutcome::Unmatched);
}

#[tokio::test]
#[serial]
async fn bad_signature_is_rejected_without_side_effects() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let user = Uuid::new_v4();
    let reference = Uuid::new_v4();
    pending_deposit(&pool, user, reference, 100_000);

    let body = charge_success_body(reference, 100_000);
    let err = ReconciliationService::handle_webhook(&state, &body, "deadbeef")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidSignature));

    let mut conn = pool.get().unwrap();
    let payment = GatewayPaymentRepository::find_by_ref(&mut conn, reference)
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Pending);
}

/// Webhook first, then the polling verification: the poll sees the charge
/// already settled and applies nothing.
#[tokio::test]
#[serial]
async fn webhook_then_poll_applies_once() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);

    let server = MockServer::start().await;
    let state = common::test_state(pool.clone(), &server.uri());

    let user = Uuid::new_v4();
    let reference = Uuid::new_v4();
    pending_deposit(&pool, user, reference, 100_000);

    Mock::given(method("GET"))
        .and(path(format!("/transaction/verify/{}", reference)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "message": "Verification successful",
            "data": {
                "reference": reference.to_string(),
                "status": "success",
                "amount": 100_000,
                "channel": "card",
                "gateway_response": "Approved"
            }
        })))
        .mount(&server)
        .await;

    let body = charge_success_body(reference, 100_000);
    let webhook = ReconciliationService::handle_webhook(&state, &body, &sign(&body))
        .await
        .unwrap();
    assert_eq!(webhook, ReconcileOutcome::Applied(PaymentStatus::Success));

    let poll = ReconciliationService::verify_deposit(&state, reference)
        .await
        .unwrap();
    assert_eq!(poll, ReconcileOutcome::Duplicate);

    let mut conn = pool.get().unwrap();
    assert_eq!(common::wallet_of(&mut conn, user).balance, 100_000);
    assert_eq!(
        TransactionRepository::count_by_reference(&mut conn, reference).unwrap(),
        1
    );
}

/// Poll first (rescuing a missed webhook), then the late webhook arrives.
#[tokio::test]
#[serial]
async fn poll_then_webhook_applies_once() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);

    let server = MockServer::start().await;
    let state = common::test_state(pool.clone(), &server.uri());

    let user = Uuid::new_v4();
    let reference = Uuid::new_v4();
    pending_deposit(&pool, user, reference, 100_000);

    Mock::given(method("GET"))
        .and(path(format!("/transaction/verify/{}", reference)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": true,
            "message": "Verification successful",
            "data": {
                "reference": reference.to_string(),
                "status": "success",
                "amount": 100_000,
                "channel": "card",
                "gateway_response": "Approved"
            }
        })))
        .mount(&server)
        .await;

    let poll = ReconciliationService::verify_deposit(&state, reference)
        .await
        .unwrap();
    assert_eq!(poll, ReconcileOutcome::Applied(PaymentStatus::Success));

    let body = charge_success_body(reference, 100_000);
    let webhook = ReconciliationService::handle_webhook(&state, &body, &sign(&body))
        .await
        .unwrap();
    assert_eq!(webhook, ReconcileOutcome::Duplicate);

    let mut conn = pool.get().unwrap();
    assert_eq!(common::wallet_of(&mut conn, user).balance, 100_000);
    assert_eq!(
        TransactionRepository::count_by_reference(&mut conn, reference).unwrap(),
        1
    );
}

/// A success report with the wrong amount must not credit the wallet.
#[tokio::test]
#[serial]
async fn amount_mismatch_marks_failed_without_credit() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let user = Uuid::new_v4();
    let reference = Uuid::new_v4();
    pending_deposit(&pool, user, reference, 100_000);

    let body = charge_success_body(reference, 90_000);
    let outcome = ReconciliationService::handle_webhook(&state, &body, &sign(&body))
        .await
        .unwrap();
    assert_eq!(outcome, ReconcileOutcome::Applied(PaymentStatus::Failed));

    let mut conn = pool.get().unwrap();
    let payment = GatewayPaymentRepository::find_by_ref(&mut conn, reference)
        .unwrap()
        .unwrap();
    assert_eq!(payment.status, PaymentStatus::Failed);
    // No credit means the wallet was never even created.
    assert!(
        unimart_core::repositories::wallet_repository::WalletRepository::find_by_user(
            &mut conn, user
        )
        .unwrap()
        .is_none()
    );
}

/// Failed charge flips the row terminal but never touches the wallet.
#[tokio::test]
#[serial]
async fn failed_charge_applies_without_credit() {
    let Some(pool) = common::test_pool() else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };
    common::prepare_db(&pool);
    let state = common::test_state(pool.clone(), "http://localhost:1");

    let user = Uuid::new_v4();
    let reference = Uuid::new_v4();
    pending_deposit(&pool, user, reference, 100_000);

    let body = serde_json::to_vec(&serde_json::json!({
        "event": "charge.failed",
        "data": {
            "reference": reference.to_string(),
            "status": "failed",
            "amount": 100_000
        }
    }))
    .unwrap();

    let outcome = ReconciliationService::handle_webhook(&state, &body, &sign(&body))
        .await
        .unwrap();
    assert_eq!(outcome, ReconcileOutcome::Applied(PaymentStatus::Failed));

    let mut conn = pool.get().unwrap();
    assert!(
        unimart_core::repositories::wallet_repository::WalletRepository::find_by_user(
            &mut conn, user
        )
        .unwrap()
        .is_none()
    );
}
