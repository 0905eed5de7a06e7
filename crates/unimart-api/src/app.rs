use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    deposit::{initialize_deposit, verify_deposit},
    escrow::{
        confirm_escrow, create_escrow, dispute_escrow, refund_escrow, release_escrow,
        resolve_escrow,
    },
    health::health_check,
    paystack_webhook::paystack_webhook,
    resolve_account::resolve_account,
    rewards::{referral_bonus, streak_claim, welcome_bonus},
    transactions::get_transactions,
    wallets::get_wallet,
    withdraw::withdraw,
};
use axum::routing::{get, post};
use axum::Router;
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};
use unimart_core::AppState;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Router {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(5)
            .burst_size(20)
            .finish()
            .unwrap(),
    );

    let api_router = Router::new()
        .route("/api/wallets/{user_id}", get(get_wallet))
        .route("/api/transactions/{user_id}", get(get_transactions))
        .route("/api/deposits", post(initialize_deposit))
        .route("/api/deposits/{reference}/verify", get(verify_deposit))
        .route("/api/withdrawals", post(withdraw))
        .route("/api/resolve_account", get(resolve_account))
        .route("/api/escrows", post(create_escrow))
        .route("/api/escrows/{id}/confirm", post(confirm_escrow))
        .route("/api/escrows/{id}/release", post(release_escrow))
        .route("/api/escrows/{id}/refund", post(refund_escrow))
        .route("/api/escrows/{id}/dispute", post(dispute_escrow))
        .route("/api/escrows/{id}/resolve", post(resolve_escrow))
        .route("/api/rewards/welcome", post(welcome_bonus))
        .route("/api/rewards/referral", post(referral_bonus))
        .route("/api/rewards/streak", post(streak_claim));

    let public_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/webhooks/paystack", post(paystack_webhook))
        .route("/api/health", get(health_check))
        .route(
            "/metrics",
            get(move || std::future::ready(metric_handle.render())),
        );

    let mut router = Router::new()
        .merge(public_router)
        .merge(api_router)
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(metric_layer),
        );

    // rate limiting breaks key extraction in tests, where there is no peer
    // address
    if std::env::var("APP_ENV").unwrap_or_default() != "test" {
        router = router.layer(GovernorLayer::new(governor_conf));
    }

    router.with_state(state)
}
