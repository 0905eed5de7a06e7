mod observability;

pub mod utility;

pub use unimart_primitives::error::ApiError;

use crate::utility::db_pool::create_db_pool;
use crate::utility::logging::setup_logging;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, load_env};
use eyre::Report;
use tracing::info;
use unimart_core::app_state::AppState;
use unimart_primitives::models::config::AppConfig;

pub async fn run() -> Result<(), Report> {
    load_env();

    setup_logging();

    info!("Starting UniMart wallet core...");

    let config = AppConfig::from_env()?;

    let pool = create_db_pool()?;

    let state = AppState::new(pool, config)?;

    let (metric_layer, metric_handle) = observability::metrics::setup_metrics();

    let app = build_router(state, metric_layer, metric_handle)?;

    serve(app).await?;

    info!("UniMart wallet core shut down gracefully");
    Ok(())
}
