use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::notifier::NotifierClient;
use crate::clients::paystack::PaystackClient;
use crate::clients::retry::RetryPolicy;
use eyre::Result;
pub use unimart_primitives::models::config::AppConfig;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub http_client: Client,
    pub config: AppConfig,
    pub paystack: PaystackClient,
    pub notifier: NotifierClient,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Result<Arc<Self>> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let paystack = PaystackClient::new(
            http.clone(),
            &config.paystack.api_url,
            config.paystack.secret_key.clone(),
            RetryPolicy::from(&config.gateway_retry),
        )?;

        let notifier = NotifierClient::new(http.clone(), config.notifier_url.as_deref())?;

        Ok(Arc::new(Self {
            db,
            http_client: http,
            config,
            paystack,
            notifier,
        }))
    }
}
