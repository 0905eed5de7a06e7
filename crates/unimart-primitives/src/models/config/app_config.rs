use crate::models::config::escrow_details::EscrowInfo;
use crate::models::config::paystack_details::PaystackInfo;
use crate::models::config::retry_details::RetryInfo;
use crate::models::config::reward_details::RewardInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_url: String,

    pub paystack: PaystackInfo,

    pub escrow: EscrowInfo,

    pub rewards: RewardInfo,

    pub gateway_retry: RetryInfo,

    /// Base URL of the notification collaborator; None disables delivery.
    pub notifier_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            paystack: PaystackInfo::new()?,

            escrow: EscrowInfo::new()?,

            rewards: RewardInfo::new()?,

            gateway_retry: RetryInfo::new()?,

            notifier_url: env::var("NOTIFIER_URL").ok(),
        })
    }
}
