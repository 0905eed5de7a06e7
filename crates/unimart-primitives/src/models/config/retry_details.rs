use eyre::Report;
use std::env;
use std::time::Duration;

/// Retry budget for outbound gateway calls.
#[derive(Debug, Clone)]
pub struct RetryInfo {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            max_attempts: env::var("GATEWAY_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".into())
                .parse()?,
            base_delay: Duration::from_millis(
                env::var("GATEWAY_RETRY_BASE_MS")
                    .unwrap_or_else(|_| "500".into())
                    .parse()?,
            ),
            max_delay: Duration::from_millis(
                env::var("GATEWAY_RETRY_MAX_MS")
                    .unwrap_or_else(|_| "8000".into())
                    .parse()?,
            ),
        })
    }
}
