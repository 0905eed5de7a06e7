use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;
use unimart_primitives::error::GatewayError;
use unimart_primitives::models::config::RetryInfo;

/// Exponential backoff with jitter for transient gateway failures.
///
/// Domain rejections (4xx, auth) surface on the first attempt; only
/// network/timeout/429/5xx failures burn retry budget.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl From<&RetryInfo> for RetryPolicy {
    fn from(info: &RetryInfo) -> Self {
        Self {
            max_attempts: info.max_attempts.max(1),
            base_delay: info.base_delay,
            max_delay: info.max_delay,
        }
    }
}

impl RetryPolicy {
    /// `base * 2^attempt`, capped. Jitter is added separately so this part
    /// stays deterministic.
    fn backoff_base(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// Backoff for `attempt` with up to 30% random jitter on top.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.backoff_base(attempt);
        let jitter = base.mul_f64(rand::thread_rng().gen_range(0.0..0.3));
        base + jitter
    }

    /// Runs `call` until it succeeds, fails non-retryably, or the attempt
    /// budget is exhausted (surfaced as `GatewayError::Unavailable`).
    pub async fn run<T, F, Fut>(&self, op: &str, mut call: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let mut attempt = 0u32;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.max_attempts {
                        warn!(op, attempts = attempt, error = %err, "gateway retry budget exhausted");
                        return Err(GatewayError::Unavailable);
                    }
                    let delay = self.backoff_delay(attempt - 1);
                    warn!(op, attempt, delay_ms = delay.as_millis() as u64, error = %err, "retrying gateway call");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Maps an HTTP status from the gateway into the retry taxonomy. Bodies of
/// rejected responses carry the gateway's message for the caller.
pub fn classify_status(status: u16, message: String) -> GatewayError {
    match status {
        429 => GatewayError::RateLimited,
        s if s >= 500 => GatewayError::Server(s),
        401 | 403 => GatewayError::Auth(message),
        s => GatewayError::Rejected { status: s, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1000),
        }
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let p = policy();
        assert_eq!(p.backoff_base(0), Duration::from_millis(100));
        assert_eq!(p.backoff_base(1), Duration::from_millis(200));
        assert_eq!(p.backoff_base(2), Duration::from_millis(400));
        assert_eq!(p.backoff_base(3), Duration::from_millis(800));
        assert_eq!(p.backoff_base(4), Duration::from_millis(1000));
        assert_eq!(p.backoff_base(20), Duration::from_millis(1000));
    }

    #[test]
    fn jitter_stays_within_thirty_percent() {
        let p = policy();
        for _ in 0..50 {
            let d = p.backoff_delay(1);
            assert!(d >= Duration::from_millis(200));
            assert!(d < Duration::from_millis(261));
        }
    }

    #[test]
    fn classifies_statuses() {
        assert_eq!(classify_status(429, "slow down".into()), GatewayError::RateLimited);
        assert_eq!(classify_status(503, "".into()), GatewayError::Server(503));
        assert_eq!(
            classify_status(401, "bad key".into()),
            GatewayError::Auth("bad key".into())
        );
        assert!(matches!(
            classify_status(400, "invalid amount".into()),
            GatewayError::Rejected { status: 400, .. }
        ));
    }

    #[test]
    fn retryable_classes() {
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::RateLimited.is_retryable());
        assert!(GatewayError::Server(502).is_retryable());
        assert!(GatewayError::Network("reset".into()).is_retryable());
        assert!(!GatewayError::Auth("denied".into()).is_retryable());
        assert!(!GatewayError::Rejected {
            status: 400,
            message: "bad".into()
        }
        .is_retryable());
    }

    #[tokio::test]
    async fn surfaces_non_retryable_immediately() {
        let p = policy();
        let mut calls = 0u32;
        let result: Result<(), _> = p
            .run("test", || {
                calls += 1;
                async {
                    Err(GatewayError::Rejected {
                        status: 400,
                        message: "nope".into(),
                    })
                }
            })
            .await;
        assert!(matches!(result, Err(GatewayError::Rejected { .. })));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn exhausts_budget_into_unavailable() {
        let p = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        };
        let mut calls = 0u32;
        let result: Result<(), _> = p
            .run("test", || {
                calls += 1;
                async { Err(GatewayError::Server(503)) }
            })
            .await;
        assert_eq!(result, Err(GatewayError::Unavailable));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let p = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        };
        let mut calls = 0u32;
        let result = p
            .run("test", || {
                calls += 1;
                let n = calls;
                async move {
                    if n < 3 {
                        Err(GatewayError::Server(503))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;
        assert_eq!(result, Ok(3));
    }
}
