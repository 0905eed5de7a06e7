use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, warn};
use unimart_primitives::error::ApiError;
use uuid::Uuid;

/// Event shipped to the notification collaborator. Delivery is best-effort:
/// the ledger operation that produced the event has already committed.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    PaymentConfirmed {
        user_id: Uuid,
        amount: i64,
        reference: Uuid,
    },
    EscrowReleased {
        user_id: Uuid,
        amount: i64,
        reference: Uuid,
    },
    StreakRewardGranted {
        user_id: Uuid,
        amount: i64,
        streak: i32,
    },
}

#[derive(Clone)]
pub struct NotifierClient {
    http: Client,
    endpoint: Option<Url>,
}

impl NotifierClient {
    pub fn new(http: Client, base_url: Option<&str>) -> Result<Self, ApiError> {
        let endpoint = match base_url {
            Some(raw) => Some(
                Url::parse(raw)
                    .map_err(|_| ApiError::Internal("Invalid notifier URL".into()))?,
            ),
            None => None,
        };
        Ok(Self { http, endpoint })
    }

    /// Fire-and-forget: spawns the delivery and returns immediately.
    /// Failures are logged and swallowed; they never surface to the caller.
    pub fn notify(&self, event: NotificationEvent) {
        let Some(url) = self.endpoint.clone() else {
            debug!(?event, "notifier disabled, dropping event");
            return;
        };
        let http = self.http.clone();

        tokio::spawn(async move {
            match http.post(url).json(&event).send().await {
                Ok(resp) if resp.status().is_success() => {
                    debug!(?event, "notification delivered");
                }
                Ok(resp) => {
                    warn!(?event, status = resp.status().as_u16(), "notification rejected");
                }
                Err(e) => {
                    warn!(?event, error = %e, "notification delivery failed");
                }
            }
        });
    }
}
