use crate::clients::retry::{classify_status, RetryPolicy};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use unimart_primitives::error::{ApiError, GatewayError};
use unimart_primitives::models::dtos::paystack_dto::{
    PaystackChargeData, PaystackEnvelope, PaystackInitData, PaystackInitRequest,
    PaystackRecipientData, PaystackRecipientRequest, PaystackResolveData, PaystackTransferData,
    PaystackTransferRequest,
};
use uuid::Uuid;

/// Outbound Paystack integration. All amounts cross this boundary in kobo.
/// Every call carries a fresh correlation id for log tracing and runs under
/// the retry policy; the shared client enforces the 30s deadline.
#[derive(Clone)]
pub struct PaystackClient {
    http: Client,
    base_url: Url,
    secret_key: SecretString,
    retry: RetryPolicy,
}

impl PaystackClient {
    pub fn new(
        http: Client,
        base_url: &str,
        secret_key: SecretString,
        retry: RetryPolicy,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Internal("Invalid Paystack base URL".into()))?;

        Ok(Self {
            http,
            base_url,
            secret_key,
            retry,
        })
    }

    pub async fn initialize_payment(
        &self,
        email: &str,
        amount: i64,
        reference: Uuid,
        channel: Option<&str>,
    ) -> Result<PaystackInitData, GatewayError> {
        let url = self.endpoint("transaction/initialize");
        let correlation_id = Uuid::new_v4();
        let channels = channel.map(|c| vec![c.to_string()]);

        self.retry
            .run("paystack.initialize", || {
                let body = PaystackInitRequest {
                    email,
                    amount,
                    reference: reference.to_string(),
                    channels: channels.clone(),
                };
                self.post_envelope(url.clone(), correlation_id, body)
            })
            .await
    }

    pub async fn verify_transaction(
        &self,
        reference: Uuid,
    ) -> Result<PaystackChargeData, GatewayError> {
        let url = self.endpoint(&format!("transaction/verify/{}", reference));
        let correlation_id = Uuid::new_v4();

        self.retry
            .run("paystack.verify", || {
                self.get_envelope(url.clone(), correlation_id)
            })
            .await
    }

    pub async fn create_transfer_recipient(
        &self,
        name: &str,
        account_number: &str,
        bank_code: &str,
    ) -> Result<String, GatewayError> {
        let url = self.endpoint("transferrecipient");
        let correlation_id = Uuid::new_v4();

        let data: PaystackRecipientData = self
            .retry
            .run("paystack.recipient", || {
                let body = PaystackRecipientRequest {
                    recipient_type: "nuban",
                    name,
                    account_number,
                    bank_code,
                    currency: "NGN",
                };
                self.post_envelope(url.clone(), correlation_id, body)
            })
            .await?;

        Ok(data.recipient_code)
    }

    pub async fn initiate_transfer(
        &self,
        recipient_code: &str,
        amount: i64,
        reference: Uuid,
    ) -> Result<PaystackTransferData, GatewayError> {
        let url = self.endpoint("transfer");
        let correlation_id = Uuid::new_v4();

        self.retry
            .run("paystack.transfer", || {
                let body = PaystackTransferRequest {
                    source: "balance",
                    amount,
                    recipient: recipient_code,
                    reference: reference.to_string(),
                    reason: Some("Wallet withdrawal"),
                };
                self.post_envelope(url.clone(), correlation_id, body)
            })
            .await
    }

    pub async fn resolve_bank_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<PaystackResolveData, GatewayError> {
        let mut url = self.endpoint("bank/resolve");
        url.query_pairs_mut()
            .append_pair("account_number", account_number)
            .append_pair("bank_code", bank_code);
        let correlation_id = Uuid::new_v4();

        self.retry
            .run("paystack.resolve", || {
                self.get_envelope(url.clone(), correlation_id)
            })
            .await
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        url: Url,
        correlation_id: Uuid,
    ) -> Result<T, GatewayError> {
        debug!(%correlation_id, path = url.path(), "paystack GET");
        let resp = self
            .http
            .get(url)
            .bearer_auth(self.secret_key.expose_secret())
            .header("X-Correlation-Id", correlation_id.to_string())
            .send()
            .await?;
        self.read_envelope(resp, correlation_id).await
    }

    async fn post_envelope<T: DeserializeOwned, B: Serialize>(
        &self,
        url: Url,
        correlation_id: Uuid,
        body: B,
    ) -> Result<T, GatewayError> {
        debug!(%correlation_id, path = url.path(), "paystack POST");
        let resp = self
            .http
            .post(url)
            .bearer_auth(self.secret_key.expose_secret())
            .header("X-Correlation-Id", correlation_id.to_string())
            .json(&body)
            .send()
            .await?;
        self.read_envelope(resp, correlation_id).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        correlation_id: Uuid,
    ) -> Result<T, GatewayError> {
        let status = resp.status();
        let body_text = resp
            .text()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body_text)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_owned))
                .unwrap_or_else(|| "request failed".to_string());
            warn!(
                %correlation_id,
                http_status = status.as_u16(),
                paystack_message = %message,
                "paystack call failed"
            );
            return Err(classify_status(status.as_u16(), message));
        }

        let envelope: PaystackEnvelope<T> = serde_json::from_str(&body_text).map_err(|e| {
            warn!(%correlation_id, error = %e, "invalid paystack response body");
            GatewayError::InvalidResponse(e.to_string())
        })?;

        if !envelope.status {
            warn!(%correlation_id, paystack_message = %envelope.message, "paystack rejected request");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: envelope.message,
            });
        }

        envelope
            .data
            .ok_or_else(|| GatewayError::InvalidResponse("missing data field".into()))
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }
}
