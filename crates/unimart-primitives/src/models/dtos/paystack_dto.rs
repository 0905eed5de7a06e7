use serde::{Deserialize, Serialize};

/// Envelope every Paystack response arrives in. `status` is the gateway's
/// own ok/fail flag, independent of the HTTP status.
#[derive(Debug, Deserialize)]
pub struct PaystackEnvelope<T> {
    pub status: bool,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct PaystackInitRequest<'a> {
    pub email: &'a str,
    /// Kobo, as the gateway requires.
    pub amount: i64,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct PaystackInitData {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

#[derive(Debug, Deserialize)]
pub struct PaystackChargeData {
    pub reference: String,
    /// "success" | "failed" | "abandoned" | ...
    pub status: String,
    pub amount: i64,
    pub channel: Option<String>,
    pub gateway_response: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaystackRecipientRequest<'a> {
    #[serde(rename = "type")]
    pub recipient_type: &'a str,
    pub name: &'a str,
    pub account_number: &'a str,
    pub bank_code: &'a str,
    pub currency: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PaystackRecipientData {
    pub recipient_code: String,
}

#[derive(Debug, Serialize)]
pub struct PaystackTransferRequest<'a> {
    pub source: &'a str,
    /// Kobo.
    pub amount: i64,
    pub recipient: &'a str,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct PaystackTransferData {
    pub transfer_code: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct PaystackResolveData {
    pub account_number: String,
    pub account_name: String,
}

/// Inbound webhook payload. Only the fields the reconciliation path needs;
/// the raw body is stored alongside.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaystackWebhook {
    pub event: String,
    pub data: PaystackWebhookData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaystackWebhookData {
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_charge_success_webhook() {
        let body = r#"{
            "event": "charge.success",
            "data": {
                "reference": "4b6dd1ae-7a42-4f6f-a1d2-4f29a7f2f3a1",
                "status": "success",
                "amount": 100000,
                "channel": "card",
                "extra_field_we_ignore": {"nested": true}
            }
        }"#;
        let parsed: PaystackWebhook = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.event, "charge.success");
        assert_eq!(parsed.data.amount, Some(100000));
        assert_eq!(parsed.data.channel.as_deref(), Some("card"));
    }

    #[test]
    fn parses_transfer_failed_webhook_without_amount() {
        let body = r#"{
            "event": "transfer.failed",
            "data": {"reference": "a6a3cf1e-8f2b-4c0f-9d5e-0a1b2c3d4e5f", "reason": "insufficient balance"}
        }"#;
        let parsed: PaystackWebhook = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.event, "transfer.failed");
        assert!(parsed.data.amount.is_none());
        assert_eq!(parsed.data.reason.as_deref(), Some("insufficient balance"));
    }

    #[test]
    fn rejects_payload_missing_reference() {
        let body = r#"{"event": "charge.success", "data": {"status": "success"}}"#;
        assert!(serde_json::from_str::<PaystackWebhook>(body).is_err());
    }
}
