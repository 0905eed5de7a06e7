use crate::app_state::AppState;
use crate::clients::notifier::NotificationEvent;
use crate::repositories::gateway_payment_repository::GatewayPaymentRepository;
use crate::repositories::withdrawal_repository::WithdrawalRepository;
use crate::services::wallet_service::WalletService;
use diesel::prelude::*;
use diesel::Connection;
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use sha2::Sha512;
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};
use unimart_primitives::error::ApiError;
use unimart_primitives::models::dtos::paystack_dto::PaystackWebhook;
use unimart_primitives::models::entities::enum_types::{
    PaymentPurpose, PaymentStatus, TransactionKind, WithdrawalStatus,
};
use uuid::Uuid;

/// What a reconciliation attempt did. Duplicates are successes from the
/// gateway's point of view: the result was already applied exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Applied(PaymentStatus),
    Duplicate,
    StillPending,
    /// No internal record matches the reference. Acknowledged to the
    /// gateway (it is not our charge to retry), logged for investigation.
    Unmatched,
}

/// Applies gateway-reported outcomes to the ledger exactly once, whether
/// they arrive by webhook or by verification poll. Both paths converge on
/// the `transaction_ref` row lock and the pending→terminal guard.
pub struct ReconciliationService;

type HmacSha512 = Hmac<Sha512>;

impl ReconciliationService {
    /// HMAC-SHA512 over the raw body, hex-encoded, compared in constant
    /// time. A mismatch reveals nothing about the payload.
    pub fn verify_signature(
        secret: &str,
        payload: &[u8],
        signature: &str,
    ) -> Result<(), ApiError> {
        let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
            .map_err(|_| ApiError::Internal("Invalid webhook secret".into()))?;
        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        if expected.as_bytes().ct_eq(signature.as_bytes()).unwrap_u8() != 1 {
            return Err(ApiError::InvalidSignature);
        }
        Ok(())
    }

    pub async fn handle_webhook(
        state: &AppState,
        body: &[u8],
        signature: &str,
    ) -> Result<ReconcileOutcome, ApiError> {
        Self::verify_signature(
            state.config.paystack.webhook_secret.expose_secret(),
            body,
            signature,
        )?;

        let payload: PaystackWebhook = serde_json::from_slice(body)
            .map_err(|e| ApiError::MalformedPayload(e.to_string()))?;
        let reference = Uuid::parse_str(&payload.data.reference)
            .map_err(|_| ApiError::MalformedPayload("Invalid transaction reference".into()))?;
        let raw = serde_json::to_value(&payload)
            .map_err(|e| ApiError::MalformedPayload(e.to_string()))?;

        match payload.event.as_str() {
            "charge.success" | "charge.failed" | "charge.abandoned" => {
                let status = payload
                    .data
                    .status
                    .as_deref()
                    .and_then(Self::map_charge_status)
                    .unwrap_or(match payload.event.as_str() {
                        "charge.success" => PaymentStatus::Success,
                        "charge.abandoned" => PaymentStatus::Abandoned,
                        _ => PaymentStatus::Failed,
                    });

                let outcome = {
                    let mut conn = state.db.get()?;
                    let applied = conn.transaction(|conn| {
                        Self::apply_charge_result(
                            conn,
                            reference,
                            status,
                            payload.data.amount,
                            payload.data.channel.as_deref(),
                            raw,
                        )
                    });
                    match applied {
                        Err(ApiError::NotFound(_)) => {
                            warn!(%reference, "webhook for unknown charge reference");
                            return Ok(ReconcileOutcome::Unmatched);
                        }
                        other => other?,
                    }
                };

                if let ReconcileOutcome::Applied(PaymentStatus::Success) = outcome {
                    if let Some(payment) = Self::find_payment(state, reference)? {
                        state.notifier.notify(NotificationEvent::PaymentConfirmed {
                            user_id: payment.user_id,
                            amount: payment.amount,
                            reference,
                        });
                    }
                }
                Ok(outcome)
            }
            "transfer.success" | "transfer.failed" | "transfer.reversed" => {
                let success = payload.event == "transfer.success";
                let mut conn = state.db.get()?;
                let applied = conn.transaction(|conn| {
                    Self::apply_transfer_result(
                        conn,
                        reference,
                        success,
                        payload.data.reason.as_deref(),
                    )
                });
                match applied {
                    Err(ApiError::NotFound(_)) => {
                        warn!(%reference, "webhook for unknown transfer reference");
                        Ok(ReconcileOutcome::Unmatched)
                    }
                    other => other,
                }
            }
            other => {
                info!(event = other, "ignoring unhandled gateway event");
                Ok(ReconcileOutcome::Unmatched)
            }
        }
    }

    /// Polling path for missed webhooks: asks the gateway for the charge
    /// outcome and funnels it through the same conditional apply.
    pub async fn verify_deposit(
        state: &AppState,
        reference: Uuid,
    ) -> Result<ReconcileOutcome, ApiError> {
        let charge = state.paystack.verify_transaction(reference).await?;
        let Some(status) = Self::map_charge_status(&charge.status) else {
            return Ok(ReconcileOutcome::StillPending);
        };
        let raw = serde_json::json!({
            "source": "verify_poll",
            "status": charge.status,
            "amount": charge.amount,
            "gateway_response": charge.gateway_response,
        });

        let outcome = {
            let mut conn = state.db.get()?;
            conn.transaction(|conn| {
                Self::apply_charge_result(
                    conn,
                    reference,
                    status,
                    Some(charge.amount),
                    charge.channel.as_deref(),
                    raw,
                )
            })?
        };

        if let ReconcileOutcome::Applied(PaymentStatus::Success) = outcome {
            if let Some(payment) = Self::find_payment(state, reference)? {
                state.notifier.notify(NotificationEvent::PaymentConfirmed {
                    user_id: payment.user_id,
                    amount: payment.amount,
                    reference,
                });
            }
        }
        Ok(outcome)
    }

    /// Gateway charge-status vocabulary → internal terminal status.
    /// `None` means the charge is still in flight.
    pub fn map_charge_status(status: &str) -> Option<PaymentStatus> {
        match status {
            "success" => Some(PaymentStatus::Success),
            "failed" | "reversed" => Some(PaymentStatus::Failed),
            "abandoned" => Some(PaymentStatus::Abandoned),
            "cancelled" => Some(PaymentStatus::Cancelled),
            _ => None,
        }
    }

    /// The exactly-once core. Row lock → terminal check → conditional flip
    /// → credit, all in the caller's transaction.
    pub fn apply_charge_result(
        conn: &mut PgConnection,
        reference: Uuid,
        status: PaymentStatus,
        reported_amount: Option<i64>,
        channel: Option<&str>,
        raw_response: serde_json::Value,
    ) -> Result<ReconcileOutcome, ApiError> {
        let payment = GatewayPaymentRepository::find_by_ref_for_update(conn, reference)?
            .ok_or_else(|| ApiError::NotFound("Unknown transaction reference".into()))?;

        if payment.status.is_terminal() {
            info!(%reference, "duplicate gateway delivery, already reconciled");
            return Ok(ReconcileOutcome::Duplicate);
        }
        if !status.is_terminal() {
            return Ok(ReconcileOutcome::StillPending);
        }

        // A success reporting the wrong amount is an integrity problem, not
        // a credit.
        let status = match reported_amount {
            Some(reported) if status == PaymentStatus::Success && reported != payment.amount => {
                error!(
                    %reference,
                    expected = payment.amount,
                    reported,
                    "gateway amount mismatch, marking charge failed"
                );
                PaymentStatus::Failed
            }
            _ => status,
        };

        let Some(updated) = GatewayPaymentRepository::try_mark_terminal(
            conn,
            payment.id,
            status,
            raw_response,
            channel,
        )?
        else {
            return Ok(ReconcileOutcome::Duplicate);
        };

        if status == PaymentStatus::Success && updated.purpose == PaymentPurpose::WalletDeposit {
            WalletService::credit_in_tx(
                conn,
                updated.user_id,
                updated.amount,
                TransactionKind::Deposit,
                "Wallet deposit via Paystack",
                Some(reference),
            )?;
        }

        info!(%reference, ?status, "gateway charge reconciled");
        Ok(ReconcileOutcome::Applied(status))
    }

    /// Payout confirmations. A failed transfer returns the debited amount
    /// to the wallet as a refund line.
    pub fn apply_transfer_result(
        conn: &mut PgConnection,
        transfer_ref: Uuid,
        success: bool,
        reason: Option<&str>,
    ) -> Result<ReconcileOutcome, ApiError> {
        let withdrawal =
            WithdrawalRepository::find_by_transfer_ref_for_update(conn, transfer_ref)?
                .ok_or_else(|| ApiError::NotFound("Unknown transfer reference".into()))?;

        if withdrawal.status != WithdrawalStatus::Processing {
            info!(%transfer_ref, "duplicate transfer webhook, already settled");
            return Ok(ReconcileOutcome::Duplicate);
        }

        if success {
            let Some(_) = WithdrawalRepository::try_transition(
                conn,
                withdrawal.id,
                WithdrawalStatus::Processing,
                WithdrawalStatus::Completed,
                None,
            )?
            else {
                return Ok(ReconcileOutcome::Duplicate);
            };
            info!(%transfer_ref, "withdrawal completed");
            Ok(ReconcileOutcome::Applied(PaymentStatus::Success))
        } else {
            let Some(updated) = WithdrawalRepository::try_transition(
                conn,
                withdrawal.id,
                WithdrawalStatus::Processing,
                WithdrawalStatus::Failed,
                reason,
            )?
            else {
                return Ok(ReconcileOutcome::Duplicate);
            };

            WalletService::credit_in_tx(
                conn,
                updated.user_id,
                updated.amount,
                TransactionKind::Refund,
                "Withdrawal reversal: transfer failed",
                Some(transfer_ref),
            )?;
            warn!(%transfer_ref, reason = reason.unwrap_or("unspecified"), "withdrawal failed, wallet refunded");
            Ok(ReconcileOutcome::Applied(PaymentStatus::Failed))
        }
    }

    fn find_payment(
        state: &AppState,
        reference: Uuid,
    ) -> Result<Option<unimart_primitives::models::entities::gateway_payment::GatewayPayment>, ApiError>
    {
        let mut conn = state.db.get()?;
        GatewayPaymentRepository::find_by_ref(&mut conn, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_matching_signature() {
        let secret = "whsec_test";
        let body = br#"{"event":"charge.success"}"#;
        let sig = sign(secret, body);
        assert!(ReconciliationService::verify_signature(secret, body, &sig).is_ok());
    }

    #[test]
    fn rejects_tampered_payload() {
        let secret = "whsec_test";
        let sig = sign(secret, br#"{"event":"charge.success"}"#);
        let err = ReconciliationService::verify_signature(
            secret,
            br#"{"event":"charge.failed"}"#,
            &sig,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidSignature));
    }

    #[test]
    fn rejects_wrong_secret() {
        let body = br#"{"event":"charge.success"}"#;
        let sig = sign("whsec_a", body);
        assert!(matches!(
            ReconciliationService::verify_signature("whsec_b", body, &sig),
            Err(ApiError::InvalidSignature)
        ));
    }

    #[test]
    fn rejects_truncated_signature() {
        let secret = "whsec_test";
        let body = br#"{"event":"charge.success"}"#;
        let sig = sign(secret, body);
        assert!(matches!(
            ReconciliationService::verify_signature(secret, body, &sig[..64]),
            Err(ApiError::InvalidSignature)
        ));
    }

    #[test]
    fn maps_gateway_charge_statuses() {
        assert_eq!(
            ReconciliationService::map_charge_status("success"),
            Some(PaymentStatus::Success)
        );
        assert_eq!(
            ReconciliationService::map_charge_status("failed"),
            Some(PaymentStatus::Failed)
        );
        assert_eq!(
            ReconciliationService::map_charge_status("abandoned"),
            Some(PaymentStatus::Abandoned)
        );
        assert_eq!(ReconciliationService::map_charge_status("ongoing"), None);
        assert_eq!(ReconciliationService::map_charge_status("pending"), None);
    }
}
