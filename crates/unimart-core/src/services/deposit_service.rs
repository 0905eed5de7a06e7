use crate::app_state::AppState;
use crate::repositories::gateway_payment_repository::GatewayPaymentRepository;
use diesel::Connection;
use tracing::{error, info};
use unimart_primitives::error::ApiError;
use unimart_primitives::models::dtos::deposit_dto::{DepositRequest, DepositResponse};
use unimart_primitives::models::entities::enum_types::{PaymentPurpose, PaymentStatus};
use unimart_primitives::models::entities::gateway_payment::NewGatewayPayment;
use unimart_primitives::money::{kobo_to_naira, naira_to_kobo};
use uuid::Uuid;
use validator::Validate;

pub struct DepositService;

impl DepositService {
    /// Creates the pending gateway-payment row first, then asks the
    /// gateway for a checkout session. The row must exist before any
    /// webhook or poll can possibly reference it.
    pub async fn initialize_deposit(
        state: &AppState,
        req: DepositRequest,
    ) -> Result<DepositResponse, ApiError> {
        req.validate()?;
        let amount = naira_to_kobo(req.amount)?;
        let reference = Uuid::new_v4();

        let payment = {
            let mut conn = state.db.get()?;
            GatewayPaymentRepository::create(
                &mut conn,
                NewGatewayPayment {
                    user_id: req.user_id,
                    transaction_ref: reference,
                    amount,
                    purpose: PaymentPurpose::WalletDeposit,
                    status: PaymentStatus::Pending,
                    channel: req.channel.as_deref(),
                },
            )?
        };

        let init = match state
            .paystack
            .initialize_payment(&req.email, amount, reference, req.channel.as_deref())
            .await
        {
            Ok(init) => init,
            Err(gateway_err) => {
                // The charge never started; close the row so it cannot be
                // reconciled later.
                let mut conn = state.db.get()?;
                let closed = conn.transaction(|conn| {
                    GatewayPaymentRepository::try_mark_terminal(
                        conn,
                        payment.id,
                        PaymentStatus::Failed,
                        serde_json::json!({ "error": gateway_err.to_string() }),
                        None,
                    )
                });
                if let Err(e) = closed {
                    error!(%reference, error = %e, "failed to close unstarted deposit");
                }
                return Err(gateway_err.into());
            }
        };

        {
            let mut conn = state.db.get()?;
            GatewayPaymentRepository::set_checkout_url(
                &mut conn,
                payment.id,
                &init.authorization_url,
            )?;
        }

        info!(%reference, user_id = %req.user_id, amount, "deposit initialized");
        Ok(DepositResponse {
            reference,
            checkout_url: init.authorization_url,
            amount: kobo_to_naira(amount),
        })
    }
}
