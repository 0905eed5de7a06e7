use crate::app_state::AppState;
use crate::repositories::withdrawal_repository::WithdrawalRepository;
use crate::services::wallet_service::WalletService;
use diesel::Connection;
use tracing::{error, info, warn};
use unimart_primitives::error::ApiError;
use unimart_primitives::models::dtos::withdrawal_dto::{WithdrawRequest, WithdrawResponse};
use unimart_primitives::models::entities::enum_types::{TransactionKind, WithdrawalStatus};
use unimart_primitives::models::entities::withdrawal::{NewWithdrawal, Withdrawal};
use unimart_primitives::money::naira_to_kobo;
use uuid::Uuid;
use validator::Validate;

pub struct WithdrawalService;

impl WithdrawalService {
    /// Debit first, pay out second. The wallet debit, ledger row and
    /// withdrawal record commit as one unit before the gateway transfer is
    /// attempted; a transfer that fails to start reverses the debit.
    /// Transfer outcome otherwise arrives via the gateway webhook.
    pub async fn initialize_withdrawal(
        state: &AppState,
        req: WithdrawRequest,
    ) -> Result<WithdrawResponse, ApiError> {
        req.validate()?;
        let amount = naira_to_kobo(req.amount)?;

        let account_name = match &req.account_name {
            Some(name) => name.clone(),
            None => {
                state
                    .paystack
                    .resolve_bank_account(&req.account_number, &req.bank_code)
                    .await?
                    .account_name
            }
        };

        let recipient_code = state
            .paystack
            .create_transfer_recipient(&account_name, &req.account_number, &req.bank_code)
            .await?;

        let transfer_ref = Uuid::new_v4();
        let withdrawal = {
            let mut conn = state.db.get()?;
            conn.transaction::<Withdrawal, ApiError, _>(|conn| {
                WalletService::debit_in_tx(
                    conn,
                    req.user_id,
                    amount,
                    TransactionKind::Withdrawal,
                    "Withdrawal to bank account",
                    Some(transfer_ref),
                )?;

                WithdrawalRepository::create(
                    conn,
                    NewWithdrawal {
                        user_id: req.user_id,
                        amount,
                        bank_code: &req.bank_code,
                        account_number: &req.account_number,
                        account_name: &account_name,
                        recipient_code: Some(&recipient_code),
                        status: WithdrawalStatus::Processing,
                        transfer_ref,
                    },
                )
            })?
        };

        if let Err(gateway_err) = state
            .paystack
            .initiate_transfer(&recipient_code, amount, transfer_ref)
            .await
        {
            warn!(%transfer_ref, error = %gateway_err, "transfer initiation failed, reversing debit");
            let mut conn = state.db.get()?;
            let reversal = conn.transaction::<(), ApiError, _>(|conn| {
                let flipped = WithdrawalRepository::try_transition(
                    conn,
                    withdrawal.id,
                    WithdrawalStatus::Processing,
                    WithdrawalStatus::Failed,
                    Some("transfer initiation failed"),
                )?;
                if flipped.is_some() {
                    WalletService::credit_in_tx(
                        conn,
                        req.user_id,
                        amount,
                        TransactionKind::Refund,
                        "Withdrawal reversal: transfer not started",
                        Some(transfer_ref),
                    )?;
                }
                Ok(())
            });
            if let Err(e) = reversal {
                // The webhook path can still settle this row; never leave
                // it half-applied silently.
                error!(%transfer_ref, error = %e, "withdrawal reversal failed");
            }
            return Err(gateway_err.into());
        }

        info!(%transfer_ref, user_id = %req.user_id, amount, "withdrawal initiated");
        Ok(WithdrawResponse {
            withdrawal_id: withdrawal.id,
            transfer_ref,
            status: WithdrawalStatus::Processing,
        })
    }
}
