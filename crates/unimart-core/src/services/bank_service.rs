use crate::app_state::AppState;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::dtos::bank_dto::{ResolveAccountQuery, ResolveAccountResponse};
use validator::Validate;

pub struct BankService;

impl BankService {
    /// Confirms the destination account name with the gateway before a
    /// withdrawal is set up.
    pub async fn resolve_account(
        state: &AppState,
        query: ResolveAccountQuery,
    ) -> Result<ResolveAccountResponse, ApiError> {
        query.validate()?;

        let resolved = state
            .paystack
            .resolve_bank_account(&query.account_number, &query.bank_code)
            .await?;

        Ok(ResolveAccountResponse {
            account_number: resolved.account_number,
            account_name: resolved.account_name,
        })
    }
}
