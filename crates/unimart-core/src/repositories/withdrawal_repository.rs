use chrono::Utc;
use diesel::prelude::*;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::entities::enum_types::WithdrawalStatus;
use unimart_primitives::models::entities::withdrawal::{NewWithdrawal, Withdrawal};
use unimart_primitives::schema::withdrawals;
use uuid::Uuid;

pub struct WithdrawalRepository;

impl WithdrawalRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_withdrawal: NewWithdrawal,
    ) -> Result<Withdrawal, ApiError> {
        diesel::insert_into(withdrawals::table)
            .values(&new_withdrawal)
            .get_result::<Withdrawal>(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_transfer_ref_for_update(
        conn: &mut PgConnection,
        transfer_ref: Uuid,
    ) -> Result<Option<Withdrawal>, ApiError> {
        withdrawals::table
            .filter(withdrawals::transfer_ref.eq(transfer_ref))
            .for_update()
            .first::<Withdrawal>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Conditional status flip keyed on the expected current state, same
    /// discipline as the escrow transitions.
    pub fn try_transition(
        conn: &mut PgConnection,
        id: Uuid,
        from: WithdrawalStatus,
        to: WithdrawalStatus,
        failure_reason: Option<&str>,
    ) -> Result<Option<Withdrawal>, ApiError> {
        diesel::update(
            withdrawals::table
                .find(id)
                .filter(withdrawals::status.eq(from)),
        )
        .set((
            withdrawals::status.eq(to),
            withdrawals::failure_reason.eq(failure_reason),
            withdrawals::updated_at.eq(Utc::now()),
        ))
        .get_result::<Withdrawal>(conn)
        .optional()
        .map_err(ApiError::from)
    }
}
