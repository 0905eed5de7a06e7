use chrono::Utc;
use diesel::prelude::*;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::entities::enum_types::EscrowStatus;
use unimart_primitives::models::entities::escrow::{EscrowTransaction, NewEscrowTransaction};
use unimart_primitives::models::dtos::escrow_dto::ConfirmingParty;
use unimart_primitives::schema::escrow_transactions;
use uuid::Uuid;

pub struct EscrowRepository;

impl EscrowRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_escrow: NewEscrowTransaction,
    ) -> Result<EscrowTransaction, ApiError> {
        diesel::insert_into(escrow_transactions::table)
            .values(&new_escrow)
            .get_result::<EscrowTransaction>(conn)
            .map_err(ApiError::from)
    }

    pub fn find(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<EscrowTransaction>, ApiError> {
        escrow_transactions::table
            .find(id)
            .first::<EscrowTransaction>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Confirmation flags may only change while the escrow is held.
    /// `None` means the escrow was not in `held` (or does not exist).
    pub fn try_set_confirmation(
        conn: &mut PgConnection,
        id: Uuid,
        party: ConfirmingParty,
    ) -> Result<Option<EscrowTransaction>, ApiError> {
        let target = escrow_transactions::table
            .find(id)
            .filter(escrow_transactions::status.eq(EscrowStatus::Held));

        let updated = match party {
            ConfirmingParty::Buyer => diesel::update(target)
                .set((
                    escrow_transactions::buyer_confirmed.eq(true),
                    escrow_transactions::updated_at.eq(Utc::now()),
                ))
                .get_result::<EscrowTransaction>(conn),
            ConfirmingParty::Seller => diesel::update(target)
                .set((
                    escrow_transactions::seller_confirmed.eq(true),
                    escrow_transactions::updated_at.eq(Utc::now()),
                ))
                .get_result::<EscrowTransaction>(conn),
        };

        updated.optional().map_err(ApiError::from)
    }

    /// Single conditional status flip keyed on the expected current state,
    /// so two concurrent transitions cannot both succeed. Returns the row
    /// after the flip, or `None` when the guard failed.
    pub fn try_transition(
        conn: &mut PgConnection,
        id: Uuid,
        from: EscrowStatus,
        to: EscrowStatus,
    ) -> Result<Option<EscrowTransaction>, ApiError> {
        let now = Utc::now();
        let target = escrow_transactions::table
            .find(id)
            .filter(escrow_transactions::status.eq(from));

        let updated = if to == EscrowStatus::Released {
            diesel::update(target)
                .set((
                    escrow_transactions::status.eq(to),
                    escrow_transactions::released_at.eq(Some(now)),
                    escrow_transactions::updated_at.eq(now),
                ))
                .get_result::<EscrowTransaction>(conn)
        } else {
            diesel::update(target)
                .set((
                    escrow_transactions::status.eq(to),
                    escrow_transactions::updated_at.eq(now),
                ))
                .get_result::<EscrowTransaction>(conn)
        };

        updated.optional().map_err(ApiError::from)
    }
}
