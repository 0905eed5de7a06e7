use chrono::Utc;
use diesel::prelude::*;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::entities::enum_types::PaymentStatus;
use unimart_primitives::models::entities::gateway_payment::{GatewayPayment, NewGatewayPayment};
use unimart_primitives::schema::gateway_payments;
use uuid::Uuid;

pub struct GatewayPaymentRepository;

impl GatewayPaymentRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_payment: NewGatewayPayment,
    ) -> Result<GatewayPayment, ApiError> {
        diesel::insert_into(gateway_payments::table)
            .values(&new_payment)
            .get_result::<GatewayPayment>(conn)
            .map_err(ApiError::from)
    }

    /// Row lock for the reconciliation window: webhook and poll serialize
    /// on this before the terminal-status check.
    pub fn find_by_ref_for_update(
        conn: &mut PgConnection,
        transaction_ref: Uuid,
    ) -> Result<Option<GatewayPayment>, ApiError> {
        gateway_payments::table
            .filter(gateway_payments::transaction_ref.eq(transaction_ref))
            .for_update()
            .first::<GatewayPayment>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_ref(
        conn: &mut PgConnection,
        transaction_ref: Uuid,
    ) -> Result<Option<GatewayPayment>, ApiError> {
        gateway_payments::table
            .filter(gateway_payments::transaction_ref.eq(transaction_ref))
            .first::<GatewayPayment>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Pending → terminal, conditional on the row still being pending.
    /// `None` means another delivery won the race; the caller treats that
    /// as a duplicate and applies nothing.
    pub fn try_mark_terminal(
        conn: &mut PgConnection,
        id: Uuid,
        status: PaymentStatus,
        raw_response: serde_json::Value,
        channel: Option<&str>,
    ) -> Result<Option<GatewayPayment>, ApiError> {
        diesel::update(
            gateway_payments::table
                .find(id)
                .filter(gateway_payments::status.eq(PaymentStatus::Pending)),
        )
        .set((
            gateway_payments::status.eq(status),
            gateway_payments::raw_response.eq(raw_response),
            gateway_payments::channel.eq(channel),
            gateway_payments::updated_at.eq(Utc::now()),
        ))
        .get_result::<GatewayPayment>(conn)
        .optional()
        .map_err(ApiError::from)
    }

    pub fn set_checkout_url(
        conn: &mut PgConnection,
        id: Uuid,
        checkout_url: &str,
    ) -> Result<(), ApiError> {
        diesel::update(gateway_payments::table.find(id))
            .set((
                gateway_payments::checkout_url.eq(checkout_url),
                gateway_payments::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }
}
