use crate::models::entities::enum_types::{PaymentPurpose, PaymentStatus};
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Record of an external charge. `transaction_ref` is the idempotency key
/// shared with the gateway; the row moves from pending to exactly one
/// terminal status, whichever of webhook or poll lands first.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::gateway_payments)]
pub struct GatewayPayment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub transaction_ref: Uuid,
    pub amount: i64,
    pub purpose: PaymentPurpose,
    pub status: PaymentStatus,
    pub channel: Option<String>,
    pub checkout_url: Option<String>,
    pub raw_response: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::gateway_payments)]
pub struct NewGatewayPayment<'a> {
    pub user_id: Uuid,
    pub transaction_ref: Uuid,
    pub amount: i64,
    pub purpose: PaymentPurpose,
    pub status: PaymentStatus,
    pub channel: Option<&'a str>,
}
