use chrono::{DateTime, NaiveDate, Utc};
use diesel::{Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// One row per user; existence of the row is the idempotency guard for the
/// welcome bonus.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::welcome_bonuses)]
pub struct WelcomeBonus {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::welcome_bonuses)]
pub struct NewWelcomeBonus {
    pub user_id: Uuid,
    pub amount: i64,
}

#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::referrals)]
pub struct Referral {
    pub id: Uuid,
    pub referrer_id: Uuid,
    pub referred_id: Uuid,
    pub bonus_paid: bool,
    pub bonus_amount: Option<i64>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::referrals)]
pub struct NewReferral {
    pub referrer_id: Uuid,
    pub referred_id: Uuid,
}

/// One row per (user, day). `claim_hash` is the deterministic daily hash
/// that makes replayed claim calls a no-op.
#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::streak_claims)]
pub struct StreakClaim {
    pub id: Uuid,
    pub user_id: Uuid,
    pub claim_date: NaiveDate,
    pub streak: i32,
    pub reward: i64,
    pub claim_hash: String,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::streak_claims)]
pub struct NewStreakClaim<'a> {
    pub user_id: Uuid,
    pub claim_date: NaiveDate,
    pub streak: i32,
    pub reward: i64,
    pub claim_hash: &'a str,
    pub ip_address: Option<&'a str>,
}
