use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use unimart_primitives::error::ApiError;
use unimart_primitives::models::entities::rewards::{
    NewReferral, NewStreakClaim, NewWelcomeBonus, Referral, StreakClaim, WelcomeBonus,
};
use unimart_primitives::schema::{referrals, streak_claims, welcome_bonuses};
use uuid::Uuid;

pub struct RewardRepository;

impl RewardRepository {
    /// `None` when the user already has a grant; the unique index on
    /// `user_id` is the idempotency guard.
    pub fn try_insert_welcome(
        conn: &mut PgConnection,
        user_id: Uuid,
        amount: i64,
    ) -> Result<Option<WelcomeBonus>, ApiError> {
        diesel::insert_into(welcome_bonuses::table)
            .values(NewWelcomeBonus { user_id, amount })
            .on_conflict(welcome_bonuses::user_id)
            .do_nothing()
            .get_result::<WelcomeBonus>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_welcome(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<WelcomeBonus>, ApiError> {
        welcome_bonuses::table
            .filter(welcome_bonuses::user_id.eq(user_id))
            .first::<WelcomeBonus>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Records the referral relationship; duplicate referred users are
    /// ignored (a user is referred at most once).
    pub fn upsert_referral(
        conn: &mut PgConnection,
        referrer_id: Uuid,
        referred_id: Uuid,
    ) -> Result<(), ApiError> {
        diesel::insert_into(referrals::table)
            .values(NewReferral {
                referrer_id,
                referred_id,
            })
            .on_conflict(referrals::referred_id)
            .do_nothing()
            .execute(conn)?;
        Ok(())
    }

    /// Atomically claims the bonus: flips `bonus_paid` only if still unpaid.
    /// `None` means the bonus was already paid (or no referral exists).
    pub fn try_mark_referral_paid(
        conn: &mut PgConnection,
        referrer_id: Uuid,
        referred_id: Uuid,
        amount: i64,
    ) -> Result<Option<Referral>, ApiError> {
        diesel::update(
            referrals::table
                .filter(referrals::referrer_id.eq(referrer_id))
                .filter(referrals::referred_id.eq(referred_id))
                .filter(referrals::bonus_paid.eq(false)),
        )
        .set((
            referrals::bonus_paid.eq(true),
            referrals::bonus_amount.eq(Some(amount)),
            referrals::paid_at.eq(Some(Utc::now())),
        ))
        .get_result::<Referral>(conn)
        .optional()
        .map_err(ApiError::from)
    }

    /// `None` when today's claim already exists for this user.
    pub fn try_insert_claim(
        conn: &mut PgConnection,
        new_claim: NewStreakClaim,
    ) -> Result<Option<StreakClaim>, ApiError> {
        diesel::insert_into(streak_claims::table)
            .values(&new_claim)
            .on_conflict((streak_claims::user_id, streak_claims::claim_date))
            .do_nothing()
            .get_result::<StreakClaim>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_claim(
        conn: &mut PgConnection,
        user_id: Uuid,
        claim_date: NaiveDate,
    ) -> Result<Option<StreakClaim>, ApiError> {
        streak_claims::table
            .filter(streak_claims::user_id.eq(user_id))
            .filter(streak_claims::claim_date.eq(claim_date))
            .first::<StreakClaim>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn recent_claims(
        conn: &mut PgConnection,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<StreakClaim>, ApiError> {
        streak_claims::table
            .filter(streak_claims::user_id.eq(user_id))
            .order(streak_claims::claim_date.desc())
            .limit(limit)
            .load::<StreakClaim>(conn)
            .map_err(ApiError::from)
    }
}
