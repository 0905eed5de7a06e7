use crate::app_state::AppState;
use crate::clients::notifier::NotificationEvent;
use crate::repositories::reward_repository::RewardRepository;
use crate::services::wallet_service::WalletService;
use chrono::{Duration, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::Connection;
use rand::Rng;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use unimart_primitives::error::ApiError;
use unimart_primitives::models::config::RewardInfo;
use unimart_primitives::models::dtos::reward_dto::{
    ReferralBonusResponse, StreakClaimResponse, WelcomeBonusResponse,
};
use unimart_primitives::models::entities::enum_types::TransactionKind;
use unimart_primitives::models::entities::rewards::NewStreakClaim;
use unimart_primitives::money::kobo_to_naira;
use uuid::Uuid;

/// Distinct claim IPs within the recent window that triggers the advisory
/// abuse-review log line. Never blocks a claim.
const IP_CHURN_WINDOW: i64 = 7;
const IP_CHURN_THRESHOLD: usize = 4;

pub struct RewardService;

impl RewardService {
    /// One-time signup credit drawn from a bounded random range. The
    /// unique grant row makes replays return the original amount without
    /// paying twice.
    pub async fn credit_welcome_bonus(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<WelcomeBonusResponse, ApiError> {
        let cfg = &state.config.rewards;
        let amount = rand::thread_rng().gen_range(cfg.welcome_min..=cfg.welcome_max);

        let mut conn = state.db.get()?;
        conn.transaction(|conn| {
            match RewardRepository::try_insert_welcome(conn, user_id, amount)? {
                Some(grant) => {
                    WalletService::credit_in_tx(
                        conn,
                        user_id,
                        grant.amount,
                        TransactionKind::WelcomeBonus,
                        "Welcome bonus",
                        None,
                    )?;
                    info!(%user_id, amount = grant.amount, "welcome bonus granted");
                    Ok(WelcomeBonusResponse {
                        amount: kobo_to_naira(grant.amount),
                        newly_granted: true,
                    })
                }
                None => {
                    let existing = RewardRepository::find_welcome(conn, user_id)?.ok_or_else(
                        || ApiError::Internal("Welcome bonus grant vanished".into()),
                    )?;
                    Ok(WelcomeBonusResponse {
                        amount: kobo_to_naira(existing.amount),
                        newly_granted: false,
                    })
                }
            }
        })
    }

    /// Pays the referrer once per referred user. The `bonus_paid` flag is
    /// checked and set in one conditional update, atomically with the
    /// credit.
    pub async fn credit_referral_bonus(
        state: &AppState,
        referrer_id: Uuid,
        referred_id: Uuid,
    ) -> Result<ReferralBonusResponse, ApiError> {
        if referrer_id == referred_id {
            return Err(ApiError::BadRequest("Cannot refer yourself".into()));
        }
        let amount = state.config.rewards.referral_bonus;

        let mut conn = state.db.get()?;
        conn.transaction(|conn| {
            RewardRepository::upsert_referral(conn, referrer_id, referred_id)?;

            RewardRepository::try_mark_referral_paid(conn, referrer_id, referred_id, amount)?
                .ok_or(ApiError::DuplicateReferral)?;

            WalletService::credit_in_tx(
                conn,
                referrer_id,
                amount,
                TransactionKind::ReferralBonus,
                "Referral bonus",
                None,
            )?;

            info!(%referrer_id, %referred_id, amount, "referral bonus paid");
            Ok(ReferralBonusResponse {
                amount: kobo_to_naira(amount),
            })
        })
    }

    /// At most one claim per calendar day. The deterministic daily hash
    /// plus the `(user_id, claim_date)` unique key turn client retries
    /// into zero-reward no-ops.
    pub async fn claim_login_streak(
        state: &AppState,
        user_id: Uuid,
        ip_address: Option<&str>,
    ) -> Result<StreakClaimResponse, ApiError> {
        let cfg = &state.config.rewards;
        let today = Utc::now().date_naive();
        let claim_hash = Self::streak_hash(cfg.streak_secret.expose_secret(), user_id, today);

        let mut conn = state.db.get()?;
        let response = conn.transaction::<StreakClaimResponse, ApiError, _>(|conn| {
            let yesterday = today - Duration::days(1);
            let streak = match RewardRepository::find_claim(conn, user_id, yesterday)? {
                Some(prev) => prev.streak + 1,
                None => 1,
            };
            let reward = Self::streak_reward(cfg.streak_base, cfg.streak_cap, streak);

            let inserted = RewardRepository::try_insert_claim(
                conn,
                NewStreakClaim {
                    user_id,
                    claim_date: today,
                    streak,
                    reward,
                    claim_hash: &claim_hash,
                    ip_address,
                },
            )?;

            match inserted {
                Some(claim) => {
                    WalletService::credit_in_tx(
                        conn,
                        user_id,
                        claim.reward,
                        TransactionKind::RewardEarned,
                        "Daily login streak reward",
                        None,
                    )?;
                    Self::flag_ip_churn(conn, user_id)?;
                    info!(%user_id, streak = claim.streak, reward = claim.reward, "streak reward granted");
                    Ok(StreakClaimResponse {
                        reward: kobo_to_naira(claim.reward),
                        streak: claim.streak,
                        already_claimed: false,
                    })
                }
                None => {
                    let existing = RewardRepository::find_claim(conn, user_id, today)?;
                    Ok(StreakClaimResponse {
                        reward: 0.0,
                        streak: existing.map(|c| c.streak).unwrap_or(0),
                        already_claimed: true,
                    })
                }
            }
        })?;

        if !response.already_claimed {
            state.notifier.notify(NotificationEvent::StreakRewardGranted {
                user_id,
                amount: (response.reward * 100.0).round() as i64,
                streak: response.streak,
            });
        }
        Ok(response)
    }

    /// `sha256(date | user | secret)`, hex-encoded. Same inputs, same
    /// hash, so a replayed claim call cannot mint a second reward.
    pub fn streak_hash(secret: &str, user_id: Uuid, date: NaiveDate) -> String {
        let mut hasher = Sha256::new();
        hasher.update(date.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(user_id.as_bytes());
        hasher.update(b"|");
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Linear growth with the streak, capped.
    pub fn streak_reward(base: i64, cap: i64, streak: i32) -> i64 {
        (base * streak as i64).min(cap)
    }

    /// Advisory only: many distinct IPs across recent claims is a signal
    /// for abuse review, not grounds to block the claim.
    fn flag_ip_churn(conn: &mut PgConnection, user_id: Uuid) -> Result<(), ApiError> {
        let recent = RewardRepository::recent_claims(conn, user_id, IP_CHURN_WINDOW)?;
        let mut ips: Vec<&str> = recent
            .iter()
            .filter_map(|c| c.ip_address.as_deref())
            .collect();
        ips.sort_unstable();
        ips.dedup();

        if ips.len() >= IP_CHURN_THRESHOLD {
            warn!(%user_id, distinct_ips = ips.len(), "unusual IP churn on streak claims");
        }
        Ok(())
    }
}
