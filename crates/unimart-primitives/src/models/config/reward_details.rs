use eyre::eyre;
use eyre::Report;
use secrecy::SecretString;
use std::env;

/// Reward amounts in kobo plus the server secret that feeds the
/// deterministic daily streak hash.
#[derive(Debug, Clone)]
pub struct RewardInfo {
    pub welcome_min: i64,
    pub welcome_max: i64,
    pub referral_bonus: i64,
    pub streak_base: i64,
    pub streak_cap: i64,
    pub streak_secret: SecretString,
}

impl RewardInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            welcome_min: env::var("WELCOME_BONUS_MIN_KOBO")
                .unwrap_or_else(|_| "10000".into())
                .parse()?,
            welcome_max: env::var("WELCOME_BONUS_MAX_KOBO")
                .unwrap_or_else(|_| "50000".into())
                .parse()?,
            referral_bonus: env::var("REFERRAL_BONUS_KOBO")
                .unwrap_or_else(|_| "20000".into())
                .parse()?,
            streak_base: env::var("STREAK_BASE_KOBO")
                .unwrap_or_else(|_| "1000".into())
                .parse()?,
            streak_cap: env::var("STREAK_CAP_KOBO")
                .unwrap_or_else(|_| "10000".into())
                .parse()?,
            streak_secret: SecretString::new(
                env::var("STREAK_SECRET")
                    .map_err(|_| eyre!("STREAK_SECRET must be set"))?
                    .into(),
            ),
        })
    }
}
