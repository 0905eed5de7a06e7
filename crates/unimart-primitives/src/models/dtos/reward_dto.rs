use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct WelcomeBonusRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeBonusResponse {
    pub amount: f64,
    /// False when this call found an earlier grant and paid nothing.
    pub newly_granted: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReferralBonusRequest {
    pub referrer_id: Uuid,
    pub referred_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReferralBonusResponse {
    pub amount: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StreakClaimRequest {
    pub user_id: Uuid,
    pub ip_address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StreakClaimResponse {
    /// Zero when today's reward was already claimed.
    pub reward: f64,
    pub streak: i32,
    pub already_claimed: bool,
}
