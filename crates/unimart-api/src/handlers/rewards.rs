use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use unimart_core::services::reward_service::RewardService;
use unimart_core::AppState;
use unimart_primitives::error::{ApiError, ApiErrorResponse};
use unimart_primitives::models::dtos::reward_dto::{
    ReferralBonusRequest, ReferralBonusResponse, StreakClaimRequest, StreakClaimResponse,
    WelcomeBonusRequest, WelcomeBonusResponse,
};

#[utoipa::path(
    post,
    path = "/api/rewards/welcome",
    request_body = WelcomeBonusRequest,
    responses(
        (status = 200, description = "Bonus granted, or echoed if already granted", body = WelcomeBonusResponse)
    ),
    tag = "Rewards"
)]
pub async fn welcome_bonus(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WelcomeBonusRequest>,
) -> Result<Json<WelcomeBonusResponse>, ApiError> {
    let response = RewardService::credit_welcome_bonus(&state, req.user_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/rewards/referral",
    request_body = ReferralBonusRequest,
    responses(
        (status = 200, description = "Referrer credited", body = ReferralBonusResponse),
        (status = 409, description = "Bonus already paid for this referral", body = ApiErrorResponse)
    ),
    tag = "Rewards"
)]
pub async fn referral_bonus(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReferralBonusRequest>,
) -> Result<Json<ReferralBonusResponse>, ApiError> {
    let response =
        RewardService::credit_referral_bonus(&state, req.referrer_id, req.referred_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/rewards/streak",
    request_body = StreakClaimRequest,
    responses(
        (status = 200, description = "Today's reward, zero when already claimed", body = StreakClaimResponse)
    ),
    tag = "Rewards"
)]
pub async fn streak_claim(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StreakClaimRequest>,
) -> Result<Json<StreakClaimResponse>, ApiError> {
    let response =
        RewardService::claim_login_streak(&state, req.user_id, req.ip_address.as_deref()).await?;
    Ok(Json(response))
}
