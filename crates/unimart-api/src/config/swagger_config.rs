use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::wallets::get_wallet,
        crate::handlers::transactions::get_transactions,
        crate::handlers::deposit::initialize_deposit,
        crate::handlers::deposit::verify_deposit,
        crate::handlers::withdraw::withdraw,
        crate::handlers::resolve_account::resolve_account,
        crate::handlers::escrow::create_escrow,
        crate::handlers::escrow::confirm_escrow,
        crate::handlers::escrow::release_escrow,
        crate::handlers::escrow::refund_escrow,
        crate::handlers::escrow::dispute_escrow,
        crate::handlers::escrow::resolve_escrow,
        crate::handlers::rewards::welcome_bonus,
        crate::handlers::rewards::referral_bonus,
        crate::handlers::rewards::streak_claim,
        crate::handlers::paystack_webhook::paystack_webhook,
    ),
    components(schemas(
        unimart_primitives::models::dtos::wallet_dto::WalletDto,
        unimart_primitives::models::dtos::wallet_dto::TransactionDto,
        unimart_primitives::models::dtos::wallet_dto::TransactionsResponse,
        unimart_primitives::models::dtos::deposit_dto::DepositRequest,
        unimart_primitives::models::dtos::deposit_dto::DepositResponse,
        unimart_primitives::models::dtos::deposit_dto::VerifyDepositResponse,
        unimart_primitives::models::dtos::withdrawal_dto::WithdrawRequest,
        unimart_primitives::models::dtos::withdrawal_dto::WithdrawResponse,
        unimart_primitives::models::dtos::escrow_dto::CreateEscrowRequest,
        unimart_primitives::models::dtos::escrow_dto::ConfirmEscrowRequest,
        unimart_primitives::models::dtos::escrow_dto::ResolveEscrowRequest,
        unimart_primitives::models::dtos::escrow_dto::EscrowDto,
        unimart_primitives::models::dtos::reward_dto::WelcomeBonusRequest,
        unimart_primitives::models::dtos::reward_dto::WelcomeBonusResponse,
        unimart_primitives::models::dtos::reward_dto::ReferralBonusRequest,
        unimart_primitives::models::dtos::reward_dto::ReferralBonusResponse,
        unimart_primitives::models::dtos::reward_dto::StreakClaimRequest,
        unimart_primitives::models::dtos::reward_dto::StreakClaimResponse,
        unimart_primitives::models::dtos::bank_dto::ResolveAccountResponse,
        unimart_primitives::error::ApiErrorResponse,
    )),
    tags(
        (name = "Wallet", description = "Balances and ledger"),
        (name = "Escrow", description = "Hold, release, refund, dispute"),
        (name = "Payments", description = "Deposits and withdrawals"),
        (name = "Rewards", description = "Welcome, referral and streak bonuses"),
        (name = "Webhooks", description = "Gateway callbacks"),
        (name = "Health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
