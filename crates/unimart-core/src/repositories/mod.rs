pub mod escrow_repository;
pub mod gateway_payment_repository;
pub mod reward_repository;
pub mod transaction_repository;
pub mod wallet_repository;
pub mod withdrawal_repository;
