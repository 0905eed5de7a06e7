pub mod bank_service;
pub mod deposit_service;
pub mod escrow_service;
pub mod reconciliation_service;
pub mod reward_service;
pub mod wallet_service;
pub mod withdrawal_service;
