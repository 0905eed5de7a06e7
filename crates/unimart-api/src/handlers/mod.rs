pub mod deposit;
pub mod escrow;
pub mod health;
pub mod paystack_webhook;
pub mod resolve_account;
pub mod rewards;
pub mod transactions;
pub mod wallets;
pub mod withdraw;
