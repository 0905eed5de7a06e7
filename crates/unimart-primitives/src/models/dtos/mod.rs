pub mod bank_dto;
pub mod deposit_dto;
pub mod escrow_dto;
pub mod paystack_dto;
pub mod reward_dto;
pub mod wallet_dto;
pub mod withdrawal_dto;

pub use bank_dto::*;
pub use deposit_dto::*;
pub use escrow_dto::*;
pub use paystack_dto::*;
pub use reward_dto::*;
pub use wallet_dto::*;
pub use withdrawal_dto::*;
