pub mod app_config;
pub mod escrow_details;
pub mod paystack_details;
pub mod retry_details;
pub mod reward_details;

pub use app_config::AppConfig;
pub use escrow_details::EscrowInfo;
pub use paystack_details::PaystackInfo;
pub use retry_details::RetryInfo;
pub use reward_details::RewardInfo;
