pub mod enum_types;
pub mod escrow;
pub mod gateway_payment;
pub mod rewards;
pub mod transaction;
pub mod wallet;
pub mod withdrawal;

pub use enum_types::*;
pub use escrow::*;
pub use gateway_payment::*;
pub use rewards::*;
pub use transaction::*;
pub use wallet::*;
pub use withdrawal::*;
