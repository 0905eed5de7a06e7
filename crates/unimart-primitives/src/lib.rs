pub mod error;
pub mod models;
pub mod money;
pub mod schema;

pub use error::{ApiError, ApiErrorResponse, GatewayError};
