use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResolveAccountQuery {
    #[validate(length(equal = 10))]
    pub account_number: String,
    #[validate(length(min = 3, max = 10))]
    pub bank_code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResolveAccountResponse {
    pub account_number: String,
    pub account_name: String,
}
