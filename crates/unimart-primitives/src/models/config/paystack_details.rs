use eyre::eyre;
use eyre::Report;
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct PaystackInfo {
    pub secret_key: SecretString,
    pub api_url: String,
    pub webhook_secret: SecretString,
}

impl PaystackInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            secret_key: SecretString::new(
                env::var("PAYSTACK_SECRET_KEY")
                    .map_err(|_| eyre!("PAYSTACK_SECRET_KEY must be set"))?
                    .into(),
            ),
            api_url: env::var("PAYSTACK_API_URL")
                .unwrap_or_else(|_| "https://api.paystack.co".into()),
            webhook_secret: SecretString::new(
                env::var("PAYSTACK_WEBHOOK_SECRET")
                    .map_err(|_| eyre!("PAYSTACK_WEBHOOK_SECRET must be set"))?
                    .into(),
            ),
        })
    }
}
