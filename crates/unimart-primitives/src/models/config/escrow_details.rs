use eyre::Report;
use std::env;

/// Platform fee band in basis points. The marketplace charges 3–6%; a
/// request outside the band is clamped, never rejected.
#[derive(Debug, Clone)]
pub struct EscrowInfo {
    pub default_fee_bps: i32,
    pub min_fee_bps: i32,
    pub max_fee_bps: i32,
}

impl EscrowInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            default_fee_bps: env::var("ESCROW_FEE_BPS")
                .unwrap_or_else(|_| "500".into())
                .parse()?,
            min_fee_bps: env::var("ESCROW_MIN_FEE_BPS")
                .unwrap_or_else(|_| "300".into())
                .parse()?,
            max_fee_bps: env::var("ESCROW_MAX_FEE_BPS")
                .unwrap_or_else(|_| "600".into())
                .parse()?,
        })
    }
}
