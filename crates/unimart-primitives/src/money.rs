use crate::error::ApiError;

/// Largest single amount the API accepts: ₦10,000,000.
pub const MAX_AMOUNT_KOBO: i64 = 1_000_000_000;

/// Converts a naira amount from the API boundary into kobo.
///
/// Rejects non-positive, non-finite, over-limit and sub-kobo-precision
/// amounts. All internal arithmetic and the gateway wire format use kobo,
/// so this is the only place the 100x conversion happens on the way in.
pub fn naira_to_kobo(naira: f64) -> Result<i64, ApiError> {
    if !naira.is_finite() {
        return Err(ApiError::BadRequest("Amount must be a number".into()));
    }
    let scaled = naira * 100.0;
    let kobo = scaled.round();
    if (scaled - kobo).abs() > 1e-6 {
        return Err(ApiError::BadRequest(
            "Amount has sub-kobo precision".into(),
        ));
    }
    let kobo = kobo as i64;
    if kobo <= 0 {
        return Err(ApiError::BadRequest("Amount must be positive".into()));
    }
    if kobo > MAX_AMOUNT_KOBO {
        return Err(ApiError::BadRequest("Amount exceeds the maximum".into()));
    }
    Ok(kobo)
}

pub fn kobo_to_naira(kobo: i64) -> f64 {
    kobo as f64 / 100.0
}

/// "₦1234.50" style rendering for user-facing messages.
pub fn format_naira(kobo: i64) -> String {
    let sign = if kobo < 0 { "-" } else { "" };
    let abs = kobo.unsigned_abs();
    format!("{}₦{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_whole_naira() {
        assert_eq!(naira_to_kobo(1000.0).unwrap(), 100_000);
        assert_eq!(naira_to_kobo(0.01).unwrap(), 1);
    }

    #[test]
    fn converts_fractional_naira() {
        assert_eq!(naira_to_kobo(2999.99).unwrap(), 299_999);
        assert_eq!(naira_to_kobo(150.50).unwrap(), 15_050);
    }

    #[test]
    fn rejects_sub_kobo_precision() {
        assert!(naira_to_kobo(10.001).is_err());
        assert!(naira_to_kobo(0.005).is_err());
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(naira_to_kobo(0.0).is_err());
        assert!(naira_to_kobo(-50.0).is_err());
    }

    #[test]
    fn rejects_nan_and_infinity() {
        assert!(naira_to_kobo(f64::NAN).is_err());
        assert!(naira_to_kobo(f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_over_limit() {
        assert!(naira_to_kobo(10_000_001.0).is_err());
        assert!(naira_to_kobo(10_000_000.0).is_ok());
    }

    #[test]
    fn round_trips_without_drift() {
        for kobo in [1_i64, 99, 100, 12_345, 100_000, MAX_AMOUNT_KOBO] {
            assert_eq!(naira_to_kobo(kobo_to_naira(kobo)).unwrap(), kobo);
        }
    }

    #[test]
    fn formats_naira() {
        assert_eq!(format_naira(500_000), "₦5000.00");
        assert_eq!(format_naira(15_050), "₦150.50");
        assert_eq!(format_naira(-2_500), "-₦25.00");
        assert_eq!(format_naira(7), "₦0.07");
    }
}
