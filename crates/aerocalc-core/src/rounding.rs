//! Decimal rounding of stage results.

/// Round `value` to `places` decimal digits.
///
/// Rounds the exact binary value, with ties going to the even digit, so
/// `2.675` (stored as 2.67499999...) rounds to `2.67`. Non-finite values
/// pass through unchanged.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.places$}").parse().unwrap_or(value)
}

/// Round up to the next whole number (flows are never under-provisioned).
pub fn round_up(value: f64) -> f64 {
    value.ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_places() {
        assert_eq!(round_to(1.5938415732544529, 2), 1.59);
        assert_eq!(round_to(0.17709350813938365, 3), 0.177);
        assert_eq!(round_to(275833.3333333333, 1), 275833.3);
        assert_eq!(round_to(62.4624, 2), 62.46);
    }

    #[test]
    fn rounds_exact_binary_value() {
        assert_eq!(round_to(2.675, 2), 2.67);
    }

    #[test]
    fn non_finite_passes_through() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 1), f64::INFINITY);
    }

    #[test]
    fn round_up_whole_numbers() {
        assert_eq!(round_up(547.29), 548.0);
        assert_eq!(round_up(548.0), 548.0);
    }
}
