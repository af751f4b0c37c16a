//! Health-factor arithmetic.
//!
//! A position's health factor compares the risk-adjusted value of its
//! collateral against its minted debt, at 18-decimal fixed point. Only
//! half of the collateral's USD value counts (the 200% collateralization
//! requirement); a factor below `1e18` means the position is eligible for
//! liquidation.

use crate::utils::constants::{
    LIQUIDATION_PRECISION, LIQUIDATION_THRESHOLD, MAX_HEALTH_FACTOR, MIN_HEALTH_FACTOR, PRECISION,
};
use crate::utils::math::mul_div_saturating;

/// Health factor of a position, 18-decimal fixed point.
///
/// Debt-free positions are maximally healthy regardless of collateral,
/// including the empty position.
pub fn calculate_health_factor(collateral_value_usd: u128, debt_minted: u128) -> u128 {
    if debt_minted == 0 {
        return MAX_HEALTH_FACTOR;
    }
    let adjusted = mul_div_saturating(
        collateral_value_usd,
        LIQUIDATION_THRESHOLD,
        LIQUIDATION_PRECISION,
    );
    mul_div_saturating(adjusted, PRECISION, debt_minted)
}

/// Whether a health factor clears the liquidation bar
pub fn is_safe(health_factor: u128) -> bool {
    health_factor >= MIN_HEALTH_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_debt_is_maximally_healthy() {
        assert_eq!(calculate_health_factor(0, 0), MAX_HEALTH_FACTOR);
        assert_eq!(
            calculate_health_factor(1_000_000 * PRECISION, 0),
            MAX_HEALTH_FACTOR
        );
    }

    #[test]
    fn forty_thousand_value_against_hundred_debt() {
        // $40,000 collateral, 100 debt: adjusted = $20,000, factor = 200.0
        let hf = calculate_health_factor(40_000 * PRECISION, 100 * PRECISION);
        assert_eq!(hf, 200 * PRECISION);
        assert!(is_safe(hf));
    }

    #[test]
    fn boundary_factor_of_exactly_one_is_safe() {
        // $200 collateral, 100 debt: adjusted = $100, factor = 1.0
        let hf = calculate_health_factor(200 * PRECISION, 100 * PRECISION);
        assert_eq!(hf, MIN_HEALTH_FACTOR);
        assert!(is_safe(hf));
    }

    #[test]
    fn undercollateralized_position_is_unsafe() {
        // $199 collateral, 100 debt: adjusted = $99.5, factor = 0.995
        let hf = calculate_health_factor(199 * PRECISION, 100 * PRECISION);
        assert_eq!(hf, 995 * PRECISION / 1000);
        assert!(!is_safe(hf));
    }

    #[test]
    fn odd_value_truncates_in_adjustment() {
        // $3 collateral, 100 debt: adjusted = $1.5, factor = 0.015
        let hf = calculate_health_factor(3 * PRECISION, 100 * PRECISION);
        assert_eq!(hf, 15 * PRECISION / 1000);
    }

    #[test]
    fn wide_intermediate_does_not_overflow() {
        // Value large enough that value * threshold * 1e18 exceeds u128
        let hf = calculate_health_factor(1_000_000_000 * PRECISION, 100 * PRECISION);
        assert_eq!(hf, 5_000_000 * PRECISION);
    }
}
