//! Liquidation arithmetic and outcomes.
//!
//! A liquidator repays part of an unhealthy account's debt and seizes
//! collateral worth the repaid amount plus a 10% bonus, both priced at
//! the current feed reading. The engine enforces eligibility and the
//! strict-improvement rule; this module computes the seizure split.

use serde::{Deserialize, Serialize};

use crate::core::types::TokenId;
use crate::error::Result;
use crate::oracle::adapter::{PriceOracleAdapter, PriceSource};
use crate::utils::constants::{LIQUIDATION_BONUS, LIQUIDATION_PRECISION};
use crate::utils::math::{mul_div, safe_add};

// ═══════════════════════════════════════════════════════════════════════════════
// SEIZURE
// ═══════════════════════════════════════════════════════════════════════════════

/// Collateral amounts a liquidator receives for covering debt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seizure {
    /// Collateral worth exactly the covered debt
    pub base: u128,
    /// 10% incentive on top of the base
    pub bonus: u128,
    /// Base plus bonus
    pub total: u128,
}

/// Seizure owed for covering `debt_to_cover` USD of debt in `token`.
///
/// The base converts the covered debt to collateral units at the current
/// price; the bonus is 10% of the base, truncating.
pub fn seizure_for_debt<P: PriceSource>(
    oracle: &PriceOracleAdapter,
    source: &P,
    token: &TokenId,
    debt_to_cover: u128,
) -> Result<Seizure> {
    let base = oracle.token_amount_from_usd(source, token, debt_to_cover)?;
    let bonus = mul_div(base, LIQUIDATION_BONUS, LIQUIDATION_PRECISION)?;
    let total = safe_add(base, bonus)?;
    Ok(Seizure { base, bonus, total })
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTCOME
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a completed liquidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationOutcome {
    /// Debt repaid on the target's behalf
    pub debt_covered: u128,
    /// Total collateral moved to the liquidator
    pub collateral_seized: u128,
    /// Bonus portion of the seizure
    pub bonus: u128,
    /// Target's health factor before the liquidation
    pub starting_health_factor: u128,
    /// Target's health factor after the liquidation
    pub ending_health_factor: u128,
}
