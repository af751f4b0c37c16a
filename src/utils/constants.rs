//! Engine-wide constants.
//!
//! All protocol parameters are defined here for easy auditing.

// ═══════════════════════════════════════════════════════════════════════════════
// FIXED-POINT SCALES
// ═══════════════════════════════════════════════════════════════════════════════

/// Canonical fixed-point scale: 10^18 (amounts, USD values, health factors)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// External price feeds report at 10^8 precision (8 decimal places)
pub const FEED_PRECISION: u128 = 100_000_000;

/// Factor that rescales an 8-decimal feed reading to 18 decimals
pub const ADDITIONAL_FEED_PRECISION: u128 = PRECISION / FEED_PRECISION;

// ═══════════════════════════════════════════════════════════════════════════════
// RISK PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Only this percentage of raw collateral value counts toward solvency
pub const LIQUIDATION_THRESHOLD: u128 = 50;

/// Divisor paired with [`LIQUIDATION_THRESHOLD`] and [`LIQUIDATION_BONUS`]
pub const LIQUIDATION_PRECISION: u128 = 100;

/// Surplus collateral percentage awarded to a liquidator
pub const LIQUIDATION_BONUS: u128 = 10;

/// Minimum health factor: 1.0 at 10^18 scale
pub const MIN_HEALTH_FACTOR: u128 = PRECISION;

/// Health factor assigned to accounts with zero debt (always safe)
pub const MAX_HEALTH_FACTOR: u128 = u128::MAX;

// ═══════════════════════════════════════════════════════════════════════════════
// IDENTIFIERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Length of an address-like identifier in bytes
pub const ID_LENGTH: usize = 20;
