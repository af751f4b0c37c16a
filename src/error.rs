//! Error types for the credit engine.
//!
//! Every failure is a typed variant identifying which precondition or
//! invariant was violated. Failures always abort the whole enclosing
//! operation; nothing is retried or partially committed.

use thiserror::Error;

use crate::core::types::{FeedId, TokenId};

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the credit engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ═══════════════════════════════════════════════════════════════════
    // Input Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A quantity parameter is zero where a positive amount is required
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// An operation references a token with no configured price feed
    #[error("unsupported collateral token {token}")]
    UnsupportedCollateral {
        /// Token the operation referenced
        token: TokenId,
    },

    /// Initialization lists of unequal length
    #[error("token and feed lists differ in length: {tokens} tokens, {feeds} feeds")]
    LengthMismatch {
        /// Number of token identifiers supplied
        tokens: usize,
        /// Number of feed identifiers supplied
        feeds: usize,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Balance Errors
    // ═══════════════════════════════════════════════════════════════════

    /// Collateral withdrawal exceeds the account's deposited balance
    #[error("insufficient collateral: required {required}, available {available}")]
    InsufficientCollateral {
        /// Amount the operation needed
        required: u128,
        /// Amount the account holds
        available: u128,
    },

    /// Debt repayment exceeds the account's outstanding debt
    #[error("insufficient debt: requested {requested}, owed {owed}")]
    InsufficientDebt {
        /// Amount the operation tried to repay
        requested: u128,
        /// Amount the account actually owes
        owed: u128,
    },

    // ═══════════════════════════════════════════════════════════════════
    // External Collaborator Errors
    // ═══════════════════════════════════════════════════════════════════

    /// An external token transfer-in or transfer-out reported failure
    #[error("token transfer failed: {asset}")]
    TransferFailed {
        /// Asset whose transfer failed (collateral token id or the stable unit)
        asset: String,
    },

    /// The external mint call reported failure
    #[error("stable unit mint failed")]
    MintFailed,

    /// A price feed returned a reading that cannot price collateral
    #[error("feed {feed} returned unusable price {price}")]
    InvalidPrice {
        /// Feed that produced the reading
        feed: FeedId,
        /// The raw signed reading
        price: i64,
    },

    /// A price feed has no reading available
    #[error("no price available for feed {feed}")]
    FeedUnavailable {
        /// Feed that could not be read
        feed: FeedId,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Risk Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A state-changing operation would leave the acting account below the
    /// minimum health factor; carries the computed factor for diagnostics
    #[error("health factor {health_factor} below minimum")]
    HealthFactorBroken {
        /// The computed health factor (1e18 fixed point)
        health_factor: u128,
    },

    /// Liquidation attempted against an account that is not unsafe
    #[error("health factor is fine, account cannot be liquidated")]
    HealthFactorIsFine,

    /// Liquidation executed but failed to raise the target's health factor
    #[error("liquidation did not improve the target's health factor")]
    HealthFactorNotImproved,

    // ═══════════════════════════════════════════════════════════════════
    // Internal Errors
    // ═══════════════════════════════════════════════════════════════════

    /// A public operation was re-entered from within an external effect
    #[error("reentrant call into the engine rejected")]
    Reentrancy,

    /// Overflow in calculation
    #[error("arithmetic overflow in {operation}")]
    Overflow {
        /// Operation that overflowed
        operation: String,
    },

    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl Error {
    /// Returns true if this error is recoverable by the caller adjusting
    /// inputs and retrying (a caller-level policy; the engine never retries)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidAmount
                | Error::InsufficientCollateral { .. }
                | Error::InsufficientDebt { .. }
                | Error::HealthFactorBroken { .. }
                | Error::HealthFactorIsFine
                | Error::HealthFactorNotImproved
        )
    }

    /// Returns the error code for external systems
    pub fn code(&self) -> u32 {
        match self {
            // Input errors: 1xxx
            Error::InvalidAmount => 1001,
            Error::UnsupportedCollateral { .. } => 1002,
            Error::LengthMismatch { .. } => 1003,

            // Balance errors: 2xxx
            Error::InsufficientCollateral { .. } => 2001,
            Error::InsufficientDebt { .. } => 2002,

            // External collaborator errors: 3xxx
            Error::TransferFailed { .. } => 3001,
            Error::MintFailed => 3002,
            Error::InvalidPrice { .. } => 3003,
            Error::FeedUnavailable { .. } => 3004,

            // Risk errors: 4xxx
            Error::HealthFactorBroken { .. } => 4001,
            Error::HealthFactorIsFine => 4002,
            Error::HealthFactorNotImproved => 4003,

            // Internal errors: 9xxx
            Error::Reentrancy => 9001,
            Error::Overflow { .. } => 9002,
            Error::Serialization(_) => 9003,
            Error::Deserialization(_) => 9004,
        }
    }
}
