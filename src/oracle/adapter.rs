//! Price normalization between external feeds and the engine's fixed point.
//!
//! External feeds report signed prices at 8-decimal precision. The adapter
//! rescales readings to the canonical 18-decimal scale and converts between
//! collateral amounts and USD values in both directions. It holds the
//! collateral registry and is strictly read-only.

use crate::core::config::{CollateralRegistry, CollateralTokenConfig};
use crate::core::types::{FeedId, TokenId};
use crate::error::{Error, Result};
use crate::utils::constants::{ADDITIONAL_FEED_PRECISION, PRECISION};
use crate::utils::math::mul_div;

// ═══════════════════════════════════════════════════════════════════════════════
// PRICE SOURCE
// ═══════════════════════════════════════════════════════════════════════════════

/// External price-feed collaborator.
///
/// Returns the latest reading for a feed as a signed integer at 8-decimal
/// precision. Staleness and round-completeness checks are the provider's
/// concern, not the engine's.
pub trait PriceSource {
    /// Latest price for `feed`, at 8 decimal places
    fn latest_price(&self, feed: &FeedId) -> Result<i64>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRICE ORACLE ADAPTER
// ═══════════════════════════════════════════════════════════════════════════════

/// Converts collateral amounts to canonical USD values and back
#[derive(Debug, Clone)]
pub struct PriceOracleAdapter {
    registry: CollateralRegistry,
}

impl PriceOracleAdapter {
    /// Create an adapter over a configured registry
    pub fn new(registry: CollateralRegistry) -> Self {
        Self { registry }
    }

    /// The underlying collateral registry
    pub fn registry(&self) -> &CollateralRegistry {
        &self.registry
    }

    /// All configured token/feed pairs, in insertion order
    pub fn configs(&self) -> &[CollateralTokenConfig] {
        self.registry.configs()
    }

    /// The feed configured for `token`
    pub fn feed_for(&self, token: &TokenId) -> Result<FeedId> {
        self.registry
            .feed_for(token)
            .ok_or(Error::UnsupportedCollateral { token: *token })
    }

    /// USD value (18-decimal) of `amount` units of `token`.
    ///
    /// The feed reading is rescaled to 18 decimals before multiplying so
    /// that division by the unit happens last.
    pub fn usd_value<P: PriceSource>(
        &self,
        source: &P,
        token: &TokenId,
        amount: u128,
    ) -> Result<u128> {
        let price = self.scaled_price(source, token)?;
        mul_div(price, amount, PRECISION)
    }

    /// Quantity of `token` (18-decimal) worth `usd_amount` USD
    pub fn token_amount_from_usd<P: PriceSource>(
        &self,
        source: &P,
        token: &TokenId,
        usd_amount: u128,
    ) -> Result<u128> {
        let price = self.scaled_price(source, token)?;
        mul_div(usd_amount, PRECISION, price)
    }

    /// Latest feed reading for `token`, rescaled to 18 decimals
    fn scaled_price<P: PriceSource>(&self, source: &P, token: &TokenId) -> Result<u128> {
        let feed = self.feed_for(token)?;
        let raw = source.latest_price(&feed)?;
        if raw <= 0 {
            return Err(Error::InvalidPrice { feed, price: raw });
        }
        Ok(raw as u128 * ADDITIONAL_FEED_PRECISION)
    }
}
