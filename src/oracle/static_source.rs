//! In-memory price source.
//!
//! A [`PriceSource`] backed by a plain map, used by tests and off-system
//! simulations. Prices are set directly; there is no aggregation, staleness
//! tracking, or update validation here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::FeedId;
use crate::error::{Error, Result};
use crate::oracle::adapter::PriceSource;

/// Price source that serves whatever was last stored per feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticPriceSource {
    prices: HashMap<FeedId, i64>,
}

impl StaticPriceSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest reading for `feed` (8-decimal signed)
    pub fn set_price(&mut self, feed: FeedId, price: i64) {
        self.prices.insert(feed, price);
    }

    /// Drop the reading for `feed`, making it unavailable
    pub fn clear_price(&mut self, feed: &FeedId) {
        self.prices.remove(feed);
    }

    /// Number of feeds with a stored reading
    pub fn feed_count(&self) -> usize {
        self.prices.len()
    }
}

impl PriceSource for StaticPriceSource {
    fn latest_price(&self, feed: &FeedId) -> Result<i64> {
        self.prices
            .get(feed)
            .copied()
            .ok_or(Error::FeedUnavailable { feed: *feed })
    }
}
