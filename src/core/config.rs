//! Collateral token registry.
//!
//! Built once at engine initialization from parallel lists of token and
//! feed identifiers; immutable afterward. The registry keeps configured
//! tokens as an ordered sequence because aggregate-value computation
//! iterates them in insertion order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::{FeedId, TokenId};
use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// COLLATERAL TOKEN CONFIG
// ═══════════════════════════════════════════════════════════════════════════════

/// One supported collateral asset and its associated price feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralTokenConfig {
    /// The collateral token
    pub token: TokenId,
    /// The price feed bound to it
    pub feed: FeedId,
}

// ═══════════════════════════════════════════════════════════════════════════════
// COLLATERAL REGISTRY
// ═══════════════════════════════════════════════════════════════════════════════

/// Registry of all configured collateral tokens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollateralRegistry {
    /// All configured tokens, in insertion order
    configs: Vec<CollateralTokenConfig>,
    /// Feed lookup by token
    feeds: HashMap<TokenId, FeedId>,
}

impl CollateralRegistry {
    /// Build the registry from parallel token and feed lists.
    ///
    /// The lists must be equal in length; each position pairs one token
    /// with its feed.
    pub fn from_parallel_lists(tokens: Vec<TokenId>, feeds: Vec<FeedId>) -> Result<Self> {
        if tokens.len() != feeds.len() {
            return Err(Error::LengthMismatch {
                tokens: tokens.len(),
                feeds: feeds.len(),
            });
        }

        let mut registry = Self::default();
        for (token, feed) in tokens.into_iter().zip(feeds) {
            registry.configs.push(CollateralTokenConfig { token, feed });
            registry.feeds.insert(token, feed);
        }
        Ok(registry)
    }

    /// Whether a token has a configured price feed
    pub fn is_supported(&self, token: &TokenId) -> bool {
        self.feeds.contains_key(token)
    }

    /// The feed bound to a token, if configured
    pub fn feed_for(&self, token: &TokenId) -> Option<FeedId> {
        self.feeds.get(token).copied()
    }

    /// All configured tokens, in insertion order
    pub fn tokens(&self) -> Vec<TokenId> {
        self.configs.iter().map(|c| c.token).collect()
    }

    /// All token/feed pairs, in insertion order
    pub fn configs(&self) -> &[CollateralTokenConfig] {
        &self.configs
    }

    /// Number of configured tokens
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
