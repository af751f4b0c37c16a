//! Core ledger state, identifiers, configuration, and health arithmetic.

pub mod config;
pub mod health;
pub mod ledger;
pub mod types;

pub use config::{CollateralRegistry, CollateralTokenConfig};
pub use health::{calculate_health_factor, is_safe};
pub use ledger::{AccountPosition, CollateralLedger, LedgerSnapshot};
pub use types::{AccountId, FeedId, TokenId};
