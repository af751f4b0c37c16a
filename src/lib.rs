//! # Credline
//!
//! An over-collateralized credit engine: accounts deposit approved
//! collateral assets, mint a USD-pegged stable unit against them, and are
//! liquidated with a bonus incentive when their position falls below the
//! 200% collateralization requirement.
//!
//! ## Architecture
//!
//! - **Core**: Identifiers, collateral registry, the account ledger, and
//!   health-factor arithmetic
//! - **Oracle**: Price-source abstraction and USD valuation at canonical
//!   18-decimal precision
//! - **Token**: Capability-scoped gateways to the stable token and
//!   collateral custody, with in-memory reference backends
//! - **Liquidation**: Seizure arithmetic and liquidation outcomes
//! - **Engine**: The all-or-nothing operation facade and its event log
//!
//! ## Example
//!
//! ```rust,ignore
//! use credline::prelude::*;
//!
//! let mut engine = CreditEngine::new(tokens, feeds, custody, source, stable, bank)?;
//! engine.deposit_collateral_and_mint(&account, &token, collateral, debt)?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    unused_lifetimes,
    unused_qualifications
)]

pub mod core;
pub mod engine;
pub mod error;
pub mod liquidation;
pub mod oracle;
pub mod token;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        config::{CollateralRegistry, CollateralTokenConfig},
        health::{calculate_health_factor, is_safe},
        ledger::CollateralLedger,
        types::{AccountId, FeedId, TokenId},
    };
    pub use crate::engine::{
        events::{EngineEvent, EventLog},
        CreditEngine,
    };
    pub use crate::error::{Error, Result};
    pub use crate::liquidation::{seizure_for_debt, LiquidationOutcome, Seizure};
    pub use crate::oracle::{PriceOracleAdapter, PriceSource, StaticPriceSource};
    pub use crate::token::{
        CollateralBank, CollateralGateway, StableToken, StableTokenGateway,
    };
}

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name
pub const ENGINE_NAME: &str = "credline";
