//! Price feeds and USD valuation.

pub mod adapter;
pub mod static_source;

pub use adapter::{PriceOracleAdapter, PriceSource};
pub use static_source::StaticPriceSource;
