//! Token collaborators: gateway traits and in-memory reference backends.

pub mod collateral;
pub mod gateway;
pub mod stable;

pub use collateral::CollateralBank;
pub use gateway::{CollateralGateway, StableTokenGateway};
pub use stable::StableToken;
