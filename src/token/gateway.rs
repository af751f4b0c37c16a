//! Capability-scoped token collaborators.
//!
//! The engine never holds full token implementations; it holds gateways
//! that expose exactly the operations it is entitled to. A gateway call
//! returning `Ok(false)` means the external system refused the operation
//! without raising its own error; the engine maps that refusal to a typed
//! failure and rolls back.

use crate::core::types::{AccountId, TokenId};
use crate::error::Result;

/// Mint, burn, and transfer authority over the stable token
pub trait StableTokenGateway {
    /// Mint `amount` stable units to `to`; `Ok(false)` if the token refused
    fn mint(&mut self, to: &AccountId, amount: u128) -> Result<bool>;

    /// Burn `amount` stable units held by the engine
    fn burn(&mut self, amount: u128) -> Result<()>;

    /// Pull `amount` stable units from `from` to `to`; `Ok(false)` if refused
    fn transfer_from(&mut self, from: &AccountId, to: &AccountId, amount: u128) -> Result<bool>;

    /// Stable balance of `account`
    fn balance_of(&self, account: &AccountId) -> u128;

    /// Total stable supply in circulation
    fn total_supply(&self) -> u128;
}

/// Custody of the collateral assets backing the system
pub trait CollateralGateway {
    /// Pull `amount` of `token` from `from` into engine custody
    fn transfer_in(&mut self, token: &TokenId, from: &AccountId, amount: u128) -> Result<bool>;

    /// Release `amount` of `token` from engine custody to `to`
    fn transfer_out(&mut self, token: &TokenId, to: &AccountId, amount: u128) -> Result<bool>;

    /// Holdings of `account` in `token`
    fn balance_of(&self, token: &TokenId, account: &AccountId) -> u128;
}
