//! Reference stable token.
//!
//! An in-memory token whose mint and transfer authority belongs to the
//! engine through [`StableTokenGateway`]. Supply expands only by minting
//! and contracts only by burning from the engine's own balance. A pause
//! switch lets simulations exercise the refusal path: while paused, mints
//! and transfers return `Ok(false)` instead of moving funds.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::AccountId;
use crate::error::{Error, Result};
use crate::token::gateway::StableTokenGateway;
use crate::utils::math::safe_add;

/// In-memory stable token with engine-held authority
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StableToken {
    /// Account the engine burns from and receives repayments into
    engine_account: AccountId,
    /// Balances by holder
    balances: HashMap<AccountId, u128>,
    /// Circulating supply
    total_supply: u128,
    /// While set, mints and transfers are refused
    paused: bool,
}

impl StableToken {
    /// Create the token with the engine's custody account
    pub fn new(engine_account: AccountId) -> Self {
        Self {
            engine_account,
            balances: HashMap::new(),
            total_supply: 0,
            paused: false,
        }
    }

    /// Refuse subsequent mints and transfers
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume normal operation
    pub fn unpause(&mut self) {
        self.paused = false;
    }

    /// Whether per-holder balances sum to the recorded supply
    pub fn supply_is_consistent(&self) -> bool {
        let summed: u128 = self.balances.values().sum();
        summed == self.total_supply
    }
}

impl StableTokenGateway for StableToken {
    fn mint(&mut self, to: &AccountId, amount: u128) -> Result<bool> {
        if self.paused {
            return Ok(false);
        }
        let new_supply = safe_add(self.total_supply, amount)?;
        let balance = self.balances.entry(*to).or_insert(0);
        *balance = safe_add(*balance, amount)?;
        self.total_supply = new_supply;
        Ok(true)
    }

    fn burn(&mut self, amount: u128) -> Result<()> {
        let engine = self.engine_account;
        let held = self.balance_of(&engine);
        if held < amount {
            return Err(Error::InsufficientDebt {
                requested: amount,
                owed: held,
            });
        }
        if let Some(balance) = self.balances.get_mut(&self.engine_account) {
            *balance -= amount;
        }
        self.total_supply -= amount;
        Ok(())
    }

    fn transfer_from(&mut self, from: &AccountId, to: &AccountId, amount: u128) -> Result<bool> {
        if self.paused {
            return Ok(false);
        }
        let available = self.balance_of(from);
        if available < amount {
            return Ok(false);
        }
        if let Some(balance) = self.balances.get_mut(from) {
            *balance -= amount;
        }
        let target = self.balances.entry(*to).or_insert(0);
        *target = safe_add(*target, amount)?;
        Ok(true)
    }

    fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn total_supply(&self) -> u128 {
        self.total_supply
    }
}
