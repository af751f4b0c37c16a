//! Reference collateral custody.
//!
//! An in-memory bank of per-token holdings that the engine moves through
//! [`CollateralGateway`]. `fund` seeds holder balances for setup, and a
//! per-token pause switch exercises the refusal path in simulations.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::core::types::{AccountId, TokenId};
use crate::error::Result;
use crate::token::gateway::CollateralGateway;
use crate::utils::math::safe_add;

/// In-memory collateral holdings, keyed by token and holder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollateralBank {
    /// Account holding engine custody
    engine_account: AccountId,
    /// Holdings by (token, holder)
    balances: HashMap<(TokenId, AccountId), u128>,
    /// Tokens currently refusing transfers
    paused: HashSet<TokenId>,
}

impl CollateralBank {
    /// Create the bank with the engine's custody account
    pub fn new(engine_account: AccountId) -> Self {
        Self {
            engine_account,
            balances: HashMap::new(),
            paused: HashSet::new(),
        }
    }

    /// Seed `holder` with `amount` of `token` (setup only)
    pub fn fund(&mut self, token: &TokenId, holder: &AccountId, amount: u128) -> Result<()> {
        let balance = self.balances.entry((*token, *holder)).or_insert(0);
        *balance = safe_add(*balance, amount)?;
        Ok(())
    }

    /// Refuse subsequent transfers of `token`
    pub fn pause_token(&mut self, token: &TokenId) {
        self.paused.insert(*token);
    }

    /// Resume transfers of `token`
    pub fn unpause_token(&mut self, token: &TokenId) {
        self.paused.remove(token);
    }

    /// Amount of `token` held in engine custody
    pub fn custody_of(&self, token: &TokenId) -> u128 {
        let engine = self.engine_account;
        self.balance_of(token, &engine)
    }

    fn shift(
        &mut self,
        token: &TokenId,
        from: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<bool> {
        if self.paused.contains(token) {
            return Ok(false);
        }
        let available = self.balance_of(token, from);
        if available < amount {
            return Ok(false);
        }
        if let Some(balance) = self.balances.get_mut(&(*token, *from)) {
            *balance -= amount;
        }
        let target = self.balances.entry((*token, *to)).or_insert(0);
        *target = safe_add(*target, amount)?;
        Ok(true)
    }
}

impl CollateralGateway for CollateralBank {
    fn transfer_in(&mut self, token: &TokenId, from: &AccountId, amount: u128) -> Result<bool> {
        let engine = self.engine_account;
        self.shift(token, from, &engine, amount)
    }

    fn transfer_out(&mut self, token: &TokenId, to: &AccountId, amount: u128) -> Result<bool> {
        let engine = self.engine_account;
        self.shift(token, &engine, to, amount)
    }

    fn balance_of(&self, token: &TokenId, account: &AccountId) -> u128 {
        self.balances.get(&(*token, *account)).copied().unwrap_or(0)
    }
}
