//! The collateral ledger: authoritative per-account state.
//!
//! Tracks collateral-by-token balances and minted debt per account, plus
//! aggregate totals. Accounts spring into existence on first deposit and
//! revert to an implicit empty state when all balances reach zero; entries
//! are never removed, and absent keys read as zero.
//!
//! The ledger is owned and mutated exclusively by the engine facade. It
//! supports snapshot-and-restore so the facade can make each public
//! operation all-or-nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::{AccountId, TokenId};
use crate::error::{Error, Result};
use crate::oracle::adapter::{PriceOracleAdapter, PriceSource};
use crate::utils::math::{safe_add, safe_sub};

// ═══════════════════════════════════════════════════════════════════════════════
// ACCOUNT POSITION
// ═══════════════════════════════════════════════════════════════════════════════

/// One account's collateral balances and minted debt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountPosition {
    /// Deposited collateral by token
    collateral: HashMap<TokenId, u128>,
    /// Stable units this account is responsible for
    debt_minted: u128,
}

impl AccountPosition {
    /// Collateral balance for one token (zero if never deposited)
    pub fn collateral_balance(&self, token: &TokenId) -> u128 {
        self.collateral.get(token).copied().unwrap_or(0)
    }

    /// Outstanding minted debt
    pub fn debt_minted(&self) -> u128 {
        self.debt_minted
    }

    /// Whether the position holds no collateral and no debt
    pub fn is_empty(&self) -> bool {
        self.debt_minted == 0 && self.collateral.values().all(|&v| v == 0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LEDGER SNAPSHOT
// ═══════════════════════════════════════════════════════════════════════════════

/// Saved ledger state for all-or-nothing operation rollback
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    accounts: HashMap<AccountId, AccountPosition>,
    total_debt: u128,
}

// ═══════════════════════════════════════════════════════════════════════════════
// COLLATERAL LEDGER
// ═══════════════════════════════════════════════════════════════════════════════

/// Authoritative per-account collateral and debt state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollateralLedger {
    /// Positions by account; absent accounts read as empty
    accounts: HashMap<AccountId, AccountPosition>,
    /// Sum of all accounts' minted debt
    total_debt: u128,
}

impl CollateralLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MUTATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Increase an account's collateral balance for `token`
    pub fn credit_collateral(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        amount: u128,
    ) -> Result<()> {
        let position = self.accounts.entry(*account).or_default();
        let balance = position.collateral.entry(*token).or_insert(0);
        *balance = safe_add(*balance, amount)?;
        Ok(())
    }

    /// Decrease an account's collateral balance for `token`.
    ///
    /// Callers must ensure sufficient balance; an over-withdrawal is a
    /// violated precondition surfaced as [`Error::InsufficientCollateral`].
    pub fn debit_collateral(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        amount: u128,
    ) -> Result<()> {
        let available = self.collateral_balance(account, token);
        if available < amount {
            return Err(Error::InsufficientCollateral {
                required: amount,
                available,
            });
        }
        let position = self.accounts.entry(*account).or_default();
        let balance = position.collateral.entry(*token).or_insert(0);
        *balance -= amount;
        Ok(())
    }

    /// Increase an account's minted debt
    pub fn add_debt(&mut self, account: &AccountId, amount: u128) -> Result<()> {
        let new_total = safe_add(self.total_debt, amount)?;
        let position = self.accounts.entry(*account).or_default();
        position.debt_minted = safe_add(position.debt_minted, amount)?;
        self.total_debt = new_total;
        Ok(())
    }

    /// Decrease an account's minted debt
    pub fn remove_debt(&mut self, account: &AccountId, amount: u128) -> Result<()> {
        let owed = self.debt_of(account);
        if owed < amount {
            return Err(Error::InsufficientDebt {
                requested: amount,
                owed,
            });
        }
        let position = self.accounts.entry(*account).or_default();
        position.debt_minted -= amount;
        self.total_debt = safe_sub(self.total_debt, amount)?;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Collateral balance of `account` for `token` (zero if absent)
    pub fn collateral_balance(&self, account: &AccountId, token: &TokenId) -> u128 {
        self.accounts
            .get(account)
            .map(|p| p.collateral_balance(token))
            .unwrap_or(0)
    }

    /// Outstanding minted debt of `account` (zero if absent)
    pub fn debt_of(&self, account: &AccountId) -> u128 {
        self.accounts
            .get(account)
            .map(|p| p.debt_minted)
            .unwrap_or(0)
    }

    /// Sum of all accounts' minted debt
    pub fn total_debt(&self) -> u128 {
        self.total_debt
    }

    /// Total deposited amount of one collateral token across all accounts
    pub fn total_collateral_of(&self, token: &TokenId) -> u128 {
        self.accounts
            .values()
            .map(|p| p.collateral_balance(token))
            .sum()
    }

    /// Accounts the ledger has seen, with their positions (audit iteration)
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &AccountPosition)> {
        self.accounts.iter()
    }

    /// Aggregate USD value of an account's collateral.
    ///
    /// Iterates the full token registry in insertion order; zero balances
    /// contribute zero.
    pub fn total_collateral_value_usd<P: PriceSource>(
        &self,
        oracle: &PriceOracleAdapter,
        source: &P,
        account: &AccountId,
    ) -> Result<u128> {
        let mut total = 0u128;
        for config in oracle.configs() {
            let balance = self.collateral_balance(account, &config.token);
            let value = oracle.usd_value(source, &config.token, balance)?;
            total = safe_add(total, value)?;
        }
        Ok(total)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SNAPSHOT / RESTORE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Capture the current state for later rollback
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: self.accounts.clone(),
            total_debt: self.total_debt,
        }
    }

    /// Discard current state in favor of a previously captured snapshot
    pub fn restore(&mut self, snapshot: LedgerSnapshot) {
        self.accounts = snapshot.accounts;
        self.total_debt = snapshot.total_debt;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Serialize to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| Error::Deserialization(e.to_string()))
    }
}
