//! The credit engine facade.
//!
//! Single entry point for every state-changing operation: deposits, debt
//! minting, redemptions, repayments, and liquidations. The engine owns the
//! ledger, the oracle adapter, the event log, and gateway handles to the
//! stable token and collateral custody.
//!
//! Every public operation is all-or-nothing: state is updated first, then
//! token effects run, and any failure restores the ledger, the event log,
//! and the gateway backends to their pre-operation state. A reentrancy
//! guard rejects overlapping operations.

pub mod events;

use tracing::{info, warn};

use crate::core::config::CollateralRegistry;
use crate::core::health;
use crate::core::ledger::CollateralLedger;
use crate::core::types::{AccountId, FeedId, TokenId};
use crate::engine::events::{
    CollateralDepositedEvent, CollateralRedeemedEvent, EngineEvent, EventLog,
};
use crate::error::{Error, Result};
use crate::liquidation::{seizure_for_debt, LiquidationOutcome};
use crate::oracle::adapter::{PriceOracleAdapter, PriceSource};
use crate::token::gateway::{CollateralGateway, StableTokenGateway};
use crate::utils::constants::MIN_HEALTH_FACTOR;
use crate::utils::validation::validate_amount;

// ═══════════════════════════════════════════════════════════════════════════════
// CREDIT ENGINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Over-collateralized credit engine
pub struct CreditEngine<P, S, C>
where
    P: PriceSource,
    S: StableTokenGateway,
    C: CollateralGateway,
{
    oracle: PriceOracleAdapter,
    price_source: P,
    stable: S,
    collateral: C,
    ledger: CollateralLedger,
    events: EventLog,
    engine_account: AccountId,
    entered: bool,
}

impl<P, S, C> CreditEngine<P, S, C>
where
    P: PriceSource,
    S: StableTokenGateway + Clone,
    C: CollateralGateway + Clone,
{
    /// Initialize the engine from parallel token/feed lists and its
    /// collaborators. The lists must be equal in length.
    pub fn new(
        tokens: Vec<TokenId>,
        feeds: Vec<FeedId>,
        engine_account: AccountId,
        price_source: P,
        stable: S,
        collateral: C,
    ) -> Result<Self> {
        let registry = CollateralRegistry::from_parallel_lists(tokens, feeds)?;
        info!(
            collateral_tokens = registry.len(),
            engine_account = %engine_account,
            "credit engine initialized"
        );
        Ok(Self {
            oracle: PriceOracleAdapter::new(registry),
            price_source,
            stable,
            collateral,
            ledger: CollateralLedger::new(),
            events: EventLog::new(),
            engine_account,
            entered: false,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Deposit `amount` of `token` as collateral for `account`
    pub fn deposit_collateral(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        amount: u128,
    ) -> Result<()> {
        let (account, token) = (*account, *token);
        self.transactional("deposit_collateral", |engine| {
            engine.deposit_collateral_inner(&account, &token, amount)
        })?;
        info!(account = %account, token = %token, amount, "collateral deposited");
        Ok(())
    }

    /// Mint `amount` stable units of debt to `account`
    pub fn mint_debt(&mut self, account: &AccountId, amount: u128) -> Result<()> {
        let account = *account;
        self.transactional("mint_debt", |engine| {
            engine.mint_debt_inner(&account, amount)
        })?;
        info!(account = %account, amount, "debt minted");
        Ok(())
    }

    /// Deposit collateral and mint debt in one all-or-nothing operation
    pub fn deposit_collateral_and_mint(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        collateral_amount: u128,
        mint_amount: u128,
    ) -> Result<()> {
        let (account, token) = (*account, *token);
        self.transactional("deposit_collateral_and_mint", |engine| {
            engine.deposit_collateral_inner(&account, &token, collateral_amount)?;
            engine.mint_debt_inner(&account, mint_amount)
        })?;
        info!(
            account = %account,
            token = %token,
            collateral_amount,
            mint_amount,
            "collateral deposited and debt minted"
        );
        Ok(())
    }

    /// Withdraw `amount` of `token` back to `account`.
    ///
    /// The account's position must remain healthy after the withdrawal.
    pub fn redeem_collateral(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        amount: u128,
    ) -> Result<()> {
        let (account, token) = (*account, *token);
        self.transactional("redeem_collateral", |engine| {
            engine.redeem_collateral_inner(&account, &account, &token, amount)?;
            engine.assert_safe(&account)
        })?;
        info!(account = %account, token = %token, amount, "collateral redeemed");
        Ok(())
    }

    /// Repay `amount` of `account`'s debt from its own stable balance
    pub fn burn_debt(&mut self, account: &AccountId, amount: u128) -> Result<()> {
        let account = *account;
        self.transactional("burn_debt", |engine| {
            engine.burn_debt_inner(&account, &account, amount)?;
            engine.assert_safe(&account)
        })?;
        info!(account = %account, amount, "debt repaid");
        Ok(())
    }

    /// Repay debt and withdraw collateral in one all-or-nothing operation
    pub fn redeem_collateral_for_debt(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        collateral_amount: u128,
        debt_to_burn: u128,
    ) -> Result<()> {
        let (account, token) = (*account, *token);
        self.transactional("redeem_collateral_for_debt", |engine| {
            engine.burn_debt_inner(&account, &account, debt_to_burn)?;
            engine.redeem_collateral_inner(&account, &account, &token, collateral_amount)?;
            engine.assert_safe(&account)
        })?;
        info!(
            account = %account,
            token = %token,
            collateral_amount,
            debt_to_burn,
            "debt repaid and collateral redeemed"
        );
        Ok(())
    }

    /// Liquidate part of an unhealthy `target` position.
    ///
    /// The liquidator repays `debt_to_cover` of the target's debt from
    /// their own stable balance and seizes collateral worth the covered
    /// debt plus a 10% bonus. The target's health factor must strictly
    /// improve, and the liquidator's own position must stay healthy.
    pub fn liquidate(
        &mut self,
        liquidator: &AccountId,
        target: &AccountId,
        token: &TokenId,
        debt_to_cover: u128,
    ) -> Result<LiquidationOutcome> {
        let (liquidator, target, token) = (*liquidator, *target, *token);
        let outcome = self.transactional("liquidate", |engine| {
            validate_amount(debt_to_cover)?;

            let starting_health_factor = engine.health_factor_of(&target)?;
            if starting_health_factor >= MIN_HEALTH_FACTOR {
                return Err(Error::HealthFactorIsFine);
            }

            let seizure =
                seizure_for_debt(&engine.oracle, &engine.price_source, &token, debt_to_cover)?;

            engine.redeem_collateral_inner(&target, &liquidator, &token, seizure.total)?;
            engine.burn_debt_inner(&target, &liquidator, debt_to_cover)?;

            let ending_health_factor = engine.health_factor_of(&target)?;
            if ending_health_factor <= starting_health_factor {
                return Err(Error::HealthFactorNotImproved);
            }
            engine.assert_safe(&liquidator)?;

            Ok(LiquidationOutcome {
                debt_covered: debt_to_cover,
                collateral_seized: seizure.total,
                bonus: seizure.bonus,
                starting_health_factor,
                ending_health_factor,
            })
        })?;
        info!(
            liquidator = %liquidator,
            target = %target,
            token = %token,
            debt_covered = outcome.debt_covered,
            collateral_seized = outcome.collateral_seized,
            "position liquidated"
        );
        Ok(outcome)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // INNER STEPS
    // ═══════════════════════════════════════════════════════════════════════════

    fn deposit_collateral_inner(
        &mut self,
        account: &AccountId,
        token: &TokenId,
        amount: u128,
    ) -> Result<()> {
        validate_amount(amount)?;
        if !self.oracle.registry().is_supported(token) {
            return Err(Error::UnsupportedCollateral { token: *token });
        }

        // State first, external transfer second
        self.ledger.credit_collateral(account, token, amount)?;
        self.events
            .push(EngineEvent::CollateralDeposited(CollateralDepositedEvent {
                account: *account,
                token: *token,
                amount,
            }));

        let received = self.collateral.transfer_in(token, account, amount)?;
        if !received {
            return Err(Error::TransferFailed {
                asset: token.to_hex(),
            });
        }
        Ok(())
    }

    fn mint_debt_inner(&mut self, account: &AccountId, amount: u128) -> Result<()> {
        validate_amount(amount)?;
        self.ledger.add_debt(account, amount)?;
        self.assert_safe(account)?;

        let minted = self.stable.mint(account, amount)?;
        if !minted {
            return Err(Error::MintFailed);
        }
        Ok(())
    }

    /// Move collateral out of `from`'s position to `to`. Does not check
    /// health; callers decide whose position must stay safe.
    fn redeem_collateral_inner(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        token: &TokenId,
        amount: u128,
    ) -> Result<()> {
        validate_amount(amount)?;
        self.ledger.debit_collateral(from, token, amount)?;
        self.events
            .push(EngineEvent::CollateralRedeemed(CollateralRedeemedEvent {
                from: *from,
                to: *to,
                token: *token,
                amount,
            }));

        let released = self.collateral.transfer_out(token, to, amount)?;
        if !released {
            return Err(Error::TransferFailed {
                asset: token.to_hex(),
            });
        }
        Ok(())
    }

    /// Retire `amount` of `debtor`'s debt, funded from `payer`'s stable
    /// balance. Does not check health.
    fn burn_debt_inner(&mut self, debtor: &AccountId, payer: &AccountId, amount: u128) -> Result<()> {
        validate_amount(amount)?;
        self.ledger.remove_debt(debtor, amount)?;

        let engine_account = self.engine_account;
        let collected = self.stable.transfer_from(payer, &engine_account, amount)?;
        if !collected {
            return Err(Error::TransferFailed {
                asset: "stable".to_string(),
            });
        }
        self.stable.burn(amount)?;
        Ok(())
    }

    /// Run `f` with rollback: on any error, the ledger, the event log, and
    /// both gateway backends are restored to their state before `f` ran.
    /// The gateways are engine-owned, so restoring them keeps token custody
    /// reconciled with the ledger across aborted operations.
    fn transactional<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.entered {
            return Err(Error::Reentrancy);
        }
        self.entered = true;
        tracing::debug!(operation, "operation started");

        let ledger_snapshot = self.ledger.snapshot();
        let stable_snapshot = self.stable.clone();
        let collateral_snapshot = self.collateral.clone();
        let event_mark = self.events.len();

        let result = f(self);
        if let Err(ref error) = result {
            warn!(operation, %error, "operation rolled back");
            self.ledger.restore(ledger_snapshot);
            self.stable = stable_snapshot;
            self.collateral = collateral_snapshot;
            self.events.truncate(event_mark);
        }

        self.entered = false;
        result
    }

    fn assert_safe(&self, account: &AccountId) -> Result<()> {
        let health_factor = self.health_factor_of(account)?;
        if health_factor < MIN_HEALTH_FACTOR {
            return Err(Error::HealthFactorBroken { health_factor });
        }
        Ok(())
    }

    fn health_factor_of(&self, account: &AccountId) -> Result<u128> {
        let value = self
            .ledger
            .total_collateral_value_usd(&self.oracle, &self.price_source, account)?;
        Ok(health::calculate_health_factor(
            value,
            self.ledger.debt_of(account),
        ))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // QUERIES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Minted debt and total collateral USD value of `account`
    pub fn account_information(&self, account: &AccountId) -> Result<(u128, u128)> {
        let value = self
            .ledger
            .total_collateral_value_usd(&self.oracle, &self.price_source, account)?;
        Ok((self.ledger.debt_of(account), value))
    }

    /// Aggregate USD value of `account`'s collateral
    pub fn account_collateral_value(&self, account: &AccountId) -> Result<u128> {
        self.ledger
            .total_collateral_value_usd(&self.oracle, &self.price_source, account)
    }

    /// USD value of `amount` units of `token` at the current price
    pub fn usd_value(&self, token: &TokenId, amount: u128) -> Result<u128> {
        self.oracle.usd_value(&self.price_source, token, amount)
    }

    /// Quantity of `token` worth `usd_amount` at the current price
    pub fn token_amount_from_usd(&self, token: &TokenId, usd_amount: u128) -> Result<u128> {
        self.oracle
            .token_amount_from_usd(&self.price_source, token, usd_amount)
    }

    /// Current health factor of `account`
    pub fn health_factor(&self, account: &AccountId) -> Result<u128> {
        self.health_factor_of(account)
    }

    /// Health factor implied by a hypothetical value/debt pair
    pub fn calculate_health_factor(collateral_value_usd: u128, debt_minted: u128) -> u128 {
        health::calculate_health_factor(collateral_value_usd, debt_minted)
    }

    /// All supported collateral tokens, in configuration order
    pub fn collateral_tokens(&self) -> Vec<TokenId> {
        self.oracle.registry().tokens()
    }

    /// `account`'s deposited balance of `token`
    pub fn collateral_balance(&self, account: &AccountId, token: &TokenId) -> u128 {
        self.ledger.collateral_balance(account, token)
    }

    /// Price feed configured for `token`, if supported
    pub fn collateral_token_price_feed(&self, token: &TokenId) -> Option<FeedId> {
        self.oracle.registry().feed_for(token)
    }

    /// Minted debt of `account`
    pub fn debt_of(&self, account: &AccountId) -> u128 {
        self.ledger.debt_of(account)
    }

    /// Sum of all accounts' minted debt
    pub fn total_debt(&self) -> u128 {
        self.ledger.total_debt()
    }

    /// The engine's custody account
    pub fn engine_account(&self) -> AccountId {
        self.engine_account
    }

    /// The authoritative ledger (read-only)
    pub fn ledger(&self) -> &CollateralLedger {
        &self.ledger
    }

    /// Committed events, in order
    pub fn events(&self) -> &[EngineEvent] {
        self.events.events()
    }

    /// Remove and return all committed events
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain()
    }

    /// The price source collaborator
    pub fn price_source_mut(&mut self) -> &mut P {
        &mut self.price_source
    }

    /// The stable token gateway
    pub fn stable_gateway(&self) -> &S {
        &self.stable
    }

    /// The stable token gateway, mutable
    pub fn stable_gateway_mut(&mut self) -> &mut S {
        &mut self.stable
    }

    /// The collateral gateway
    pub fn collateral_gateway(&self) -> &C {
        &self.collateral
    }

    /// The collateral gateway, mutable
    pub fn collateral_gateway_mut(&mut self) -> &mut C {
        &mut self.collateral
    }
}
