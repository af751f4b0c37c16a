//! Engine event log.
//!
//! Collateral movements append events to an in-memory log. The log is
//! append-only from the outside; the engine truncates it when rolling back
//! a failed operation so no event from an aborted operation survives.

use serde::{Deserialize, Serialize};

use crate::core::types::{AccountId, TokenId};

// ═══════════════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Collateral deposited into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralDepositedEvent {
    /// Depositing account
    pub account: AccountId,
    /// Collateral token
    pub token: TokenId,
    /// Amount deposited
    pub amount: u128,
}

/// Collateral released from the engine.
///
/// `from` and `to` differ when a liquidation redirects the seizure to the
/// liquidator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollateralRedeemedEvent {
    /// Account the collateral was debited from
    pub from: AccountId,
    /// Account that received it
    pub to: AccountId,
    /// Collateral token
    pub token: TokenId,
    /// Amount released
    pub amount: u128,
}

/// Observable engine event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Collateral entered engine custody
    CollateralDeposited(CollateralDepositedEvent),
    /// Collateral left engine custody
    CollateralRedeemed(CollateralRedeemedEvent),
}

impl EngineEvent {
    /// Short name for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::CollateralDeposited(_) => "collateral_deposited",
            EngineEvent::CollateralRedeemed(_) => "collateral_redeemed",
        }
    }

    /// JSON rendering for external consumers
    pub fn to_json(&self) -> crate::error::Result<String> {
        serde_json::to_string(self).map_err(|e| crate::error::Error::Serialization(e.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENT LOG
// ═══════════════════════════════════════════════════════════════════════════════

/// Ordered record of committed engine events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<EngineEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, event: EngineEvent) {
        tracing::debug!(event_type = event.event_type(), "engine event");
        self.events.push(event);
    }

    /// All events in commit order
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop events past `len`, undoing an aborted operation's appends
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }

    /// Remove and return all recorded events
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}
