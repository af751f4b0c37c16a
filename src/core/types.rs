//! Address-like identifiers for accounts, collateral tokens, and price feeds.
//!
//! The three identifier spaces are distinct newtypes over the same 20-byte
//! representation so that an account can never be passed where a token is
//! expected and vice versa.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::constants::ID_LENGTH;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name([u8; ID_LENGTH]);

        impl $name {
            /// The all-zero identifier
            pub const fn zero() -> Self {
                Self([0u8; ID_LENGTH])
            }

            /// Create from raw bytes
            pub const fn new(bytes: [u8; ID_LENGTH]) -> Self {
                Self(bytes)
            }

            /// Create an identifier whose trailing bytes encode `value`
            /// (big-endian). Convenient for tests and simulations.
            pub fn from_low_u64(value: u64) -> Self {
                let mut bytes = [0u8; ID_LENGTH];
                bytes[ID_LENGTH - 8..].copy_from_slice(&value.to_be_bytes());
                Self(bytes)
            }

            /// Get the raw bytes
            pub fn as_bytes(&self) -> &[u8; ID_LENGTH] {
                &self.0
            }

            /// Hex encoding with `0x` prefix
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }

            /// Parse from a hex string (with or without `0x` prefix)
            pub fn from_hex(s: &str) -> Result<Self> {
                let s = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(s)
                    .map_err(|e| Error::Deserialization(e.to_string()))?;
                let bytes: [u8; ID_LENGTH] = bytes.try_into().map_err(|_| {
                    Error::Deserialization(format!(
                        "identifier must be {} bytes",
                        ID_LENGTH
                    ))
                })?;
                Ok(Self(bytes))
            }

            /// Abbreviated form for logging (first four bytes)
            pub fn short(&self) -> String {
                format!("0x{}…", hex::encode(&self.0[..4]))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl From<[u8; ID_LENGTH]> for $name {
            fn from(bytes: [u8; ID_LENGTH]) -> Self {
                Self(bytes)
            }
        }
    };
}

define_id! {
    /// An account principal (depositor, minter, or liquidator)
    AccountId
}

define_id! {
    /// A whitelisted collateral asset
    TokenId
}

define_id! {
    /// A price-feed identifier bound to exactly one collateral token
    FeedId
}
