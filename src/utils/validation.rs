//! Input validation helpers.

use crate::error::{Error, Result};

/// Validate that a quantity parameter is a positive amount
pub fn validate_amount(amount: u128) -> Result<()> {
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}
