//! Checked arithmetic for 18-decimal fixed-point amounts.
//!
//! Amounts, USD values, and health factors are `u128` at 10^18 scale.
//! Products of two such values exceed `u128`, so multiply-then-divide goes
//! through a 256-bit intermediate. Division truncates toward zero.

use primitive_types::U256;

use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// SAFE ARITHMETIC OPERATIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Safe addition with overflow check
pub fn safe_add(a: u128, b: u128) -> Result<u128> {
    a.checked_add(b).ok_or(Error::Overflow {
        operation: format!("{} + {}", a, b),
    })
}

/// Safe subtraction with underflow check
pub fn safe_sub(a: u128, b: u128) -> Result<u128> {
    a.checked_sub(b).ok_or(Error::Overflow {
        operation: format!("{} - {}", a, b),
    })
}

/// Safe multiplication with overflow check
pub fn safe_mul(a: u128, b: u128) -> Result<u128> {
    a.checked_mul(b).ok_or(Error::Overflow {
        operation: format!("{} * {}", a, b),
    })
}

/// Computes `(a * b) / c` with a 256-bit intermediate.
///
/// Multiplication happens before division to minimize rounding loss; the
/// division truncates toward zero. Fails if `c` is zero or the result does
/// not fit in `u128`.
pub fn mul_div(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(Error::Overflow {
            operation: format!("({} * {}) / 0", a, b),
        });
    }

    let result = U256::from(a) * U256::from(b) / U256::from(c);
    if result.bits() > 128 {
        return Err(Error::Overflow {
            operation: format!("({} * {}) / {}", a, b, c),
        });
    }
    Ok(result.low_u128())
}

/// Saturating variant of [`mul_div`] for contexts that must not fail;
/// returns `u128::MAX` on overflow and on a zero divisor.
pub fn mul_div_saturating(a: u128, b: u128, c: u128) -> u128 {
    if c == 0 {
        return u128::MAX;
    }
    let result = U256::from(a) * U256::from(b) / U256::from(c);
    if result.bits() > 128 {
        u128::MAX
    } else {
        result.low_u128()
    }
}
