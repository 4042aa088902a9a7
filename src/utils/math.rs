//! Checked arithmetic for reserve accounting.
//!
//! Reserve magnitudes are `u128`, so the constant-product term
//! `reserve_in * reserve_out` can exceed the native width. Every
//! multiply-before-divide here runs through a 256-bit intermediate and only
//! truncates back down after the final division.

use ethereum_types::U256;

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
    a.checked_sub(b).ok_or(Error::Underflow {
        operation: format!("{} - {}", a, b),
    })
}

/// Computes `(a * b) / c` rounded down, with a 256-bit intermediate product.
pub fn mul_div_floor(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(Error::Overflow {
            operation: format!("({} * {}) / 0", a, b),
        });
    }
    let result = U256::from(a) * U256::from(b) / U256::from(c);
    narrow(result, || format!("({} * {}) / {}", a, b, c))
}

/// Computes `(a * b) / c` rounded up, with a 256-bit intermediate product.
pub fn mul_div_ceil(a: u128, b: u128, c: u128) -> Result<u128> {
    if c == 0 {
        return Err(Error::Overflow {
            operation: format!("ceil(({} * {}) / 0)", a, b),
        });
    }
    let divisor = U256::from(c);
    let numerator = U256::from(a) * U256::from(b);
    let result = (numerator + divisor - U256::one()) / divisor;
    narrow(result, || format!("ceil(({} * {}) / {})", a, b, c))
}

/// Narrows a 256-bit value back to `u128`, failing on overflow.
fn narrow(value: U256, operation: impl FnOnce() -> String) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(Error::Overflow {
            operation: operation(),
        });
    }
    Ok(value.as_u128())
}
