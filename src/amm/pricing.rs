//! Pure constant-product pricing math.
//!
//! Three operations, all free functions over raw `u128` reserves:
//!
//! - [`next_reserves`]: folds newly captured yield into the pair while holding
//!   the constant-product value `k = reserve_in * reserve_out`. The captured
//!   amount lands on the output side as additional sellable inventory, so
//!   `reserve_in` shrinks and the realized exchange rate drifts in the
//!   trader's favor as accrual accumulates.
//! - [`exact_amount_in`]: closed-form zero-fee input required for a desired
//!   output.
//! - [`exact_amount_out`]: closed-form zero-fee output for a given input.
//!
//! Rounding always favors the pool: the top-up path rounds the shrunken
//! `reserve_in` up, the quote paths truncate the trader's side down.

use crate::error::{Error, Result};
use crate::utils::math::{mul_div_ceil, mul_div_floor, safe_add, safe_sub};

/// Fold a captured balance into a reserve pair, preserving `k`.
///
/// Returns the pair unchanged when `captured == 0`; the no-op case must never
/// pass through the division path or repeated calls would drift the reserves.
pub fn next_reserves(
    reserve_in: u128,
    reserve_out: u128,
    captured: u128,
) -> Result<(u128, u128)> {
    if reserve_in == 0 || reserve_out == 0 {
        return Err(Error::UninitializedReserves {
            reserve_in,
            reserve_out,
        });
    }
    if captured == 0 {
        return Ok((reserve_in, reserve_out));
    }

    let next_out = safe_add(reserve_out, captured)?;
    // Round up so the pool never loses value to truncation.
    let next_in = mul_div_ceil(reserve_in, reserve_out, next_out)?;
    Ok((next_in, next_out))
}

/// Input required to withdraw `amount_out` from the pair.
pub fn exact_amount_in(reserve_in: u128, reserve_out: u128, amount_out: u128) -> Result<u128> {
    if amount_out >= reserve_out {
        return Err(Error::InsufficientLiquidity {
            requested: amount_out,
            available: reserve_out,
        });
    }
    mul_div_floor(reserve_in, amount_out, reserve_out - amount_out)
}

/// Output produced by depositing `amount_in` into the pair.
pub fn exact_amount_out(reserve_in: u128, reserve_out: u128, amount_in: u128) -> Result<u128> {
    let denominator = safe_add(reserve_in, amount_in)?;
    mul_div_floor(reserve_out, amount_in, denominator)
}

/// Apply a settled trade to a refreshed pair: input joins the input reserve,
/// output leaves the output reserve.
pub fn settle(
    reserve_in: u128,
    reserve_out: u128,
    amount_in: u128,
    amount_out: u128,
) -> Result<(u128, u128)> {
    Ok((
        safe_add(reserve_in, amount_in)?,
        safe_sub(reserve_out, amount_out)?,
    ))
}
