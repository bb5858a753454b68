//! Concentrated liquidity amounts over Q64.64 square root prices.
//!
//! `sqrt_a < sqrt_b` are the band edges. Below `sqrt_a` a position is fully
//! token0, above `sqrt_b` fully token1, in between it holds both.

use crate::errors::{ErrorCodes, LibraryResult};
use crate::math::u256::*;

fn ordered(sqrt_a: u128, sqrt_b: u128) -> LibraryResult<(u128, u128)> {
    match sqrt_a.cmp(&sqrt_b) {
        std::cmp::Ordering::Less => Ok((sqrt_a, sqrt_b)),
        std::cmp::Ordering::Greater => Ok((sqrt_b, sqrt_a)),
        std::cmp::Ordering::Equal => Err(ErrorCodes::LibraryInvalidPriceRange),
    }
}

pub fn liquidity_for_amount0(sqrt_a: u128, sqrt_b: u128, amount0: u128) -> LibraryResult<u128> {
    let (sqrt_a, sqrt_b) = ordered(sqrt_a, sqrt_b)?;
    let intermediate = mul_div_u256(U256::from(sqrt_a), U256::from(sqrt_b), U256::from(Q64))?;
    u256_to_u128(mul_div_u256(
        U256::from(amount0),
        intermediate,
        U256::from(sqrt_b - sqrt_a),
    )?)
}

pub fn liquidity_for_amount1(sqrt_a: u128, sqrt_b: u128, amount1: u128) -> LibraryResult<u128> {
    let (sqrt_a, sqrt_b) = ordered(sqrt_a, sqrt_b)?;
    u256_to_u128(mul_div_u256(
        U256::from(amount1),
        U256::from(Q64),
        U256::from(sqrt_b - sqrt_a),
    )?)
}

/// Largest liquidity that `amount0`/`amount1` can fund at `sqrt_price`.
pub fn liquidity_for_amounts(
    sqrt_price: u128,
    sqrt_a: u128,
    sqrt_b: u128,
    amount0: u128,
    amount1: u128,
) -> LibraryResult<u128> {
    let (sqrt_a, sqrt_b) = ordered(sqrt_a, sqrt_b)?;

    if sqrt_price <= sqrt_a {
        liquidity_for_amount0(sqrt_a, sqrt_b, amount0)
    } else if sqrt_price < sqrt_b {
        let liquidity0 = liquidity_for_amount0(sqrt_price, sqrt_b, amount0)?;
        let liquidity1 = liquidity_for_amount1(sqrt_a, sqrt_price, amount1)?;
        Ok(liquidity0.min(liquidity1))
    } else {
        liquidity_for_amount1(sqrt_a, sqrt_b, amount1)
    }
}

pub fn amount0_for_liquidity(
    sqrt_a: u128,
    sqrt_b: u128,
    liquidity: u128,
    round_up: bool,
) -> LibraryResult<u128> {
    let (sqrt_a, sqrt_b) = ordered(sqrt_a, sqrt_b)?;
    let numerator = U256::from(liquidity) << 64;
    let spread = U256::from(sqrt_b - sqrt_a);

    let amount = if round_up {
        let scaled = mul_div_u256_ceil(numerator, spread, U256::from(sqrt_b))?;
        mul_div_u256_ceil(scaled, U256::one(), U256::from(sqrt_a))?
    } else {
        mul_div_u256(numerator, spread, U256::from(sqrt_b))? / U256::from(sqrt_a)
    };
    u256_to_u128(amount)
}

pub fn amount1_for_liquidity(
    sqrt_a: u128,
    sqrt_b: u128,
    liquidity: u128,
    round_up: bool,
) -> LibraryResult<u128> {
    let (sqrt_a, sqrt_b) = ordered(sqrt_a, sqrt_b)?;
    let amount = if round_up {
        mul_div_u256_ceil(
            U256::from(liquidity),
            U256::from(sqrt_b - sqrt_a),
            U256::from(Q64),
        )?
    } else {
        mul_div_u256(
            U256::from(liquidity),
            U256::from(sqrt_b - sqrt_a),
            U256::from(Q64),
        )?
    };
    u256_to_u128(amount)
}

/// Token amounts represented by `liquidity` at `sqrt_price`.
pub fn amounts_for_liquidity(
    sqrt_price: u128,
    sqrt_a: u128,
    sqrt_b: u128,
    liquidity: u128,
    round_up: bool,
) -> LibraryResult<(u128, u128)> {
    let (sqrt_a, sqrt_b) = ordered(sqrt_a, sqrt_b)?;

    if liquidity == 0 {
        return Ok((0, 0));
    }

    if sqrt_price <= sqrt_a {
        Ok((amount0_for_liquidity(sqrt_a, sqrt_b, liquidity, round_up)?, 0))
    } else if sqrt_price < sqrt_b {
        Ok((
            amount0_for_liquidity(sqrt_price, sqrt_b, liquidity, round_up)?,
            amount1_for_liquidity(sqrt_a, sqrt_price, liquidity, round_up)?,
        ))
    } else {
        Ok((0, amount1_for_liquidity(sqrt_a, sqrt_b, liquidity, round_up)?))
    }
}
