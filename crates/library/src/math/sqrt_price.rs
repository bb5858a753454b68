//! Conversions between oracle prices, band prices and Q64.64 square root prices.
//!
//! The AMM quotes the raw ratio `token1 per token0`. Oracle prices are USD with
//! 8 decimals. Band prices are the value of one whole quote (token1) unit
//! expressed in base (token0), also with 8 decimals.

use crate::errors::{ErrorCodes, LibraryResult};
use crate::math::{safe_math::*, u256::*};

/// 1.0 with 8 decimals, the unit of oracle and band prices.
pub const PRICE_ONE_X8: u128 = 100_000_000;

/// Smallest and largest sqrt prices the engine accepts (Q64.64).
pub const MIN_SQRT_PRICE_Q64: u128 = 1 << 20;
pub const MAX_SQRT_PRICE_Q64: u128 = 1 << 120;

fn check_bounds(sqrt_price_q64: u128) -> LibraryResult<u128> {
    if !(MIN_SQRT_PRICE_Q64..=MAX_SQRT_PRICE_Q64).contains(&sqrt_price_q64) {
        return Err(ErrorCodes::LibrarySqrtPriceOutOfBounds);
    }
    Ok(sqrt_price_q64)
}

/// sqrt(price0 * 10^decimals1 / (price1 * 10^decimals0)) in Q64.64.
pub fn sqrt_price_q64_from_prices(
    price0_x8: u128,
    price1_x8: u128,
    decimals0: u8,
    decimals1: u8,
) -> LibraryResult<u128> {
    if price0_x8 == 0 || price1_x8 == 0 {
        return Err(ErrorCodes::LibraryDivisionByZero);
    }

    let numerator = (U512::from(price0_x8) * U512::from(ten_pow(decimals1)?)) << 128;
    let denominator = U512::from(price1_x8) * U512::from(ten_pow(decimals0)?);
    let root = (numerator / denominator).integer_sqrt();

    if root.bits() > 128 {
        return Err(ErrorCodes::LibrarySqrtPriceOutOfBounds);
    }
    check_bounds(root.low_u128())
}

/// Sqrt price of a band edge, `band_price_x8` being base per whole quote unit.
pub fn sqrt_price_q64_from_band_price(
    band_price_x8: u128,
    decimals0: u8,
    decimals1: u8,
) -> LibraryResult<u128> {
    sqrt_price_q64_from_prices(PRICE_ONE_X8, band_price_x8, decimals0, decimals1)
}

/// Price of the quote asset expressed in the base asset (X8) from two oracle prices.
pub fn band_price_from_prices(base_price_x8: u128, quote_price_x8: u128) -> LibraryResult<u128> {
    if base_price_x8 == 0 {
        return Err(ErrorCodes::LibraryDivisionByZero);
    }
    mul_div(quote_price_x8, PRICE_ONE_X8, base_price_x8)
}

/// Raw token1 amount worth `amount0` at `sqrt_price_q64`.
pub fn quote_token0_in_token1(amount0: u128, sqrt_price_q64: u128) -> LibraryResult<u128> {
    let price = U256::from(sqrt_price_q64) * U256::from(sqrt_price_q64);
    u256_to_u128(mul_div_u256(
        U256::from(amount0),
        price,
        U256::from(Q64) * U256::from(Q64),
    )?)
}

/// Raw token0 amount worth `amount1` at `sqrt_price_q64`.
pub fn quote_token1_in_token0(amount1: u128, sqrt_price_q64: u128) -> LibraryResult<u128> {
    let price = U256::from(sqrt_price_q64) * U256::from(sqrt_price_q64);
    if price.is_zero() {
        return Err(ErrorCodes::LibraryDivisionByZero);
    }
    u256_to_u128(mul_div_u256(
        U256::from(amount1),
        U256::from(Q64) * U256::from(Q64),
        price,
    )?)
}

/// Whether two sqrt prices are within `tolerance_bps` of each other, relative to `reference`.
pub fn sqrt_prices_within(observed: u128, reference: u128, tolerance_bps: u128) -> LibraryResult<bool> {
    let diff = observed.abs_diff(reference);
    Ok(diff.safe_mul(10_000)? <= reference.safe_mul(tolerance_bps)?)
}
