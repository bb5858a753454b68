use anchor_lang::prelude::*;
pub use primitive_types::{U256, U512};

use crate::errors::{ErrorCodes, LibraryResult};

/// 2^64, the scale of Q64.64 fixed point numbers.
pub const Q64: u128 = 1 << 64;

/// Narrows a U256 down to u128.
pub fn u256_to_u128(value: U256) -> LibraryResult<u128> {
    if value.bits() > 128 {
        msg!("U256 value {} does not fit into u128", value);
        return Err(ErrorCodes::LibraryU256NumberDownCastError);
    }
    Ok(value.low_u128())
}

fn u512_to_u256(value: U512) -> LibraryResult<U256> {
    if value.bits() > 256 {
        return Err(ErrorCodes::LibraryU256NumberDownCastError);
    }
    let mut bytes = [0u8; 64];
    value.to_little_endian(&mut bytes);
    Ok(U256::from_little_endian(&bytes[..32]))
}

/// floor(a * b / denominator) with a 512 bit intermediate product.
pub fn mul_div_u256(a: U256, b: U256, denominator: U256) -> LibraryResult<U256> {
    if denominator.is_zero() {
        return Err(ErrorCodes::LibraryDivisionByZero);
    }
    u512_to_u256(a.full_mul(b) / U512::from(denominator))
}

/// ceil(a * b / denominator) with a 512 bit intermediate product.
pub fn mul_div_u256_ceil(a: U256, b: U256, denominator: U256) -> LibraryResult<U256> {
    if denominator.is_zero() {
        return Err(ErrorCodes::LibraryDivisionByZero);
    }
    let product = a.full_mul(b);
    let denominator = U512::from(denominator);
    let mut quotient = product / denominator;
    if !(product % denominator).is_zero() {
        quotient = quotient + U512::one();
    }
    u512_to_u256(quotient)
}

/// floor(a * b / denominator) for u128 operands.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> LibraryResult<u128> {
    if denominator == 0 {
        return Err(ErrorCodes::LibraryDivisionByZero);
    }
    u256_to_u128(U256::from(a) * U256::from(b) / U256::from(denominator))
}

/// ceil(a * b / denominator) for u128 operands.
pub fn mul_div_ceil(a: u128, b: u128, denominator: u128) -> LibraryResult<u128> {
    u256_to_u128(mul_div_u256_ceil(
        U256::from(a),
        U256::from(b),
        U256::from(denominator),
    )?)
}
