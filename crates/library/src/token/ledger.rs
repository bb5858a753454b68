use anchor_lang::prelude::*;

use crate::errors::LibraryResult;
use crate::math::{safe_math::*, u256::mul_div};

/// Fungible token custody shared by every component.
///
/// Share tokens minted by the engine (range token shares, vault shares) live in
/// the same ledger as the underlying assets so the lending market can hold them.
pub trait TokenLedger {
    fn create_mint(&mut self, mint: Pubkey, decimals: u8, authority: Pubkey) -> Result<()>;

    fn decimals(&self, mint: &Pubkey) -> Result<u8>;

    fn balance_of(&self, mint: &Pubkey, owner: &Pubkey) -> u128;

    fn total_supply(&self, mint: &Pubkey) -> u128;

    fn transfer(&mut self, mint: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128)
        -> Result<()>;

    /// Only the mint authority may mint
    fn mint_to(&mut self, mint: &Pubkey, authority: &Pubkey, to: &Pubkey, amount: u128)
        -> Result<()>;

    /// Only the mint authority may burn
    fn burn(&mut self, mint: &Pubkey, authority: &Pubkey, from: &Pubkey, amount: u128)
        -> Result<()>;

    /// Mint of the wrapped native asset
    fn wrapped_native(&self) -> Pubkey;

    fn native_balance(&self, owner: &Pubkey) -> u128;

    fn wrap_native(&mut self, owner: &Pubkey, amount: u128) -> Result<()>;

    fn unwrap_native(&mut self, owner: &Pubkey, amount: u128) -> Result<()>;
}

/// Transfers `amount` unless it is zero.
pub fn transfer_if_positive(
    tokens: &mut dyn TokenLedger,
    mint: &Pubkey,
    from: &Pubkey,
    to: &Pubkey,
    amount: u128,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    tokens.transfer(mint, from, to, amount)
}

/// USD value (X8) of `amount` raw units of a token with `decimals` decimals.
pub fn value_of(amount: u128, price_x8: u128, decimals: u8) -> LibraryResult<u128> {
    mul_div(amount, price_x8, ten_pow(decimals)?)
}

/// Raw units of a token worth `value_x8`.
pub fn amount_for_value(value_x8: u128, price_x8: u128, decimals: u8) -> LibraryResult<u128> {
    mul_div(value_x8, ten_pow(decimals)?, price_x8)
}
