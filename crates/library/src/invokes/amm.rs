use anchor_lang::prelude::*;

use crate::structs::{PositionInfo, PositionKey};
use crate::token::TokenLedger;

/// Concentrated liquidity AMM together with its swap router.
pub trait ConcentratedAmm {
    /// Router address registered for pools
    fn key(&self) -> Pubkey;

    fn get_pool(&self, token0: &Pubkey, token1: &Pubkey) -> Result<Pubkey>;

    fn pool_tokens(&self, pool: &Pubkey) -> Result<(Pubkey, Pubkey)>;

    /// Instantaneous Q64.64 sqrt price of token1 per token0
    fn sqrt_price_q64(&self, pool: &Pubkey) -> Result<u128>;

    fn position(&self, position: &PositionKey) -> PositionInfo;

    /// Adds `liquidity` to `position`, pulling the rounded up amounts from `payer`.
    fn mint(
        &mut self,
        tokens: &mut dyn TokenLedger,
        position: PositionKey,
        liquidity: u128,
        payer: &Pubkey,
    ) -> Result<(u128, u128)>;

    /// Removes `liquidity` from `position` and pays the principal to `recipient`.
    /// Only the position owner may burn.
    fn burn(
        &mut self,
        tokens: &mut dyn TokenLedger,
        position: PositionKey,
        liquidity: u128,
        recipient: &Pubkey,
    ) -> Result<(u128, u128)>;

    /// Pays the fees owed to `position` to `recipient`.
    fn collect(
        &mut self,
        tokens: &mut dyn TokenLedger,
        position: PositionKey,
        recipient: &Pubkey,
    ) -> Result<(u128, u128)>;

    fn get_amount_out(&self, pool: &Pubkey, token_in: &Pubkey, amount_in: u128) -> Result<u128>;

    fn get_amount_in(&self, pool: &Pubkey, token_out: &Pubkey, amount_out: u128)
        -> Result<u128>;

    #[allow(clippy::too_many_arguments)]
    fn swap_exact_input(
        &mut self,
        tokens: &mut dyn TokenLedger,
        pool: &Pubkey,
        token_in: &Pubkey,
        amount_in: u128,
        min_amount_out: u128,
        payer: &Pubkey,
        recipient: &Pubkey,
    ) -> Result<u128>;

    #[allow(clippy::too_many_arguments)]
    fn swap_exact_output(
        &mut self,
        tokens: &mut dyn TokenLedger,
        pool: &Pubkey,
        token_out: &Pubkey,
        amount_out: u128,
        max_amount_in: u128,
        payer: &Pubkey,
        recipient: &Pubkey,
    ) -> Result<u128>;
}
