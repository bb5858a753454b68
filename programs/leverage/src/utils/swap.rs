use anchor_lang::prelude::*;

use library::math::{safe_math::*, u256::mul_div};
use range_token::CallContext;

use crate::{
    constants::{HUNDRED_PERCENT, MIN_REDEEM_PERCENT, SWAP_MIN_OUT_PERCENT},
    errors::ErrorCodes,
    state::*,
};

impl LeveragePositionManager {
    /// `amount_in` of `token_in` expressed in `token_out` at oracle prices.
    pub fn get_target_amount_from_oracle(
        &self,
        ctx: &CallContext,
        token_in: &Pubkey,
        amount_in: u128,
        token_out: &Pubkey,
    ) -> Result<u128> {
        let price_in = ctx.oracle.get_asset_price(token_in)?;
        let price_out = ctx.oracle.get_asset_price(token_out)?;
        if price_in == 0 || price_out == 0 {
            return Err(error!(ErrorCodes::LeverageInvalidOraclePrice));
        }

        let decimals_in = ctx.tokens.decimals(token_in)?;
        let decimals_out = ctx.tokens.decimals(token_out)?;

        let value = mul_div(amount_in, price_in, ten_pow(decimals_in)?)?;
        let amount_out = mul_div(value, ten_pow(decimals_out)?, price_out)?;
        if amount_out == 0 {
            return Err(error!(ErrorCodes::LeverageTargetAmountTooLow));
        }

        Ok(amount_out)
    }

    /// Sells all of `amount_in` for at least 99% of the oracle quote.
    pub(crate) fn swap_exact_tokens_at_oracle(
        &self,
        ctx: &mut CallContext,
        pool: &Pubkey,
        token_in: &Pubkey,
        amount_in: u128,
        token_out: &Pubkey,
    ) -> Result<u128> {
        let expected = self.get_target_amount_from_oracle(ctx, token_in, amount_in, token_out)?;
        let min_amount_out = mul_div(expected, SWAP_MIN_OUT_PERCENT, HUNDRED_PERCENT)?;

        ctx.amm.swap_exact_input(
            ctx.tokens,
            pool,
            token_in,
            amount_in,
            min_amount_out,
            &self.key,
            &self.key,
        )
    }

    /// Buys exactly `recv_amount` of `token_out`, spending at most `max_amount_in`.
    pub fn swap_tokens_for_exact_tokens(
        &self,
        ctx: &mut CallContext,
        pool: &Pubkey,
        recv_amount: u128,
        max_amount_in: u128,
        token_in: &Pubkey,
        token_out: &Pubkey,
    ) -> Result<u128> {
        let amount_in = ctx.amm.get_amount_in(pool, token_out, recv_amount)?;
        if amount_in > max_amount_in {
            return Err(error!(ErrorCodes::LeverageInvalidSwapAmounts));
        }

        if ctx.tokens.balance_of(token_in, &self.key) < amount_in {
            return Err(error!(ErrorCodes::LeverageInsufficientTokenAmount));
        }

        ctx.amm.swap_exact_output(
            ctx.tokens,
            pool,
            token_out,
            recv_amount,
            amount_in,
            &self.key,
            &self.key,
        )
    }

    /// Fails unless the manager holds at least `expected_shares` of `range_token`
    /// and those shares redeem for the amounts they were minted from.
    ///
    /// A pool price moved between quote and deposit leaves the share count
    /// intact but shifts the amounts behind it, so both sides are checked.
    pub fn check_expected_balances(
        &self,
        ctx: &CallContext,
        range_token: &Pubkey,
        expected_shares: u128,
        expected0: u128,
        expected1: u128,
    ) -> Result<()> {
        let balance = ctx.tokens.balance_of(range_token, &self.key);
        if balance < expected_shares {
            return Err(error!(ErrorCodes::LeverageSlippageError));
        }

        let (amount0, amount1) = ctx
            .ranges
            .get(range_token)?
            .get_token_amounts(&*ctx.amm, balance)?;
        let min_amount0 = mul_div(expected0, MIN_REDEEM_PERCENT, HUNDRED_PERCENT)?;
        let min_amount1 = mul_div(expected1, MIN_REDEEM_PERCENT, HUNDRED_PERCENT)?;
        if amount0 < min_amount0 || amount1 < min_amount1 {
            msg!(
                "redeemable ({}, {}) below expected ({}, {})",
                amount0,
                amount1,
                expected0,
                expected1
            );
            return Err(error!(ErrorCodes::LeverageSlippageError));
        }

        Ok(())
    }
}
