use anchor_lang::prelude::*;

use library::math::{safe_math::*, u256::mul_div};
use library::token::{value_of, TokenLedger};
use range_token::CallContext;

use crate::{constants::ONE_SHARE, errors::ErrorCodes, state::*};

impl TickVault {
    pub fn get_tick_length(&self) -> u64 {
        self.ticks.len() as u64
    }

    pub fn get_active_tick_index(&self) -> u64 {
        self.active_tick_index
    }

    pub fn tick(&self, index: u64) -> Result<Pubkey> {
        self.ticks
            .get(index as usize)
            .copied()
            .ok_or_else(|| error!(ErrorCodes::VaultTickIndexOutOfRange))
    }

    /// Range token shares of tick `index` the vault supplies to the lending market.
    pub fn get_tick_balance(&self, ctx: &CallContext, index: u64) -> Result<u128> {
        let tick = self.tick(index)?;
        Ok(ctx.lending.supply_balance(&tick, &self.key))
    }

    /// Base and quote amounts held through ticks at the pool price plus idle balances.
    pub fn get_reserves(&self, ctx: &CallContext) -> Result<(u128, u128)> {
        let mut base_amount = ctx.tokens.balance_of(&self.base_asset, &self.key);
        let mut quote_amount = ctx.tokens.balance_of(&self.quote_asset, &self.key);

        for tick in &self.ticks {
            let supplied = ctx.lending.supply_balance(tick, &self.key);
            if supplied == 0 {
                continue;
            }
            let (amount0, amount1) = ctx.ranges.get(tick)?.get_token_amounts(&*ctx.amm, supplied)?;
            base_amount = base_amount.safe_add(amount0)?;
            quote_amount = quote_amount.safe_add(amount1)?;
        }

        Ok((base_amount, quote_amount))
    }

    /// Total value in USD X8: ticks at their oracle share price plus idle assets.
    pub fn get_tvl(&self, ctx: &CallContext) -> Result<u128> {
        let (base_price, quote_price) = self.oracle_prices(ctx.oracle)?;

        let mut tvl = value_of(
            ctx.tokens.balance_of(&self.base_asset, &self.key),
            base_price,
            self.base_decimals,
        )?
        .safe_add(value_of(
            ctx.tokens.balance_of(&self.quote_asset, &self.key),
            quote_price,
            self.quote_decimals,
        )?)?;

        for tick in &self.ticks {
            let supplied = ctx.lending.supply_balance(tick, &self.key);
            if supplied == 0 {
                continue;
            }
            let share_price = ctx.ranges.get(tick)?.latest_answer(ctx.oracle)?;
            tvl = tvl.safe_add(mul_div(supplied, share_price, ONE_SHARE)?)?;
        }

        Ok(tvl)
    }

    /// Value of one whole vault share, 0 without supply.
    pub fn latest_answer(&self, ctx: &CallContext) -> Result<u128> {
        let supply = ctx.tokens.total_supply(&self.key);
        if supply == 0 {
            return Ok(0);
        }
        Ok(mul_div(self.get_tvl(ctx)?, ONE_SHARE, supply)?)
    }

    pub fn balance_of(&self, tokens: &dyn TokenLedger, owner: &Pubkey) -> u128 {
        tokens.balance_of(&self.key, owner)
    }

    pub fn total_supply(&self, tokens: &dyn TokenLedger) -> u128 {
        tokens.total_supply(&self.key)
    }
}
