use anchor_lang::prelude::*;

use library::math::safe_math::*;
use range_token::{instructions as range_ix, CallContext, PriceView};

use crate::{constants::DEPLOYED_TICKS, errors::ErrorCodes, state::*};

impl TickVault {
    pub(crate) fn verify_lending_market(&self, ctx: &CallContext) -> Result<()> {
        if ctx.lending.key() != self.lending_market {
            return Err(error!(ErrorCodes::VaultInvalidLendingMarket));
        }
        Ok(())
    }

    /// Pulls the vault's supply out of every tick back into idle base/quote.
    ///
    /// Supply lent out to borrowers cannot be withdrawn and stays in the tick.
    pub(crate) fn remove_from_all_ticks(&self, ctx: &mut CallContext) -> Result<()> {
        for tick in &self.ticks {
            let supplied = ctx.lending.supply_balance(tick, &self.key);
            if supplied == 0 {
                continue;
            }

            let available = ctx.lending.get_reserve_data(tick)?.available_liquidity;
            let amount = supplied.min(available);
            if amount == 0 {
                msg!("Tick {} fully borrowed, skipping", tick);
                continue;
            }

            {
                let prices = PriceView::new(ctx.oracle, &*ctx.ranges);
                ctx.lending
                    .withdraw(ctx.tokens, &prices, tick, amount, &self.key, &self.key)?;
            }
            range_ix::withdraw(ctx, tick, self.key, amount, 0, 0)?;
        }

        Ok(())
    }

    /// Splits idle base over ticks `a`, `a+1` and idle quote over `a+2`, `a+3`.
    pub(crate) fn deploy_assets(&self, ctx: &mut CallContext) -> Result<()> {
        if self.ticks.len() < DEPLOYED_TICKS {
            return Ok(());
        }

        let index = self.active_tick_index as usize;
        let window = self
            .ticks
            .get(index..index + DEPLOYED_TICKS)
            .ok_or_else(|| error!(ErrorCodes::VaultTickIndexOutOfRange))?
            .to_vec();

        let base_balance = ctx.tokens.balance_of(&self.base_asset, &self.key);
        let quote_balance = ctx.tokens.balance_of(&self.quote_asset, &self.key);

        let base_half = base_balance.safe_div(2)?;
        let quote_half = quote_balance.safe_div(2)?;

        self.deposit_into_tick(ctx, &window[0], base_half, 0)?;
        self.deposit_into_tick(ctx, &window[1], base_balance.safe_sub(base_half)?, 0)?;
        self.deposit_into_tick(ctx, &window[2], 0, quote_half)?;
        self.deposit_into_tick(ctx, &window[3], 0, quote_balance.safe_sub(quote_half)?)?;

        Ok(())
    }

    /// Deposits into one tick and supplies the shares to the lending market.
    /// Amounts too small for any liquidity stay idle.
    fn deposit_into_tick(
        &self,
        ctx: &mut CallContext,
        tick: &Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> Result<()> {
        if amount0 == 0 && amount1 == 0 {
            return Ok(());
        }

        let range_token = ctx.ranges.get(tick)?;
        let sqrt_price = range_token.pool_sqrt_price(&*ctx.amm)?;
        if range_token.liquidity_for(sqrt_price, amount0, amount1)? == 0 {
            return Ok(());
        }

        let shares = range_ix::deposit(ctx, tick, self.key, amount0, amount1)?;
        ctx.lending
            .deposit(ctx.tokens, tick, shares, &self.key, &self.key)?;

        Ok(())
    }
}
