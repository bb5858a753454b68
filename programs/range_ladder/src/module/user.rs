use anchor_lang::prelude::*;

use library::math::safe_math::*;
use library::token::transfer_if_positive;
use range_token::{instructions as range_ix, CallContext, PriceView};

use crate::{errors::ErrorCodes, events::*, state::*};

impl RangeLadder {
    fn verify_lending_market(&self, ctx: &CallContext) -> Result<()> {
        if ctx.lending.key() != self.lending_market {
            return Err(error!(ErrorCodes::LadderInvalidLendingMarket));
        }
        Ok(())
    }

    pub fn transfer_assets_into_ranger_step(
        &mut self,
        ctx: &mut CallContext,
        signer: Pubkey,
        step: u64,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        let token = self.step(step)?.range_token;
        self.transfer_assets_into(ctx, signer, token, amount0, amount1)
    }

    pub fn transfer_assets_into_ticker_step(
        &mut self,
        ctx: &mut CallContext,
        signer: Pubkey,
        step: u64,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        let token = self.step(step)?.ticker;
        self.transfer_assets_into(ctx, signer, token, amount0, amount1)
    }

    /// Returns the signer's collateral of both step tokens as underlying.
    pub fn remove_assets_from_step(
        &mut self,
        ctx: &mut CallContext,
        signer: Pubkey,
        step: u64,
    ) -> Result<(u128, u128)> {
        self.verify_lending_market(ctx)?;
        let step = self.step(step)?.clone();

        let (range0, range1) = self.remove_from_lending(ctx, signer, step.range_token)?;
        let (ticker0, ticker1) = self.remove_from_lending(ctx, signer, step.ticker)?;

        Ok((range0.safe_add(ticker0)?, range1.safe_add(ticker1)?))
    }

    fn transfer_assets_into(
        &mut self,
        ctx: &mut CallContext,
        signer: Pubkey,
        token: Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        self.verify_lending_market(ctx)?;

        // An existing position goes back to the user before the new deposit
        self.remove_from_lending(ctx, signer, token)?;

        let idle = self.idle_balances(ctx.tokens);
        transfer_if_positive(ctx.tokens, &self.base_asset, &signer, &self.key, amount0)?;
        transfer_if_positive(ctx.tokens, &self.quote_asset, &signer, &self.key, amount1)?;

        let shares = range_ix::deposit(ctx, &token, self.key, amount0, amount1)?;

        self.refund_since(ctx.tokens, idle, &signer)?;
        ctx.lending
            .deposit(ctx.tokens, &token, shares, &self.key, &signer)?;

        emit!(LogStepDeposit {
            user: signer,
            range_token: token,
            shares,
        });

        Ok(shares)
    }

    /// Pulls the user's supplied `token` through the ladder and pays out the underlying.
    fn remove_from_lending(
        &mut self,
        ctx: &mut CallContext,
        user: Pubkey,
        token: Pubkey,
    ) -> Result<(u128, u128)> {
        let supplied = ctx.lending.supply_balance(&token, &user);
        if supplied == 0 {
            return Ok((0, 0));
        }

        {
            let prices = PriceView::new(ctx.oracle, &*ctx.ranges);
            ctx.lending
                .transfer_collateral(&prices, &self.key, &token, &user, &self.key, supplied)?;
            ctx.lending
                .withdraw(ctx.tokens, &prices, &token, supplied, &self.key, &self.key)?;
        }

        let (amount0, amount1) = range_ix::withdraw(ctx, &token, self.key, supplied, 0, 0)?;

        transfer_if_positive(ctx.tokens, &self.base_asset, &self.key, &user, amount0)?;
        transfer_if_positive(ctx.tokens, &self.quote_asset, &self.key, &user, amount1)?;

        emit!(LogStepWithdraw {
            user,
            range_token: token,
            shares: supplied,
            amount0,
            amount1,
        });

        Ok((amount0, amount1))
    }
}
