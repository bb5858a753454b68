use anchor_lang::prelude::*;

use library::math::{safe_math::*, u256::mul_div};
use library::token::{amount_for_value, transfer_if_positive, value_of};
use range_token::CallContext;

use crate::{
    constants::{FOUR_DECIMALS, SWAP_MAX_IN_PERCENT, VALUE_TO_SHARES},
    errors::ErrorCodes,
    events::*,
    state::*,
};

impl TickVault {
    /// Moves the deployment window to the ticks around the oracle price.
    pub fn rebalance(&mut self, ctx: &mut CallContext) -> Result<()> {
        self.verify_lending_market(ctx)?;

        let target = self.target_tick_index(ctx)?;
        if target == self.active_tick_index {
            return Ok(());
        }

        // Pool price away from the oracle, possible sandwich
        if !self.pool_matches_oracle(ctx)? {
            return Err(error!(ErrorCodes::VaultOracleError));
        }

        self.move_window(ctx, target)
    }

    fn move_window(&mut self, ctx: &mut CallContext, target: u64) -> Result<()> {
        self.remove_from_all_ticks(ctx)?;

        let previous_tick_index = self.active_tick_index;
        self.active_tick_index = target;

        if self.is_enabled {
            self.deploy_assets(ctx)?;
        }

        emit!(LogRebalance {
            previous_tick_index,
            active_tick_index: target,
        });

        Ok(())
    }

    /// Deposits `amount` of `asset` (plus `native_amount` wrapped on the way in)
    /// and returns the shares minted.
    pub fn deposit(
        &mut self,
        ctx: &mut CallContext,
        signer: Pubkey,
        asset: Pubkey,
        amount: u128,
        native_amount: u128,
    ) -> Result<u128> {
        if !self.is_enabled {
            return Err(error!(ErrorCodes::VaultPoolDisabled));
        }

        if !self.pool_matches_oracle(ctx)? {
            return Err(error!(ErrorCodes::VaultOracleError));
        }

        if asset != self.base_asset && asset != self.quote_asset {
            return Err(error!(ErrorCodes::VaultInvalidToken));
        }

        if amount.safe_add(native_amount)? == 0 {
            return Err(error!(ErrorCodes::VaultDepositZero));
        }

        if native_amount > 0 && asset != self.wrapped_native {
            return Err(error!(ErrorCodes::VaultInvalidWeth));
        }

        self.verify_lending_market(ctx)?;

        // Valuation before any token moves
        let tvl = self.get_tvl(ctx)?;
        let fee_x4 = self.get_adjusted_base_fee(ctx, asset == self.base_asset)?;

        if native_amount > 0 {
            ctx.tokens.wrap_native(&signer, native_amount)?;
        }
        let amount = amount.safe_add(native_amount)?;
        ctx.tokens.transfer(&asset, &signer, &self.key, amount)?;

        let fee = mul_div(amount, fee_x4, FOUR_DECIMALS)?;
        transfer_if_positive(ctx.tokens, &asset, &self.key, &self.treasury, fee)?;

        let price = self.price_of(ctx.oracle, &asset)?;
        let value = value_of(amount.safe_sub(fee)?, price, self.decimals_of(&asset)?)?;

        if tvl.safe_add(value)? > self.tvl_cap {
            return Err(error!(ErrorCodes::VaultMaxCapReached));
        }

        let supply = ctx.tokens.total_supply(&self.key);
        let shares = if supply == 0 {
            value.safe_mul(VALUE_TO_SHARES)?
        } else {
            mul_div(supply, value, tvl)?
        };
        if shares == 0 {
            return Err(error!(ErrorCodes::VaultNoLiquidityAdded));
        }

        ctx.tokens.mint_to(&self.key, &self.key, &signer, shares)?;

        let target = self.target_tick_index(ctx)?;
        if target != self.active_tick_index {
            self.move_window(ctx, target)?;
        } else {
            self.deploy_assets(ctx)?;
        }

        emit!(LogDeposit {
            user: signer,
            asset,
            amount,
            fee,
            shares,
        });

        Ok(shares)
    }

    /// Burns `shares` (0 for the whole balance) and pays their value out in `asset`.
    pub fn withdraw(
        &mut self,
        ctx: &mut CallContext,
        signer: Pubkey,
        shares: u128,
        asset: Pubkey,
        to_native: bool,
    ) -> Result<u128> {
        let balance = ctx.tokens.balance_of(&self.key, &signer);
        let shares = if shares == 0 { balance } else { shares };

        if shares > balance {
            return Err(error!(ErrorCodes::VaultInsufficientBalance));
        }

        if shares == 0 {
            return Err(error!(ErrorCodes::VaultWithdrawZero));
        }

        if asset != self.base_asset && asset != self.quote_asset {
            return Err(error!(ErrorCodes::VaultInvalidToken));
        }

        if to_native && asset != self.wrapped_native {
            return Err(error!(ErrorCodes::VaultInvalidWeth));
        }

        self.verify_lending_market(ctx)?;

        let tvl = self.get_tvl(ctx)?;
        let supply = ctx.tokens.total_supply(&self.key);
        let fee_x4 = self.get_adjusted_base_fee(ctx, asset == self.quote_asset)?;

        let price = self.price_of(ctx.oracle, &asset)?;
        let value = mul_div(tvl, shares, supply)?;
        let amount = amount_for_value(value, price, self.decimals_of(&asset)?)?;

        ctx.tokens.burn(&self.key, &self.key, &signer, shares)?;

        self.remove_from_all_ticks(ctx)?;

        // Rounding dust is paid from what is there when nothing is left to swap from
        let idle = ctx.tokens.balance_of(&asset, &self.key);
        let amount = if idle >= amount {
            amount
        } else if ctx.tokens.balance_of(&self.other_asset(&asset), &self.key) == 0 {
            idle
        } else {
            self.swap_shortfall(ctx, &asset, amount.safe_sub(idle)?)?;
            amount
        };

        let fee = mul_div(amount, fee_x4, FOUR_DECIMALS)?;
        transfer_if_positive(ctx.tokens, &asset, &self.key, &self.treasury, fee)?;

        let payout = amount.safe_sub(fee)?;
        transfer_if_positive(ctx.tokens, &asset, &self.key, &signer, payout)?;
        if to_native && payout > 0 {
            ctx.tokens.unwrap_native(&signer, payout)?;
        }

        if self.is_enabled && self.pool_matches_oracle(ctx)? {
            let target = self.target_tick_index(ctx)?;
            self.active_tick_index = target;
            self.deploy_assets(ctx)?;
        }

        emit!(LogWithdraw {
            user: signer,
            asset,
            amount: payout,
            fee,
            shares,
        });

        Ok(payout)
    }

    fn other_asset(&self, asset: &Pubkey) -> Pubkey {
        if *asset == self.base_asset {
            self.quote_asset
        } else {
            self.base_asset
        }
    }

    /// Buys exactly `shortfall` of `asset` with the other vault asset, at most 1%
    /// above the oracle quote.
    fn swap_shortfall(&self, ctx: &mut CallContext, asset: &Pubkey, shortfall: u128) -> Result<()> {
        let other = self.other_asset(asset);

        let value = value_of(
            shortfall,
            self.price_of(ctx.oracle, asset)?,
            self.decimals_of(asset)?,
        )?;
        let oracle_amount_in = amount_for_value(
            value,
            self.price_of(ctx.oracle, &other)?,
            self.decimals_of(&other)?,
        )?;
        let max_amount_in = oracle_amount_in
            .safe_mul(SWAP_MAX_IN_PERCENT)?
            .safe_div_ceil(100)?;

        ctx.amm.swap_exact_output(
            ctx.tokens,
            &self.pool,
            asset,
            shortfall,
            max_amount_in,
            &self.key,
            &self.key,
        )?;

        Ok(())
    }
}
