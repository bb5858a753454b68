use anchor_lang::prelude::*;

use library::math::safe_math::*;
use library::structs::FlashLoanMode;
use library::token::transfer_if_positive;
use pool_registry::PoolRegistry;
use range_token::{instructions as range_ix, CallContext, PriceView};

use crate::{errors::ErrorCodes, events::*, state::*};

impl LeveragePositionManager {
    /// Flash borrows `range_tokens` as debt of the signer and keeps their
    /// underlying, optionally swapped, as the signer's collateral.
    ///
    /// The lending market needs credit delegation from the signer to the manager.
    pub fn buy_options(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        signer: Pubkey,
        pool_id: u64,
        range_tokens: Vec<Pubkey>,
        amounts: Vec<u128>,
        swap_targets: Vec<Pubkey>,
    ) -> Result<()> {
        if range_tokens.len() != amounts.len() || range_tokens.len() != swap_targets.len() {
            return Err(error!(ErrorCodes::LeverageArrayLengthMismatch));
        }

        let info = self.checked_pool(ctx, registry, pool_id, false)?;

        for target in &swap_targets {
            if *target != Pubkey::default() && *target != info.token0 && *target != info.token1 {
                return Err(error!(ErrorCodes::LeverageInvalidSwapToken));
            }
        }

        let modes = vec![FlashLoanMode::OpenDebt; range_tokens.len()];
        self.run_flash_loan(
            ctx,
            registry,
            InFlightOperation::BuyOptions {
                pool_id,
                user: signer,
                swap_targets,
            },
            &range_tokens,
            &amounts,
            &modes,
        )?;

        emit!(LogBuyOptions {
            user: signer,
            pool_id,
            range_tokens,
            amounts,
        });

        Ok(())
    }

    /// Deposits into a range token and supplies the shares as the signer's collateral.
    pub fn sell_options(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        signer: Pubkey,
        pool_id: u64,
        range_token: Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        let info = self.checked_pool(ctx, registry, pool_id, false)?;

        // Must be a lending market reserve of this pool
        let belongs_to_pool = ctx.ranges.find(&range_token).is_some_and(|range| {
            range.base_asset == info.token0 && range.quote_asset == info.token1
        });
        if !belongs_to_pool || ctx.lending.get_reserve_data(&range_token).is_err() {
            return Err(error!(ErrorCodes::LeverageInvalidAddress));
        }

        let idle0 = ctx.tokens.balance_of(&info.token0, &self.key);
        let idle1 = ctx.tokens.balance_of(&info.token1, &self.key);
        transfer_if_positive(ctx.tokens, &info.token0, &signer, &self.key, amount0)?;
        transfer_if_positive(ctx.tokens, &info.token1, &signer, &self.key, amount1)?;

        let shares = range_ix::deposit(ctx, &range_token, self.key, amount0, amount1)?;

        // Refund what the position did not take
        let left0 = ctx.tokens.balance_of(&info.token0, &self.key).safe_sub(idle0)?;
        let left1 = ctx.tokens.balance_of(&info.token1, &self.key).safe_sub(idle1)?;
        transfer_if_positive(ctx.tokens, &info.token0, &self.key, &signer, left0)?;
        transfer_if_positive(ctx.tokens, &info.token1, &self.key, &signer, left1)?;

        ctx.lending
            .deposit(ctx.tokens, &range_token, shares, &self.key, &signer)?;

        emit!(LogSellOptions {
            user: signer,
            pool_id,
            range_token,
            shares,
        });

        Ok(shares)
    }

    /// Turns supplied range shares (0 for all) back into underlying collateral.
    pub fn withdraw_options(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        signer: Pubkey,
        pool_id: u64,
        range_token: Pubkey,
        shares: u128,
    ) -> Result<()> {
        let info = self.checked_pool(ctx, registry, pool_id, true)?;

        let shares = if shares == 0 {
            ctx.lending.supply_balance(&range_token, &signer)
        } else {
            shares
        };

        self.pull_collateral(ctx, &signer, &range_token, shares)?;
        range_ix::withdraw(ctx, &range_token, self.key, shares, 0, 0)?;
        self.deposit_leftovers(ctx, &info, &[], &signer, &[])?;

        emit!(LogWithdrawOptions {
            user: signer,
            pool_id,
            range_token,
            shares,
        });

        Ok(())
    }

    /// Repays `repay_amount` (0 or above the debt for all of it) of the user's
    /// `range_token` debt from the user's `collateral_asset` collateral.
    ///
    /// Third parties may only close while the user is under the soft
    /// liquidation threshold of the lending market. That includes positions
    /// already under a health factor of one, which a third party can close
    /// for the user instead of liquidating them.
    #[allow(clippy::too_many_arguments)]
    pub fn close(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        signer: Pubkey,
        pool_id: u64,
        user: Pubkey,
        range_token: Pubkey,
        repay_amount: u128,
        collateral_asset: Pubkey,
    ) -> Result<()> {
        let info = self.checked_pool(ctx, registry, pool_id, true)?;
        Self::verify_pool_asset(&info, &collateral_asset)?;

        // Anyone may close below the soft threshold, hard threshold included
        if signer != user {
            let prices = PriceView::new(ctx.oracle, &*ctx.ranges);
            let health_factor = ctx
                .lending
                .get_user_account_data(&prices, &user)?
                .health_factor;
            if health_factor >= ctx.lending.soft_liquidation_threshold() {
                return Err(error!(ErrorCodes::LeverageNotInitiatedByUser));
            }
        }

        let debt = ctx.lending.debt_balance(&range_token, &user);
        let repay_amount = if repay_amount == 0 {
            debt
        } else {
            repay_amount.min(debt)
        };
        if repay_amount == 0 {
            return Ok(());
        }

        self.run_flash_loan(
            ctx,
            registry,
            InFlightOperation::Close {
                pool_id,
                user,
                collateral_asset,
            },
            &[range_token],
            &[repay_amount],
            &[FlashLoanMode::Repay],
        )?;

        emit!(LogClosePosition {
            signer,
            user,
            range_token,
            repaid: repay_amount,
            collateral_asset,
        });

        Ok(())
    }

    /// Liquidates the user's range token debt, the seized collateral left after
    /// minting back the flash loan goes to the signer.
    #[allow(clippy::too_many_arguments)]
    pub fn liquidate(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        signer: Pubkey,
        pool_id: u64,
        user: Pubkey,
        range_tokens: Vec<Pubkey>,
        amounts: Vec<u128>,
        collateral_asset: Pubkey,
    ) -> Result<()> {
        if range_tokens.len() != amounts.len() {
            return Err(error!(ErrorCodes::LeverageArrayLengthMismatch));
        }

        let info = self.checked_pool(ctx, registry, pool_id, true)?;
        Self::verify_pool_asset(&info, &collateral_asset)?;

        let modes = vec![FlashLoanMode::Repay; range_tokens.len()];
        self.run_flash_loan(
            ctx,
            registry,
            InFlightOperation::Liquidation {
                pool_id,
                user,
                collateral_asset,
                liquidator: signer,
            },
            &range_tokens,
            &amounts,
            &modes,
        )?;

        emit!(LogLiquidatePosition {
            liquidator: signer,
            user,
            range_tokens,
            amounts,
            collateral_asset,
        });

        Ok(())
    }

    /// Swaps the signer's `token` collateral (0 for all) into the other pool asset.
    pub fn swap_tokens(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        signer: Pubkey,
        pool_id: u64,
        token: Pubkey,
        amount: u128,
    ) -> Result<u128> {
        let info = self.checked_pool(ctx, registry, pool_id, false)?;

        let token_out = if token == info.token0 {
            info.token1
        } else if token == info.token1 {
            info.token0
        } else {
            return Err(error!(ErrorCodes::LeverageInvalidSwapToken));
        };

        let amount = if amount == 0 {
            ctx.lending.supply_balance(&token, &signer)
        } else {
            amount
        };

        self.pull_collateral(ctx, &signer, &token, amount)?;

        let pool = ctx.amm.get_pool(&info.token0, &info.token1)?;
        let amount_out = self.swap_exact_tokens_at_oracle(ctx, &pool, &token, amount, &token_out)?;

        ctx.lending
            .deposit(ctx.tokens, &token_out, amount_out, &self.key, &signer)?;

        emit!(LogSwapCollateral {
            user: signer,
            token_in: token,
            amount_in: amount,
            amount_out,
        });

        Ok(amount_out)
    }

    /// Flash loan round trip: record the operation, borrow, run the callback, settle.
    fn run_flash_loan(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        operation: InFlightOperation,
        assets: &[Pubkey],
        amounts: &[u128],
        modes: &[FlashLoanMode],
    ) -> Result<()> {
        let on_behalf_of = operation.on_behalf_of();
        self.in_flight = Some(operation);

        let result = self.flash_loan_round_trip(ctx, registry, assets, amounts, modes, &on_behalf_of);
        self.in_flight = None;
        result
    }

    fn flash_loan_round_trip(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        assets: &[Pubkey],
        amounts: &[u128],
        modes: &[FlashLoanMode],
        on_behalf_of: &Pubkey,
    ) -> Result<()> {
        let receipt = ctx.lending.flash_loan(
            ctx.tokens,
            &self.key,
            &self.key,
            assets,
            amounts,
            modes,
            on_behalf_of,
        )?;

        let lending_market = ctx.lending.key();
        self.execute_operation(ctx, registry, lending_market, &receipt)?;

        let prices = PriceView::new(ctx.oracle, &*ctx.ranges);
        ctx.lending.settle_flash_loan(ctx.tokens, &prices, &receipt)
    }
}
