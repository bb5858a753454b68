use anchor_lang::prelude::*;

use library::math::safe_math::*;
use library::structs::FlashLoanReceipt;
use pool_registry::{PoolInfo, PoolRegistry};
use range_token::{instructions as range_ix, CallContext, PriceView};

use crate::{errors::ErrorCodes, state::*};

impl LeveragePositionManager {
    /// Flash loan callback of the lending market.
    pub fn execute_operation(
        &mut self,
        ctx: &mut CallContext,
        registry: &PoolRegistry,
        caller: Pubkey,
        receipt: &FlashLoanReceipt,
    ) -> Result<()> {
        if caller != ctx.lending.key()
            || receipt.receiver != self.key
            || receipt.initiator != self.key
        {
            return Err(error!(ErrorCodes::LeverageCallUnallowed));
        }

        let operation = match &self.in_flight {
            Some(operation) if operation.matches(receipt) => operation.clone(),
            _ => return Err(error!(ErrorCodes::LeverageCallUnallowed)),
        };

        match operation {
            InFlightOperation::BuyOptions {
                pool_id,
                user,
                swap_targets,
            } => {
                let info = self.checked_pool(ctx, registry, pool_id, false)?;
                self.execute_buy_options(ctx, &info, &user, &swap_targets, receipt)
            }
            InFlightOperation::Close {
                pool_id,
                user,
                collateral_asset,
            } => {
                let info = self.checked_pool(ctx, registry, pool_id, true)?;
                self.execute_close(ctx, &info, &user, &collateral_asset, receipt)
            }
            InFlightOperation::Liquidation {
                pool_id,
                user,
                collateral_asset,
                liquidator,
            } => {
                let info = self.checked_pool(ctx, registry, pool_id, true)?;
                self.execute_liquidation(ctx, &info, &user, &collateral_asset, &liquidator, receipt)
            }
        }
    }

    /// Burns the borrowed shares and supplies the underlying as the user's collateral.
    fn execute_buy_options(
        &self,
        ctx: &mut CallContext,
        info: &PoolInfo,
        user: &Pubkey,
        swap_targets: &[Pubkey],
        receipt: &FlashLoanReceipt,
    ) -> Result<()> {
        let pool = ctx.amm.get_pool(&info.token0, &info.token1)?;

        for (index, range_token) in receipt.assets.iter().enumerate() {
            let (amount0, amount1) =
                range_ix::withdraw(ctx, range_token, self.key, receipt.amounts[index], 0, 0)?;

            // Default target keeps both sides
            let target = swap_targets[index];
            if target == info.token0 && amount1 > 0 {
                self.swap_exact_tokens_at_oracle(ctx, &pool, &info.token1, amount1, &info.token0)?;
            } else if target == info.token1 && amount0 > 0 {
                self.swap_exact_tokens_at_oracle(ctx, &pool, &info.token0, amount0, &info.token1)?;
            }
        }

        self.deposit_leftovers(ctx, info, &[], user, &[])
    }

    /// Repays the user's debt with the flashed shares and mints them back from collateral.
    fn execute_close(
        &self,
        ctx: &mut CallContext,
        info: &PoolInfo,
        user: &Pubkey,
        collateral_asset: &Pubkey,
        receipt: &FlashLoanReceipt,
    ) -> Result<()> {
        let range_token = receipt.assets[0];
        let owed = receipt.amounts[0].safe_add(receipt.premiums[0])?;

        // Fees land in the position before the remint is sized
        range_ix::claim_fee(ctx, &range_token)?;

        ctx.lending
            .repay(ctx.tokens, &range_token, receipt.amounts[0], &self.key, user)?;

        let held = ctx.tokens.balance_of(&range_token, &self.key);
        if held < owed {
            let pool = ctx.amm.get_pool(&info.token0, &info.token1)?;
            let plan = self.plan_remint(
                ctx,
                &pool,
                info,
                &range_token,
                owed.safe_sub(held)?,
                collateral_asset,
            )?;

            if ctx.lending.supply_balance(collateral_asset, user) < plan.required_collateral {
                return Err(error!(ErrorCodes::LeverageInsufficientCollateral));
            }

            self.pull_collateral(ctx, user, collateral_asset, plan.required_collateral)?;
            self.execute_remint(ctx, &pool, &range_token, owed, collateral_asset, &plan)?;
        }

        self.deposit_leftovers(ctx, info, &[range_token], user, &[owed])
    }

    /// Liquidates with the flashed shares and mints them back from the seized collateral.
    fn execute_liquidation(
        &self,
        ctx: &mut CallContext,
        info: &PoolInfo,
        user: &Pubkey,
        collateral_asset: &Pubkey,
        liquidator: &Pubkey,
        receipt: &FlashLoanReceipt,
    ) -> Result<()> {
        let pool = ctx.amm.get_pool(&info.token0, &info.token1)?;
        let mut reserved = Vec::with_capacity(receipt.assets.len());

        for (index, range_token) in receipt.assets.iter().enumerate() {
            let owed = receipt.amounts[index].safe_add(receipt.premiums[index])?;

            let outcome = {
                let prices = PriceView::new(ctx.oracle, &*ctx.ranges);
                ctx.lending.liquidation_call(
                    ctx.tokens,
                    &prices,
                    collateral_asset,
                    range_token,
                    user,
                    receipt.amounts[index],
                    &self.key,
                )?
            };
            msg!(
                "Liquidated {} of {} debt for {} collateral",
                outcome.debt_repaid,
                range_token,
                outcome.collateral_seized
            );

            let held = ctx.tokens.balance_of(range_token, &self.key);
            if held < owed {
                let plan = self.plan_remint(
                    ctx,
                    &pool,
                    info,
                    range_token,
                    owed.safe_sub(held)?,
                    collateral_asset,
                )?;
                self.execute_remint(ctx, &pool, range_token, owed, collateral_asset, &plan)?;
            }

            reserved.push(owed);
        }

        self.deposit_leftovers(ctx, info, &receipt.assets, liquidator, &reserved)
    }
}
