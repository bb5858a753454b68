use anchor_lang::prelude::*;

use library::math::safe_math::*;
use pool_registry::PoolInfo;
use range_token::{instructions as range_ix, CallContext, PriceView};

use crate::{errors::ErrorCodes, state::*};

/// Amounts needed to mint back `owed` range token shares from one collateral asset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemintPlan {
    pub amount0: u128,
    pub amount1: u128,
    pub other_asset: Pubkey,
    pub other_amount: u128,    // bought with collateral through the AMM
    pub swap_amount_in: u128,  // collateral spent on that swap
    pub required_collateral: u128,
}

impl LeveragePositionManager {
    /// Moves `amount` of the user's supplied `asset` to the manager as underlying.
    pub(crate) fn pull_collateral(
        &self,
        ctx: &mut CallContext,
        user: &Pubkey,
        asset: &Pubkey,
        amount: u128,
    ) -> Result<()> {
        let prices = PriceView::new(ctx.oracle, &*ctx.ranges);
        ctx.lending
            .transfer_collateral(&prices, &self.key, asset, user, &self.key, amount)?;
        ctx.lending
            .withdraw(ctx.tokens, &prices, asset, amount, &self.key, &self.key)?;
        Ok(())
    }

    /// Supplies whatever base, quote and range shares the manager holds for `beneficiary`.
    pub(crate) fn deposit_leftovers(
        &self,
        ctx: &mut CallContext,
        pool: &PoolInfo,
        range_tokens: &[Pubkey],
        beneficiary: &Pubkey,
        reserved: &[u128],
    ) -> Result<()> {
        for asset in [pool.token0, pool.token1] {
            let balance = ctx.tokens.balance_of(&asset, &self.key);
            if balance > 0 {
                ctx.lending
                    .deposit(ctx.tokens, &asset, balance, &self.key, beneficiary)?;
            }
        }

        // Shares above what the flash loan settlement pulls back
        for (index, range_token) in range_tokens.iter().enumerate() {
            let keep = reserved.get(index).copied().unwrap_or_default();
            let balance = ctx.tokens.balance_of(range_token, &self.key);
            if balance > keep {
                ctx.lending.deposit(
                    ctx.tokens,
                    range_token,
                    balance.safe_sub(keep)?,
                    &self.key,
                    beneficiary,
                )?;
            }
        }

        Ok(())
    }

    pub(crate) fn plan_remint(
        &self,
        ctx: &CallContext,
        pool: &Pubkey,
        info: &PoolInfo,
        range_token: &Pubkey,
        owed: u128,
        collateral_asset: &Pubkey,
    ) -> Result<RemintPlan> {
        let (amount0, amount1) = ctx
            .ranges
            .get(range_token)?
            .deposit_amounts_for_shares(&*ctx.amm, owed)?;

        let (collateral_amount, other_asset, other_amount) = if *collateral_asset == info.token0 {
            (amount0, info.token1, amount1)
        } else {
            (amount1, info.token0, amount0)
        };

        let swap_amount_in = if other_amount > 0 {
            ctx.amm.get_amount_in(pool, &other_asset, other_amount)?
        } else {
            0
        };

        Ok(RemintPlan {
            amount0,
            amount1,
            other_asset,
            other_amount,
            swap_amount_in,
            required_collateral: collateral_amount.safe_add(swap_amount_in)?,
        })
    }

    /// Mints `owed` range shares back from collateral held by the manager.
    pub(crate) fn execute_remint(
        &self,
        ctx: &mut CallContext,
        pool: &Pubkey,
        range_token: &Pubkey,
        owed: u128,
        collateral_asset: &Pubkey,
        plan: &RemintPlan,
    ) -> Result<()> {
        if ctx.tokens.balance_of(collateral_asset, &self.key) < plan.required_collateral {
            return Err(error!(ErrorCodes::LeverageInsufficientCollateral));
        }

        if plan.other_amount > 0 {
            self.swap_tokens_for_exact_tokens(
                ctx,
                pool,
                plan.other_amount,
                plan.swap_amount_in,
                collateral_asset,
                &plan.other_asset,
            )?;
        }

        range_ix::deposit(ctx, range_token, self.key, plan.amount0, plan.amount1)?;
        self.check_expected_balances(ctx, range_token, owed, plan.amount0, plan.amount1)
    }
}
