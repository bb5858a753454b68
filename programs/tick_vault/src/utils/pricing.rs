use anchor_lang::prelude::*;

use library::invokes::PriceOracle;
use library::math::{safe_math::*, sqrt_price::*, u256::mul_div};
use library::token::value_of;
use range_token::CallContext;

use crate::{
    constants::{DEPLOYED_TICKS, ORACLE_TOLERANCE_BPS},
    errors::ErrorCodes,
    state::*,
};

impl TickVault {
    /// Oracle prices of base and quote, both required to be set.
    pub fn oracle_prices(&self, oracle: &dyn PriceOracle) -> Result<(u128, u128)> {
        let base_price = oracle.get_asset_price(&self.base_asset)?;
        let quote_price = oracle.get_asset_price(&self.quote_asset)?;
        if base_price == 0 || quote_price == 0 {
            return Err(error!(ErrorCodes::VaultOracleError));
        }
        Ok((base_price, quote_price))
    }

    pub fn price_of(&self, oracle: &dyn PriceOracle, asset: &Pubkey) -> Result<u128> {
        let (base_price, quote_price) = self.oracle_prices(oracle)?;
        if *asset == self.base_asset {
            Ok(base_price)
        } else if *asset == self.quote_asset {
            Ok(quote_price)
        } else {
            Err(error!(ErrorCodes::VaultInvalidToken))
        }
    }

    pub fn decimals_of(&self, asset: &Pubkey) -> Result<u8> {
        if *asset == self.base_asset {
            Ok(self.base_decimals)
        } else if *asset == self.quote_asset {
            Ok(self.quote_decimals)
        } else {
            Err(error!(ErrorCodes::VaultInvalidToken))
        }
    }

    /// Whether the AMM sqrt price sits within 0.5% of the oracle derived one.
    pub fn pool_matches_oracle(&self, ctx: &CallContext) -> Result<bool> {
        let (base_price, quote_price) = self.oracle_prices(ctx.oracle)?;
        let oracle_sqrt_price = sqrt_price_q64_from_prices(
            base_price,
            quote_price,
            self.base_decimals,
            self.quote_decimals,
        )?;
        let pool_sqrt_price = ctx.amm.sqrt_price_q64(&self.pool)?;

        Ok(sqrt_prices_within(
            pool_sqrt_price,
            oracle_sqrt_price,
            ORACLE_TOLERANCE_BPS,
        )?)
    }

    /// Lowest tick of the deployment window around the oracle price.
    ///
    /// With `k` ticks entirely below price the window starts at `k - 2`, clamped
    /// so that four ticks always fit.
    pub fn target_tick_index(&self, ctx: &CallContext) -> Result<u64> {
        if self.ticks.len() < DEPLOYED_TICKS {
            return Ok(0);
        }

        let (base_price, quote_price) = self.oracle_prices(ctx.oracle)?;
        let price = band_price_from_prices(base_price, quote_price)?;

        let mut below = 0usize;
        for tick in &self.ticks {
            if ctx.ranges.get(tick)?.upper_price <= price {
                below += 1;
            }
        }

        let max_index = self.ticks.len() - DEPLOYED_TICKS;
        Ok(below.saturating_sub(2).min(max_index) as u64)
    }

    /// Base fee scaled by how much the move worsens the base/quote balance,
    /// clamped to [base / 2, base * 3 / 2].
    pub fn get_adjusted_base_fee(&self, ctx: &CallContext, increase_base: bool) -> Result<u128> {
        let (base_price, quote_price) = self.oracle_prices(ctx.oracle)?;
        let (base_amount, quote_amount) = self.get_reserves(ctx)?;

        let base_value = value_of(base_amount, base_price, self.base_decimals)?;
        let quote_value = value_of(quote_amount, quote_price, self.quote_decimals)?;

        let base_fee = self.base_fee_x4 as u128;
        let (value_up, value_down) = if increase_base {
            (base_value, quote_value)
        } else {
            (quote_value, base_value)
        };
        let adjusted = mul_div(base_fee, value_up, value_down.safe_add(1)?)?;

        let min_fee = base_fee.safe_div(2)?;
        let max_fee = base_fee.safe_mul(3)?.safe_div(2)?;
        Ok(adjusted.clamp(min_fee, max_fee))
    }
}
