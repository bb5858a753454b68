use anchor_lang::prelude::*;

use library::invokes::{ConcentratedAmm, PriceOracle};
use library::math::{
    safe_math::*,
    u256::{mul_div, mul_div_ceil},
};
use library::token::TokenLedger;

use crate::{constants::ONE_SHARE, errors::ErrorCodes, state::*};

impl RangeToken {
    /// Principal amounts at the given USD prices, zero prices read from the oracle.
    pub fn return_expected_balance_without_fees(
        &self,
        oracle: &dyn PriceOracle,
        base_price: u128,
        quote_price: u128,
    ) -> Result<(u128, u128)> {
        let (base_price, quote_price) = self.resolve_prices(oracle, base_price, quote_price)?;
        let sqrt_price = self.sqrt_price_at(base_price, quote_price)?;
        self.amounts_for(sqrt_price, self.liquidity, false)
    }

    pub fn return_expected_balance(
        &self,
        oracle: &dyn PriceOracle,
        base_price: u128,
        quote_price: u128,
    ) -> Result<(u128, u128)> {
        let (amount0, amount1) =
            self.return_expected_balance_without_fees(oracle, base_price, quote_price)?;
        Ok((amount0.safe_add(self.fee0)?, amount1.safe_add(self.fee1)?))
    }

    /// USD X8 value of one whole share at the given prices.
    pub fn get_value_per_lp_at_price(
        &self,
        oracle: &dyn PriceOracle,
        base_price: u128,
        quote_price: u128,
    ) -> Result<u128> {
        if self.total_shares == 0 {
            return Ok(0);
        }

        let (base_price, quote_price) = self.resolve_prices(oracle, base_price, quote_price)?;
        let (amount0, amount1) = self.return_expected_balance(oracle, base_price, quote_price)?;
        let value = self.value_of_amounts(amount0, amount1, base_price, quote_price)?;

        Ok(mul_div(value, ONE_SHARE, self.total_shares)?)
    }

    /// Share price at the oracle, what the lending market values collateral with.
    pub fn latest_answer(&self, oracle: &dyn PriceOracle) -> Result<u128> {
        if oracle.key() != self.oracle {
            return Err(error!(ErrorCodes::RangeInvalidOracle));
        }
        self.get_value_per_lp_at_price(oracle, 0, 0)
    }

    /// What a withdrawal of `shares` pays out at the current pool price.
    pub fn get_token_amounts(&self, amm: &dyn ConcentratedAmm, shares: u128) -> Result<(u128, u128)> {
        let (liquidity, fee0, fee1) = self.share_of(shares)?;
        let sqrt_price = self.pool_sqrt_price(amm)?;
        let (amount0, amount1) = self.amounts_for(sqrt_price, liquidity, false)?;
        Ok((amount0.safe_add(fee0)?, amount1.safe_add(fee1)?))
    }

    /// Amounts a deposit needs at the pool price to mint at least `shares`.
    pub fn deposit_amounts_for_shares(
        &self,
        amm: &dyn ConcentratedAmm,
        shares: u128,
    ) -> Result<(u128, u128)> {
        if self.total_shares == 0 {
            return Err(error!(ErrorCodes::RangeClosed));
        }

        let sqrt_price = self.pool_sqrt_price(amm)?;
        let accounted = self.liquidity.safe_add(self.fee_liquidity(sqrt_price)?)?;

        // +1 absorbs the floor in the share formula
        let liquidity = mul_div_ceil(shares, accounted, self.total_shares)?.safe_add(1)?;

        self.amounts_for(sqrt_price, liquidity, true)
    }

    pub fn balance_of(&self, tokens: &dyn TokenLedger, owner: &Pubkey) -> u128 {
        tokens.balance_of(&self.key, owner)
    }
}
