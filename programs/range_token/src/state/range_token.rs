use anchor_lang::prelude::*;

use library::invokes::{ConcentratedAmm, PriceOracle};
use library::math::{liquidity::*, safe_math::*, sqrt_price::*, u256::mul_div};
use library::structs::PositionKey;
use library::token::value_of;

use crate::errors::ErrorCodes;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct InitializeRangeParams {
    pub oracle: Pubkey,
    pub pool: Pubkey,
    pub beacon: Pubkey,
    pub treasury: Pubkey,
    pub base_asset: Pubkey,
    pub quote_asset: Pubkey,
    pub lower_price: u128, // band price X8, base per whole quote unit
    pub upper_price: u128,
    pub lower_label: String,
    pub upper_label: String,
    pub is_ticker: bool,
}

/// Share token wrapping one price bounded AMM position.
///
/// The share mint is the token key itself, so is the custody account holding
/// collected fees between compounding.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct RangeToken {
    pub key: Pubkey,
    pub initializer: Pubkey,
    pub oracle: Pubkey,
    pub pool: Pubkey,
    pub beacon: Pubkey,
    pub treasury: Pubkey,

    pub base_asset: Pubkey,
    pub quote_asset: Pubkey,
    pub base_decimals: u8,
    pub quote_decimals: u8,

    pub lower_price: u128,
    pub upper_price: u128,
    /// Q64.64 edge derived from `upper_price`
    pub sqrt_lower: u128,
    /// Q64.64 edge derived from `lower_price`
    pub sqrt_upper: u128,

    pub is_ticker: bool,
    pub name: String,
    pub symbol: String,

    pub total_shares: u128,
    /// Liquidity accounted to holders, donations to the position excluded
    pub liquidity: u128,
    pub fee0: u128,
    pub fee1: u128,
    pub treasury_fee_percent: u8,

    pub is_initialized: bool,
}

impl RangeToken {
    pub fn new(key: Pubkey) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            pool: self.pool,
            owner: self.key,
            sqrt_lower: self.sqrt_lower,
            sqrt_upper: self.sqrt_upper,
        }
    }

    pub fn pool_sqrt_price(&self, amm: &dyn ConcentratedAmm) -> Result<u128> {
        amm.sqrt_price_q64(&self.pool)
    }

    /// Oracle prices of base and quote; a non zero override wins over the oracle.
    pub fn resolve_prices(
        &self,
        oracle: &dyn PriceOracle,
        base_price: u128,
        quote_price: u128,
    ) -> Result<(u128, u128)> {
        let base_price = if base_price == 0 {
            oracle.get_asset_price(&self.base_asset)?
        } else {
            base_price
        };
        let quote_price = if quote_price == 0 {
            oracle.get_asset_price(&self.quote_asset)?
        } else {
            quote_price
        };

        if base_price == 0 || quote_price == 0 {
            return Err(error!(ErrorCodes::RangeInvalidOraclePrice));
        }

        Ok((base_price, quote_price))
    }

    pub fn sqrt_price_at(&self, base_price: u128, quote_price: u128) -> Result<u128> {
        Ok(sqrt_price_q64_from_prices(
            base_price,
            quote_price,
            self.base_decimals,
            self.quote_decimals,
        )?)
    }

    /// USD X8 value of a base/quote pair at the given prices.
    pub fn value_of_amounts(
        &self,
        amount0: u128,
        amount1: u128,
        base_price: u128,
        quote_price: u128,
    ) -> Result<u128> {
        Ok(value_of(amount0, base_price, self.base_decimals)?
            .safe_add(value_of(amount1, quote_price, self.quote_decimals)?)?)
    }

    pub fn liquidity_for(&self, sqrt_price: u128, amount0: u128, amount1: u128) -> Result<u128> {
        Ok(liquidity_for_amounts(
            sqrt_price,
            self.sqrt_lower,
            self.sqrt_upper,
            amount0,
            amount1,
        )?)
    }

    pub fn amounts_for(
        &self,
        sqrt_price: u128,
        liquidity: u128,
        round_up: bool,
    ) -> Result<(u128, u128)> {
        Ok(amounts_for_liquidity(
            sqrt_price,
            self.sqrt_lower,
            self.sqrt_upper,
            liquidity,
            round_up,
        )?)
    }

    /// Liquidity the accrued, not yet compounded fees would fund at `sqrt_price`.
    pub fn fee_liquidity(&self, sqrt_price: u128) -> Result<u128> {
        if self.fee0 == 0 && self.fee1 == 0 {
            return Ok(0);
        }
        self.liquidity_for(sqrt_price, self.fee0, self.fee1)
    }

    /// Holder part of `shares`: liquidity plus fee0/fee1, all rounded down.
    pub fn share_of(&self, shares: u128) -> Result<(u128, u128, u128)> {
        if self.total_shares == 0 {
            return Ok((0, 0, 0));
        }
        Ok((
            mul_div(self.liquidity, shares, self.total_shares)?,
            mul_div(self.fee0, shares, self.total_shares)?,
            mul_div(self.fee1, shares, self.total_shares)?,
        ))
    }
}

/// Display name and symbol of a range token, e.g. `Ranger 1000-1100` / `R-1000-1100`.
pub fn range_name_and_symbol(is_ticker: bool, lower_label: &str, upper_label: &str) -> (String, String) {
    let (name, symbol) = if is_ticker {
        ("Ticker", "T")
    } else {
        ("Ranger", "R")
    };
    (
        format!("{} {}-{}", name, lower_label, upper_label),
        format!("{}-{}-{}", symbol, lower_label, upper_label),
    )
}
