use anchor_lang::prelude::*;

use library::invokes::{AssetPricer, ConcentratedAmm, LendingMarket, PriceOracle};
use library::token::TokenLedger;

use crate::state::RangeTokens;

/// External accounts an entry point operates on.
///
/// Range tokens themselves live in `ranges`, so a caller can mutate one range
/// token while handing the other collaborators to it.
pub struct CallContext<'a> {
    pub tokens: &'a mut dyn TokenLedger,
    pub oracle: &'a dyn PriceOracle,
    pub amm: &'a mut dyn ConcentratedAmm,
    pub lending: &'a mut dyn LendingMarket,
    pub ranges: &'a mut RangeTokens,
}

/// Oracle prices for plain assets, `latest_answer` for range token shares.
pub struct PriceView<'a> {
    pub oracle: &'a dyn PriceOracle,
    pub ranges: &'a RangeTokens,
}

impl<'a> PriceView<'a> {
    pub fn new(oracle: &'a dyn PriceOracle, ranges: &'a RangeTokens) -> Self {
        Self { oracle, ranges }
    }
}

impl AssetPricer for PriceView<'_> {
    fn asset_price(&self, asset: &Pubkey) -> Result<u128> {
        match self.ranges.find(asset) {
            Some(range_token) => range_token.latest_answer(self.oracle),
            None => self.oracle.get_asset_price(asset),
        }
    }
}
