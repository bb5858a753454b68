use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use library::invokes::PriceOracle;

/// Price oracle answering fixed USD X8 prices, 0 for unknown assets.
#[derive(Clone, Debug, Default)]
pub struct MockOracle {
    pub key: Pubkey,
    prices: BTreeMap<Pubkey, u128>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self {
            key: Pubkey::new_unique(),
            prices: BTreeMap::new(),
        }
    }

    pub fn set_price(&mut self, asset: &Pubkey, price_x8: u128) {
        tracing::debug!("oracle price of {} set to {}", asset, price_x8);
        self.prices.insert(*asset, price_x8);
    }
}

impl PriceOracle for MockOracle {
    fn key(&self) -> Pubkey {
        self.key
    }

    fn get_asset_price(&self, asset: &Pubkey) -> Result<u128> {
        Ok(self.prices.get(asset).copied().unwrap_or_default())
    }
}
