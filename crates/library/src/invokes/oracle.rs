use anchor_lang::prelude::*;

pub trait PriceOracle {
    fn key(&self) -> Pubkey;

    /// USD price with 8 decimals, 0 when the asset has no source.
    fn get_asset_price(&self, asset: &Pubkey) -> Result<u128>;
}

/// Prices every asset the lending market accepts, including range token shares.
pub trait AssetPricer {
    fn asset_price(&self, asset: &Pubkey) -> Result<u128>;
}
