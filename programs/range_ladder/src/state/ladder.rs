use anchor_lang::prelude::*;

use crate::constants::{RANGE_TOKEN_SEED, TICKER_SEED};

/// One band of the ladder: a wide range token and a narrow ticker at its middle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub lower_price: u128,
    pub upper_price: u128,
    pub range_token: Pubkey,
    pub ticker: Pubkey,
}

impl Step {
    /// Whether `[lower, upper)` intersects this step
    pub fn overlaps(&self, lower_price: u128, upper_price: u128) -> bool {
        lower_price < self.upper_price && self.lower_price < upper_price
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct RangeLadder {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lending_market: Pubkey,
    pub treasury: Pubkey,
    pub base_asset: Pubkey,
    pub quote_asset: Pubkey,
    pub steps: Vec<Step>,
}

impl RangeLadder {
    pub fn range_token_address(&self, lower_price: u128, upper_price: u128) -> Pubkey {
        Self::derive(RANGE_TOKEN_SEED, &self.key, lower_price, upper_price)
    }

    pub fn ticker_address(&self, lower_price: u128, upper_price: u128) -> Pubkey {
        Self::derive(TICKER_SEED, &self.key, lower_price, upper_price)
    }

    fn derive(seed: &[u8], ladder: &Pubkey, lower_price: u128, upper_price: u128) -> Pubkey {
        Pubkey::find_program_address(
            &[
                seed,
                ladder.as_ref(),
                &lower_price.to_le_bytes(),
                &upper_price.to_le_bytes(),
            ],
            &crate::ID,
        )
        .0
    }

    pub fn contains_token(&self, token: &Pubkey) -> bool {
        self.steps
            .iter()
            .any(|step| step.range_token == *token || step.ticker == *token)
    }
}
