use anchor_lang::prelude::*;

use crate::{errors::ErrorCodes, state::*};

impl RangeLadder {
    pub fn get_step_list_length(&self) -> u64 {
        self.steps.len() as u64
    }

    pub fn step(&self, step: u64) -> Result<&Step> {
        self.steps
            .get(step as usize)
            .ok_or_else(|| error!(ErrorCodes::LadderInvalidStep))
    }

    pub fn tokenised_ranges(&self, step: u64) -> Result<Pubkey> {
        Ok(self.step(step)?.range_token)
    }

    pub fn tokenised_ticker(&self, step: u64) -> Result<Pubkey> {
        Ok(self.step(step)?.ticker)
    }
}
