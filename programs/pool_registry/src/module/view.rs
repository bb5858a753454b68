use anchor_lang::prelude::*;

use crate::{errors::ErrorCodes, state::*};

impl PoolRegistry {
    pub fn get_pools_length(&self) -> u64 {
        self.pools.len() as u64
    }

    pub fn pools(&self, pool_id: u64) -> Result<&PoolInfo> {
        self.pools
            .get(pool_id as usize)
            .ok_or_else(|| error!(ErrorCodes::RegistryInvalidPoolId))
    }

    pub fn treasury(&self) -> Pubkey {
        self.treasury
    }
}
