use anchor_lang::prelude::*;

use crate::{errors::ErrorCodes, events::*, state::*};

impl PoolRegistry {
    pub fn new(owner: Pubkey, key: Pubkey, treasury: Pubkey) -> Result<Self> {
        if treasury == Pubkey::default() {
            return Err(error!(ErrorCodes::RegistryInvalidAddress));
        }

        Ok(Self {
            key,
            owner,
            treasury,
            pools: Vec::new(),
        })
    }

    fn verify_owner(&self, signer: &Pubkey) -> Result<()> {
        if *signer != self.owner {
            return Err(error!(ErrorCodes::RegistryOnlyOwner));
        }
        Ok(())
    }

    /// Registers a pool and returns its id.
    pub fn add_pool(
        &mut self,
        signer: Pubkey,
        lending_market: Pubkey,
        token0: Pubkey,
        token1: Pubkey,
        amm_router: Pubkey,
    ) -> Result<u64> {
        self.verify_owner(&signer)?;

        if [lending_market, token0, token1, amm_router].contains(&Pubkey::default()) {
            return Err(error!(ErrorCodes::RegistryInvalidAddress));
        }

        if token0 >= token1 {
            return Err(error!(ErrorCodes::RegistryInvalidOrder));
        }

        let pool_id = self.pools.len() as u64;
        self.pools.push(PoolInfo {
            lending_market,
            token0,
            token1,
            amm_router,
            is_deprecated: false,
        });

        emit!(LogAddPool {
            pool_id,
            lending_market,
            token0,
            token1,
            amm_router,
        });

        Ok(pool_id)
    }

    /// Deprecated pools stay readable so positions can still be unwound.
    pub fn deprecate_pool(&mut self, signer: Pubkey, pool_id: u64) -> Result<()> {
        self.verify_owner(&signer)?;

        let pool = self
            .pools
            .get_mut(pool_id as usize)
            .ok_or_else(|| error!(ErrorCodes::RegistryInvalidPoolId))?;
        pool.is_deprecated = true;

        emit!(LogDeprecatePool { pool_id });

        Ok(())
    }

    pub fn set_treasury(&mut self, signer: Pubkey, treasury: Pubkey) -> Result<()> {
        self.verify_owner(&signer)?;

        if treasury == Pubkey::default() {
            return Err(error!(ErrorCodes::RegistryInvalidAddress));
        }

        self.treasury = treasury;

        emit!(LogUpdateTreasury { treasury });

        Ok(())
    }
}
