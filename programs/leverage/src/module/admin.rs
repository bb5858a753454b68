use anchor_lang::prelude::*;

use pool_registry::{PoolInfo, PoolRegistry};
use range_token::CallContext;

use crate::{errors::ErrorCodes, state::*};

impl LeveragePositionManager {
    pub fn new(owner: Pubkey, key: Pubkey, registry: Pubkey) -> Result<Self> {
        if registry == Pubkey::default() {
            return Err(error!(ErrorCodes::LeverageInvalidAddress));
        }

        Ok(Self {
            key,
            owner,
            registry,
            in_flight: None,
        })
    }

    /// Registry entry of `pool_id`, checked against the collaborators in `ctx`.
    pub(crate) fn checked_pool(
        &self,
        ctx: &CallContext,
        registry: &PoolRegistry,
        pool_id: u64,
        allow_deprecated: bool,
    ) -> Result<PoolInfo> {
        if registry.key != self.registry {
            return Err(error!(ErrorCodes::LeverageInvalidAddress));
        }

        let info = registry.pools(pool_id)?.clone();

        if info.is_deprecated && !allow_deprecated {
            return Err(error!(ErrorCodes::LeveragePoolDeprecated));
        }

        if ctx.lending.key() != info.lending_market || ctx.amm.key() != info.amm_router {
            return Err(error!(ErrorCodes::LeverageInvalidAddress));
        }

        Ok(info)
    }

    pub(crate) fn verify_pool_asset(info: &PoolInfo, asset: &Pubkey) -> Result<()> {
        if *asset != info.token0 && *asset != info.token1 {
            return Err(error!(ErrorCodes::LeverageInvalidCollateralAsset));
        }
        Ok(())
    }
}
