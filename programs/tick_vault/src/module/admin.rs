use anchor_lang::prelude::*;

use library::token::TokenLedger;
use pool_registry::PoolRegistry;
use range_token::{CallContext, RangeToken, RangeTokens};

use crate::{
    constants::{DEFAULT_BASE_FEE_X4, DEFAULT_TVL_CAP, MAX_BASE_FEE_X4, VAULT_SHARE_DECIMALS},
    errors::ErrorCodes,
    events::*,
    state::*,
};

pub struct InitTickVaultParams {
    pub treasury: Pubkey,
    pub pool_id: u64,
    pub pool: Pubkey,
    pub name: String,
    pub symbol: String,
    pub wrapped_native: Pubkey,
}

impl TickVault {
    /// Reads lending market and assets from the registry pool and creates the share mint.
    pub fn new(
        owner: Pubkey,
        key: Pubkey,
        tokens: &mut dyn TokenLedger,
        registry: &PoolRegistry,
        params: InitTickVaultParams,
    ) -> Result<Self> {
        if params.treasury == Pubkey::default() {
            return Err(error!(ErrorCodes::VaultInvalidTreasury));
        }

        let pool_info = registry.pools(params.pool_id)?;

        let base_decimals = tokens.decimals(&pool_info.token0)?;
        let quote_decimals = tokens.decimals(&pool_info.token1)?;
        tokens.create_mint(key, VAULT_SHARE_DECIMALS, key)?;

        Ok(Self {
            key,
            owner,
            treasury: params.treasury,
            pool_id: params.pool_id,
            lending_market: pool_info.lending_market,
            pool: params.pool,
            base_asset: pool_info.token0,
            quote_asset: pool_info.token1,
            base_decimals,
            quote_decimals,
            wrapped_native: params.wrapped_native,
            ticks: Vec::new(),
            active_tick_index: 0,
            base_fee_x4: DEFAULT_BASE_FEE_X4,
            is_enabled: true,
            tvl_cap: DEFAULT_TVL_CAP,
            name: params.name,
            symbol: params.symbol,
        })
    }

    fn verify_owner(&self, signer: &Pubkey) -> Result<()> {
        if *signer != self.owner {
            return Err(error!(ErrorCodes::VaultOnlyOwner));
        }
        Ok(())
    }

    pub fn set_enabled(&mut self, signer: Pubkey, is_enabled: bool) -> Result<()> {
        self.verify_owner(&signer)?;
        self.is_enabled = is_enabled;
        emit!(LogSetEnabled { is_enabled });
        Ok(())
    }

    pub fn set_tvl_cap(&mut self, signer: Pubkey, tvl_cap: u128) -> Result<()> {
        self.verify_owner(&signer)?;
        self.tvl_cap = tvl_cap;
        emit!(LogSetTvlCap { tvl_cap });
        Ok(())
    }

    pub fn set_treasury(&mut self, signer: Pubkey, treasury: Pubkey) -> Result<()> {
        self.verify_owner(&signer)?;
        if treasury == Pubkey::default() {
            return Err(error!(ErrorCodes::VaultInvalidTreasury));
        }
        self.treasury = treasury;
        emit!(LogSetTreasury { treasury });
        Ok(())
    }

    pub fn set_base_fee(&mut self, signer: Pubkey, base_fee_x4: u16) -> Result<()> {
        self.verify_owner(&signer)?;
        if base_fee_x4 > MAX_BASE_FEE_X4 {
            return Err(error!(ErrorCodes::VaultInvalidFee));
        }
        self.base_fee_x4 = base_fee_x4;
        emit!(LogSetBaseFee { base_fee_x4 });
        Ok(())
    }

    fn checked_tick<'r>(&self, ranges: &'r RangeTokens, tick: &Pubkey) -> Result<&'r RangeToken> {
        let range_token = ranges
            .find(tick)
            .ok_or_else(|| error!(ErrorCodes::VaultInvalidTick))?;
        if range_token.base_asset != self.base_asset || range_token.quote_asset != self.quote_asset
        {
            return Err(error!(ErrorCodes::VaultInvalidTick));
        }
        Ok(range_token)
    }

    /// Appends a tick above the current highest one.
    pub fn push_tick(&mut self, ranges: &RangeTokens, signer: Pubkey, tick: Pubkey) -> Result<()> {
        self.verify_owner(&signer)?;
        let range_token = self.checked_tick(ranges, &tick)?;

        if let Some(last) = self.ticks.last() {
            if range_token.lower_price < ranges.get(last)?.upper_price {
                return Err(error!(ErrorCodes::VaultPushTickOverlap));
            }
        }

        self.ticks.push(tick);

        emit!(LogPushTick {
            tick,
            index: (self.ticks.len() - 1) as u64,
        });

        Ok(())
    }

    /// Prepends a tick below the current lowest one, the active tick stays the same.
    pub fn shift_tick(&mut self, ranges: &RangeTokens, signer: Pubkey, tick: Pubkey) -> Result<()> {
        self.verify_owner(&signer)?;
        let range_token = self.checked_tick(ranges, &tick)?;

        if let Some(first) = self.ticks.first() {
            if range_token.upper_price > ranges.get(first)?.lower_price {
                return Err(error!(ErrorCodes::VaultShiftTickOverlap));
            }
            self.active_tick_index += 1;
        }

        self.ticks.insert(0, tick);

        emit!(LogShiftTick { tick });

        Ok(())
    }

    /// Replaces an empty tick in place, keeping the ordering with its neighbours.
    pub fn modify_tick(
        &mut self,
        ctx: &CallContext,
        signer: Pubkey,
        tick: Pubkey,
        index: u64,
    ) -> Result<()> {
        self.verify_owner(&signer)?;

        let position = index as usize;
        let current = *self
            .ticks
            .get(position)
            .ok_or_else(|| error!(ErrorCodes::VaultTickIndexOutOfRange))?;

        if ctx.lending.supply_balance(&current, &self.key) > 0 {
            return Err(error!(ErrorCodes::VaultTickNotEmpty));
        }

        let range_token = self.checked_tick(&*ctx.ranges, &tick)?;

        if position > 0 {
            let previous = ctx.ranges.get(&self.ticks[position - 1])?;
            if range_token.lower_price < previous.upper_price {
                return Err(error!(ErrorCodes::VaultPushTickOverlap));
            }
        }

        if let Some(next) = self.ticks.get(position + 1) {
            if range_token.upper_price > ctx.ranges.get(next)?.lower_price {
                return Err(error!(ErrorCodes::VaultShiftTickOverlap));
            }
        }

        self.ticks[position] = tick;

        emit!(LogModifyTick { tick, index });

        Ok(())
    }
}
