use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use library::invokes::ConcentratedAmm;
use library::math::{
    liquidity::amounts_for_liquidity,
    safe_math::*,
    sqrt_price::{quote_token0_in_token1, quote_token1_in_token0},
    u256::{mul_div, mul_div_ceil, mul_div_u256_ceil, u256_to_u128, U256, Q64},
};
use library::structs::{PositionInfo, PositionKey};
use library::token::TokenLedger;

use super::{errors::MockErrorCodes, ledger::MockLedger};

pub const DEFAULT_POOL_FEE_BPS: u128 = 5;
const FEE_DENOMINATOR: u128 = 10_000;

/// Fee on `amount_in`, rounded in favour of the pool.
fn swap_fee(amount_in: u128, fee_bps: u128) -> Result<u128> {
    Ok(amount_in.safe_mul(fee_bps)?.safe_div_ceil(FEE_DENOMINATOR)?)
}

#[derive(Clone, Debug)]
pub struct MockPool {
    pub key: Pubkey,
    pub token0: Pubkey,
    pub token1: Pubkey,
    pub sqrt_price_q64: u128,
    pub fee_bps: u128,
}

/// Concentrated liquidity AMM that trades at the pool price without impact.
///
/// Each pool custodies its tokens under its own key. Swap fees are credited to
/// the positions whose band contains the pool price, pro rata to liquidity.
#[derive(Clone, Debug)]
pub struct MockAmm {
    pub key: Pubkey,
    pools: BTreeMap<Pubkey, MockPool>,
    positions: BTreeMap<PositionKey, PositionInfo>,
}

impl MockAmm {
    pub fn new() -> Self {
        Self {
            key: Pubkey::new_unique(),
            pools: BTreeMap::new(),
            positions: BTreeMap::new(),
        }
    }

    /// Creates a pool for the pair, ordering the tokens by address.
    pub fn create_pool(&mut self, token_a: Pubkey, token_b: Pubkey, sqrt_price_q64: u128) -> Pubkey {
        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let key = Pubkey::new_unique();
        self.pools.insert(
            key,
            MockPool {
                key,
                token0,
                token1,
                sqrt_price_q64,
                fee_bps: DEFAULT_POOL_FEE_BPS,
            },
        );
        key
    }

    pub fn set_sqrt_price(&mut self, pool: &Pubkey, sqrt_price_q64: u128) -> Result<()> {
        self.pool_mut(pool)?.sqrt_price_q64 = sqrt_price_q64;
        Ok(())
    }

    /// Credits `fee0`/`fee1` to a position as if swaps had paid them.
    pub fn accrue_fees(
        &mut self,
        tokens: &mut MockLedger,
        position: &PositionKey,
        fee0: u128,
        fee1: u128,
    ) -> Result<()> {
        let pool = self.pool(&position.pool)?.clone();
        tokens.airdrop(&pool.token0, &pool.key, fee0)?;
        tokens.airdrop(&pool.token1, &pool.key, fee1)?;

        let info = self.positions.entry(*position).or_default();
        info.tokens_owed0 += fee0;
        info.tokens_owed1 += fee1;
        Ok(())
    }

    pub fn pool(&self, pool: &Pubkey) -> Result<&MockPool> {
        self.pools
            .get(pool)
            .ok_or_else(|| error!(MockErrorCodes::MockPoolNotFound))
    }

    fn pool_mut(&mut self, pool: &Pubkey) -> Result<&mut MockPool> {
        self.pools
            .get_mut(pool)
            .ok_or_else(|| error!(MockErrorCodes::MockPoolNotFound))
    }

    fn swap_direction(pool: &MockPool, token_in: &Pubkey) -> Result<bool> {
        if *token_in == pool.token0 {
            Ok(true)
        } else if *token_in == pool.token1 {
            Ok(false)
        } else {
            Err(error!(MockErrorCodes::MockInvalidSwapToken))
        }
    }

    /// Shares the input side fee between in-range positions.
    fn distribute_fee(&mut self, pool: &MockPool, zero_for_one: bool, fee: u128) -> Result<()> {
        let in_range = |key: &PositionKey| {
            key.pool == pool.key
                && key.sqrt_lower <= pool.sqrt_price_q64
                && pool.sqrt_price_q64 < key.sqrt_upper
        };

        let active_liquidity = self
            .positions
            .iter()
            .filter(|(key, _)| in_range(key))
            .map(|(_, info)| info.liquidity)
            .sum::<u128>();
        if active_liquidity == 0 || fee == 0 {
            return Ok(());
        }

        for (_, info) in self.positions.iter_mut().filter(|(key, _)| in_range(key)) {
            let share = mul_div(fee, info.liquidity, active_liquidity)?;
            if zero_for_one {
                info.tokens_owed0 += share;
            } else {
                info.tokens_owed1 += share;
            }
        }
        Ok(())
    }
}

impl Default for MockAmm {
    fn default() -> Self {
        Self::new()
    }
}

impl ConcentratedAmm for MockAmm {
    fn key(&self) -> Pubkey {
        self.key
    }

    fn get_pool(&self, token0: &Pubkey, token1: &Pubkey) -> Result<Pubkey> {
        self.pools
            .values()
            .find(|pool| {
                (pool.token0 == *token0 && pool.token1 == *token1)
                    || (pool.token0 == *token1 && pool.token1 == *token0)
            })
            .map(|pool| pool.key)
            .ok_or_else(|| error!(MockErrorCodes::MockPoolNotFound))
    }

    fn pool_tokens(&self, pool: &Pubkey) -> Result<(Pubkey, Pubkey)> {
        let pool = self.pool(pool)?;
        Ok((pool.token0, pool.token1))
    }

    fn sqrt_price_q64(&self, pool: &Pubkey) -> Result<u128> {
        Ok(self.pool(pool)?.sqrt_price_q64)
    }

    fn position(&self, position: &PositionKey) -> PositionInfo {
        self.positions.get(position).cloned().unwrap_or_default()
    }

    fn mint(
        &mut self,
        tokens: &mut dyn TokenLedger,
        position: PositionKey,
        liquidity: u128,
        payer: &Pubkey,
    ) -> Result<(u128, u128)> {
        let pool = self.pool(&position.pool)?.clone();
        let (amount0, amount1) = amounts_for_liquidity(
            pool.sqrt_price_q64,
            position.sqrt_lower,
            position.sqrt_upper,
            liquidity,
            true,
        )?;

        if amount0 > 0 {
            tokens.transfer(&pool.token0, payer, &pool.key, amount0)?;
        }
        if amount1 > 0 {
            tokens.transfer(&pool.token1, payer, &pool.key, amount1)?;
        }

        self.positions.entry(position).or_default().liquidity += liquidity;
        tracing::trace!("minted {} liquidity for {:?}", liquidity, position);

        Ok((amount0, amount1))
    }

    fn burn(
        &mut self,
        tokens: &mut dyn TokenLedger,
        position: PositionKey,
        liquidity: u128,
        recipient: &Pubkey,
    ) -> Result<(u128, u128)> {
        let pool = self.pool(&position.pool)?.clone();
        let info = self.positions.entry(position).or_default();
        if info.liquidity < liquidity {
            return Err(error!(MockErrorCodes::MockInsufficientPositionLiquidity));
        }
        info.liquidity -= liquidity;

        let (amount0, amount1) = amounts_for_liquidity(
            pool.sqrt_price_q64,
            position.sqrt_lower,
            position.sqrt_upper,
            liquidity,
            false,
        )?;

        if amount0 > 0 {
            tokens.transfer(&pool.token0, &pool.key, recipient, amount0)?;
        }
        if amount1 > 0 {
            tokens.transfer(&pool.token1, &pool.key, recipient, amount1)?;
        }

        Ok((amount0, amount1))
    }

    fn collect(
        &mut self,
        tokens: &mut dyn TokenLedger,
        position: PositionKey,
        recipient: &Pubkey,
    ) -> Result<(u128, u128)> {
        let pool = self.pool(&position.pool)?.clone();
        let info = self.positions.entry(position).or_default();
        let (owed0, owed1) = (info.tokens_owed0, info.tokens_owed1);
        info.tokens_owed0 = 0;
        info.tokens_owed1 = 0;

        if owed0 > 0 {
            tokens.transfer(&pool.token0, &pool.key, recipient, owed0)?;
        }
        if owed1 > 0 {
            tokens.transfer(&pool.token1, &pool.key, recipient, owed1)?;
        }

        Ok((owed0, owed1))
    }

    fn get_amount_out(&self, pool: &Pubkey, token_in: &Pubkey, amount_in: u128) -> Result<u128> {
        let pool = self.pool(pool)?;
        let zero_for_one = Self::swap_direction(pool, token_in)?;

        let fee = swap_fee(amount_in, pool.fee_bps)?;
        let net = amount_in.safe_sub(fee)?;

        let amount_out = if zero_for_one {
            quote_token0_in_token1(net, pool.sqrt_price_q64)?
        } else {
            quote_token1_in_token0(net, pool.sqrt_price_q64)?
        };
        Ok(amount_out)
    }

    fn get_amount_in(&self, pool: &Pubkey, token_out: &Pubkey, amount_out: u128) -> Result<u128> {
        let pool = self.pool(pool)?;
        // Buying token1 means paying token0
        let zero_for_one = !Self::swap_direction(pool, token_out)?;

        let price = U256::from(pool.sqrt_price_q64) * U256::from(pool.sqrt_price_q64);
        let q128 = U256::from(Q64) * U256::from(Q64);
        let net = if zero_for_one {
            u256_to_u128(mul_div_u256_ceil(U256::from(amount_out), q128, price)?)?
        } else {
            u256_to_u128(mul_div_u256_ceil(U256::from(amount_out), price, q128)?)?
        };

        // Smallest input whose fee leaves `net`
        let gross = mul_div_ceil(net, FEE_DENOMINATOR, FEE_DENOMINATOR - pool.fee_bps)?;
        Ok(gross)
    }

    fn swap_exact_input(
        &mut self,
        tokens: &mut dyn TokenLedger,
        pool: &Pubkey,
        token_in: &Pubkey,
        amount_in: u128,
        min_amount_out: u128,
        payer: &Pubkey,
        recipient: &Pubkey,
    ) -> Result<u128> {
        let state = self.pool(pool)?.clone();
        let zero_for_one = Self::swap_direction(&state, token_in)?;

        let amount_out = self.get_amount_out(pool, token_in, amount_in)?;
        if amount_out < min_amount_out {
            return Err(error!(MockErrorCodes::MockSwapTooLittleReceived));
        }

        let token_out = if zero_for_one { state.token1 } else { state.token0 };
        tokens.transfer(token_in, payer, &state.key, amount_in)?;
        tokens.transfer(&token_out, &state.key, recipient, amount_out)?;

        let fee = swap_fee(amount_in, state.fee_bps)?;
        self.distribute_fee(&state, zero_for_one, fee)?;

        Ok(amount_out)
    }

    fn swap_exact_output(
        &mut self,
        tokens: &mut dyn TokenLedger,
        pool: &Pubkey,
        token_out: &Pubkey,
        amount_out: u128,
        max_amount_in: u128,
        payer: &Pubkey,
        recipient: &Pubkey,
    ) -> Result<u128> {
        let state = self.pool(pool)?.clone();
        let zero_for_one = !Self::swap_direction(&state, token_out)?;

        let amount_in = self.get_amount_in(pool, token_out, amount_out)?;
        if amount_in > max_amount_in {
            return Err(error!(MockErrorCodes::MockSwapTooMuchRequested));
        }

        let token_in = if zero_for_one { state.token0 } else { state.token1 };
        tokens.transfer(&token_in, payer, &state.key, amount_in)?;
        tokens.transfer(token_out, &state.key, recipient, amount_out)?;

        let fee = swap_fee(amount_in, state.fee_bps)?;
        self.distribute_fee(&state, zero_for_one, fee)?;

        Ok(amount_in)
    }
}
