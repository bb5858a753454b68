use anchor_lang::prelude::*;

use library::invokes::{ConcentratedAmm, PriceOracle};
use library::math::{safe_math::*, u256::mul_div};
use library::token::{transfer_if_positive, TokenLedger};

use crate::{
    constants::{
        COMPOUND_FEE_MULTIPLIER, COMPOUND_MIN_VALUE_PERCENT, HUNDRED_PERCENT, VALUE_TO_SHARES,
    },
    errors::ErrorCodes,
    events::*,
    state::*,
};

impl RangeToken {
    /// First funding of the position, shares minted equal the deposited USD value.
    ///
    /// A dormant token (every share withdrawn) can be funded again the same way.
    pub fn init(
        &mut self,
        tokens: &mut dyn TokenLedger,
        amm: &mut dyn ConcentratedAmm,
        oracle: &dyn PriceOracle,
        signer: Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        if !self.is_initialized {
            return Err(error!(ErrorCodes::RangeNotInitialized));
        }

        if signer != self.initializer {
            return Err(error!(ErrorCodes::RangeUnallowedCaller));
        }

        if self.total_shares > 0 {
            return Err(error!(ErrorCodes::RangeAlreadyInitialized));
        }

        let sqrt_price = self.pool_sqrt_price(amm)?;
        let liquidity = self.liquidity_for(sqrt_price, amount0, amount1)?;
        if liquidity == 0 {
            return Err(error!(ErrorCodes::RangeInvalidInitAmounts));
        }

        let (used0, used1) = amm.mint(tokens, self.position_key(), liquidity, &signer)?;

        let (base_price, quote_price) = self.resolve_prices(oracle, 0, 0)?;
        let shares = self
            .value_of_amounts(used0, used1, base_price, quote_price)?
            .safe_mul(VALUE_TO_SHARES)?;
        if shares == 0 {
            return Err(error!(ErrorCodes::RangeInvalidInitAmounts));
        }

        self.liquidity = liquidity;
        self.total_shares = shares;
        tokens.mint_to(&self.key, &self.key, &signer, shares)?;

        emit!(LogInitRange {
            range_token: self.key,
            signer,
            liquidity,
            shares,
            amount0: used0,
            amount1: used1,
        });

        Ok(shares)
    }

    /// Adds liquidity at the pool price. The AMM only pulls what the liquidity
    /// needs, the remainder stays with the signer.
    pub fn deposit(
        &mut self,
        tokens: &mut dyn TokenLedger,
        amm: &mut dyn ConcentratedAmm,
        oracle: &dyn PriceOracle,
        signer: Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        if self.total_shares == 0 {
            return Err(error!(ErrorCodes::RangeClosed));
        }

        self.claim_fee(tokens, amm, oracle)?;

        let sqrt_price = self.pool_sqrt_price(amm)?;
        let new_liquidity = self.liquidity_for(sqrt_price, amount0, amount1)?;
        if new_liquidity == 0 {
            return Err(error!(ErrorCodes::RangeZeroDeposit));
        }

        let accounted = self.liquidity.safe_add(self.fee_liquidity(sqrt_price)?)?;
        let shares = mul_div(self.total_shares, new_liquidity, accounted)?;
        if shares == 0 {
            return Err(error!(ErrorCodes::RangeZeroDeposit));
        }

        self.liquidity = self.liquidity.safe_add(new_liquidity)?;
        self.total_shares = self.total_shares.safe_add(shares)?;

        let (used0, used1) = amm.mint(tokens, self.position_key(), new_liquidity, &signer)?;
        tokens.mint_to(&self.key, &self.key, &signer, shares)?;

        emit!(LogDeposit {
            range_token: self.key,
            signer,
            liquidity: new_liquidity,
            shares,
            amount0: used0,
            amount1: used1,
        });

        Ok(shares)
    }

    /// Burns `shares` and pays out principal plus their part of accrued fees.
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw(
        &mut self,
        tokens: &mut dyn TokenLedger,
        amm: &mut dyn ConcentratedAmm,
        oracle: &dyn PriceOracle,
        signer: Pubkey,
        shares: u128,
        min_amount0: u128,
        min_amount1: u128,
    ) -> Result<(u128, u128)> {
        if shares == 0 {
            return Err(error!(ErrorCodes::RangeZeroWithdraw));
        }

        if tokens.balance_of(&self.key, &signer) < shares {
            return Err(error!(ErrorCodes::RangeInsufficientBalance));
        }

        self.claim_fee(tokens, amm, oracle)?;

        let (removed_liquidity, fee0, fee1) = self.share_of(shares)?;

        self.liquidity = self.liquidity.safe_sub(removed_liquidity)?;
        self.fee0 = self.fee0.safe_sub(fee0)?;
        self.fee1 = self.fee1.safe_sub(fee1)?;
        self.total_shares = self.total_shares.safe_sub(shares)?;

        tokens.burn(&self.key, &self.key, &signer, shares)?;

        let (principal0, principal1) = if removed_liquidity > 0 {
            amm.burn(tokens, self.position_key(), removed_liquidity, &self.key)?
        } else {
            (0, 0)
        };

        let amount0 = principal0.safe_add(fee0)?;
        let amount1 = principal1.safe_add(fee1)?;
        if amount0 < min_amount0 || amount1 < min_amount1 {
            return Err(error!(ErrorCodes::RangeSlippage));
        }

        transfer_if_positive(tokens, &self.base_asset, &self.key, &signer, amount0)?;
        transfer_if_positive(tokens, &self.quote_asset, &self.key, &signer, amount1)?;

        emit!(LogWithdraw {
            range_token: self.key,
            signer,
            shares,
            amount0,
            amount1,
        });

        Ok((amount0, amount1))
    }

    /// Collects AMM fees, pays the treasury cut and compounds once fees are large enough.
    pub fn claim_fee(
        &mut self,
        tokens: &mut dyn TokenLedger,
        amm: &mut dyn ConcentratedAmm,
        oracle: &dyn PriceOracle,
    ) -> Result<()> {
        let position = amm.position(&self.position_key());
        if position.tokens_owed0 == 0 && position.tokens_owed1 == 0 {
            return Ok(());
        }

        let (collected0, collected1) = amm.collect(tokens, self.position_key(), &self.key)?;

        let percent = self.treasury_fee_percent as u128;
        let treasury_fee0 = mul_div(collected0, percent, HUNDRED_PERCENT)?;
        let treasury_fee1 = mul_div(collected1, percent, HUNDRED_PERCENT)?;

        transfer_if_positive(tokens, &self.base_asset, &self.key, &self.treasury, treasury_fee0)?;
        transfer_if_positive(tokens, &self.quote_asset, &self.key, &self.treasury, treasury_fee1)?;

        let fee0 = collected0.safe_sub(treasury_fee0)?;
        let fee1 = collected1.safe_sub(treasury_fee1)?;
        self.fee0 = self.fee0.safe_add(fee0)?;
        self.fee1 = self.fee1.safe_add(fee1)?;

        let compounded_liquidity = self.compound_fees(tokens, amm, oracle)?;

        emit!(LogClaimFee {
            range_token: self.key,
            fee0,
            fee1,
            treasury_fee0,
            treasury_fee1,
            compounded_liquidity,
        });

        Ok(())
    }

    /// Moves accrued fees into the position once both exceed 1% of the principal.
    fn compound_fees(
        &mut self,
        tokens: &mut dyn TokenLedger,
        amm: &mut dyn ConcentratedAmm,
        oracle: &dyn PriceOracle,
    ) -> Result<u128> {
        let sqrt_price = self.pool_sqrt_price(amm)?;
        let (principal0, principal1) = self.amounts_for(sqrt_price, self.liquidity, false)?;

        if self.fee0.safe_mul(COMPOUND_FEE_MULTIPLIER)? <= principal0
            || self.fee1.safe_mul(COMPOUND_FEE_MULTIPLIER)? <= principal1
        {
            return Ok(0);
        }

        let added_liquidity = self.liquidity_for(sqrt_price, self.fee0, self.fee1)?;
        if added_liquidity == 0 {
            return Ok(0);
        }

        // Value the pool would take against what the liquidity is worth at the oracle
        let (base_price, quote_price) = self.resolve_prices(oracle, 0, 0)?;
        let (spent0, spent1) = self.amounts_for(sqrt_price, added_liquidity, true)?;
        let spent_value = self.value_of_amounts(spent0, spent1, base_price, quote_price)?;

        let oracle_sqrt_price = self.sqrt_price_at(base_price, quote_price)?;
        let (fair0, fair1) = self.amounts_for(oracle_sqrt_price, added_liquidity, false)?;
        let added_value = self.value_of_amounts(fair0, fair1, base_price, quote_price)?;

        if added_value.safe_mul(HUNDRED_PERCENT)?
            < spent_value.safe_mul(COMPOUND_MIN_VALUE_PERCENT)?
        {
            return Err(error!(ErrorCodes::RangeClaimFeeSlippage));
        }

        let (used0, used1) = amm.mint(tokens, self.position_key(), added_liquidity, &self.key)?;

        self.fee0 = self.fee0.safe_sub(used0)?;
        self.fee1 = self.fee1.safe_sub(used1)?;
        self.liquidity = self.liquidity.safe_add(added_liquidity)?;

        msg!("Compounded {} liquidity into {}", added_liquidity, self.key);

        Ok(added_liquidity)
    }
}
