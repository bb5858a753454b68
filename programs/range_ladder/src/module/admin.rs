use anchor_lang::prelude::*;

use library::math::safe_math::*;
use library::token::{transfer_if_positive, TokenLedger};
use range_token::{instructions as range_ix, CallContext, InitializeRangeParams};

use crate::{
    constants::TICKER_WIDTH_DIVISOR, errors::ErrorCodes, events::*, state::*,
};

impl RangeLadder {
    pub fn new(
        owner: Pubkey,
        key: Pubkey,
        lending_market: Pubkey,
        treasury: Pubkey,
        base_asset: Pubkey,
        quote_asset: Pubkey,
    ) -> Result<Self> {
        if [owner, lending_market, treasury, base_asset, quote_asset].contains(&Pubkey::default())
        {
            return Err(error!(ErrorCodes::LadderInvalidAddress));
        }

        if base_asset >= quote_asset {
            return Err(error!(ErrorCodes::LadderInvalidAddress));
        }

        Ok(Self {
            key,
            owner,
            lending_market,
            treasury,
            base_asset,
            quote_asset,
            steps: Vec::new(),
        })
    }

    pub(crate) fn verify_owner(&self, signer: &Pubkey) -> Result<()> {
        if *signer != self.owner {
            return Err(error!(ErrorCodes::LadderOnlyOwner));
        }
        Ok(())
    }

    /// Creates the range token of a new step and the ticker at its middle.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_range(
        &mut self,
        ctx: &mut CallContext,
        signer: Pubkey,
        lower_price: u128,
        upper_price: u128,
        lower_label: String,
        upper_label: String,
        token_template: Pubkey,
    ) -> Result<(Pubkey, Pubkey)> {
        self.verify_owner(&signer)?;

        if token_template == Pubkey::default() || ctx.ranges.beacon(&token_template).is_none() {
            return Err(error!(ErrorCodes::LadderInvalidBeacon));
        }

        if lower_price == 0 || lower_price >= upper_price {
            return Err(error!(ErrorCodes::LadderRangeInvalid));
        }

        if self
            .steps
            .iter()
            .any(|step| step.overlaps(lower_price, upper_price))
        {
            return Err(error!(ErrorCodes::LadderRangeOverlap));
        }

        let mid = lower_price.safe_add(upper_price)?.safe_div(2)?;
        let ticker_upper = mid.safe_add(mid.safe_div(TICKER_WIDTH_DIVISOR)?)?;

        let pool = ctx.amm.get_pool(&self.base_asset, &self.quote_asset)?;
        let params = InitializeRangeParams {
            oracle: ctx.oracle.key(),
            pool,
            beacon: token_template,
            treasury: self.treasury,
            base_asset: self.base_asset,
            quote_asset: self.quote_asset,
            lower_price,
            upper_price,
            lower_label,
            upper_label,
            is_ticker: false,
        };

        let range_token = self.range_token_address(lower_price, upper_price);
        let ticker = self.ticker_address(lower_price, upper_price);

        range_ix::initialize(ctx, range_token, self.key, params.clone())?;
        range_ix::initialize(
            ctx,
            ticker,
            self.key,
            InitializeRangeParams {
                lower_price: mid,
                upper_price: ticker_upper,
                is_ticker: true,
                ..params
            },
        )?;

        self.steps.push(Step {
            lower_price,
            upper_price,
            range_token,
            ticker,
        });

        emit!(LogGenerateRange {
            step: (self.steps.len() - 1) as u64,
            lower_price,
            upper_price,
            range_token,
            ticker,
        });

        Ok((range_token, ticker))
    }

    /// First funding of a step token. The ladder initializes, the owner keeps the shares.
    pub fn init_range(
        &mut self,
        ctx: &mut CallContext,
        signer: Pubkey,
        token: Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        self.verify_owner(&signer)?;

        if !self.contains_token(&token) {
            return Err(error!(ErrorCodes::LadderInvalidRange));
        }

        let idle = self.idle_balances(ctx.tokens);
        transfer_if_positive(ctx.tokens, &self.base_asset, &signer, &self.key, amount0)?;
        transfer_if_positive(ctx.tokens, &self.quote_asset, &signer, &self.key, amount1)?;

        let shares = range_ix::init(ctx, &token, self.key, amount0, amount1)?;

        self.refund_since(ctx.tokens, idle, &signer)?;
        ctx.tokens.transfer(&token, &self.key, &signer, shares)?;

        emit!(LogInitStepToken {
            range_token: token,
            shares,
        });

        Ok(shares)
    }

    pub(crate) fn idle_balances(&self, tokens: &dyn TokenLedger) -> (u128, u128) {
        (
            tokens.balance_of(&self.base_asset, &self.key),
            tokens.balance_of(&self.quote_asset, &self.key),
        )
    }

    /// Sends back whatever the ladder holds above `idle`.
    pub(crate) fn refund_since(
        &self,
        tokens: &mut dyn TokenLedger,
        idle: (u128, u128),
        to: &Pubkey,
    ) -> Result<()> {
        let (now0, now1) = self.idle_balances(tokens);
        transfer_if_positive(tokens, &self.base_asset, &self.key, to, now0.safe_sub(idle.0)?)?;
        transfer_if_positive(tokens, &self.quote_asset, &self.key, to, now1.safe_sub(idle.1)?)?;
        Ok(())
    }
}
