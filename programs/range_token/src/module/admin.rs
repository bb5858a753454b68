use anchor_lang::prelude::*;

use library::invokes::ConcentratedAmm;
use library::math::sqrt_price::sqrt_price_q64_from_band_price;
use library::token::TokenLedger;

use crate::{
    constants::{DEFAULT_TREASURY_FEE_PERCENT, RANGE_TOKEN_DECIMALS},
    errors::ErrorCodes,
    events::LogInitializeRange,
    state::*,
};

impl RangeToken {
    /// Binds bounds, assets and oracle. One time, the signer becomes the initializer.
    pub fn initialize(
        &mut self,
        tokens: &mut dyn TokenLedger,
        amm: &dyn ConcentratedAmm,
        signer: Pubkey,
        params: InitializeRangeParams,
    ) -> Result<()> {
        if params.oracle == Pubkey::default() {
            return Err(error!(ErrorCodes::RangeInvalidOracle));
        }

        if self.is_initialized {
            return Err(error!(ErrorCodes::RangeAlreadyInitialized));
        }

        if params.lower_price == 0 || params.lower_price >= params.upper_price {
            return Err(error!(ErrorCodes::RangeInvalidBounds));
        }

        if params.base_asset == Pubkey::default()
            || params.quote_asset == Pubkey::default()
            || params.base_asset >= params.quote_asset
        {
            return Err(error!(ErrorCodes::RangeInvalidAssets));
        }

        // The pool must trade exactly base/quote
        let (token0, token1) = amm.pool_tokens(&params.pool)?;
        if token0 != params.base_asset || token1 != params.quote_asset {
            return Err(error!(ErrorCodes::RangeInvalidAssets));
        }

        if params.treasury == Pubkey::default() {
            return Err(error!(ErrorCodes::RangeInvalidTreasury));
        }

        let base_decimals = tokens.decimals(&params.base_asset)?;
        let quote_decimals = tokens.decimals(&params.quote_asset)?;

        // Higher band price is a lower sqrt price
        let sqrt_lower =
            sqrt_price_q64_from_band_price(params.upper_price, base_decimals, quote_decimals)?;
        let sqrt_upper =
            sqrt_price_q64_from_band_price(params.lower_price, base_decimals, quote_decimals)?;
        if sqrt_lower >= sqrt_upper {
            return Err(error!(ErrorCodes::RangeInvalidBounds));
        }

        let (name, symbol) =
            range_name_and_symbol(params.is_ticker, &params.lower_label, &params.upper_label);

        tokens.create_mint(self.key, RANGE_TOKEN_DECIMALS, self.key)?;

        self.initializer = signer;
        self.oracle = params.oracle;
        self.pool = params.pool;
        self.beacon = params.beacon;
        self.treasury = params.treasury;
        self.base_asset = params.base_asset;
        self.quote_asset = params.quote_asset;
        self.base_decimals = base_decimals;
        self.quote_decimals = quote_decimals;
        self.lower_price = params.lower_price;
        self.upper_price = params.upper_price;
        self.sqrt_lower = sqrt_lower;
        self.sqrt_upper = sqrt_upper;
        self.is_ticker = params.is_ticker;
        self.name = name;
        self.symbol = symbol;
        self.treasury_fee_percent = DEFAULT_TREASURY_FEE_PERCENT;
        self.is_initialized = true;

        emit!(LogInitializeRange {
            range_token: self.key,
            base_asset: self.base_asset,
            quote_asset: self.quote_asset,
            lower_price: self.lower_price,
            upper_price: self.upper_price,
            is_ticker: self.is_ticker,
        });

        Ok(())
    }
}
