use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCodes {
    #[msg(LEVERAGE_INVALID_ADDRESS)]
    LeverageInvalidAddress,

    #[msg(LEVERAGE_ARRAY_LENGTH_MISMATCH)]
    LeverageArrayLengthMismatch,

    #[msg(LEVERAGE_INVALID_SWAP_TOKEN)]
    LeverageInvalidSwapToken,

    #[msg(LEVERAGE_POOL_DEPRECATED)]
    LeveragePoolDeprecated,

    #[msg(LEVERAGE_CALL_UNALLOWED)]
    LeverageCallUnallowed,

    #[msg(LEVERAGE_INVALID_COLLATERAL_ASSET)]
    LeverageInvalidCollateralAsset,

    #[msg(LEVERAGE_NOT_INITIATED_BY_USER)]
    LeverageNotInitiatedByUser,

    #[msg(LEVERAGE_INSUFFICIENT_COLLATERAL)]
    LeverageInsufficientCollateral,

    #[msg(LEVERAGE_INVALID_ORACLE_PRICE)]
    LeverageInvalidOraclePrice,

    #[msg(LEVERAGE_TARGET_AMOUNT_TOO_LOW)]
    LeverageTargetAmountTooLow,

    #[msg(LEVERAGE_INVALID_SWAP_AMOUNTS)]
    LeverageInvalidSwapAmounts,

    #[msg(LEVERAGE_INSUFFICIENT_TOKEN_AMOUNT)]
    LeverageInsufficientTokenAmount,

    #[msg(LEVERAGE_SLIPPAGE_ERROR)]
    LeverageSlippageError,
}
