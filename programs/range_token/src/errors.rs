use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCodes {
    /***********************************|
    |           Range Token             |
    |__________________________________*/
    #[msg(RANGE_INVALID_ORACLE)]
    RangeInvalidOracle,

    #[msg(RANGE_ALREADY_INITIALIZED)]
    RangeAlreadyInitialized,

    #[msg(RANGE_NOT_INITIALIZED)]
    RangeNotInitialized,

    #[msg(RANGE_UNALLOWED_CALLER)]
    RangeUnallowedCaller,

    #[msg(RANGE_INVALID_BOUNDS)]
    RangeInvalidBounds,

    #[msg(RANGE_INVALID_ASSETS)]
    RangeInvalidAssets,

    #[msg(RANGE_INVALID_INIT_AMOUNTS)]
    RangeInvalidInitAmounts,

    #[msg(RANGE_CLOSED)]
    RangeClosed,

    #[msg(RANGE_ZERO_DEPOSIT)]
    RangeZeroDeposit,

    #[msg(RANGE_ZERO_WITHDRAW)]
    RangeZeroWithdraw,

    #[msg(RANGE_INSUFFICIENT_BALANCE)]
    RangeInsufficientBalance,

    #[msg(RANGE_SLIPPAGE)]
    RangeSlippage,

    #[msg(RANGE_CLAIM_FEE_SLIPPAGE)]
    RangeClaimFeeSlippage,

    #[msg(RANGE_INVALID_ORACLE_PRICE)]
    RangeInvalidOraclePrice,

    #[msg(RANGE_UNKNOWN_TOKEN)]
    RangeUnknownToken,

    #[msg(RANGE_INVALID_TREASURY)]
    RangeInvalidTreasury,

    /***********************************|
    |              Beacon               |
    |__________________________________*/
    #[msg(RANGE_BEACON_ONLY_OWNER)]
    RangeBeaconOnlyOwner,

    #[msg(RANGE_BEACON_INVALID_VERSION)]
    RangeBeaconInvalidVersion,

    #[msg(RANGE_BEACON_ALREADY_EXISTS)]
    RangeBeaconAlreadyExists,

    #[msg(RANGE_BEACON_NOT_FOUND)]
    RangeBeaconNotFound,
}
