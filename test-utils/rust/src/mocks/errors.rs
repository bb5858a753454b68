use anchor_lang::prelude::*;

#[error_code]
pub enum MockErrorCodes {
    /***********************************|
    |            Token Ledger           |
    |__________________________________*/
    #[msg(MOCK_MINT_ALREADY_EXISTS)]
    MockMintAlreadyExists,

    #[msg(MOCK_UNKNOWN_MINT)]
    MockUnknownMint,

    #[msg(MOCK_INSUFFICIENT_BALANCE)]
    MockInsufficientBalance,

    #[msg(MOCK_INVALID_MINT_AUTHORITY)]
    MockInvalidMintAuthority,

    #[msg(MOCK_INSUFFICIENT_NATIVE_BALANCE)]
    MockInsufficientNativeBalance,

    /***********************************|
    |                AMM                |
    |__________________________________*/
    #[msg(MOCK_POOL_NOT_FOUND)]
    MockPoolNotFound,

    #[msg(MOCK_INVALID_SWAP_TOKEN)]
    MockInvalidSwapToken,

    #[msg(MOCK_SWAP_TOO_LITTLE_RECEIVED)]
    MockSwapTooLittleReceived,

    #[msg(MOCK_SWAP_TOO_MUCH_REQUESTED)]
    MockSwapTooMuchRequested,

    #[msg(MOCK_INSUFFICIENT_POSITION_LIQUIDITY)]
    MockInsufficientPositionLiquidity,

    /***********************************|
    |           Lending Market          |
    |__________________________________*/
    #[msg(MOCK_RESERVE_NOT_FOUND)]
    MockReserveNotFound,

    #[msg(MOCK_RESERVE_ALREADY_EXISTS)]
    MockReserveAlreadyExists,

    #[msg(MOCK_INSUFFICIENT_SUPPLY)]
    MockInsufficientSupply,

    #[msg(MOCK_INSUFFICIENT_RESERVE_LIQUIDITY)]
    MockInsufficientReserveLiquidity,

    #[msg(MOCK_BORROW_ALLOWANCE_NOT_ENOUGH)]
    MockBorrowAllowanceNotEnough,

    #[msg(MOCK_COLLATERAL_CANNOT_COVER_NEW_BORROW)]
    MockCollateralCannotCoverNewBorrow,

    #[msg(MOCK_HEALTH_FACTOR_LOWER_THAN_LIQUIDATION_THRESHOLD)]
    MockHealthFactorLowerThanLiquidationThreshold,

    #[msg(MOCK_HEALTH_FACTOR_NOT_BELOW_THRESHOLD)]
    MockHealthFactorNotBelowThreshold,

    #[msg(MOCK_NO_DEBT_TO_COVER)]
    MockNoDebtToCover,

    #[msg(MOCK_UNAUTHORIZED_POSITION_MANAGER)]
    MockUnauthorizedPositionManager,

    #[msg(MOCK_INVALID_FLASH_LOAN_PARAMS)]
    MockInvalidFlashLoanParams,

    #[msg(MOCK_UNKNOWN_FLASH_LOAN)]
    MockUnknownFlashLoan,
}
