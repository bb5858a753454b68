use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCodes {
    /***********************************|
    |              Admin                |
    |__________________________________*/
    #[msg(VAULT_ONLY_OWNER)]
    VaultOnlyOwner,

    #[msg(VAULT_INVALID_TREASURY)]
    VaultInvalidTreasury,

    #[msg(VAULT_INVALID_FEE)]
    VaultInvalidFee,

    #[msg(VAULT_INVALID_LENDING_MARKET)]
    VaultInvalidLendingMarket,

    /***********************************|
    |              Ticks                |
    |__________________________________*/
    #[msg(VAULT_INVALID_TICK)]
    VaultInvalidTick,

    #[msg(VAULT_PUSH_TICK_OVERLAP)]
    VaultPushTickOverlap,

    #[msg(VAULT_SHIFT_TICK_OVERLAP)]
    VaultShiftTickOverlap,

    #[msg(VAULT_TICK_NOT_EMPTY)]
    VaultTickNotEmpty,

    #[msg(VAULT_TICK_INDEX_OUT_OF_RANGE)]
    VaultTickIndexOutOfRange,

    /***********************************|
    |              User                 |
    |__________________________________*/
    #[msg(VAULT_ORACLE_ERROR)]
    VaultOracleError,

    #[msg(VAULT_POOL_DISABLED)]
    VaultPoolDisabled,

    #[msg(VAULT_INVALID_TOKEN)]
    VaultInvalidToken,

    #[msg(VAULT_DEPOSIT_ZERO)]
    VaultDepositZero,

    #[msg(VAULT_INVALID_WETH)]
    VaultInvalidWeth,

    #[msg(VAULT_MAX_CAP_REACHED)]
    VaultMaxCapReached,

    #[msg(VAULT_NO_LIQUIDITY_ADDED)]
    VaultNoLiquidityAdded,

    #[msg(VAULT_INSUFFICIENT_BALANCE)]
    VaultInsufficientBalance,

    #[msg(VAULT_WITHDRAW_ZERO)]
    VaultWithdrawZero,
}
