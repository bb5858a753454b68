use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCodes {
    #[msg(LADDER_ONLY_OWNER)]
    LadderOnlyOwner,

    #[msg(LADDER_INVALID_ADDRESS)]
    LadderInvalidAddress,

    #[msg(LADDER_INVALID_BEACON)]
    LadderInvalidBeacon,

    #[msg(LADDER_RANGE_INVALID)]
    LadderRangeInvalid,

    #[msg(LADDER_RANGE_OVERLAP)]
    LadderRangeOverlap,

    #[msg(LADDER_INVALID_RANGE)]
    LadderInvalidRange,

    #[msg(LADDER_INVALID_STEP)]
    LadderInvalidStep,

    #[msg(LADDER_INVALID_LENDING_MARKET)]
    LadderInvalidLendingMarket,
}
