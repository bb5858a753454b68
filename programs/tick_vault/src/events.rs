use anchor_lang::prelude::*;

#[event]
pub struct LogDeposit {
    pub user: Pubkey,
    pub asset: Pubkey,
    pub amount: u128,
    pub fee: u128,
    pub shares: u128,
}

#[event]
pub struct LogWithdraw {
    pub user: Pubkey,
    pub asset: Pubkey,
    pub amount: u128,
    pub fee: u128,
    pub shares: u128,
}

#[event]
pub struct LogRebalance {
    pub previous_tick_index: u64,
    pub active_tick_index: u64,
}

#[event]
pub struct LogPushTick {
    pub tick: Pubkey,
    pub index: u64,
}

#[event]
pub struct LogShiftTick {
    pub tick: Pubkey,
}

#[event]
pub struct LogModifyTick {
    pub tick: Pubkey,
    pub index: u64,
}

#[event]
pub struct LogSetEnabled {
    pub is_enabled: bool,
}

#[event]
pub struct LogSetTvlCap {
    pub tvl_cap: u128,
}

#[event]
pub struct LogSetTreasury {
    pub treasury: Pubkey,
}

#[event]
pub struct LogSetBaseFee {
    pub base_fee_x4: u16,
}
