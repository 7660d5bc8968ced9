//! Events for off-chain auditors and indexers. One per mutating
//! instruction, carrying the acting account, ring index(es), and amounts.

use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub admin: Pubkey,
    pub stake_mint: Pubkey,
    pub fee_recipient: Pubkey,
}

#[event]
pub struct Deposited {
    pub staker: Pubkey,
    pub ring: u8,
    pub amount: u64,
    pub shares: u64,
}

#[event]
pub struct Withdrawn {
    pub staker: Pubkey,
    pub ring: u8,
    pub shares: u64,
    pub assets: u64,
    pub yield_paid: u64,
}

#[event]
pub struct YieldInjected {
    pub funder: Pubkey,
    pub ring: u8,
    pub gross: u64,
    pub fee: u64,
    pub net: u64,
    /// false when the ring had no shares and the net amount was stranded
    /// as unattributed surplus
    pub distributed: bool,
}

#[event]
pub struct Harvested {
    pub staker: Pubkey,
    pub ring: u8,
    pub accrued: u64,
    pub paid: u64,
}

#[event]
pub struct RingMigrated {
    pub staker: Pubkey,
    pub from_ring: u8,
    pub to_ring: u8,
    pub shares_burned: u64,
    pub assets_moved: u64,
    pub shares_minted: u64,
    pub yield_paid: u64,
}

#[event]
pub struct PauseToggled {
    pub paused: bool,
}

#[event]
pub struct FeesSwept {
    pub amount: u64,
    pub recipient: Pubkey,
}
