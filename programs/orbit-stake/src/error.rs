use anchor_lang::prelude::*;

#[error_code]
pub enum OrbitError {
    #[msg("Ring index out of range")]
    InvalidRing,
    #[msg("Deposit below the minimum stake")]
    BelowMinimumDeposit,
    #[msg("Ring principal cap exceeded")]
    RingCapExceeded,
    #[msg("Position holds fewer shares than requested")]
    InsufficientShares,
    #[msg("Lock period has not elapsed")]
    LockActive,
    #[msg("Caller is not the vault admin")]
    Unauthorized,
    #[msg("Mutating call re-entered the ledger")]
    ReentrantCall,
    #[msg("Vault is paused")]
    ProtocolPaused,
    #[msg("Source and destination rings are the same")]
    SameRing,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Computed shares round to zero")]
    ZeroShares,
    #[msg("Ring has outstanding shares but no recorded assets")]
    RingDrained,
    #[msg("Fee rate exceeds 10000 bps")]
    InvalidFeeRate,
    #[msg("Yield amplifier must be non-zero")]
    InvalidAmplifier,
    #[msg("Lock duration must be non-negative")]
    InvalidLockDuration,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Token account does not match vault records")]
    VaultMismatch,
    #[msg("Token mint does not match the staking mint")]
    MintMismatch,
}
