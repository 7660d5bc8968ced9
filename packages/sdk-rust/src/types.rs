//! Public parameter and result types.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

// ─── Initialization ──────────────────────────────────────────────────────────

/// Per-ring configuration for `initialize` — immutable once set.
#[derive(Debug, Clone, Copy)]
pub struct RingConfig {
    /// Informational target allocation weight.
    pub weight_bps: u16,
    /// Injection fee in basis points, 0..=10000.
    pub fee_bps: u16,
    /// Minimum seconds between a top-up and an exit.
    pub min_lock_secs: i64,
    /// 1e18-scale yield multiplier.
    pub yield_amplifier: u128,
}

#[derive(Debug, Clone)]
pub struct InitializeParams {
    pub stake_mint: Pubkey,
    /// Token account of the stake mint receiving fees and sweeps.
    pub fee_recipient: Pubkey,
    pub rings: [RingConfig; 5],
}

#[derive(Debug, Clone, Serialize)]
pub struct InitializeResult {
    pub signature: String,
    #[serde(with = "pubkey_str")]
    pub vault: Pubkey,
    #[serde(with = "pubkey_str")]
    pub vault_authority: Pubkey,
    #[serde(with = "pubkey_str")]
    pub stake_vault: Pubkey,
}

// ─── Transactions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct DepositParams {
    pub stake_mint: Pubkey,
    pub ring: u8,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct WithdrawParams {
    pub stake_mint: Pubkey,
    pub ring: u8,
    pub shares: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct InjectParams {
    pub stake_mint: Pubkey,
    pub ring: u8,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct MigrateParams {
    pub stake_mint: Pubkey,
    pub from_ring: u8,
    pub to_ring: u8,
    pub shares: u64,
}

/// Outcome of any single-instruction transaction.
#[derive(Debug, Clone, Serialize)]
pub struct TxResult {
    pub signature: String,
    #[serde(with = "pubkey_str")]
    pub vault: Pubkey,
}

// ─── Views ────────────────────────────────────────────────────────────────────

/// One ring's config and ledger, decorated for display.
#[derive(Debug, Clone, Serialize)]
pub struct RingInfo {
    pub index: u8,
    pub weight_bps: u16,
    pub fee_bps: u16,
    pub min_lock_secs: i64,
    /// 1e18-scale multiplier rendered as a plain factor (1.0 = no boost).
    pub yield_amplifier: f64,
    pub total_assets: u64,
    pub total_shares: u64,
    pub share_price: f64,
    pub last_update_time: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VaultInfo {
    #[serde(with = "pubkey_str")]
    pub vault: Pubkey,
    #[serde(with = "pubkey_str")]
    pub admin: Pubkey,
    #[serde(with = "pubkey_str")]
    pub stake_mint: Pubkey,
    #[serde(with = "pubkey_str")]
    pub stake_vault: Pubkey,
    #[serde(with = "pubkey_str")]
    pub fee_recipient: Pubkey,
    pub paused: bool,
    pub vault_balance: u64,
    /// Balance above recorded principal — what yield payouts draw from.
    pub surplus: u64,
    pub rings: Vec<RingInfo>,
}

/// One position with its live pending-yield and lock snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PositionInfo {
    #[serde(with = "pubkey_str")]
    pub address: Pubkey,
    pub ring: u8,
    pub shares: u64,
    /// Assets the shares would redeem at the current valuation.
    pub redeemable_assets: u64,
    pub pending_yield: u64,
    pub last_top_up_time: i64,
    pub unlock_time: i64,
}

// ─── Serde helper ─────────────────────────────────────────────────────────────

mod pubkey_str {
    use serde::Serializer;
    use solana_sdk::pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&key.to_string())
    }
}
