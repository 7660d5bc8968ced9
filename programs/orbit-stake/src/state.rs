use anchor_lang::prelude::*;

use crate::constants::RING_COUNT;
use crate::error::OrbitError;

// ─── Ring ──────────────────────────────────────────────────────────────────
// One staking compartment: immutable config half (set at initialize, never
// touched again) and running ledger half.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ring {
    /// Informational target allocation weight — never enforced
    pub weight_bps: u16,          // 2
    /// Fraction of injected yield routed to the fee recipient
    pub fee_bps: u16,             // 2
    /// Seconds a position must sit after its last top-up before exit
    pub min_lock_secs: i64,       // 8
    /// 1e18-scale multiplier applied to net yield before distribution
    pub yield_amplifier: u128,    // 16
    /// Principal currently attributed to this ring
    pub total_assets: u64,        // 8
    /// Shares outstanding against that principal
    pub total_shares: u64,        // 8
    /// Cumulative net-yield-per-share, 1e18 fixed-point, never decreases
    pub acc_per_share: u128,      // 16
    /// Timestamp of the most recent yield injection
    pub last_update_time: i64,    // 8
}

impl Ring {
    // 2+2+8+16+8+8+16+8 = 68
    pub const LEN: usize = 68;
}

// ─── Vault ─────────────────────────────────────────────────────────────────
// The whole ledger: one vault per stake mint, five rings inside it, all
// assets pooled in a single PDA-owned token account.
#[account]
pub struct Vault {
    pub admin: Pubkey,                 // 32
    /// Token account receiving injection fees and swept surplus
    pub fee_recipient: Pubkey,         // 32
    pub stake_mint: Pubkey,            // 32
    /// Token account holding every ring's assets (PDA authority)
    pub stake_vault: Pubkey,           // 32
    pub authority_bump: u8,            // 1
    /// Gates deposit / inject_yield / migrate_ring; exits stay open
    pub paused: bool,                  // 1
    /// Single-flight reentrancy flag, held for the span of one instruction
    pub locked: bool,                  // 1
    pub rings: [Ring; RING_COUNT],     // 5 * 68 = 340
    pub bump: u8,                      // 1
}

impl Vault {
    // 8 discriminator + 32*4 + 1 + 1 + 1 + 340 + 1 = 480
    pub const LEN: usize = 480;

    /// Bounds-checked ring access. Every instruction validates its ring
    /// index through here before touching any state.
    pub fn ring(&self, index: u8) -> Result<&Ring> {
        self.rings
            .get(index as usize)
            .ok_or_else(|| error!(OrbitError::InvalidRing))
    }

    pub fn ring_mut(&mut self, index: u8) -> Result<&mut Ring> {
        self.rings
            .get_mut(index as usize)
            .ok_or_else(|| error!(OrbitError::InvalidRing))
    }

    /// Principal recorded across all rings. The stake vault's balance in
    /// excess of this is surplus: injected yield not yet paid out, plus
    /// donations and rounding dust.
    pub fn total_recorded_assets(&self) -> u64 {
        self.rings
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.total_assets))
    }

    /// Take the single-flight flag. Every mutating instruction calls this
    /// first; a nested mutating call finds the flag held and aborts.
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.locked, OrbitError::ReentrantCall);
        self.locked = true;
        Ok(())
    }

    /// Drop the single-flight flag before returning.
    pub fn exit(&mut self) {
        self.locked = false;
    }
}

// ─── Position ──────────────────────────────────────────────────────────────
// One staker's claim in one ring. Created lazily on first deposit or
// inbound migration; a full exit leaves a zeroed tombstone.
#[account]
pub struct Position {
    pub owner: Pubkey,            // 32
    pub vault: Pubkey,            // 32
    pub ring: u8,                 // 1
    pub shares: u64,              // 8
    /// Lock anchor: stamped on deposit and inbound migration only.
    /// Partial withdrawals leave it alone.
    pub last_top_up_time: i64,    // 8
    /// shares * acc_per_share / SCALE at the last settle, plain units
    pub reward_debt: u128,        // 16
    pub bump: u8,                 // 1
}

impl Position {
    // 8 discriminator + 32+32+1+8+8+16+1 = 106
    pub const LEN: usize = 106;

    /// Whether the lock window anchored at `last_top_up_time` has elapsed.
    pub fn unlocked(&self, min_lock_secs: i64, now: i64) -> bool {
        now >= self.last_top_up_time.saturating_add(min_lock_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vault_fixture() -> Vault {
        Vault {
            admin: Pubkey::new_unique(),
            fee_recipient: Pubkey::new_unique(),
            stake_mint: Pubkey::new_unique(),
            stake_vault: Pubkey::new_unique(),
            authority_bump: 255,
            paused: false,
            locked: false,
            rings: [Ring::default(); RING_COUNT],
            bump: 254,
        }
    }

    #[test]
    fn ring_index_is_bounds_checked() {
        let vault = vault_fixture();
        assert!(vault.ring(0).is_ok());
        assert!(vault.ring(4).is_ok());
        assert!(vault.ring(5).is_err());
        assert!(vault.ring(u8::MAX).is_err());
    }

    #[test]
    fn entry_flag_rejects_nested_entry() {
        let mut vault = vault_fixture();
        vault.enter().unwrap();
        assert!(vault.enter().is_err());
        vault.exit();
        assert!(vault.enter().is_ok());
    }

    #[test]
    fn recorded_assets_sum_across_rings() {
        let mut vault = vault_fixture();
        vault.rings[0].total_assets = 100;
        vault.rings[3].total_assets = 250;
        assert_eq!(vault.total_recorded_assets(), 350);
    }

    #[test]
    fn lock_boundary_is_inclusive() {
        let pos = Position {
            owner: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            ring: 0,
            shares: 1,
            last_top_up_time: 1_000,
            reward_debt: 0,
            bump: 255,
        };
        assert!(!pos.unlocked(60, 1_059));
        assert!(pos.unlocked(60, 1_060));
        assert!(pos.unlocked(60, 1_061));
    }

    #[test]
    fn declared_lens_match_serialized_size() {
        let vault = vault_fixture();
        let mut buf: Vec<u8> = Vec::new();
        vault.serialize(&mut buf).unwrap();
        assert_eq!(buf.len() + 8, Vault::LEN);

        let pos = Position {
            owner: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            ring: 2,
            shares: 42,
            last_top_up_time: 7,
            reward_debt: 9,
            bump: 253,
        };
        let mut buf: Vec<u8> = Vec::new();
        pos.serialize(&mut buf).unwrap();
        assert_eq!(buf.len() + 8, Position::LEN);
    }
}
