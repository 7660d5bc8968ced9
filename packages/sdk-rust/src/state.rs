//! On-chain account deserialization.
//!
//! Parses raw account bytes for `Vault` (480 bytes) and `Position`
//! (106 bytes).  Byte offsets mirror the Anchor `#[account]` layout exactly.

use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};
use crate::instructions::RING_COUNT;

// ─── Vault ────────────────────────────────────────────────────────────────────

/// One ring's config + running ledger, as stored in the vault array.
#[derive(Debug, Clone, Copy)]
pub struct RingState {
    pub weight_bps:       u16,
    pub fee_bps:          u16,
    pub min_lock_secs:    i64,
    /// 1e18-scale yield multiplier.
    pub yield_amplifier:  u128,
    pub total_assets:     u64,
    pub total_shares:     u64,
    /// Cumulative net-yield-per-share, 1e18 fixed-point.
    pub acc_per_share:    u128,
    pub last_update_time: i64,
}

/// Deserialized `Vault` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// admin(32)  fee_recipient(32)  stake_mint(32)  stake_vault(32)
/// authority_bump(1)  paused(1)  locked(1)  rings(5 × 68)  bump(1) = 480 bytes
/// ```
#[derive(Debug, Clone)]
pub struct VaultState {
    pub admin:         Pubkey,
    pub fee_recipient: Pubkey,
    pub stake_mint:    Pubkey,
    pub stake_vault:   Pubkey,
    pub paused:        bool,
    pub rings:         [RingState; RING_COUNT],
}

impl VaultState {
    /// Principal recorded across all rings — the vault balance above this
    /// is surplus.
    pub fn total_recorded_assets(&self) -> u64 {
        self.rings
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.total_assets))
    }
}

/// Deserialize a `Vault` account from raw bytes.
pub fn parse_vault(data: &[u8]) -> Result<VaultState> {
    const EXPECTED: usize = 480;
    const RING_LEN: usize = 68;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("Vault account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }

    let mut rings = [RingState {
        weight_bps: 0,
        fee_bps: 0,
        min_lock_secs: 0,
        yield_amplifier: 0,
        total_assets: 0,
        total_shares: 0,
        acc_per_share: 0,
        last_update_time: 0,
    }; RING_COUNT];
    for (i, ring) in rings.iter_mut().enumerate() {
        let base = 139 + i * RING_LEN;
        *ring = RingState {
            weight_bps:       read_u16(data, base)?,
            fee_bps:          read_u16(data, base + 2)?,
            min_lock_secs:    read_i64(data, base + 4)?,
            yield_amplifier:  read_u128(data, base + 12)?,
            total_assets:     read_u64(data, base + 28)?,
            total_shares:     read_u64(data, base + 36)?,
            acc_per_share:    read_u128(data, base + 44)?,
            last_update_time: read_i64(data, base + 60)?,
        };
    }

    Ok(VaultState {
        admin:         read_pubkey(data, 8)?,
        fee_recipient: read_pubkey(data, 40)?,
        stake_mint:    read_pubkey(data, 72)?,
        stake_vault:   read_pubkey(data, 104)?,
        paused:        data[137] != 0,
        rings,
    })
}

// ─── Position ─────────────────────────────────────────────────────────────────

/// Deserialized `Position` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// owner(32)  vault(32)  ring(1)  shares(8)
/// last_top_up_time(8)  reward_debt(16)  bump(1) = 106 bytes
/// ```
#[derive(Debug, Clone)]
pub struct PositionState {
    pub owner:            Pubkey,
    pub vault:            Pubkey,
    pub ring:             u8,
    pub shares:           u64,
    /// Lock anchor: stamped on the most recent deposit or inbound migration.
    pub last_top_up_time: i64,
    /// shares × acc_per_share / 1e18 at the last settle, plain units.
    pub reward_debt:      u128,
}

/// Deserialize a `Position` account from raw bytes.
pub fn parse_position(data: &[u8]) -> Result<PositionState> {
    const EXPECTED: usize = 106;
    if data.len() < EXPECTED {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("Position account is {} bytes; expected {}", data.len(), EXPECTED),
        });
    }
    Ok(PositionState {
        owner:            read_pubkey(data, 8)?,
        vault:            read_pubkey(data, 40)?,
        ring:             data[72],
        shares:           read_u64(data, 73)?,
        last_top_up_time: read_i64(data, 81)?,
        reward_debt:      read_u128(data, 89)?,
    })
}

// ─── SPL token account ────────────────────────────────────────────────────────

/// Read the `amount` field from a packed SPL token account.
///
/// Token account layout: `mint(32) owner(32) amount(8) …`
pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    if data.len() < 72 {
        return Err(Error::ParseError {
            offset: 64,
            reason: format!("Token account is {} bytes; need at least 72", data.len()),
        });
    }
    read_u64(data, 64)
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    let b: [u8; 32] = data[offset..offset + 32]
        .try_into()
        .map_err(|_| Error::ParseError {
            offset,
            reason: "slice too short for Pubkey (32 bytes)".into(),
        })?;
    Ok(Pubkey::from(b))
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    let b: [u8; 2] = data[offset..offset + 2]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u16".into() })?;
    Ok(u16::from_le_bytes(b))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    let b: [u8; 8] = data[offset..offset + 8]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u64".into() })?;
    Ok(u64::from_le_bytes(b))
}

pub(crate) fn read_i64(data: &[u8], offset: usize) -> Result<i64> {
    let b: [u8; 8] = data[offset..offset + 8]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for i64".into() })?;
    Ok(i64::from_le_bytes(b))
}

pub(crate) fn read_u128(data: &[u8], offset: usize) -> Result<u128> {
    let b: [u8; 16] = data[offset..offset + 16]
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u128".into() })?;
    Ok(u128::from_le_bytes(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(buf: &mut [u8], offset: usize, bytes: &[u8]) {
        buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    #[test]
    fn parses_hand_built_position() {
        let owner = Pubkey::new_unique();
        let vault = Pubkey::new_unique();
        let mut buf = vec![0u8; 106];
        put(&mut buf, 8, owner.as_ref());
        put(&mut buf, 40, vault.as_ref());
        buf[72] = 3;
        put(&mut buf, 73, &42u64.to_le_bytes());
        put(&mut buf, 81, &1_700_000_000i64.to_le_bytes());
        put(&mut buf, 89, &77u128.to_le_bytes());

        let pos = parse_position(&buf).unwrap();
        assert_eq!(pos.owner, owner);
        assert_eq!(pos.vault, vault);
        assert_eq!(pos.ring, 3);
        assert_eq!(pos.shares, 42);
        assert_eq!(pos.last_top_up_time, 1_700_000_000);
        assert_eq!(pos.reward_debt, 77);
    }

    #[test]
    fn parses_hand_built_vault_rings() {
        let mut buf = vec![0u8; 480];
        put(&mut buf, 8, Pubkey::new_unique().as_ref());
        buf[137] = 1; // paused

        // ring 2: base = 139 + 2*68 = 275
        let base = 139 + 2 * 68;
        put(&mut buf, base, &2_000u16.to_le_bytes());
        put(&mut buf, base + 2, &47u16.to_le_bytes());
        put(&mut buf, base + 4, &86_400i64.to_le_bytes());
        put(&mut buf, base + 12, &2_000_000_000_000_000_000u128.to_le_bytes());
        put(&mut buf, base + 28, &5_000u64.to_le_bytes());
        put(&mut buf, base + 36, &4_000u64.to_le_bytes());

        let vault = parse_vault(&buf).unwrap();
        assert!(vault.paused);
        let ring = &vault.rings[2];
        assert_eq!(ring.weight_bps, 2_000);
        assert_eq!(ring.fee_bps, 47);
        assert_eq!(ring.min_lock_secs, 86_400);
        assert_eq!(ring.yield_amplifier, 2_000_000_000_000_000_000);
        assert_eq!(ring.total_assets, 5_000);
        assert_eq!(ring.total_shares, 4_000);
        assert_eq!(vault.total_recorded_assets(), 5_000);
    }

    #[test]
    fn short_buffers_are_rejected() {
        assert!(parse_position(&[0u8; 50]).is_err());
        assert!(parse_vault(&[0u8; 479]).is_err());
        assert!(parse_token_amount(&[0u8; 71]).is_err());
    }
}
