//! Low-level Anchor instruction builders.
//!
//! Each function constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission.  Account order mirrors the Anchor
//! `#[derive(Accounts)]` structs in the on-chain program exactly.
//!
//! Anchor instruction discriminators: `sha256("global:{name}")[..8]`.
//! Anchor account discriminators:    `sha256("account:{TypeName}")[..8]`.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};
use std::str::FromStr;

use crate::types::RingConfig;

// ─── Well-known program IDs ───────────────────────────────────────────────────

pub(crate) fn spl_token_id() -> Pubkey {
    Pubkey::from_str("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA").unwrap()
}

pub(crate) fn system_program_id() -> Pubkey {
    Pubkey::from_str("11111111111111111111111111111111").unwrap()
}

pub(crate) fn ata_program_id() -> Pubkey {
    Pubkey::from_str("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL").unwrap()
}

// ─── PDA seeds (mirrors programs/orbit-stake/src/constants.rs) ───────────────

pub const VAULT_SEED:           &[u8] = b"vault";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
pub const POSITION_SEED:        &[u8] = b"position";

/// Rings per vault — fixed on-chain.
pub const RING_COUNT: usize = 5;

// ─── PDA derivation helpers ───────────────────────────────────────────────────

/// Derive the vault PDA for a stake mint.
pub fn derive_vault(stake_mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, stake_mint.as_ref()], program_id)
}

/// Derive the vault-authority PDA that signs for stake-vault transfers.
pub fn derive_vault_authority(vault: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_AUTHORITY_SEED, vault.as_ref()], program_id)
}

/// Derive the per-(ring, owner) position PDA.
pub fn derive_position(
    vault: &Pubkey,
    ring: u8,
    owner: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POSITION_SEED, vault.as_ref(), &[ring], owner.as_ref()],
        program_id,
    )
}

/// Derive the Associated Token Account for a wallet + mint.
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    let token_prog = spl_token_id();
    Pubkey::find_program_address(
        &[wallet.as_ref(), token_prog.as_ref(), mint.as_ref()],
        &ata_program_id(),
    )
    .0
}

// ─── Discriminator ────────────────────────────────────────────────────────────

fn disc(name: &str) -> [u8; 8] {
    let preimage = format!("global:{name}");
    let h = solana_sdk::hash::hash(preimage.as_bytes());
    h.to_bytes()[..8].try_into().unwrap()
}

// ─── initialize ──────────────────────────────────────────────────────────────

/// Build the `initialize` instruction.
///
/// `stake_vault` must be a fresh keypair — it will be initialised as an SPL
/// token account owned by the vault authority, and must be included as an
/// additional signer when the transaction is submitted.  `fee_recipient` is
/// a token account of the stake mint that receives injection fees and
/// swept surplus.
pub fn initialize_ix(
    program_id:    &Pubkey,
    admin:         &Pubkey,
    stake_mint:    &Pubkey,
    stake_vault:   &Pubkey,
    fee_recipient: &Pubkey,
    rings:         &[RingConfig; RING_COUNT],
) -> Instruction {
    let (vault, _)           = derive_vault(stake_mint, program_id);
    let (vault_authority, _) = derive_vault_authority(&vault, program_id);

    let mut data = disc("initialize").to_vec();
    data.extend_from_slice(fee_recipient.as_ref());
    for ring in rings {
        data.extend_from_slice(&ring.weight_bps.to_le_bytes());
        data.extend_from_slice(&ring.fee_bps.to_le_bytes());
        data.extend_from_slice(&ring.min_lock_secs.to_le_bytes());
        data.extend_from_slice(&ring.yield_amplifier.to_le_bytes());
    }

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*admin,                   true),   // mut + signer
            AccountMeta::new_readonly(*stake_mint,     false),
            AccountMeta::new(vault,                    false),  // mut PDA (init)
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(*stake_vault,             true),   // mut + signer (init)
            AccountMeta::new_readonly(spl_token_id(),  false),
            AccountMeta::new_readonly(system_program_id(), false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── deposit ─────────────────────────────────────────────────────────────────

/// Build the `deposit` instruction.
#[allow(clippy::too_many_arguments)]
pub fn deposit_ix(
    program_id:   &Pubkey,
    staker:       &Pubkey,
    vault:        &Pubkey,
    stake_vault:  &Pubkey,
    staker_token: &Pubkey,
    ring:         u8,
    amount:       u64,
) -> Instruction {
    let (position, _) = derive_position(vault, ring, staker, program_id);

    let mut data = disc("deposit").to_vec();
    data.push(ring);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*staker,          true),   // mut + signer
            AccountMeta::new(*vault,           false),  // mut
            AccountMeta::new(position,         false),  // mut PDA (init_if_needed)
            AccountMeta::new(*stake_vault,     false),  // mut
            AccountMeta::new(*staker_token,    false),  // mut
            AccountMeta::new_readonly(spl_token_id(), false),
            AccountMeta::new_readonly(system_program_id(), false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── withdraw ────────────────────────────────────────────────────────────────

/// Build the `withdraw` instruction.
#[allow(clippy::too_many_arguments)]
pub fn withdraw_ix(
    program_id:   &Pubkey,
    staker:       &Pubkey,
    vault:        &Pubkey,
    stake_vault:  &Pubkey,
    staker_token: &Pubkey,
    ring:         u8,
    shares:       u64,
) -> Instruction {
    let (vault_authority, _) = derive_vault_authority(vault, program_id);
    let (position, _)        = derive_position(vault, ring, staker, program_id);

    let mut data = disc("withdraw").to_vec();
    data.push(ring);
    data.extend_from_slice(&shares.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*staker,                  true),
            AccountMeta::new(*vault,                   false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(position,                 false),
            AccountMeta::new(*stake_vault,             false),
            AccountMeta::new(*staker_token,            false),
            AccountMeta::new_readonly(spl_token_id(),  false),
        ],
        data,
    }
}

// ─── harvest ─────────────────────────────────────────────────────────────────

/// Build the `harvest` instruction.
pub fn harvest_ix(
    program_id:   &Pubkey,
    staker:       &Pubkey,
    vault:        &Pubkey,
    stake_vault:  &Pubkey,
    staker_token: &Pubkey,
    ring:         u8,
) -> Instruction {
    let (vault_authority, _) = derive_vault_authority(vault, program_id);
    let (position, _)        = derive_position(vault, ring, staker, program_id);

    let mut data = disc("harvest").to_vec();
    data.push(ring);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*staker,                  true),
            AccountMeta::new(*vault,                   false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(position,                 false),
            AccountMeta::new(*stake_vault,             false),
            AccountMeta::new(*staker_token,            false),
            AccountMeta::new_readonly(spl_token_id(),  false),
        ],
        data,
    }
}

// ─── inject_yield ────────────────────────────────────────────────────────────

/// Build the `inject_yield` instruction.
#[allow(clippy::too_many_arguments)]
pub fn inject_yield_ix(
    program_id:   &Pubkey,
    funder:       &Pubkey,
    vault:        &Pubkey,
    stake_vault:  &Pubkey,
    fee_token:    &Pubkey,
    funder_token: &Pubkey,
    ring:         u8,
    amount:       u64,
) -> Instruction {
    let mut data = disc("inject_yield").to_vec();
    data.push(ring);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*funder,          true),
            AccountMeta::new(*vault,           false),
            AccountMeta::new(*stake_vault,     false),
            AccountMeta::new(*fee_token,       false),
            AccountMeta::new(*funder_token,    false),
            AccountMeta::new_readonly(spl_token_id(), false),
        ],
        data,
    }
}

// ─── migrate_ring ────────────────────────────────────────────────────────────

/// Build the `migrate_ring` instruction.
#[allow(clippy::too_many_arguments)]
pub fn migrate_ring_ix(
    program_id:   &Pubkey,
    staker:       &Pubkey,
    vault:        &Pubkey,
    stake_vault:  &Pubkey,
    staker_token: &Pubkey,
    from_ring:    u8,
    to_ring:      u8,
    shares:       u64,
) -> Instruction {
    let (vault_authority, _) = derive_vault_authority(vault, program_id);
    let (position_from, _)   = derive_position(vault, from_ring, staker, program_id);
    let (position_to, _)     = derive_position(vault, to_ring, staker, program_id);

    let mut data = disc("migrate_ring").to_vec();
    data.push(from_ring);
    data.push(to_ring);
    data.extend_from_slice(&shares.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*staker,                  true),
            AccountMeta::new(*vault,                   false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(position_from,            false),
            AccountMeta::new(position_to,              false),  // mut PDA (init_if_needed)
            AccountMeta::new(*stake_vault,             false),
            AccountMeta::new(*staker_token,            false),
            AccountMeta::new_readonly(spl_token_id(),  false),
            AccountMeta::new_readonly(system_program_id(), false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data,
    }
}

// ─── set_paused ──────────────────────────────────────────────────────────────

/// Build the `set_paused` instruction (admin only).
pub fn set_paused_ix(
    program_id: &Pubkey,
    admin:      &Pubkey,
    vault:      &Pubkey,
    paused:     bool,
) -> Instruction {
    let mut data = disc("set_paused").to_vec();
    data.push(paused as u8);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*admin, true),
            AccountMeta::new(*vault,          false),
        ],
        data,
    }
}

// ─── sweep_fees ──────────────────────────────────────────────────────────────

/// Build the `sweep_fees` instruction (admin only).
pub fn sweep_fees_ix(
    program_id:  &Pubkey,
    admin:       &Pubkey,
    vault:       &Pubkey,
    stake_vault: &Pubkey,
    fee_token:   &Pubkey,
) -> Instruction {
    let (vault_authority, _) = derive_vault_authority(vault, program_id);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*admin,          true),
            AccountMeta::new(*vault,                   false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new(*stake_vault,             false),
            AccountMeta::new(*fee_token,               false),
            AccountMeta::new_readonly(spl_token_id(),  false),
        ],
        data: disc("sweep_fees").to_vec(),
    }
}
