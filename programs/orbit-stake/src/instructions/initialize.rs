use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{constants::*, error::OrbitError, events::VaultInitialized, state::Vault};

/// Per-ring configuration supplied at initialization. Immutable afterwards.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug)]
pub struct RingParams {
    /// Informational target allocation weight
    pub weight_bps: u16,
    /// Injection fee in basis points, 0..=10000
    pub fee_bps: u16,
    /// Minimum seconds between a top-up and an exit
    pub min_lock_secs: i64,
    /// 1e18-scale yield multiplier
    pub yield_amplifier: u128,
}

/// One-time vault setup: ring configs, fee sink, and the PDA-owned token
/// account that will hold every ring's assets.
pub fn handler(
    ctx: Context<Initialize>,
    fee_recipient: Pubkey,
    rings: [RingParams; RING_COUNT],
) -> Result<()> {
    for params in rings.iter() {
        require!(params.fee_bps <= BPS_DENOMINATOR as u16, OrbitError::InvalidFeeRate);
        require!(params.yield_amplifier > 0, OrbitError::InvalidAmplifier);
        require!(params.min_lock_secs >= 0, OrbitError::InvalidLockDuration);
    }

    let vault = &mut ctx.accounts.vault;
    vault.admin = ctx.accounts.admin.key();
    vault.fee_recipient = fee_recipient;
    vault.stake_mint = ctx.accounts.stake_mint.key();
    vault.stake_vault = ctx.accounts.stake_vault.key();
    vault.authority_bump = ctx.bumps.vault_authority;
    vault.paused = false;
    vault.locked = false;
    for (ring, params) in vault.rings.iter_mut().zip(rings.iter()) {
        ring.weight_bps = params.weight_bps;
        ring.fee_bps = params.fee_bps;
        ring.min_lock_secs = params.min_lock_secs;
        ring.yield_amplifier = params.yield_amplifier;
        ring.total_assets = 0;
        ring.total_shares = 0;
        ring.acc_per_share = 0;
        ring.last_update_time = 0;
    }
    vault.bump = ctx.bumps.vault;

    emit!(VaultInitialized {
        admin: vault.admin,
        stake_mint: vault.stake_mint,
        fee_recipient,
    });
    msg!("Vault created: mint={} rings={}", vault.stake_mint, RING_COUNT);
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    pub stake_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        space = Vault::LEN,
        seeds = [VAULT_SEED, stake_mint.key().as_ref()],
        bump,
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: PDA vault authority — owns the stake vault, holds no data
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = admin,
        token::mint = stake_mint,
        token::authority = vault_authority,
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
