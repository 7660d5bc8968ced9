use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use super::share_math::{pending_yield, stamp_debt};
use crate::{
    constants::*,
    error::OrbitError,
    events::Harvested,
    state::{Position, Vault},
};

/// Collect accrued yield from one position. Pays out
/// `min(pending, vault surplus)` — a partial payout rather than a failure
/// when amplified accrual outruns what orbits actually delivered.
/// Silent no-op when nothing has accrued. Stays open while paused.
pub fn handler(ctx: Context<Harvest>, ring: u8) -> Result<()> {
    ctx.accounts.vault.enter()?;

    let acc_per_share = ctx.accounts.vault.ring(ring)?.acc_per_share;
    let held = ctx.accounts.position.shares;
    let pending = pending_yield(held, acc_per_share, ctx.accounts.position.reward_debt)?;

    if pending == 0 {
        msg!("No yield to harvest");
        (*ctx.accounts.vault).exit();
        return Ok(());
    }

    ctx.accounts.position.reward_debt = stamp_debt(held, acc_per_share)?;

    let surplus = ctx
        .accounts
        .stake_vault
        .amount
        .saturating_sub(ctx.accounts.vault.total_recorded_assets());
    let paid = pending.min(surplus);

    if paid > 0 {
        let vault_key = ctx.accounts.vault.key();
        let authority_bump = ctx.accounts.vault.authority_bump;
        let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, vault_key.as_ref(), &[authority_bump]];
        let signer = &[seeds];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.stake_vault.to_account_info(),
                    to: ctx.accounts.staker_token.to_account_info(),
                    authority: ctx.accounts.vault_authority.to_account_info(),
                },
                signer,
            ),
            paid,
        )?;
    }

    emit!(Harvested {
        staker: ctx.accounts.staker.key(),
        ring,
        accrued: pending,
        paid,
    });
    msg!("Harvest: ring={} accrued={} paid={}", ring, pending, paid);

    (*ctx.accounts.vault).exit();
    Ok(())
}

#[derive(Accounts)]
#[instruction(ring: u8)]
pub struct Harvest<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(mut)]
    pub vault: Account<'info, Vault>,

    /// CHECK: PDA vault authority
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [POSITION_SEED, vault.key().as_ref(), &[ring], staker.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == staker.key(),
        constraint = position.vault == vault.key(),
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        constraint = stake_vault.key() == vault.stake_vault @ OrbitError::VaultMismatch,
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = staker_token.mint == vault.stake_mint @ OrbitError::MintMismatch,
        constraint = staker_token.owner == staker.key(),
    )]
    pub staker_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
