use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use super::share_math::{assets_for_shares, pending_yield, stamp_debt};
use crate::{
    constants::*,
    error::OrbitError,
    events::Withdrawn,
    state::{Position, Vault},
};

/// Burn `shares` and redeem the proportional slice of the ring's assets.
/// Stays open while the vault is paused so stakers can always exit.
///
/// Pending yield is settled exactly as in harvest, but paid only if the
/// vault surplus covers it in full — a shortfall skips the yield payout
/// and the principal redemption still goes through. The final principal
/// transfer aborts the whole instruction on failure.
pub fn handler(ctx: Context<Withdraw>, ring: u8, shares: u64) -> Result<()> {
    ctx.accounts.vault.enter()?;
    require!(shares > 0, OrbitError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;

    // Read state into locals before any mutable borrows
    let (total_shares, total_assets, acc_per_share, min_lock_secs) = {
        let r = ctx.accounts.vault.ring(ring)?;
        (r.total_shares, r.total_assets, r.acc_per_share, r.min_lock_secs)
    };
    let held = ctx.accounts.position.shares;
    require!(shares <= held, OrbitError::InsufficientShares);
    require!(
        ctx.accounts.position.unlocked(min_lock_secs, now),
        OrbitError::LockActive
    );

    let assets = assets_for_shares(shares, total_shares, total_assets)?;
    let pending = pending_yield(held, acc_per_share, ctx.accounts.position.reward_debt)?;

    // Yield comes only out of the surplus above recorded principal
    let surplus = ctx
        .accounts
        .stake_vault
        .amount
        .saturating_sub(ctx.accounts.vault.total_recorded_assets());
    let yield_paid = if pending > 0 && surplus >= pending { pending } else { 0 };

    // Re-stamp with the post-mutation share count; partial withdrawals
    // keep their original lock anchor
    let shares_after = held - shares;
    {
        let pos = &mut ctx.accounts.position;
        pos.shares = shares_after;
        pos.reward_debt = stamp_debt(shares_after, acc_per_share)?;
    }
    {
        let r = ctx.accounts.vault.ring_mut(ring)?;
        r.total_shares = r.total_shares.saturating_sub(shares);
        r.total_assets = r.total_assets.saturating_sub(assets);
    }

    // PDA-signed transfers out of the shared vault
    let vault_key = ctx.accounts.vault.key();
    let authority_bump = ctx.accounts.vault.authority_bump;
    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, vault_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];

    if yield_paid > 0 {
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
            yield_paid,
        )?;
    }
    if assets > 0 {
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
            assets,
        )?;
    }

    emit!(Withdrawn {
        staker: ctx.accounts.staker.key(),
        ring,
        shares,
        assets,
        yield_paid,
    });
    msg!(
        "Withdraw: ring={} shares={} assets={} yield={}",
        ring, shares, assets, yield_paid
    );

    (*ctx.accounts.vault).exit();
    Ok(())
}

#[derive(Accounts)]
#[instruction(ring: u8)]
pub struct Withdraw<'info> {
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
