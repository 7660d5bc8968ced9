use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use super::share_math::{
    assets_for_shares, pending_yield, restamp_preserving_pending, shares_for_deposit, stamp_debt,
};
use crate::{
    constants::*,
    error::OrbitError,
    events::RingMigrated,
    state::{Position, Vault},
};

/// Relocate value between rings without a full exit, in one atomic step:
/// burn shares at the source valuation, settle the source yield
/// (best-effort, withdraw's shortfall policy), then mint in the
/// destination under deposit rules. Only the source ring's lock gates the
/// move; the destination position's lock timer restarts at now while the
/// source's remaining shares keep their original anchor. The principal
/// never leaves the shared vault — only the yield remainder moves.
pub fn handler(
    ctx: Context<MigrateRing>,
    from_ring: u8,
    to_ring: u8,
    shares: u64,
) -> Result<()> {
    ctx.accounts.vault.enter()?;
    require!(!ctx.accounts.vault.paused, OrbitError::ProtocolPaused);
    require!(from_ring != to_ring, OrbitError::SameRing);
    require!(shares > 0, OrbitError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;

    // Read both rings into locals (and bounds-check them) up front
    let (src_shares, src_assets, src_acc, src_lock) = {
        let r = ctx.accounts.vault.ring(from_ring)?;
        (r.total_shares, r.total_assets, r.acc_per_share, r.min_lock_secs)
    };
    let (dst_shares, dst_assets, dst_acc) = {
        let r = ctx.accounts.vault.ring(to_ring)?;
        (r.total_shares, r.total_assets, r.acc_per_share)
    };

    let held = ctx.accounts.position_from.shares;
    require!(shares <= held, OrbitError::InsufficientShares);
    require!(
        ctx.accounts.position_from.unlocked(src_lock, now),
        OrbitError::LockActive
    );

    // Redeem at the source valuation, cap-check the destination
    let assets = assets_for_shares(shares, src_shares, src_assets)?;
    let dst_after = dst_assets
        .checked_add(assets)
        .ok_or(OrbitError::MathOverflow)?;
    require!(dst_after <= RING_ASSET_CAP, OrbitError::RingCapExceeded);

    let minted = shares_for_deposit(assets, dst_shares, dst_assets)?;
    require!(minted > 0, OrbitError::ZeroShares);

    // Source yield settle, same shortfall policy as withdraw
    let pending = pending_yield(held, src_acc, ctx.accounts.position_from.reward_debt)?;
    let surplus = ctx
        .accounts
        .stake_vault
        .amount
        .saturating_sub(ctx.accounts.vault.total_recorded_assets());
    let yield_paid = if pending > 0 && surplus >= pending { pending } else { 0 };

    // Source position: burn and re-stamp; lock anchor untouched
    let src_remaining = held - shares;
    {
        let pos = &mut ctx.accounts.position_from;
        pos.shares = src_remaining;
        pos.reward_debt = stamp_debt(src_remaining, src_acc)?;
    }

    // Destination position: deposit rules, lock timer restarts
    {
        let pos = &mut ctx.accounts.position_to;
        let dst_pending = if pos.shares > 0 {
            pending_yield(pos.shares, dst_acc, pos.reward_debt)?
        } else {
            pos.owner = ctx.accounts.staker.key();
            pos.vault = ctx.accounts.vault.key();
            pos.ring = to_ring;
            pos.bump = ctx.bumps.position_to;
            0
        };
        pos.shares = pos
            .shares
            .checked_add(minted)
            .ok_or(OrbitError::MathOverflow)?;
        pos.last_top_up_time = now;
        pos.reward_debt = restamp_preserving_pending(pos.shares, dst_acc, dst_pending)?;
    }

    // Ring ledgers: principal moves by bookkeeping only
    {
        let r = ctx.accounts.vault.ring_mut(from_ring)?;
        r.total_shares = r.total_shares.saturating_sub(shares);
        r.total_assets = r.total_assets.saturating_sub(assets);
    }
    {
        let r = ctx.accounts.vault.ring_mut(to_ring)?;
        r.total_assets = dst_after;
        r.total_shares = r
            .total_shares
            .checked_add(minted)
            .ok_or(OrbitError::MathOverflow)?;
    }

    if yield_paid > 0 {
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
            yield_paid,
        )?;
    }

    emit!(RingMigrated {
        staker: ctx.accounts.staker.key(),
        from_ring,
        to_ring,
        shares_burned: shares,
        assets_moved: assets,
        shares_minted: minted,
        yield_paid,
    });
    msg!(
        "Migrate: {}→{} shares={} assets={} minted={} yield={}",
        from_ring, to_ring, shares, assets, minted, yield_paid
    );

    (*ctx.accounts.vault).exit();
    Ok(())
}

#[derive(Accounts)]
#[instruction(from_ring: u8, to_ring: u8)]
pub struct MigrateRing<'info> {
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
        seeds = [POSITION_SEED, vault.key().as_ref(), &[from_ring], staker.key().as_ref()],
        bump = position_from.bump,
        constraint = position_from.owner == staker.key(),
        constraint = position_from.vault == vault.key(),
    )]
    pub position_from: Account<'info, Position>,

    #[account(
        init_if_needed,
        payer = staker,
        space = Position::LEN,
        seeds = [POSITION_SEED, vault.key().as_ref(), &[to_ring], staker.key().as_ref()],
        bump,
    )]
    pub position_to: Account<'info, Position>,

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
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
