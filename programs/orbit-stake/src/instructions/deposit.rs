use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use super::share_math::{restamp_preserving_pending, pending_yield, shares_for_deposit};
use crate::{
    constants::*,
    error::OrbitError,
    events::Deposited,
    state::{Position, Vault},
};

/// Stake `amount` into one ring. Mints shares 1:1 for the first depositor,
/// proportionally to the ring's valuation afterwards. Never harvests:
/// a pre-existing position's accrued yield is carried across the re-stamp.
pub fn handler(ctx: Context<Deposit>, ring: u8, amount: u64) -> Result<()> {
    ctx.accounts.vault.enter()?;
    require!(!ctx.accounts.vault.paused, OrbitError::ProtocolPaused);
    require!(amount >= MIN_DEPOSIT, OrbitError::BelowMinimumDeposit);

    let now = Clock::get()?.unix_timestamp;

    // Read ring state into locals before any mutable borrows
    let (total_shares, total_assets, acc_per_share) = {
        let r = ctx.accounts.vault.ring(ring)?;
        (r.total_shares, r.total_assets, r.acc_per_share)
    };
    let after = total_assets
        .checked_add(amount)
        .ok_or(OrbitError::MathOverflow)?;
    require!(after <= RING_ASSET_CAP, OrbitError::RingCapExceeded);

    let minted = shares_for_deposit(amount, total_shares, total_assets)?;
    require!(minted > 0, OrbitError::ZeroShares);

    // Settle bookkeeping then update position
    {
        let pos = &mut ctx.accounts.position;
        let pending = if pos.shares > 0 {
            pending_yield(pos.shares, acc_per_share, pos.reward_debt)?
        } else {
            // New position (or tombstone re-entry) — initialise fields
            pos.owner = ctx.accounts.staker.key();
            pos.vault = ctx.accounts.vault.key();
            pos.ring = ring;
            pos.bump = ctx.bumps.position;
            0
        };
        pos.shares = pos
            .shares
            .checked_add(minted)
            .ok_or(OrbitError::MathOverflow)?;
        pos.last_top_up_time = now;
        pos.reward_debt = restamp_preserving_pending(pos.shares, acc_per_share, pending)?;
    }

    // Update ring ledger
    {
        let r = ctx.accounts.vault.ring_mut(ring)?;
        r.total_assets = after;
        r.total_shares = r
            .total_shares
            .checked_add(minted)
            .ok_or(OrbitError::MathOverflow)?;
    }

    // Pull principal from the staker into the shared vault
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.staker_token.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.staker.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(Deposited {
        staker: ctx.accounts.staker.key(),
        ring,
        amount,
        shares: minted,
    });
    msg!("Deposit: ring={} amount={} shares={}", ring, amount, minted);

    (*ctx.accounts.vault).exit();
    Ok(())
}

#[derive(Accounts)]
#[instruction(ring: u8)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(mut)]
    pub vault: Account<'info, Vault>,

    #[account(
        init_if_needed,
        payer = staker,
        space = Position::LEN,
        seeds = [POSITION_SEED, vault.key().as_ref(), &[ring], staker.key().as_ref()],
        bump,
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
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}
