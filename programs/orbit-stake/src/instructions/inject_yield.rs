use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use super::share_math::{acc_delta, split_fee};
use crate::{
    constants::*,
    error::OrbitError,
    events::YieldInjected,
    state::Vault,
};

/// Inject a gross yield amount into one ring (an "orbit"). Permissionless.
///
/// Flow:
///   1. funder → fee_recipient : gross * fee_bps / 10000
///   2. funder → stake_vault   : the net remainder
///   3. acc_per_share += net * yield_amplifier / total_shares
///
/// A ring with zero outstanding shares accepts the transfer but skips the
/// accumulator update: the net amount is stranded as unattributed surplus,
/// recoverable only through sweep_fees. The event says so explicitly.
pub fn handler(ctx: Context<InjectYield>, ring: u8, amount: u64) -> Result<()> {
    ctx.accounts.vault.enter()?;
    require!(!ctx.accounts.vault.paused, OrbitError::ProtocolPaused);
    require!(amount > 0, OrbitError::ZeroAmount);

    let now = Clock::get()?.unix_timestamp;

    let (fee_bps, yield_amplifier, total_shares) = {
        let r = ctx.accounts.vault.ring(ring)?;
        (r.fee_bps, r.yield_amplifier, r.total_shares)
    };
    let (fee, net) = split_fee(amount, fee_bps)?;

    let distributed = total_shares > 0;
    if distributed {
        let delta = acc_delta(net, yield_amplifier, total_shares)?;
        let r = ctx.accounts.vault.ring_mut(ring)?;
        r.acc_per_share = r.acc_per_share.saturating_add(delta);
        r.last_update_time = now;
    }

    // Pull the gross amount from the funder; either transfer failing
    // aborts the whole injection
    if fee > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.funder_token.to_account_info(),
                    to: ctx.accounts.fee_token.to_account_info(),
                    authority: ctx.accounts.funder.to_account_info(),
                },
            ),
            fee,
        )?;
    }
    if net > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.funder_token.to_account_info(),
                    to: ctx.accounts.stake_vault.to_account_info(),
                    authority: ctx.accounts.funder.to_account_info(),
                },
            ),
            net,
        )?;
    }

    emit!(YieldInjected {
        funder: ctx.accounts.funder.key(),
        ring,
        gross: amount,
        fee,
        net,
        distributed,
    });
    if distributed {
        msg!("Orbit: ring={} gross={} fee={} net={}", ring, amount, fee, net);
    } else {
        msg!(
            "Orbit: ring={} has no shares — {} units stranded until swept",
            ring, net
        );
    }

    (*ctx.accounts.vault).exit();
    Ok(())
}

#[derive(Accounts)]
pub struct InjectYield<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(mut)]
    pub vault: Account<'info, Vault>,

    #[account(
        mut,
        constraint = stake_vault.key() == vault.stake_vault @ OrbitError::VaultMismatch,
    )]
    pub stake_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = fee_token.key() == vault.fee_recipient @ OrbitError::VaultMismatch,
    )]
    pub fee_token: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = funder_token.mint == vault.stake_mint @ OrbitError::MintMismatch,
        constraint = funder_token.owner == funder.key(),
    )]
    pub funder_token: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}
