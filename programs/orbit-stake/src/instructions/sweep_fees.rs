use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, error::OrbitError, events::FeesSwept, state::Vault};

/// Transfer everything the stake vault holds beyond the recorded
/// principal to the fee recipient. This is how donated balance, rounding
/// dust, and yield stranded in zero-share rings is recovered.
pub fn handler(ctx: Context<SweepFees>) -> Result<()> {
    ctx.accounts.vault.enter()?;

    let surplus = ctx
        .accounts
        .stake_vault
        .amount
        .saturating_sub(ctx.accounts.vault.total_recorded_assets());

    if surplus == 0 {
        msg!("No surplus to sweep");
        (*ctx.accounts.vault).exit();
        return Ok(());
    }

    let vault_key = ctx.accounts.vault.key();
    let authority_bump = ctx.accounts.vault.authority_bump;
    let seeds: &[&[u8]] = &[VAULT_AUTHORITY_SEED, vault_key.as_ref(), &[authority_bump]];
    let signer = &[seeds];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.stake_vault.to_account_info(),
                to: ctx.accounts.fee_token.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer,
        ),
        surplus,
    )?;

    emit!(FeesSwept {
        amount: surplus,
        recipient: ctx.accounts.fee_token.key(),
    });
    msg!("Sweep: {} units", surplus);

    (*ctx.accounts.vault).exit();
    Ok(())
}

#[derive(Accounts)]
pub struct SweepFees<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = vault.admin == admin.key() @ OrbitError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,

    /// CHECK: PDA vault authority
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault.key().as_ref()],
        bump = vault.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

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

    pub token_program: Program<'info, Token>,
}
