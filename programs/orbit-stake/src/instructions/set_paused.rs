use anchor_lang::prelude::*;

use crate::{error::OrbitError, events::PauseToggled, state::Vault};

/// Toggle the pause flag. Pausing gates deposit, inject_yield, and
/// migrate_ring; withdraw and harvest stay open so stakers can always
/// exit.
pub fn handler(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    ctx.accounts.vault.enter()?;
    ctx.accounts.vault.paused = paused;

    emit!(PauseToggled { paused });
    msg!("Pause: {}", paused);

    (*ctx.accounts.vault).exit();
    Ok(())
}

#[derive(Accounts)]
pub struct SetPaused<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        constraint = vault.admin == admin.key() @ OrbitError::Unauthorized,
    )]
    pub vault: Account<'info, Vault>,
}
