/// Orbit-Stake — five-ring staking ledger with amplified yield orbits.
///
/// 8 instructions:
///   initialize    — create the vault and fix the five ring configs
///   deposit       — stake into a ring; proportional share mint
///   withdraw      — burn shares after the lock; redeem at valuation
///   harvest       — collect accrued yield, best-effort against surplus
///   inject_yield  — feed an orbit into one ring, net of the protocol fee
///   migrate_ring  — relocate a position between rings without exiting
///   set_paused    — gate entries; exits stay open
///   sweep_fees    — recover surplus above recorded principal

// ─── Security contact ─────────────────────────────────────────────────────────

use solana_security_txt::security_txt;

#[cfg(not(feature = "no-entrypoint"))]
security_txt! {
    name:             "Orbit-Stake",
    project_url:      "https://github.com/orbit-stake/orbit-stake",
    contacts:         "email:security@orbitstake.dev",
    policy:           "Please report security vulnerabilities by emailing security@orbitstake.dev. \
                       We aim to respond within 48 hours.",
    source_code:      "https://github.com/orbit-stake/orbit-stake",
    preferred_languages: "en"
}

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("6Yx3mQvTnWc9dPeRb2ZkLJu8fGhHsD4jAqN5wEtU7rSM");

#[program]
pub mod orbit_stake {
    use super::*;

    /// Create the vault: five ring configs, fee sink, PDA-owned token
    /// account. Config is immutable afterwards.
    pub fn initialize(
        ctx: Context<Initialize>,
        fee_recipient: Pubkey,
        rings: [RingParams; RING_COUNT],
    ) -> Result<()> {
        initialize::handler(ctx, fee_recipient, rings)
    }

    /// Stake `amount` into ring `ring`. First depositor mints 1:1.
    pub fn deposit(ctx: Context<Deposit>, ring: u8, amount: u64) -> Result<()> {
        deposit::handler(ctx, ring, amount)
    }

    /// Burn `shares` and redeem the proportional assets plus settled yield.
    pub fn withdraw(ctx: Context<Withdraw>, ring: u8, shares: u64) -> Result<()> {
        withdraw::handler(ctx, ring, shares)
    }

    /// Collect accrued yield without touching the principal.
    pub fn harvest(ctx: Context<Harvest>, ring: u8) -> Result<()> {
        harvest::handler(ctx, ring)
    }

    /// Inject a gross yield amount into one ring (an orbit).
    pub fn inject_yield(ctx: Context<InjectYield>, ring: u8, amount: u64) -> Result<()> {
        inject_yield::handler(ctx, ring, amount)
    }

    /// Move `shares` worth of value from one ring to another atomically.
    pub fn migrate_ring(
        ctx: Context<MigrateRing>,
        from_ring: u8,
        to_ring: u8,
        shares: u64,
    ) -> Result<()> {
        migrate_ring::handler(ctx, from_ring, to_ring, shares)
    }

    /// Admin: gate deposits, injections, and migrations.
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        set_paused::handler(ctx, paused)
    }

    /// Admin: sweep the vault balance above recorded principal to the fee
    /// recipient.
    pub fn sweep_fees(ctx: Context<SweepFees>) -> Result<()> {
        sweep_fees::handler(ctx)
    }
}
