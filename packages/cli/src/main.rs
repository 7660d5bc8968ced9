use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
};
use std::str::FromStr;

use orbit_stake_sdk::{
    DepositParams, InitializeParams, InjectParams, MigrateParams, OrbitStakeClient,
    RingConfig, WithdrawParams,
};

/// 1e18 — amplifier and accumulator fixed-point scale.
const SCALE_F: f64 = 1e18;

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Expand `~/` to `$HOME/` in keypair paths.
fn expand_home(path: &str) -> String {
    if path.starts_with("~/") {
        format!("{}{}", std::env::var("HOME").unwrap_or_default(), &path[1..])
    } else {
        path.to_string()
    }
}

fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded = expand_home(path);
    read_keypair_file(&expanded).map_err(|e| {
        anyhow!(
            "Cannot load keypair from '{}': {}\n  \
             Set ORBIT_KEYPAIR or pass --keypair to specify a different path.",
            expanded,
            e
        )
    })
}

fn parse_pubkey(s: &str, what: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).with_context(|| format!("'{s}' is not a valid {what} address"))
}

/// Parse one `weight:fee:lock:amplifier` ring spec, e.g. `2000:47:86400:1.5`.
fn parse_ring_spec(spec: &str) -> Result<RingConfig> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 4 {
        bail!("Ring spec '{spec}' must be weight_bps:fee_bps:min_lock_secs:amplifier");
    }
    let weight_bps: u16 = parts[0].parse().context("weight_bps must be a u16")?;
    let fee_bps: u16 = parts[1].parse().context("fee_bps must be a u16")?;
    let min_lock_secs: i64 = parts[2].parse().context("min_lock_secs must be an i64")?;
    let amplifier: f64 = parts[3].parse().context("amplifier must be a number")?;
    if fee_bps > 10_000 {
        bail!("fee_bps must be 0-10000");
    }
    if !(amplifier > 0.0) {
        bail!("amplifier must be positive");
    }
    Ok(RingConfig {
        weight_bps,
        fee_bps,
        min_lock_secs,
        yield_amplifier: (amplifier * SCALE_F) as u128,
    })
}

// ─── CLI definition ───────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "orbit-stake",
    about = "Multi-ring staking ledger on Solana: stake, harvest amplified yield, migrate between rings",
    version
)]
struct Cli {
    /// RPC endpoint
    #[arg(long, global = true, env = "ORBIT_RPC", default_value = "https://api.devnet.solana.com")]
    rpc: String,

    /// Path to the signing keypair
    #[arg(long, global = true, env = "ORBIT_KEYPAIR", default_value = "~/.config/solana/id.json")]
    keypair: String,

    /// Override the program ID (for locally deployed builds)
    #[arg(long, global = true, env = "ORBIT_PROGRAM_ID")]
    program_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a vault for a stake mint with five ring configs
    Init {
        /// Stake token mint
        #[arg(long)]
        mint: String,
        /// Token account receiving injection fees and swept surplus
        #[arg(long)]
        fee_recipient: String,
        /// Five ring specs, each weight_bps:fee_bps:min_lock_secs:amplifier
        #[arg(long = "ring", num_args = 1, action = clap::ArgAction::Append)]
        rings: Vec<String>,
    },
    /// Stake into a ring
    Deposit {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        ring: u8,
        /// Amount in atomic token units
        #[arg(long)]
        amount: u64,
    },
    /// Burn shares and redeem principal plus settled yield
    Withdraw {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        ring: u8,
        #[arg(long)]
        shares: u64,
    },
    /// Collect accrued yield from one ring
    Harvest {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        ring: u8,
    },
    /// Feed a yield orbit into a ring (permissionless)
    Inject {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        ring: u8,
        /// Gross amount in atomic token units, before the ring fee
        #[arg(long)]
        amount: u64,
    },
    /// Relocate a position between rings without exiting
    Migrate {
        #[arg(long)]
        mint: String,
        #[arg(long)]
        from_ring: u8,
        #[arg(long)]
        to_ring: u8,
        #[arg(long)]
        shares: u64,
    },
    /// Show the vault: ring configs, ledgers, surplus
    Status {
        #[arg(long)]
        mint: String,
    },
    /// List positions with live pending yield and lock times
    Positions {
        #[arg(long)]
        mint: String,
        /// Owner to query; defaults to the signing keypair
        #[arg(long)]
        owner: Option<String>,
    },
    /// Admin: pause deposits, injections, and migrations
    Pause {
        #[arg(long)]
        mint: String,
    },
    /// Admin: re-open deposits, injections, and migrations
    Unpause {
        #[arg(long)]
        mint: String,
    },
    /// Admin: sweep the vault surplus to the fee recipient
    Sweep {
        #[arg(long)]
        mint: String,
    },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut client = OrbitStakeClient::new(cli.rpc.clone());
    if let Some(ref id) = cli.program_id {
        client = client.with_program_id(parse_pubkey(id, "program")?);
    }

    match cli.command {
        Command::Init { mint, fee_recipient, rings } => {
            if rings.len() != 5 {
                bail!("Exactly five --ring specs are required, got {}", rings.len());
            }
            let mut configs = Vec::with_capacity(5);
            for spec in &rings {
                configs.push(parse_ring_spec(spec)?);
            }
            let rings: [RingConfig; 5] = configs
                .try_into()
                .map_err(|_| anyhow!("Exactly five ring configs are required"))?;

            let payer = load_keypair(&cli.keypair)?;
            let result = client
                .initialize_vault(
                    &payer,
                    InitializeParams {
                        stake_mint: parse_pubkey(&mint, "mint")?,
                        fee_recipient: parse_pubkey(&fee_recipient, "token account")?,
                        rings,
                    },
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Deposit { mint, ring, amount } => {
            let payer = load_keypair(&cli.keypair)?;
            let result = client
                .deposit(
                    &payer,
                    DepositParams { stake_mint: parse_pubkey(&mint, "mint")?, ring, amount },
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Withdraw { mint, ring, shares } => {
            let payer = load_keypair(&cli.keypair)?;
            let result = client
                .withdraw(
                    &payer,
                    WithdrawParams { stake_mint: parse_pubkey(&mint, "mint")?, ring, shares },
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Harvest { mint, ring } => {
            let payer = load_keypair(&cli.keypair)?;
            let result = client
                .harvest(&payer, &parse_pubkey(&mint, "mint")?, ring)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Inject { mint, ring, amount } => {
            let payer = load_keypair(&cli.keypair)?;
            let result = client
                .inject_yield(
                    &payer,
                    InjectParams { stake_mint: parse_pubkey(&mint, "mint")?, ring, amount },
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Migrate { mint, from_ring, to_ring, shares } => {
            let payer = load_keypair(&cli.keypair)?;
            let result = client
                .migrate_ring(
                    &payer,
                    MigrateParams {
                        stake_mint: parse_pubkey(&mint, "mint")?,
                        from_ring,
                        to_ring,
                        shares,
                    },
                )
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Status { mint } => {
            let info = client.vault_info(&parse_pubkey(&mint, "mint")?).await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Command::Positions { mint, owner } => {
            let owner = match owner {
                Some(ref s) => parse_pubkey(s, "owner")?,
                None => {
                    use solana_sdk::signature::Signer;
                    load_keypair(&cli.keypair)?.pubkey()
                }
            };
            let positions = client
                .my_positions(&owner, &parse_pubkey(&mint, "mint")?)
                .await?;
            println!("{}", serde_json::to_string_pretty(&positions)?);
        }

        Command::Pause { mint } => {
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .set_paused(&admin, &parse_pubkey(&mint, "mint")?, true)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Unpause { mint } => {
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .set_paused(&admin, &parse_pubkey(&mint, "mint")?, false)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Sweep { mint } => {
            let admin = load_keypair(&cli.keypair)?;
            let result = client
                .sweep_fees(&admin, &parse_pubkey(&mint, "mint")?)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_spec_parses_all_four_fields() {
        let cfg = parse_ring_spec("2000:47:86400:1.5").unwrap();
        assert_eq!(cfg.weight_bps, 2_000);
        assert_eq!(cfg.fee_bps, 47);
        assert_eq!(cfg.min_lock_secs, 86_400);
        assert_eq!(cfg.yield_amplifier, 1_500_000_000_000_000_000);
    }

    #[test]
    fn ring_spec_rejects_bad_input() {
        assert!(parse_ring_spec("2000:47:86400").is_err());
        assert!(parse_ring_spec("2000:20000:86400:1.0").is_err()); // fee > 10000 bps
        assert!(parse_ring_spec("2000:47:86400:0").is_err()); // zero amplifier
    }

    #[test]
    fn home_expansion_only_touches_tilde_prefix() {
        assert_eq!(expand_home("/tmp/id.json"), "/tmp/id.json");
        assert!(expand_home("~/id.json").ends_with("/id.json"));
        assert!(!expand_home("~/id.json").starts_with('~'));
    }
}
