//! Orbit-Stake Rust SDK
//!
//! Client for the Orbit-Stake multi-ring staking ledger on Solana.
//! Stake into one of five rings, harvest amplified yield, and relocate
//! positions between rings — no Anchor dependency required.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use orbit_stake_sdk::{OrbitStakeClient, DepositParams};
//! use solana_sdk::{pubkey::Pubkey, signature::Keypair};
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OrbitStakeClient::devnet();
//!     let keypair = Keypair::new(); // use your funded keypair
//!
//!     let mint = Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")?;
//!
//!     // 1. Inspect the vault before committing funds
//!     let info = client.vault_info(&mint).await?;
//!     for ring in &info.rings {
//!         println!("ring {}: lock={}s amp={} price={:.4}",
//!                  ring.index, ring.min_lock_secs, ring.yield_amplifier, ring.share_price);
//!     }
//!
//!     // 2. Stake into ring 2
//!     let result = client.deposit(&keypair, DepositParams {
//!         stake_mint: mint, ring: 2, amount: 1_000_000,
//!     }).await?;
//!     println!("Staked! tx: {}", result.signature);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`OrbitStakeClient::initialize_vault`] | Create a vault with five ring configs |
//! | [`OrbitStakeClient::deposit`] | Stake into a ring, receive shares |
//! | [`OrbitStakeClient::withdraw`] | Burn shares after the lock expires |
//! | [`OrbitStakeClient::harvest`] | Collect accrued yield |
//! | [`OrbitStakeClient::inject_yield`] | Feed an orbit into a ring |
//! | [`OrbitStakeClient::migrate_ring`] | Relocate a position between rings |
//! | [`OrbitStakeClient::vault_info`] | Ring configs, ledgers, surplus |
//! | [`OrbitStakeClient::my_positions`] | All positions for an owner with pending yield |

pub mod client;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;
pub mod types;

pub use client::OrbitStakeClient;
pub use error::{Error, Result};
pub use types::*;
