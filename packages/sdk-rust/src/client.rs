//! [`OrbitStakeClient`] — the main entry point for integrations.

use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, MemcmpEncodedBytes, RpcFilterType},
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use std::str::FromStr;

use crate::{
    error::{Error, Result},
    instructions::{
        deposit_ix, derive_ata, derive_position, derive_vault, derive_vault_authority,
        harvest_ix, initialize_ix, inject_yield_ix, migrate_ring_ix, set_paused_ix,
        sweep_fees_ix, withdraw_ix, RING_COUNT,
    },
    math::{
        pending_yield_for_position, preview_assets_for_shares, share_price, unlock_time,
        vault_surplus, SCALE,
    },
    state::{parse_position, parse_token_amount, parse_vault, PositionState, VaultState},
    types::{
        DepositParams, InitializeParams, InitializeResult, InjectParams, MigrateParams,
        PositionInfo, RingInfo, TxResult, VaultInfo, WithdrawParams,
    },
};

// ─── Constants ────────────────────────────────────────────────────────────────

const DEFAULT_PROGRAM_ID: &str = "6Yx3mQvTnWc9dPeRb2ZkLJu8fGhHsD4jAqN5wEtU7rSM";
const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async Orbit-Stake client for Solana.
///
/// ```rust,no_run
/// # use orbit_stake_sdk::OrbitStakeClient;
/// # use solana_sdk::pubkey::Pubkey;
/// # use std::str::FromStr;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = OrbitStakeClient::devnet();
/// let mint = Pubkey::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v")?;
/// let info = client.vault_info(&mint).await?;
/// println!("surplus: {}", info.surplus);
/// # Ok(())
/// # }
/// ```
pub struct OrbitStakeClient {
    rpc_url:    String,
    program_id: Pubkey,
}

impl OrbitStakeClient {
    /// Create a client pointing at any RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url:    rpc_url.into(),
            program_id: Pubkey::from_str(DEFAULT_PROGRAM_ID).unwrap(),
        }
    }

    /// Pre-configured client for Solana devnet.
    pub fn devnet() -> Self {
        Self::new(DEVNET_RPC)
    }

    /// Pre-configured client for Solana mainnet-beta.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC)
    }

    /// Override the program ID (useful for locally deployed programs in tests).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    // ── Write operations ──────────────────────────────────────────────────────

    /// Create a vault for a stake mint with five ring configurations.
    ///
    /// A fresh keypair for the stake vault token account is generated
    /// internally and returned in the result.
    pub async fn initialize_vault(
        &self,
        payer:  &Keypair,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        let rpc = self.rpc();

        let stake_vault = Keypair::new();
        let (vault, _)           = derive_vault(&params.stake_mint, &self.program_id);
        let (vault_authority, _) = derive_vault_authority(&vault, &self.program_id);

        let ix = initialize_ix(
            &self.program_id,
            &payer.pubkey(),
            &params.stake_mint,
            &stake_vault.pubkey(),
            &params.fee_recipient,
            &params.rings,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[&stake_vault]).await?;

        Ok(InitializeResult {
            signature: sig.to_string(),
            vault,
            vault_authority,
            stake_vault: stake_vault.pubkey(),
        })
    }

    /// Stake into a ring. The staker's ATA for the stake mint is the funding
    /// account.
    pub async fn deposit(&self, payer: &Keypair, params: DepositParams) -> Result<TxResult> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, &params.stake_mint).await?;
        self.check_ring(params.ring)?;

        let ix = deposit_ix(
            &self.program_id,
            &payer.pubkey(),
            &vault,
            &state.stake_vault,
            &derive_ata(&payer.pubkey(), &params.stake_mint),
            params.ring,
            params.amount,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;
        Ok(TxResult { signature: sig.to_string(), vault })
    }

    /// Burn shares after the ring's lock has elapsed.
    pub async fn withdraw(&self, payer: &Keypair, params: WithdrawParams) -> Result<TxResult> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, &params.stake_mint).await?;
        self.check_ring(params.ring)?;

        let ix = withdraw_ix(
            &self.program_id,
            &payer.pubkey(),
            &vault,
            &state.stake_vault,
            &derive_ata(&payer.pubkey(), &params.stake_mint),
            params.ring,
            params.shares,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;
        Ok(TxResult { signature: sig.to_string(), vault })
    }

    /// Collect accrued yield from one ring.
    pub async fn harvest(&self, payer: &Keypair, stake_mint: &Pubkey, ring: u8) -> Result<TxResult> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, stake_mint).await?;
        self.check_ring(ring)?;

        let ix = harvest_ix(
            &self.program_id,
            &payer.pubkey(),
            &vault,
            &state.stake_vault,
            &derive_ata(&payer.pubkey(), stake_mint),
            ring,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;
        Ok(TxResult { signature: sig.to_string(), vault })
    }

    /// Feed an orbit into one ring. Permissionless; the funder's ATA covers
    /// the gross amount.
    pub async fn inject_yield(&self, payer: &Keypair, params: InjectParams) -> Result<TxResult> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, &params.stake_mint).await?;
        self.check_ring(params.ring)?;

        let ix = inject_yield_ix(
            &self.program_id,
            &payer.pubkey(),
            &vault,
            &state.stake_vault,
            &state.fee_recipient,
            &derive_ata(&payer.pubkey(), &params.stake_mint),
            params.ring,
            params.amount,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;
        Ok(TxResult { signature: sig.to_string(), vault })
    }

    /// Relocate a position between rings without exiting.
    pub async fn migrate_ring(&self, payer: &Keypair, params: MigrateParams) -> Result<TxResult> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, &params.stake_mint).await?;
        self.check_ring(params.from_ring)?;
        self.check_ring(params.to_ring)?;

        let ix = migrate_ring_ix(
            &self.program_id,
            &payer.pubkey(),
            &vault,
            &state.stake_vault,
            &derive_ata(&payer.pubkey(), &params.stake_mint),
            params.from_ring,
            params.to_ring,
            params.shares,
        );
        let sig = self.sign_and_send(&rpc, &[ix], payer, &[]).await?;
        Ok(TxResult { signature: sig.to_string(), vault })
    }

    /// Admin: toggle the pause flag.
    pub async fn set_paused(&self, admin: &Keypair, stake_mint: &Pubkey, paused: bool) -> Result<TxResult> {
        let rpc = self.rpc();
        let (vault, _) = self.fetch_vault(&rpc, stake_mint).await?;

        let ix = set_paused_ix(&self.program_id, &admin.pubkey(), &vault, paused);
        let sig = self.sign_and_send(&rpc, &[ix], admin, &[]).await?;
        Ok(TxResult { signature: sig.to_string(), vault })
    }

    /// Admin: sweep the vault surplus to the fee recipient.
    pub async fn sweep_fees(&self, admin: &Keypair, stake_mint: &Pubkey) -> Result<TxResult> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, stake_mint).await?;

        let ix = sweep_fees_ix(
            &self.program_id,
            &admin.pubkey(),
            &vault,
            &state.stake_vault,
            &state.fee_recipient,
        );
        let sig = self.sign_and_send(&rpc, &[ix], admin, &[]).await?;
        Ok(TxResult { signature: sig.to_string(), vault })
    }

    // ── Read operations ───────────────────────────────────────────────────────

    /// Fetch the vault, its ring ledgers, and the live surplus.
    pub async fn vault_info(&self, stake_mint: &Pubkey) -> Result<VaultInfo> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, stake_mint).await?;
        let balance = parse_token_amount(&rpc.get_account_data(&state.stake_vault).await?)?;

        let rings = state
            .rings
            .iter()
            .enumerate()
            .map(|(i, r)| RingInfo {
                index: i as u8,
                weight_bps: r.weight_bps,
                fee_bps: r.fee_bps,
                min_lock_secs: r.min_lock_secs,
                yield_amplifier: r.yield_amplifier as f64 / SCALE as f64,
                total_assets: r.total_assets,
                total_shares: r.total_shares,
                share_price: share_price(r),
                last_update_time: r.last_update_time,
            })
            .collect();

        Ok(VaultInfo {
            vault,
            admin: state.admin,
            stake_mint: state.stake_mint,
            stake_vault: state.stake_vault,
            fee_recipient: state.fee_recipient,
            paused: state.paused,
            vault_balance: balance,
            surplus: vault_surplus(&state, balance),
            rings,
        })
    }

    /// Fetch one position with its pending yield and lock snapshot.
    pub async fn position(
        &self,
        owner:      &Pubkey,
        stake_mint: &Pubkey,
        ring:       u8,
    ) -> Result<PositionInfo> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, stake_mint).await?;
        self.check_ring(ring)?;

        let (addr, _) = derive_position(&vault, ring, owner, &self.program_id);
        let data = rpc
            .get_account_data(&addr)
            .await
            .map_err(|_| Error::PositionNotFound { ring, owner: *owner })?;
        let pos = parse_position(&data)?;
        Ok(self.decorate(addr, &pos, &state))
    }

    /// Fetch all positions in this vault owned by `owner`, with pending
    /// yield computed from the current accumulators.
    pub async fn my_positions(&self, owner: &Pubkey, stake_mint: &Pubkey) -> Result<Vec<PositionInfo>> {
        let rpc = self.rpc();
        let (vault, state) = self.fetch_vault(&rpc, stake_mint).await?;

        let disc = account_disc("Position");
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::DataSize(106),
                RpcFilterType::Memcmp(Memcmp::new(
                    0,
                    MemcmpEncodedBytes::Bytes(disc.to_vec()),
                )),
                RpcFilterType::Memcmp(Memcmp::new(
                    8,
                    MemcmpEncodedBytes::Bytes(owner.to_bytes().to_vec()),
                )),
                RpcFilterType::Memcmp(Memcmp::new(
                    40,
                    MemcmpEncodedBytes::Bytes(vault.to_bytes().to_vec()),
                )),
            ]),
            account_config: RpcAccountInfoConfig { ..Default::default() },
            ..Default::default()
        };

        let raw = rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;

        let mut infos: Vec<PositionInfo> = raw
            .into_iter()
            .filter_map(|(pk, acc)| parse_position(&acc.data).ok().map(|p| (pk, p)))
            .map(|(pk, pos)| self.decorate(pk, &pos, &state))
            .collect();
        infos.sort_by_key(|p| p.ring);
        Ok(infos)
    }

    /// Pending yield for one position, without fetching anything else.
    pub async fn pending_yield(&self, owner: &Pubkey, stake_mint: &Pubkey, ring: u8) -> Result<u64> {
        Ok(self.position(owner, stake_mint, ring).await?.pending_yield)
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), CommitmentConfig::confirmed())
    }

    fn check_ring(&self, ring: u8) -> Result<()> {
        if (ring as usize) < RING_COUNT {
            Ok(())
        } else {
            Err(Error::InvalidRing(ring))
        }
    }

    async fn sign_and_send(
        &self,
        rpc:          &RpcClient,
        instructions: &[Instruction],
        payer:        &Keypair,
        extra:        &[&Keypair],
    ) -> Result<Signature> {
        let blockhash = rpc.get_latest_blockhash().await?;
        let mut signers: Vec<&dyn Signer> = vec![payer];
        signers.extend(extra.iter().map(|k| k as &dyn Signer));
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            blockhash,
        );
        Ok(rpc.send_and_confirm_transaction(&tx).await?)
    }

    async fn fetch_vault(&self, rpc: &RpcClient, stake_mint: &Pubkey) -> Result<(Pubkey, VaultState)> {
        let (vault, _) = derive_vault(stake_mint, &self.program_id);
        let data = rpc
            .get_account_data(&vault)
            .await
            .map_err(|_| Error::VaultNotFound(*stake_mint))?;
        Ok((vault, parse_vault(&data)?))
    }

    fn decorate(&self, address: Pubkey, pos: &PositionState, state: &VaultState) -> PositionInfo {
        let ring = &state.rings[pos.ring as usize % RING_COUNT];
        PositionInfo {
            address,
            ring: pos.ring,
            shares: pos.shares,
            redeemable_assets: preview_assets_for_shares(pos.shares, ring),
            pending_yield: pending_yield_for_position(pos, ring),
            last_top_up_time: pos.last_top_up_time,
            unlock_time: unlock_time(pos, ring),
        }
    }
}

// ─── Utilities ────────────────────────────────────────────────────────────────

/// Anchor account discriminator: `sha256("account:{TypeName}")[..8]`.
fn account_disc(type_name: &str) -> [u8; 8] {
    let h = hash(format!("account:{type_name}").as_bytes());
    h.to_bytes()[..8].try_into().unwrap()
}
