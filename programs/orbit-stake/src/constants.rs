/// PDA seeds
pub const VAULT_SEED: &[u8] = b"vault";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
pub const POSITION_SEED: &[u8] = b"position";

/// Number of independent staking rings per vault
pub const RING_COUNT: usize = 5;

/// Denominator for basis-point math (u128 to avoid up-cast noise)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// 1e18 decimal fixed-point scale (acc_per_share, yield_amplifier)
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Smallest accepted deposit, in atomic stake-token units
pub const MIN_DEPOSIT: u64 = 1_000;

/// Principal ceiling per ring, in atomic stake-token units
pub const RING_ASSET_CAP: u64 = 1_000_000_000_000_000;
