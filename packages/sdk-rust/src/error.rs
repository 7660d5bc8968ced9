//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// All errors returned by the Orbit-Stake SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / network ────────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    // ── Discovery ────────────────────────────────────────────────────────────
    /// No vault exists for the given stake mint.
    #[error("Vault not found for mint {0}")]
    VaultNotFound(Pubkey),

    /// The owner has no position in the given ring.
    #[error("No position in ring {ring} for owner {owner}")]
    PositionNotFound { ring: u8, owner: Pubkey },

    // ── Validation ───────────────────────────────────────────────────────────
    /// Ring index outside 0..RING_COUNT.
    #[error("Ring index {0} out of range (0-4)")]
    InvalidRing(u8),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ── Arithmetic ───────────────────────────────────────────────────────────
    #[error("Integer overflow in share / yield math")]
    MathOverflow,

    // ── Account parsing ──────────────────────────────────────────────────────
    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
