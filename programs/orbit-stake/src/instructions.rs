#![allow(ambiguous_glob_reexports)]

pub mod deposit;
pub mod harvest;
pub mod initialize;
pub mod inject_yield;
pub mod migrate_ring;
pub mod set_paused;
pub mod share_math;
pub mod sweep_fees;
pub mod withdraw;

pub use deposit::*;
pub use harvest::*;
pub use initialize::*;
pub use inject_yield::*;
pub use migrate_ring::*;
pub use set_paused::*;
pub use share_math::*;
pub use sweep_fees::*;
pub use withdraw::*;
