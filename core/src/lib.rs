//! Deterministic RNG Core - Rust Engine
//!
//! MT19937-64 pseudorandom number generator with strict reproducibility
//! across runs, for simulation, testing, and procedural generation.
//!
//! # Architecture
//!
//! - **rng**: The generator state machine (seed mixing, epoch regeneration,
//!   tempering) and per-subsystem stream derivation
//! - **checkpoint**: Snapshot save/restore with digest validation
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (seeded, no external entropy)
//! 2. Same seed + stream → same sequence, bit-exact across runs
//! 3. A restored snapshot continues its sequence bit-exactly

// Module declarations
pub mod checkpoint;
pub mod rng;

// Re-exports for convenience
pub use checkpoint::{compute_state_digest, validate_snapshot, RngSnapshot, SnapshotError};
pub use rng::{RngManager, StreamFactory};
