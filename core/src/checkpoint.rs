//! Checkpoint - Save/Load Generator State
//!
//! Enables serialization and deserialization of the complete generator state
//! (state array + cursor) for pause/resume and replay.
//!
//! # Critical Invariants
//!
//! - **Determinism**: A restored generator continues its sequence bit-exactly
//! - **State Integrity**: Snapshots carry a SHA256 digest; truncated or
//!   tampered snapshots are rejected on restore
//! - **Cursor Bounds**: cursor never exceeds the state length

use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors that can occur during snapshot capture, validation, or restore
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("State array has {actual} words, expected {expected}")]
    WrongStateLength { expected: usize, actual: usize },

    #[error("Cursor {cursor} exceeds state length {max}")]
    CursorOutOfRange { cursor: usize, max: usize },

    #[error("State digest does not match snapshot contents")]
    DigestMismatch,

    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),
}

/// Complete generator state snapshot
///
/// Captures everything needed to resume the output sequence from an
/// arbitrary point: the state words, the read cursor, and a digest over
/// both for validation at restore time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RngSnapshot {
    /// State words in index order
    pub state: Vec<u64>,

    /// Read position into the state array (the maximum value means the
    /// next draw refills the array before reading)
    pub cursor: usize,

    /// SHA256 hash of (state, cursor) for integrity validation
    pub state_digest: String,
}

impl RngSnapshot {
    /// Capture the current state of a generator
    ///
    /// The generator is not advanced; drawing from it afterwards and from
    /// the restored copy yields identical values.
    pub fn capture(rng: &RngManager) -> Result<Self, SnapshotError> {
        let state_digest = compute_state_digest(rng.state_words(), rng.cursor())?;
        Ok(RngSnapshot {
            state: rng.state_words().to_vec(),
            cursor: rng.cursor(),
            state_digest,
        })
    }

    /// Rebuild a generator from this snapshot
    ///
    /// Validates length, cursor range, and digest before rebuilding; a
    /// snapshot that fails any check is rejected rather than silently
    /// producing a divergent sequence.
    pub fn restore(&self) -> Result<RngManager, SnapshotError> {
        validate_snapshot(self)?;
        let mut words = [0u64; RngManager::STATE_WORDS];
        words.copy_from_slice(&self.state);
        Ok(RngManager::from_snapshot_parts(words, self.cursor))
    }
}

/// Compute deterministic SHA256 digest of generator state
///
/// Hashes the canonical JSON of the (state, cursor) pair. The payload has
/// no maps, so serde_json output is already canonical.
pub fn compute_state_digest(words: &[u64], cursor: usize) -> Result<String, SnapshotError> {
    let json = serde_json::to_string(&(words, cursor))
        .map_err(|e| SnapshotError::Serialization(format!("State serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{:x}", result))
}

/// Validate snapshot integrity
///
/// Checks, in order: state length, cursor range, digest match.
pub fn validate_snapshot(snapshot: &RngSnapshot) -> Result<(), SnapshotError> {
    if snapshot.state.len() != RngManager::STATE_WORDS {
        return Err(SnapshotError::WrongStateLength {
            expected: RngManager::STATE_WORDS,
            actual: snapshot.state.len(),
        });
    }

    if snapshot.cursor > RngManager::STATE_WORDS {
        return Err(SnapshotError::CursorOutOfRange {
            cursor: snapshot.cursor,
            max: RngManager::STATE_WORDS,
        });
    }

    let digest = compute_state_digest(&snapshot.state, snapshot.cursor)?;
    if digest != snapshot.state_digest {
        return Err(SnapshotError::DigestMismatch);
    }

    Ok(())
}
