//! Checkpoint Tests - Save/Load Generator State
//!
//! Critical invariants tested:
//! - Determinism: Restored generator produces identical outputs
//! - State integrity: Tampered or truncated snapshots are rejected
//! - Capture is passive: Snapshotting never perturbs the sequence

use serde_json::Value;
use sim_rng_core_rs::{validate_snapshot, RngManager, RngSnapshot, SnapshotError};

// ============================================================================
// Test Helpers
// ============================================================================

/// Advance a fresh generator by `draws` outputs and snapshot it
fn snapshot_mid_sequence(seed: u64, draws: usize) -> (RngManager, RngSnapshot) {
    let mut rng = RngManager::new(seed);
    for _ in 0..draws {
        rng.next();
    }
    let snapshot = RngSnapshot::capture(&rng).expect("Failed to capture snapshot");
    (rng, snapshot)
}

// ============================================================================
// Capture & Restore
// ============================================================================

#[test]
fn test_restore_continues_sequence() {
    let (mut original, snapshot) = snapshot_mid_sequence(42, 10);
    let mut restored = snapshot.restore().expect("Failed to restore snapshot");

    for i in 0..1000 {
        assert_eq!(
            original.next(),
            restored.next(),
            "Restored generator diverged at output {}",
            i
        );
    }
}

#[test]
fn test_restore_fresh_generator() {
    // Cursor at the maximum (nothing drawn yet) is a valid snapshot state.
    let (mut original, snapshot) = snapshot_mid_sequence(42, 0);
    assert_eq!(snapshot.cursor, RngManager::STATE_WORDS);

    let mut restored = snapshot.restore().expect("Failed to restore snapshot");
    assert_eq!(original.next(), restored.next());
}

#[test]
fn test_restore_across_epoch_boundary() {
    // Snapshot one output before a regeneration fires.
    let (mut original, snapshot) = snapshot_mid_sequence(42, RngManager::STATE_WORDS - 1);
    let mut restored = snapshot.restore().expect("Failed to restore snapshot");

    for _ in 0..10 {
        assert_eq!(original.next(), restored.next());
    }
}

#[test]
fn test_multi_seed_snapshot_loop() {
    for seed in [0u64, 1, 5489, 123456789, u64::MAX] {
        for draws in [0usize, 1, 10, 311, 312, 500] {
            let (mut original, snapshot) = snapshot_mid_sequence(seed, draws);
            let mut restored = snapshot.restore().expect("Failed to restore snapshot");

            for _ in 0..50 {
                assert_eq!(
                    original.next(),
                    restored.next(),
                    "Divergence for seed {} after {} draws",
                    seed,
                    draws
                );
            }
        }
    }
}

#[test]
fn test_identical_seeds_identical_snapshots() {
    let (_, snap1) = snapshot_mid_sequence(987, 0);
    let (_, snap2) = snapshot_mid_sequence(987, 0);

    assert_eq!(snap1, snap2, "Same seed should produce identical snapshots");
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_snapshot_json_shape() {
    let (_, snapshot) = snapshot_mid_sequence(42, 5);
    let value = serde_json::to_value(&snapshot).expect("Failed to serialize snapshot");

    let obj = value.as_object().expect("Snapshot should be a JSON object");
    assert!(obj.contains_key("state"));
    assert!(obj.contains_key("cursor"));
    assert!(obj.contains_key("state_digest"));

    match &obj["state"] {
        Value::Array(words) => assert_eq!(words.len(), RngManager::STATE_WORDS),
        other => panic!("state should be a JSON array, got {:?}", other),
    }
    assert_eq!(obj["cursor"], Value::from(5));
}

#[test]
fn test_snapshot_json_roundtrip() {
    let (mut original, snapshot) = snapshot_mid_sequence(42, 100);

    let json = serde_json::to_string(&snapshot).expect("Failed to serialize snapshot");
    let decoded: RngSnapshot = serde_json::from_str(&json).expect("Failed to deserialize snapshot");
    let mut restored = decoded.restore().expect("Failed to restore snapshot");

    for _ in 0..100 {
        assert_eq!(original.next(), restored.next());
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_wrong_state_length_rejected() {
    let (_, mut snapshot) = snapshot_mid_sequence(42, 5);
    snapshot.state.truncate(100);

    assert_eq!(
        validate_snapshot(&snapshot),
        Err(SnapshotError::WrongStateLength {
            expected: RngManager::STATE_WORDS,
            actual: 100,
        })
    );
    assert!(snapshot.restore().is_err());
}

#[test]
fn test_cursor_out_of_range_rejected() {
    let (_, mut snapshot) = snapshot_mid_sequence(42, 5);
    snapshot.cursor = RngManager::STATE_WORDS + 1;

    assert_eq!(
        validate_snapshot(&snapshot),
        Err(SnapshotError::CursorOutOfRange {
            cursor: RngManager::STATE_WORDS + 1,
            max: RngManager::STATE_WORDS,
        })
    );
}

#[test]
fn test_tampered_state_rejected() {
    let (_, mut snapshot) = snapshot_mid_sequence(42, 5);
    snapshot.state[17] ^= 1;

    assert_eq!(validate_snapshot(&snapshot), Err(SnapshotError::DigestMismatch));
}

#[test]
fn test_tampered_cursor_rejected() {
    let (_, mut snapshot) = snapshot_mid_sequence(42, 5);
    snapshot.cursor = 6;

    assert_eq!(validate_snapshot(&snapshot), Err(SnapshotError::DigestMismatch));
}

#[test]
fn test_tampered_digest_rejected() {
    let (_, mut snapshot) = snapshot_mid_sequence(42, 5);
    snapshot.state_digest = "0".repeat(64);

    assert_eq!(validate_snapshot(&snapshot), Err(SnapshotError::DigestMismatch));
}

#[test]
fn test_valid_snapshot_passes_validation() {
    let (_, snapshot) = snapshot_mid_sequence(42, 5);
    assert_eq!(validate_snapshot(&snapshot), Ok(()));
}
