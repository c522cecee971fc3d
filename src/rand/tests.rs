// Copyright (c) Nimbus SDK Contributors.
// Licensed under the MIT License.

use std::collections::HashSet;

use super::*;

/// Test basic random fill functionality.
///
/// This test verifies that:
/// - The source can fill a buffer without error
/// - The output is not all zeros (extremely unlikely for true random data)
/// - The source stays in the good state
#[test]
fn test_fill() {
    let mut rng = OsslSecureRandom::new();
    let mut buf = [0u8; 1024];
    rng.fill(&mut buf).expect("Failed to fill random buffer");
    // Check that the buffer is not all zeros (very unlikely for random data)
    assert_ne!(buf, [0u8; 1024]);
    assert!(rng.good());
}

/// Test random vector generation functionality.
///
/// This test verifies that:
/// - The source returns a vector of the requested length
/// - The output is not all zeros (extremely unlikely for true random data)
/// - A zero-length request returns an empty vector
#[test]
fn test_generate() {
    let mut rng = OsslSecureRandom::new();
    let vec = rng.generate(1024).expect("Failed to generate random vector");
    assert_eq!(vec.len(), 1024);
    // Check that the vector is not all zeros (very unlikely for random data)
    assert_ne!(vec, vec![0u8; 1024]);

    // Zero-length should succeed and return an empty vector
    let empty = rng.generate(0).expect("Failed to generate empty vector");
    assert!(empty.is_empty());
}

/// Test that repeated 32-byte draws never repeat.
///
/// One hundred draws of 256 bits each colliding would indicate a broken
/// generator rather than bad luck.
#[test]
fn test_generate_does_not_repeat() {
    let mut rng = OsslSecureRandom::new();
    let mut seen = HashSet::new();
    for _ in 0..100 {
        let bytes = rng.generate(32).expect("Failed to generate random vector");
        assert!(seen.insert(bytes), "random generator repeated a 32-byte value");
    }
}

/// Test the failure latch lifecycle.
///
/// A fresh source reports good; reset on a good source is a no-op and the
/// source keeps producing output afterwards.
#[test]
fn test_latch_reset_on_good_source() {
    let mut rng = OsslSecureRandom::new();
    assert!(rng.good());
    rng.reset();
    assert!(rng.good());
    rng.generate(16).expect("Failed to generate after reset");
}

/// Test that an engaged failure latch is sticky until reset.
///
/// Once the latch is set every call fails before reaching the backend, and
/// failed calls must not clear it; `reset()` restores the source to working
/// order.
#[test]
fn test_latched_source_fails_until_reset() {
    let mut rng = OsslSecureRandom::latched();
    assert!(!rng.good());

    let mut buf = [0u8; 16];
    assert_eq!(rng.fill(&mut buf), Err(CryptoError::RngFailed));
    assert_eq!(rng.generate(16).err(), Some(CryptoError::RngFailed));
    assert!(!rng.good(), "failed calls must not clear the latch");

    rng.reset();
    assert!(rng.good());
    rng.fill(&mut buf).expect("Failed to fill after reset");
    let vec = rng.generate(16).expect("Failed to generate after reset");
    assert_eq!(vec.len(), 16);
}
