// Copyright (C) Nimbus SDK Contributors. All rights reserved.

use std::io::Cursor;

use super::*;

// FIPS 180-4 example vector: SHA-256("abc")
const ABC_DIGEST: [u8; 32] = [
    0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae, 0x22,
    0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61, 0xf2, 0x00,
    0x15, 0xad,
];

// SHA-256 of the empty message
const EMPTY_DIGEST: [u8; 32] = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9,
    0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52,
    0xb8, 0x55,
];

#[test]
fn test_sha256_known_vector() {
    let engine = OsslHash::sha256();
    let digest = engine.calculate(b"abc").expect("Failed to hash buffer");
    assert_eq!(digest.as_slice(), ABC_DIGEST);
}

#[test]
fn test_sha256_empty_input() {
    let engine = OsslHash::sha256();
    let digest = engine.calculate(b"").expect("Failed to hash empty buffer");
    assert_eq!(digest.as_slice(), EMPTY_DIGEST);
}

#[test]
fn test_sha256_deterministic() {
    let engine = OsslHash::sha256();
    let data = b"the same input must always produce the same digest";
    let first = engine.calculate(data).expect("Failed to hash buffer");
    let second = engine.calculate(data).expect("Failed to hash buffer");
    assert_eq!(first, second);
    assert_eq!(first.len(), engine.size());
}

#[test]
fn test_sha256_stream_matches_buffer() {
    // Larger than one stream chunk so the loop takes multiple iterations
    let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();

    let engine = OsslHash::sha256();
    let buffered = engine.calculate(&data).expect("Failed to hash buffer");
    let streamed = engine
        .calculate_stream(&mut Cursor::new(&data))
        .expect("Failed to hash stream");
    assert_eq!(buffered, streamed, "stream digest should match buffer digest");
}

#[test]
fn test_sha256_stream_empty() {
    let engine = OsslHash::sha256();
    let digest = engine
        .calculate_stream(&mut Cursor::new(Vec::new()))
        .expect("Failed to hash empty stream");
    assert_eq!(digest.as_slice(), EMPTY_DIGEST);
}
