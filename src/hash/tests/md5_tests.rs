// Copyright (C) Nimbus SDK Contributors. All rights reserved.

use std::io::Cursor;

use super::*;

// RFC 1321 appendix vector: MD5("abc")
const ABC_DIGEST: [u8; 16] = [
    0x90, 0x01, 0x50, 0x98, 0x3c, 0xd2, 0x4f, 0xb0, 0xd6, 0x96, 0x3f, 0x7d, 0x28, 0xe1, 0x7f,
    0x72,
];

// MD5 of the empty message
const EMPTY_DIGEST: [u8; 16] = [
    0xd4, 0x1d, 0x8c, 0xd9, 0x8f, 0x00, 0xb2, 0x04, 0xe9, 0x80, 0x09, 0x98, 0xec, 0xf8, 0x42,
    0x7e,
];

#[test]
fn test_md5_known_vector() {
    let engine = OsslHash::md5();
    let digest = engine.calculate(b"abc").expect("Failed to hash buffer");
    assert_eq!(digest.as_slice(), ABC_DIGEST);
}

#[test]
fn test_md5_empty_input() {
    let engine = OsslHash::md5();
    let digest = engine.calculate(b"").expect("Failed to hash empty buffer");
    assert_eq!(digest.as_slice(), EMPTY_DIGEST);
}

#[test]
fn test_md5_stream_matches_buffer() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i % 97) as u8).collect();

    let engine = OsslHash::md5();
    let buffered = engine.calculate(&data).expect("Failed to hash buffer");
    let streamed = engine
        .calculate_stream(&mut Cursor::new(&data))
        .expect("Failed to hash stream");
    assert_eq!(buffered, streamed, "stream digest should match buffer digest");
    assert_eq!(buffered.len(), engine.size());
}
