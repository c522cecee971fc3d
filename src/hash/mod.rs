// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! Cryptographic hash engines.
//!
//! This module defines the backend-neutral [`Hash`] interface and wires in
//! the OpenSSL implementation. Engines compute a digest either over an
//! in-memory buffer or over a readable stream; the stream form feeds the
//! backend incrementally in fixed-size chunks so arbitrarily large inputs
//! are never buffered whole.
//!
//! MD5 is provided for non-security uses such as content checksums expected
//! by existing wire protocols. New integrity checks should use SHA-256.

mod hash_ossl;

pub use hash_ossl::*;

use std::io::Read;

use crate::CryptoError;

/// Number of bytes read from a stream per backend update.
pub(crate) const STREAM_CHUNK_SIZE: usize = 1024;

/// A one-shot cryptographic digest engine.
///
/// Identical input always produces an identical digest. On error no digest
/// bytes are produced, so callers cannot mistake a partial result for a
/// valid one.
pub trait Hash: Send {
    /// Computes the digest of an in-memory buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::HashFailed`] if the backend computation fails.
    fn calculate(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Computes the digest of a readable stream.
    ///
    /// Reads the stream to end in 1024-byte chunks, feeding each chunk to
    /// the backend as it arrives. The stream is consumed from its current
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::HashStreamReadFailed`] if reading the stream
    /// fails, or a backend error if the digest computation fails.
    fn calculate_stream(&self, stream: &mut dyn Read) -> Result<Vec<u8>, CryptoError>;
}

#[cfg(test)]
mod tests;
