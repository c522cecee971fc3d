// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! OpenSSL-based hash implementations for Linux systems.
//!
//! This module provides concrete implementations of the digest operations
//! using the OpenSSL cryptographic library. Buffer digests go through the
//! one-shot EVP interface; stream digests drive an incremental hasher
//! context chunk by chunk.

use openssl::hash::{hash, Hasher, MessageDigest};

use super::*;

/// OpenSSL-backed digest engine.
///
/// Holds only the algorithm selection; every call creates its own backend
/// context, so one engine may serve any number of sequential computations.
pub struct OsslHash {
    md: MessageDigest,
}

impl OsslHash {
    /// Creates an MD5 engine (16-byte digest).
    pub fn md5() -> Self {
        Self {
            md: MessageDigest::md5(),
        }
    }

    /// Creates a SHA-256 engine (32-byte digest).
    pub fn sha256() -> Self {
        Self {
            md: MessageDigest::sha256(),
        }
    }

    /// Returns the digest length in bytes.
    pub fn size(&self) -> usize {
        self.md.size()
    }
}

impl Hash for OsslHash {
    fn calculate(&self, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let digest = hash(self.md, data).map_err(|e| {
            tracing::error!(error = ?e, "openssl digest computation failed");
            CryptoError::HashFailed
        })?;
        Ok(digest.to_vec())
    }

    fn calculate_stream(&self, stream: &mut dyn Read) -> Result<Vec<u8>, CryptoError> {
        let mut hasher = Hasher::new(self.md).map_err(|e| {
            tracing::error!(error = ?e, "openssl hasher context creation failed");
            CryptoError::HashInitFailed
        })?;

        let mut chunk = [0u8; STREAM_CHUNK_SIZE];
        loop {
            let read = stream.read(&mut chunk).map_err(|e| {
                tracing::error!(error = ?e, "stream read failed during digest");
                CryptoError::HashStreamReadFailed
            })?;
            if read == 0 {
                break;
            }
            hasher.update(&chunk[..read]).map_err(|e| {
                tracing::error!(error = ?e, "openssl digest update failed");
                CryptoError::HashFailed
            })?;
        }

        let digest = hasher.finish().map_err(|e| {
            tracing::error!(error = ?e, "openssl digest finalization failed");
            CryptoError::HashFailed
        })?;
        Ok(digest.to_vec())
    }
}
