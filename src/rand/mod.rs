// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! Cryptographically secure random number generation.
//!
//! This module defines the backend-neutral [`SecureRandom`] interface and
//! wires in the OpenSSL implementation. Sources are cheap to construct;
//! providers hand out a fresh instance per caller so instances can be used
//! concurrently without sharing.

mod rand_ossl;

pub use rand_ossl::*;

use crate::CryptoError;

/// A source of cryptographically secure random bytes.
///
/// Failure is sticky: once the backend reports an error the source latches
/// into a failed state and every subsequent call returns
/// [`CryptoError::RngFailed`] until [`reset`](SecureRandom::reset) is called.
/// The latch prevents callers from silently consuming output produced after
/// a backend fault.
pub trait SecureRandom: Send {
    /// Fills `buf` with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngFailed`] if the backend fails or the source
    /// has latched failed.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), CryptoError>;

    /// Returns a vector of `len` random bytes.
    ///
    /// A zero-length request succeeds and returns an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngFailed`] if the backend fails or the source
    /// has latched failed.
    fn generate(&mut self, len: usize) -> Result<Vec<u8>, CryptoError> {
        let mut bytes = vec![0u8; len];
        self.fill(&mut bytes)?;
        Ok(bytes)
    }

    /// Returns `true` if the source has not latched failed.
    fn good(&self) -> bool;

    /// Clears the failure latch so the source can be used again.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests;
