// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! OpenSSL-based secure random source for Linux systems.
//!
//! Wraps OpenSSL's CSPRNG (`RAND_bytes`). The OpenSSL pool seeds itself from
//! the operating system, so no explicit seeding is performed here.

use super::*;

/// Secure random source backed by OpenSSL's CSPRNG.
///
/// Carries the sticky failure latch required by [`SecureRandom`]; the latch
/// starts clear and is set by the first backend failure.
#[derive(Debug, Default)]
pub struct OsslSecureRandom {
    failed: bool,
}

impl OsslSecureRandom {
    /// Creates a new source in the good state.
    pub fn new() -> Self {
        Self { failed: false }
    }
}

#[cfg(test)]
impl OsslSecureRandom {
    /// Creates a source with the failure latch already set.
    pub(crate) fn latched() -> Self {
        Self { failed: true }
    }
}

impl SecureRandom for OsslSecureRandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), CryptoError> {
        if self.failed {
            return Err(CryptoError::RngFailed);
        }
        if buf.is_empty() {
            return Ok(());
        }
        openssl::rand::rand_bytes(buf).map_err(|e| {
            self.failed = true;
            tracing::error!(error = ?e, "openssl random byte generation failed");
            CryptoError::RngFailed
        })
    }

    fn good(&self) -> bool {
        !self.failed
    }

    fn reset(&mut self) {
        self.failed = false;
    }
}
