// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! OpenSSL-based HMAC implementation for Linux systems.
//!
//! Computes MACs through OpenSSL's EVP signing interface with an HMAC key,
//! which keeps the key schedule and the digest loop inside the backend.

use openssl::hash::MessageDigest;
use openssl::pkey::PKey;

use super::*;

/// OpenSSL-backed HMAC engine.
///
/// Holds only the digest selection; the key is wrapped per call, so one
/// engine may serve any number of computations under different secrets.
pub struct OsslHmac {
    md: MessageDigest,
}

impl OsslHmac {
    /// Creates an HMAC-SHA256 engine (32-byte MAC).
    pub fn sha256() -> Self {
        Self {
            md: MessageDigest::sha256(),
        }
    }

    /// Returns the MAC length in bytes.
    pub fn size(&self) -> usize {
        self.md.size()
    }
}

impl Hmac for OsslHmac {
    fn calculate(&self, data: &[u8], secret: &[u8]) -> Result<Vec<u8>, CryptoError> {
        use openssl::sign::Signer;

        let key = PKey::hmac(secret).map_err(|e| {
            tracing::error!(error = ?e, "openssl HMAC key wrapping failed");
            CryptoError::HmacFailed
        })?;

        let mut signer =
            Signer::new(self.md, &key).map_err(|_| CryptoError::HmacFailed)?;

        let mut mac = vec![0u8; self.md.size()];
        let written = signer.sign_oneshot(&mut mac, data).map_err(|e| {
            tracing::error!(error = ?e, "openssl HMAC computation failed");
            CryptoError::HmacFailed
        })?;
        mac.truncate(written);
        Ok(mac)
    }
}
