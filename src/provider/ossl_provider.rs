// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! Default OpenSSL-backed provider.
//!
//! Construction of the engines defined elsewhere in this crate, wired to
//! their OpenSSL implementations. OpenSSL 1.1 and later locks internally,
//! so this provider's backend lock is the no-op implementation and engines
//! run unserialized.

use super::*;
use crate::cipher::OsslCipherBackend;
use crate::hash::OsslHash;
use crate::hmac::OsslHmac;
use crate::rand::OsslSecureRandom;

/// Provider wiring every primitive to its OpenSSL implementation.
///
/// Installed in the registry by default; embedders only interact with it
/// directly to construct engines without going through the registry.
pub struct OpensslProvider {
    lock: Arc<dyn BackendLock>,
}

impl OpensslProvider {
    /// Creates the provider.
    pub fn new() -> Self {
        Self {
            lock: Arc::new(NoopBackendLock),
        }
    }
}

impl Default for OpensslProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoProvider for OpensslProvider {
    fn create_md5(&self) -> Result<Box<dyn Hash>, CryptoError> {
        Ok(Box::new(OsslHash::md5()))
    }

    fn create_sha256(&self) -> Result<Box<dyn Hash>, CryptoError> {
        Ok(Box::new(OsslHash::sha256()))
    }

    fn create_sha256_hmac(&self) -> Result<Box<dyn Hmac>, CryptoError> {
        Ok(Box::new(OsslHmac::sha256()))
    }

    fn create_secure_random(&self) -> Result<Box<dyn SecureRandom>, CryptoError> {
        Ok(Box::new(OsslSecureRandom::new()))
    }

    fn create_cipher_with_iv(
        &self,
        mode: CipherMode,
        key: KeyMaterial,
        iv: Vec<u8>,
    ) -> Result<SymmetricCipher, CryptoError> {
        let backend = OsslCipherBackend::new(mode)?;
        SymmetricCipher::new(mode, key, iv, None, Box::new(backend))
    }

    fn create_cipher_with_tag(
        &self,
        mode: CipherMode,
        key: KeyMaterial,
        iv: Vec<u8>,
        tag: Vec<u8>,
    ) -> Result<SymmetricCipher, CryptoError> {
        let backend = OsslCipherBackend::new(mode)?;
        SymmetricCipher::new(mode, key, iv, Some(tag), Box::new(backend))
    }

    fn init_static_state(&self) {
        // Idempotent library bootstrap.
        openssl::init();
        tracing::debug!("openssl backend initialized");
    }

    fn cleanup_static_state(&self) {
        // OpenSSL 1.1+ deallocates through its own atexit handler.
        tracing::debug!("openssl backend cleanup complete");
    }

    fn backend_lock(&self) -> Arc<dyn BackendLock> {
        Arc::clone(&self.lock)
    }
}
