// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! Provider registry and backend lifecycle.
//!
//! This module holds the process-wide selection of the active
//! [`CryptoProvider`], the reference-counted init/cleanup lifecycle around
//! it, and the free factory functions through which the rest of the SDK
//! obtains engines. Embedders substitute a backend by installing their own
//! provider with [`set_provider`] before any factory call.
//!
//! # Lifecycle
//!
//! [`init_provider`] and [`cleanup_provider`] are reference counted: the
//! first init runs the provider's one-time static-state hook, the last
//! cleanup runs its teardown hook, and intermediate calls only adjust the
//! count. Independent components may therefore bracket their own usage
//! without coordinating. [`ProviderGuard`] ties the pair to a scope.
//!
//! # Thread safety
//!
//! Factory calls may run concurrently from any thread. Swapping the
//! provider while factory calls are in flight is the embedder's
//! responsibility to sequence; the registry only guarantees the swap
//! itself is atomic.

mod ossl_provider;

pub use ossl_provider::*;

use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::cipher::{generate_iv, CipherBackend, CipherDirection, CipherMode, SymmetricCipher};
use crate::hash::Hash;
use crate::hmac::Hmac;
use crate::rand::SecureRandom;
use crate::secret::KeyMaterial;
use crate::CryptoError;

/// Factory for every cryptographic primitive, backed by one library.
///
/// A provider constructs engines; it performs no cryptography itself.
/// Implementations supply their own [`CipherBackend`] to the shared
/// [`SymmetricCipher`] engine rather than reimplementing cipher lifecycle
/// logic. The default auto-IV cipher factory is implemented in terms of
/// the provider's own random source, so every provider generates IVs with
/// the same layout.
pub trait CryptoProvider: Send + Sync {
    /// Creates an MD5 digest engine.
    fn create_md5(&self) -> Result<Box<dyn Hash>, CryptoError>;

    /// Creates a SHA-256 digest engine.
    fn create_sha256(&self) -> Result<Box<dyn Hash>, CryptoError>;

    /// Creates an HMAC-SHA256 engine.
    fn create_sha256_hmac(&self) -> Result<Box<dyn Hmac>, CryptoError>;

    /// Creates a secure random source.
    fn create_secure_random(&self) -> Result<Box<dyn SecureRandom>, CryptoError>;

    /// Creates a cipher engine with a freshly generated IV.
    ///
    /// The IV comes from the provider's own random source via
    /// [`generate_iv`], and is readable afterwards through
    /// [`SymmetricCipher::iv`].
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::RngFailed`] if IV generation fails, or a
    /// construction error from the underlying factory.
    fn create_cipher(
        &self,
        mode: CipherMode,
        key: KeyMaterial,
    ) -> Result<SymmetricCipher, CryptoError> {
        let mut rng = self.create_secure_random()?;
        let iv = generate_iv(mode, &mut *rng)?;
        self.create_cipher_with_iv(mode, key, iv)
    }

    /// Creates a cipher engine with a caller-supplied IV.
    fn create_cipher_with_iv(
        &self,
        mode: CipherMode,
        key: KeyMaterial,
        iv: Vec<u8>,
    ) -> Result<SymmetricCipher, CryptoError>;

    /// Creates a cipher engine for authenticated decryption, bound to the
    /// expected tag.
    fn create_cipher_with_tag(
        &self,
        mode: CipherMode,
        key: KeyMaterial,
        iv: Vec<u8>,
        tag: Vec<u8>,
    ) -> Result<SymmetricCipher, CryptoError>;

    /// One-time backend initialization, run by the first [`init_provider`].
    fn init_static_state(&self) {}

    /// Backend teardown, run by the last [`cleanup_provider`].
    fn cleanup_static_state(&self) {}

    /// Returns the lock serializing access to the provider's backend
    /// contexts.
    ///
    /// Backends that are internally thread-safe return a no-op lock; the
    /// default suits them. Providers wrapping a library that requires
    /// external serialization return a real lock and thread it into their
    /// engines, for example through [`LockedCipherBackend`].
    fn backend_lock(&self) -> Arc<dyn BackendLock> {
        Arc::new(NoopBackendLock)
    }
}

/// Capability that serializes access to a provider's backend contexts.
pub trait BackendLock: Send + Sync {
    /// Acquires the lock for the duration of the returned guard.
    fn acquire(&self) -> BackendLockGuard<'_>;
}

/// Held access to a backend, released on drop.
pub enum BackendLockGuard<'a> {
    /// The backend is internally thread-safe; nothing is held.
    Unlocked,
    /// Exclusive access, held until drop.
    Locked(MutexGuard<'a, ()>),
}

/// Lock for backends that need no external serialization.
#[derive(Debug, Default)]
pub struct NoopBackendLock;

impl BackendLock for NoopBackendLock {
    fn acquire(&self) -> BackendLockGuard<'_> {
        BackendLockGuard::Unlocked
    }
}

/// Mutex-backed lock for backends that must be driven one call at a time.
#[derive(Debug, Default)]
pub struct SerializedBackendLock {
    lock: Mutex<()>,
}

impl SerializedBackendLock {
    /// Creates an unheld lock.
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
        }
    }
}

impl BackendLock for SerializedBackendLock {
    fn acquire(&self) -> BackendLockGuard<'_> {
        BackendLockGuard::Locked(self.lock.lock())
    }
}

/// Cipher backend decorator that holds a [`BackendLock`] across every
/// backend call.
///
/// Providers whose native library is not safe for concurrent context use
/// wrap their backend in this before handing it to [`SymmetricCipher`].
pub struct LockedCipherBackend {
    inner: Box<dyn CipherBackend>,
    lock: Arc<dyn BackendLock>,
}

impl LockedCipherBackend {
    /// Wraps `inner` so every call runs under `lock`.
    pub fn new(inner: Box<dyn CipherBackend>, lock: Arc<dyn BackendLock>) -> Self {
        Self { inner, lock }
    }
}

impl CipherBackend for LockedCipherBackend {
    fn init(
        &mut self,
        direction: CipherDirection,
        key: &KeyMaterial,
        iv: &[u8],
        tag: Option<&[u8]>,
    ) -> Result<(), CryptoError> {
        let _held = self.lock.acquire();
        self.inner.init(direction, key, iv, tag)
    }

    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let _held = self.lock.acquire();
        self.inner.update(input)
    }

    fn finalize(&mut self) -> Result<Vec<u8>, CryptoError> {
        let _held = self.lock.acquire();
        self.inner.finalize()
    }

    fn authentication_tag(&self) -> Result<Vec<u8>, CryptoError> {
        let _held = self.lock.acquire();
        self.inner.authentication_tag()
    }
}

struct ProviderRegistry {
    provider: RwLock<Arc<dyn CryptoProvider>>,
    init_count: Mutex<usize>,
}

lazy_static! {
    static ref REGISTRY: ProviderRegistry = ProviderRegistry {
        provider: RwLock::new(Arc::new(OpensslProvider::new())),
        init_count: Mutex::new(0),
    };
}

/// Installs `provider` as the process-wide provider.
///
/// Call before [`init_provider`] and before any factory call. Engines
/// already constructed keep the backend they were built with; sequencing a
/// swap against in-flight factory calls is the caller's responsibility.
pub fn set_provider(provider: Arc<dyn CryptoProvider>) {
    *REGISTRY.provider.write() = provider;
}

/// Returns the currently installed provider.
pub fn active_provider() -> Arc<dyn CryptoProvider> {
    Arc::clone(&*REGISTRY.provider.read())
}

/// Marks the provider in use, running its one-time static-state hook on
/// the first call.
///
/// Each call must be balanced by a [`cleanup_provider`] call. Prefer
/// [`ProviderGuard::acquire`] where a scope exists.
pub fn init_provider() {
    let mut count = REGISTRY.init_count.lock();
    if *count == 0 {
        active_provider().init_static_state();
        tracing::debug!("crypto provider static state initialized");
    }
    *count += 1;
}

/// Releases one [`init_provider`] call, running the provider's teardown
/// hook when the count reaches zero.
///
/// An unbalanced call (count already zero) is logged and otherwise ignored.
pub fn cleanup_provider() {
    let mut count = REGISTRY.init_count.lock();
    match *count {
        0 => tracing::error!("cleanup_provider called without a matching init_provider"),
        1 => {
            active_provider().cleanup_static_state();
            tracing::debug!("crypto provider static state cleaned up");
            *count = 0;
        }
        _ => *count -= 1,
    }
}

/// Scope handle pairing [`init_provider`] with [`cleanup_provider`].
///
/// Construction marks the provider in use; drop releases it. Nesting is
/// fine, the underlying count handles it.
#[must_use = "the provider is released when the guard drops"]
pub struct ProviderGuard(());

impl ProviderGuard {
    /// Marks the provider in use for the lifetime of the guard.
    pub fn acquire() -> Self {
        init_provider();
        Self(())
    }
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        cleanup_provider();
    }
}

/// Creates an MD5 digest engine from the active provider.
pub fn create_md5() -> Result<Box<dyn Hash>, CryptoError> {
    active_provider().create_md5()
}

/// Creates a SHA-256 digest engine from the active provider.
pub fn create_sha256() -> Result<Box<dyn Hash>, CryptoError> {
    active_provider().create_sha256()
}

/// Creates an HMAC-SHA256 engine from the active provider.
pub fn create_sha256_hmac() -> Result<Box<dyn Hmac>, CryptoError> {
    active_provider().create_sha256_hmac()
}

/// Creates a secure random source from the active provider.
pub fn create_secure_random() -> Result<Box<dyn SecureRandom>, CryptoError> {
    active_provider().create_secure_random()
}

/// Creates an AES-CBC engine with a freshly generated IV.
pub fn create_aes_cbc(key: KeyMaterial) -> Result<SymmetricCipher, CryptoError> {
    active_provider().create_cipher(CipherMode::Cbc, key)
}

/// Creates an AES-CBC engine with a caller-supplied IV.
pub fn create_aes_cbc_with_iv(
    key: KeyMaterial,
    iv: Vec<u8>,
) -> Result<SymmetricCipher, CryptoError> {
    active_provider().create_cipher_with_iv(CipherMode::Cbc, key, iv)
}

/// Creates an AES-CTR engine with a freshly generated nonce/counter IV.
pub fn create_aes_ctr(key: KeyMaterial) -> Result<SymmetricCipher, CryptoError> {
    active_provider().create_cipher(CipherMode::Ctr, key)
}

/// Creates an AES-CTR engine with a caller-supplied IV.
pub fn create_aes_ctr_with_iv(
    key: KeyMaterial,
    iv: Vec<u8>,
) -> Result<SymmetricCipher, CryptoError> {
    active_provider().create_cipher_with_iv(CipherMode::Ctr, key, iv)
}

/// Creates an AES-GCM engine with a freshly generated IV.
pub fn create_aes_gcm(key: KeyMaterial) -> Result<SymmetricCipher, CryptoError> {
    active_provider().create_cipher(CipherMode::Gcm, key)
}

/// Creates an AES-GCM engine with a caller-supplied IV.
pub fn create_aes_gcm_with_iv(
    key: KeyMaterial,
    iv: Vec<u8>,
) -> Result<SymmetricCipher, CryptoError> {
    active_provider().create_cipher_with_iv(CipherMode::Gcm, key, iv)
}

/// Creates an AES-GCM engine for decryption, bound to the expected tag.
pub fn create_aes_gcm_with_tag(
    key: KeyMaterial,
    iv: Vec<u8>,
    tag: Vec<u8>,
) -> Result<SymmetricCipher, CryptoError> {
    active_provider().create_cipher_with_tag(CipherMode::Gcm, key, iv, tag)
}

/// Generates key material of `len` bytes from the active provider's random
/// source.
pub fn generate_key(len: usize) -> Result<KeyMaterial, CryptoError> {
    let mut rng = active_provider().create_secure_random()?;
    Ok(KeyMaterial::new(rng.generate(len)?))
}
