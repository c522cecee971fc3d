// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! Streaming symmetric cipher engine.
//!
//! This module provides [`SymmetricCipher`], a single incremental
//! encryption/decryption engine shared by every cipher mode. Mode behavior
//! (block size, IV and tag lengths, padding, authentication) comes from a
//! per-mode capability profile rather than per-mode engine types, and the
//! raw streaming primitive is supplied by a [`CipherBackend`]
//! implementation, so alternative backends plug in without touching the
//! engine logic.
//!
//! # Lifecycle
//!
//! An engine starts uninitialized. The first `encrypt_buffer`,
//! `decrypt_buffer`, or `finalize_*` call binds the backend context and
//! locks the engine to that direction for the rest of its life. Zero or
//! more update calls stream data through the context; exactly one finalize
//! call completes the operation. Mixing directions, operating after
//! finalization, or any backend fault moves the engine into
//! [`CipherState::Failed`], from which every operation reports an error.
//!
//! # Authenticated decryption
//!
//! GCM decryption holds ciphertext inside the engine and decrypts it during
//! `finalize_decryption`, after the backend has been given the expected tag.
//! No plaintext leaves the engine unless the tag check passes.

mod cipher_ossl;

pub use cipher_ossl::*;

use crate::rand::SecureRandom;
use crate::secret::KeyMaterial;
use crate::CryptoError;

/// AES key lengths accepted by every mode, in bytes.
const VALID_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

/// Width of the trailing CTR counter word, in bytes.
const CTR_COUNTER_LEN: usize = 4;

/// Initial value of the CTR counter word.
const CTR_COUNTER_INIT: u32 = 1;

/// Per-mode capability profile consulted by the engine core.
pub(crate) struct ModeProfile {
    /// Cipher block size in bytes.
    pub block_size: usize,
    /// Required IV length in bytes.
    pub iv_len: usize,
    /// Authentication tag length in bytes, for authenticated modes.
    pub tag_len: Option<usize>,
    /// Whether the backend applies PKCS#7 padding.
    pub padded: bool,
    /// Whether decryption output is withheld until finalization.
    pub buffers_decrypt: bool,
}

const CBC_PROFILE: ModeProfile = ModeProfile {
    block_size: 16,
    iv_len: 16,
    tag_len: None,
    padded: true,
    buffers_decrypt: false,
};

const CTR_PROFILE: ModeProfile = ModeProfile {
    block_size: 16,
    iv_len: 16,
    tag_len: None,
    padded: false,
    buffers_decrypt: false,
};

const GCM_PROFILE: ModeProfile = ModeProfile {
    block_size: 16,
    iv_len: 12,
    tag_len: Some(16),
    padded: false,
    buffers_decrypt: true,
};

/// Symmetric cipher mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    /// Cipher block chaining with PKCS#7 padding. 16-byte IV.
    Cbc,
    /// Counter mode keystream cipher. 16-byte IV carrying a trailing
    /// counter word.
    Ctr,
    /// Galois/Counter mode authenticated encryption. 12-byte IV,
    /// 16-byte authentication tag.
    Gcm,
}

impl CipherMode {
    pub(crate) const fn profile(self) -> &'static ModeProfile {
        match self {
            CipherMode::Cbc => &CBC_PROFILE,
            CipherMode::Ctr => &CTR_PROFILE,
            CipherMode::Gcm => &GCM_PROFILE,
        }
    }

    /// Returns the cipher block size in bytes.
    pub fn block_size(self) -> usize {
        self.profile().block_size
    }

    /// Returns the IV length this mode requires, in bytes.
    pub fn iv_len(self) -> usize {
        self.profile().iv_len
    }

    /// Returns the authentication tag length, or `None` for unauthenticated
    /// modes.
    pub fn tag_len(self) -> Option<usize> {
        self.profile().tag_len
    }

    /// Returns `true` if this mode authenticates its ciphertext.
    pub fn is_authenticated(self) -> bool {
        self.profile().tag_len.is_some()
    }
}

/// Direction an engine instance is locked to after its first operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherDirection {
    /// Plaintext in, ciphertext out.
    Encrypt,
    /// Ciphertext in, plaintext out.
    Decrypt,
}

/// Observable lifecycle state of a [`SymmetricCipher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherState {
    /// No operation has been performed; the backend context is unbound.
    Uninitialized,
    /// Bound for encryption; no data processed yet.
    EncryptReady,
    /// Encrypting; at least one buffer processed.
    EncryptActive,
    /// Encryption finalized; the engine accepts no further operations.
    EncryptFinalized,
    /// Bound for decryption; no data processed yet.
    DecryptReady,
    /// Decrypting; at least one buffer processed.
    DecryptActive,
    /// Decryption finalized; the engine accepts no further operations.
    DecryptFinalized,
    /// A failure or misuse occurred; every operation reports an error.
    Failed,
}

/// Raw streaming cipher primitive supplied by a backend library.
///
/// The engine core owns the mode semantics and the lifecycle state machine;
/// implementations only bind a context and move bytes through it. Backends
/// are single-use: one `init`, a sequence of `update` calls, one `finalize`.
pub trait CipherBackend: Send {
    /// Binds the context to a direction, key, and IV.
    ///
    /// For authenticated decryption the expected tag is supplied here so
    /// the backend can verify it during [`finalize`](CipherBackend::finalize).
    fn init(
        &mut self,
        direction: CipherDirection,
        key: &KeyMaterial,
        iv: &[u8],
        tag: Option<&[u8]>,
    ) -> Result<(), CryptoError>;

    /// Streams bytes through the context, returning whatever output the
    /// backend has ready. Block modes may withhold bytes until a full block
    /// or the finalize call.
    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Completes the operation, returning any remaining output. For
    /// authenticated decryption this is where the tag check happens.
    fn finalize(&mut self) -> Result<Vec<u8>, CryptoError>;

    /// Returns the authentication tag computed by a finalized encrypt
    /// context.
    fn authentication_tag(&self) -> Result<Vec<u8>, CryptoError>;
}

/// Generates a fresh IV for `mode` from the supplied random source.
///
/// CTR IVs carry structure: `[4-byte nonce][8-byte secure random][4-byte
/// counter]`, with the counter word initialized to big-endian 1 so the
/// keystream starts at a defined block index. Other modes use fully random
/// IVs of the mode's required length.
///
/// # Errors
///
/// Returns [`CryptoError::RngFailed`] if the random source fails.
pub fn generate_iv(
    mode: CipherMode,
    rng: &mut dyn SecureRandom,
) -> Result<Vec<u8>, CryptoError> {
    let mut iv = rng.generate(mode.iv_len())?;
    if mode == CipherMode::Ctr {
        let counter_at = iv.len() - CTR_COUNTER_LEN;
        iv[counter_at..].copy_from_slice(&CTR_COUNTER_INIT.to_be_bytes());
    }
    Ok(iv)
}

/// Incremental symmetric encryption/decryption engine.
///
/// One instance performs one operation: either an encryption or a
/// decryption, chosen by the first call, streamed through zero or more
/// buffer calls and completed by exactly one finalize call. Instances are
/// built through a provider (see the crate-level factory functions) or
/// directly via [`SymmetricCipher::new`] with a backend of choice.
///
/// The engine is not internally synchronized; one logical caller drives an
/// instance. Distinct instances are independent and may be used from
/// different threads.
pub struct SymmetricCipher {
    mode: CipherMode,
    state: CipherState,
    key: KeyMaterial,
    iv: Vec<u8>,
    tag: Option<Vec<u8>>,
    /// Ciphertext withheld until finalization for tag-checked modes.
    pending: Vec<u8>,
    backend: Box<dyn CipherBackend>,
}

impl SymmetricCipher {
    /// Creates an engine over an explicit backend.
    ///
    /// Providers call this from their cipher factories; it is public so a
    /// substituted provider can reuse the engine core with its own
    /// [`CipherBackend`].
    ///
    /// # Arguments
    ///
    /// * `mode` - Cipher mode of operation
    /// * `key` - AES key material; 16, 24, or 32 bytes
    /// * `iv` - Initialization vector of exactly [`CipherMode::iv_len`] bytes
    /// * `tag` - Expected authentication tag, for authenticated decryption
    /// * `backend` - Unbound backend context for `mode`
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InvalidKeyLength`] if the key is not 16, 24, or
    ///   32 bytes
    /// - [`CryptoError::InvalidIvLength`] if the IV length does not match
    ///   the mode
    /// - [`CryptoError::TagNotSupported`] if a tag is supplied for an
    ///   unauthenticated mode
    /// - [`CryptoError::InvalidTagLength`] if the tag length does not match
    ///   the mode
    pub fn new(
        mode: CipherMode,
        key: KeyMaterial,
        iv: Vec<u8>,
        tag: Option<Vec<u8>>,
        backend: Box<dyn CipherBackend>,
    ) -> Result<Self, CryptoError> {
        if !VALID_KEY_LENGTHS.contains(&key.len()) {
            tracing::error!(key_len = key.len(), ?mode, "rejected cipher key length");
            return Err(CryptoError::InvalidKeyLength);
        }
        if iv.len() != mode.iv_len() {
            tracing::error!(iv_len = iv.len(), ?mode, "rejected cipher IV length");
            return Err(CryptoError::InvalidIvLength);
        }
        if let Some(tag) = &tag {
            let Some(expected) = mode.tag_len() else {
                return Err(CryptoError::TagNotSupported);
            };
            if tag.len() != expected {
                tracing::error!(tag_len = tag.len(), ?mode, "rejected authentication tag length");
                return Err(CryptoError::InvalidTagLength);
            }
        }
        Ok(Self {
            mode,
            state: CipherState::Uninitialized,
            key,
            iv,
            tag,
            pending: Vec::new(),
            backend,
        })
    }

    /// Returns the cipher mode.
    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> CipherState {
        self.state
    }

    /// Returns `true` if the engine has not failed.
    pub fn good(&self) -> bool {
        self.state != CipherState::Failed
    }

    /// Returns the IV the engine was constructed with.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Returns the authentication tag.
    ///
    /// `None` until the tag exists: after
    /// [`finalize_encryption`](SymmetricCipher::finalize_encryption) on an
    /// authenticated mode, or from construction when the caller supplied
    /// the tag for decryption.
    pub fn tag(&self) -> Option<&[u8]> {
        self.tag.as_deref()
    }

    /// Encrypts a buffer, returning whatever ciphertext the backend has
    /// ready. Block modes may withhold bytes until a later call.
    ///
    /// The first call on a fresh engine locks it to encryption. A
    /// zero-length buffer is permitted and produces no output.
    ///
    /// # Errors
    ///
    /// Misuse ([`CryptoError::DirectionConflict`],
    /// [`CryptoError::AlreadyFinalized`], [`CryptoError::EngineFailed`]) or
    /// a backend failure; both move the engine to [`CipherState::Failed`].
    pub fn encrypt_buffer(&mut self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.ensure_direction(CipherDirection::Encrypt)?;
        if plaintext.is_empty() {
            return Ok(Vec::new());
        }
        let out = match self.backend.update(plaintext) {
            Ok(out) => out,
            Err(e) => return Err(self.fail(e)),
        };
        self.state = CipherState::EncryptActive;
        Ok(out)
    }

    /// Completes an encryption, returning any remaining ciphertext (for
    /// CBC, the padding block).
    ///
    /// On authenticated modes the tag becomes available through
    /// [`tag`](SymmetricCipher::tag) once this returns. Finalizing a fresh
    /// engine is permitted and encrypts the empty message.
    ///
    /// # Errors
    ///
    /// Misuse or backend failure, as for
    /// [`encrypt_buffer`](SymmetricCipher::encrypt_buffer). Calling any
    /// operation after finalization reports
    /// [`CryptoError::AlreadyFinalized`].
    pub fn finalize_encryption(&mut self) -> Result<Vec<u8>, CryptoError> {
        self.ensure_direction(CipherDirection::Encrypt)?;
        let out = match self.backend.finalize() {
            Ok(out) => out,
            Err(e) => return Err(self.fail(e)),
        };
        if self.mode.is_authenticated() {
            let tag = match self.backend.authentication_tag() {
                Ok(tag) => tag,
                Err(e) => return Err(self.fail(e)),
            };
            self.tag = Some(tag);
        }
        self.state = CipherState::EncryptFinalized;
        Ok(out)
    }

    /// Decrypts a buffer, returning whatever plaintext the backend releases.
    ///
    /// The first call on a fresh engine locks it to decryption; for
    /// authenticated modes the expected tag must have been supplied at
    /// construction, otherwise this reports [`CryptoError::TagRequired`].
    /// Authenticated modes return no plaintext here: ciphertext is withheld
    /// and decrypted during
    /// [`finalize_decryption`](SymmetricCipher::finalize_decryption), after
    /// the tag check.
    ///
    /// # Errors
    ///
    /// Misuse or backend failure, as for
    /// [`encrypt_buffer`](SymmetricCipher::encrypt_buffer).
    pub fn decrypt_buffer(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.ensure_direction(CipherDirection::Decrypt)?;
        if ciphertext.is_empty() {
            return Ok(Vec::new());
        }
        if self.mode.profile().buffers_decrypt {
            self.pending.extend_from_slice(ciphertext);
            self.state = CipherState::DecryptActive;
            return Ok(Vec::new());
        }
        let out = match self.backend.update(ciphertext) {
            Ok(out) => out,
            Err(e) => return Err(self.fail(e)),
        };
        self.state = CipherState::DecryptActive;
        Ok(out)
    }

    /// Completes a decryption, returning the remaining plaintext.
    ///
    /// For authenticated modes this decrypts all withheld ciphertext and
    /// releases plaintext only if the backend's tag check passes; a
    /// mismatch reports [`CryptoError::AuthenticationFailed`] and yields
    /// nothing. For CBC a padding inconsistency surfaces here as
    /// [`CryptoError::CipherFinalFailed`].
    ///
    /// # Errors
    ///
    /// Authentication failure, misuse, or backend failure; all move the
    /// engine to [`CipherState::Failed`].
    pub fn finalize_decryption(&mut self) -> Result<Vec<u8>, CryptoError> {
        self.ensure_direction(CipherDirection::Decrypt)?;
        let mut out = Vec::new();
        if !self.pending.is_empty() {
            let withheld = std::mem::take(&mut self.pending);
            out = match self.backend.update(&withheld) {
                Ok(out) => out,
                Err(e) => return Err(self.fail(e)),
            };
        }
        match self.backend.finalize() {
            Ok(tail) => out.extend_from_slice(&tail),
            // Dropping `out` here is what keeps unverified plaintext inside
            // the engine on a failed tag check.
            Err(e) => return Err(self.fail(e)),
        }
        self.state = CipherState::DecryptFinalized;
        Ok(out)
    }

    /// Checks the state machine for `direction`, binding the backend on the
    /// first operation.
    fn ensure_direction(&mut self, direction: CipherDirection) -> Result<(), CryptoError> {
        match self.state {
            CipherState::Failed => Err(CryptoError::EngineFailed),
            CipherState::Uninitialized => self.init_backend(direction),
            CipherState::EncryptFinalized | CipherState::DecryptFinalized => {
                Err(self.fail(CryptoError::AlreadyFinalized))
            }
            CipherState::EncryptReady | CipherState::EncryptActive => {
                if direction == CipherDirection::Encrypt {
                    Ok(())
                } else {
                    Err(self.fail(CryptoError::DirectionConflict))
                }
            }
            CipherState::DecryptReady | CipherState::DecryptActive => {
                if direction == CipherDirection::Decrypt {
                    Ok(())
                } else {
                    Err(self.fail(CryptoError::DirectionConflict))
                }
            }
        }
    }

    /// Binds the backend context and locks the engine to `direction`.
    fn init_backend(&mut self, direction: CipherDirection) -> Result<(), CryptoError> {
        if direction == CipherDirection::Decrypt
            && self.mode.is_authenticated()
            && self.tag.is_none()
        {
            return Err(self.fail(CryptoError::TagRequired));
        }
        let tag = match direction {
            CipherDirection::Decrypt => self.tag.as_deref(),
            CipherDirection::Encrypt => None,
        };
        if let Err(e) = self.backend.init(direction, &self.key, &self.iv, tag) {
            return Err(self.fail(e));
        }
        self.state = match direction {
            CipherDirection::Encrypt => CipherState::EncryptReady,
            CipherDirection::Decrypt => CipherState::DecryptReady,
        };
        Ok(())
    }

    /// Moves the engine to the failed state and passes the error through.
    fn fail(&mut self, error: CryptoError) -> CryptoError {
        tracing::error!(
            mode = ?self.mode,
            state = ?self.state,
            error = ?error,
            "cipher engine entered failed state"
        );
        self.state = CipherState::Failed;
        error
    }
}

#[cfg(test)]
mod tests;
