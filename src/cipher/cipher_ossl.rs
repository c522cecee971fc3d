// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! OpenSSL-based streaming cipher backend for Linux systems.
//!
//! Implements [`CipherBackend`] on an EVP cipher context. The concrete EVP
//! cipher is selected from the mode and key length at bind time, so one
//! backend type serves AES-128/192/256 across CBC, CTR, and GCM.

use openssl::cipher::{Cipher, CipherRef};
use openssl::cipher_ctx::CipherCtx;

use super::*;

/// Streaming cipher backend over an OpenSSL EVP cipher context.
pub struct OsslCipherBackend {
    mode: CipherMode,
    ctx: CipherCtx,
    direction: Option<CipherDirection>,
}

impl OsslCipherBackend {
    /// Creates an unbound backend context for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::CipherInitFailed`] if the backend context
    /// cannot be allocated.
    pub fn new(mode: CipherMode) -> Result<Self, CryptoError> {
        let ctx = CipherCtx::new().map_err(|e| {
            tracing::error!(error = ?e, "openssl cipher context allocation failed");
            CryptoError::CipherInitFailed
        })?;
        Ok(Self {
            mode,
            ctx,
            direction: None,
        })
    }

    /// Selects the EVP cipher for a mode and key length.
    fn select_cipher(mode: CipherMode, key_len: usize) -> Result<&'static CipherRef, CryptoError> {
        let cipher = match (mode, key_len) {
            (CipherMode::Cbc, 16) => Cipher::aes_128_cbc(),
            (CipherMode::Cbc, 24) => Cipher::aes_192_cbc(),
            (CipherMode::Cbc, 32) => Cipher::aes_256_cbc(),
            (CipherMode::Ctr, 16) => Cipher::aes_128_ctr(),
            (CipherMode::Ctr, 24) => Cipher::aes_192_ctr(),
            (CipherMode::Ctr, 32) => Cipher::aes_256_ctr(),
            (CipherMode::Gcm, 16) => Cipher::aes_128_gcm(),
            (CipherMode::Gcm, 24) => Cipher::aes_192_gcm(),
            (CipherMode::Gcm, 32) => Cipher::aes_256_gcm(),
            _ => return Err(CryptoError::InvalidKeyLength),
        };
        Ok(cipher)
    }
}

impl CipherBackend for OsslCipherBackend {
    fn init(
        &mut self,
        direction: CipherDirection,
        key: &KeyMaterial,
        iv: &[u8],
        tag: Option<&[u8]>,
    ) -> Result<(), CryptoError> {
        let cipher = Self::select_cipher(self.mode, key.len())?;

        let bound = match direction {
            CipherDirection::Encrypt => {
                self.ctx
                    .encrypt_init(Some(cipher), Some(key.bytes()), Some(iv))
            }
            CipherDirection::Decrypt => {
                self.ctx
                    .decrypt_init(Some(cipher), Some(key.bytes()), Some(iv))
            }
        };
        bound.map_err(|e| {
            tracing::error!(error = ?e, mode = ?self.mode, "openssl cipher init failed");
            CryptoError::CipherInitFailed
        })?;

        self.ctx.set_padding(self.mode.profile().padded);

        if let Some(tag) = tag {
            self.ctx.set_tag(tag).map_err(|e| {
                tracing::error!(error = ?e, "openssl set expected tag failed");
                CryptoError::CipherInitFailed
            })?;
        }

        self.direction = Some(direction);
        Ok(())
    }

    fn update(&mut self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut out = vec![0u8; input.len() + self.ctx.block_size()];
        let written = self
            .ctx
            .cipher_update(input, Some(&mut out))
            .map_err(|e| {
                tracing::error!(error = ?e, mode = ?self.mode, "openssl cipher update failed");
                CryptoError::CipherUpdateFailed
            })?;
        out.truncate(written);
        Ok(out)
    }

    fn finalize(&mut self) -> Result<Vec<u8>, CryptoError> {
        let mut out = vec![0u8; self.ctx.block_size()];
        let written = self.ctx.cipher_final(&mut out).map_err(|e| {
            if self.mode == CipherMode::Gcm && self.direction == Some(CipherDirection::Decrypt) {
                // EVP reports a GCM tag mismatch as a finalization failure.
                CryptoError::AuthenticationFailed
            } else {
                tracing::error!(error = ?e, mode = ?self.mode, "openssl cipher finalization failed");
                CryptoError::CipherFinalFailed
            }
        })?;
        out.truncate(written);
        Ok(out)
    }

    fn authentication_tag(&self) -> Result<Vec<u8>, CryptoError> {
        let Some(tag_len) = self.mode.tag_len() else {
            return Err(CryptoError::TagNotSupported);
        };
        let mut tag = vec![0u8; tag_len];
        self.ctx.tag(&mut tag).map_err(|e| {
            tracing::error!(error = ?e, "openssl tag retrieval failed");
            CryptoError::CipherFinalFailed
        })?;
        Ok(tag)
    }
}
