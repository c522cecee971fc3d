// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! Keyed message authentication (HMAC).
//!
//! This module defines the backend-neutral [`Hmac`] interface and wires in
//! the OpenSSL implementation. The secret is passed per call and is not
//! retained by the engine.

mod hmac_ossl;

pub use hmac_ossl::*;

use crate::CryptoError;

/// A one-shot keyed MAC engine.
///
/// Identical `(data, secret)` pairs always produce an identical MAC; any
/// change to either input changes the output.
pub trait Hmac: Send {
    /// Computes the MAC of `data` under `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::HmacFailed`] if the backend computation fails.
    fn calculate(&self, data: &[u8], secret: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
