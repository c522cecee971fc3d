// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! Pluggable cryptographic primitives behind a runtime-selectable provider.
//!
//! This crate provides the cryptographic building blocks an SDK core needs,
//! decoupled from any single backend library. It includes support for:
//!
//! - **Hashing**: MD5 and SHA-256 digests over buffers or readable streams
//! - **HMAC**: HMAC-SHA256 message authentication
//! - **Symmetric ciphers**: Streaming AES in CBC, CTR, and GCM modes with a
//!   uniform state-machine engine
//! - **Secure randomness**: Cryptographically secure byte generation
//! - **Provider registry**: A process-wide factory through which embedders
//!   substitute their own backend at startup
//!
//! The shipped default backend is OpenSSL. Engines are constructed through
//! the provider registry (see [`set_provider`], [`init_provider`], and the
//! `create_*` factory functions) or directly from a provider instance such
//! as [`OpensslProvider`].
//!
//! # Lifecycle
//!
//! Call [`init_provider`] before constructing engines and [`cleanup_provider`]
//! when finished, or hold a [`ProviderGuard`] which pairs the two. Init and
//! cleanup are reference counted, so independent components may bracket
//! their own usage without coordinating.

mod cipher;
mod hash;
mod hmac;
mod provider;
mod rand;
mod secret;

pub use cipher::*;
pub use hash::*;
pub use hmac::*;
pub use provider::*;
pub use rand::*;
pub use secret::*;
use thiserror::Error;

/// Comprehensive error type for all cryptographic operations.
///
/// This enum covers failures from engine construction, backend library
/// calls, authenticated-decryption tag checks, and API misuse. Engine
/// misuse and backend failures also move the affected engine into its
/// failed state, observable through [`SymmetricCipher::state`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CryptoError {
    // Construction errors
    /// Key length is not valid for the selected cipher.
    #[error("invalid key length")]
    InvalidKeyLength,
    /// Initialization vector length is not valid for the cipher mode.
    #[error("invalid IV length")]
    InvalidIvLength,
    /// Authentication tag length is not valid for the cipher mode.
    #[error("invalid authentication tag length")]
    InvalidTagLength,
    /// Authenticated decryption was attempted without supplying a tag.
    #[error("authentication tag required for decryption")]
    TagRequired,
    /// An authentication tag was supplied to an unauthenticated cipher mode.
    #[error("cipher mode does not support an authentication tag")]
    TagNotSupported,

    // Backend errors
    /// Backend cipher context initialization failed.
    #[error("cipher initialization failed")]
    CipherInitFailed,
    /// Backend cipher update operation failed.
    #[error("cipher update failed")]
    CipherUpdateFailed,
    /// Backend cipher finalization failed.
    #[error("cipher finalization failed")]
    CipherFinalFailed,
    /// Backend hash context initialization failed.
    #[error("hash initialization failed")]
    HashInitFailed,
    /// Backend hash computation failed.
    #[error("hash computation failed")]
    HashFailed,
    /// Reading from the input stream failed during a streaming digest.
    #[error("hash input stream read failed")]
    HashStreamReadFailed,
    /// Backend HMAC computation failed.
    #[error("HMAC computation failed")]
    HmacFailed,
    /// Backend random number generation failed.
    #[error("random number generation failed")]
    RngFailed,

    // Authentication errors
    /// Authentication tag verification failed; no plaintext was released.
    #[error("authentication tag verification failed")]
    AuthenticationFailed,

    // Misuse errors
    /// Encrypt and decrypt operations were mixed on one engine instance.
    #[error("cipher direction conflict")]
    DirectionConflict,
    /// An operation was attempted on an already finalized engine.
    #[error("cipher already finalized")]
    AlreadyFinalized,
    /// An operation was attempted on an engine in the failed state.
    #[error("cipher engine is in the failed state")]
    EngineFailed,
}
