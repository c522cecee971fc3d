// Copyright (C) Nimbus SDK Contributors. All rights reserved.

//! Secret key material handling.
//!
//! This module provides the owned container for symmetric key bytes used by
//! the cipher and MAC engines.
//!
//! # Security Considerations
//!
//! - Key material is wiped from memory when the container is dropped
//! - Key bytes never appear in `Debug` output
//! - Engines borrow key material; they do not copy it into their own buffers

use std::fmt;

use zeroize::Zeroize;

/// Owned symmetric key material.
///
/// Wraps the raw key bytes handed to cipher and HMAC engines. The buffer is
/// zeroized on drop so key bytes do not linger in freed memory, and the
/// `Debug` implementation prints only the length.
///
/// Cloning is explicit; engines hold a single instance and never duplicate
/// the bytes on their own.
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: Vec<u8>,
}

impl KeyMaterial {
    /// Creates key material from an owned byte buffer.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the raw key bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the key length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the key is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for KeyMaterial {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for KeyMaterial {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for KeyMaterial {
    fn from(bytes: &[u8; N]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_material_redacted_debug() {
        let key = KeyMaterial::from(&[0xAAu8; 16]);
        let rendered = format!("{key:?}");
        assert!(
            !rendered.contains("170") && !rendered.to_lowercase().contains("aa"),
            "Debug output must not leak key bytes: {rendered}"
        );
        assert!(rendered.contains("16"), "Debug output should show the length");
    }

    #[test]
    fn test_key_material_accessors() {
        let key = KeyMaterial::new(vec![1, 2, 3]);
        assert_eq!(key.len(), 3);
        assert!(!key.is_empty());
        assert_eq!(key.bytes(), &[1, 2, 3]);
    }
}
