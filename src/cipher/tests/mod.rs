// Copyright (c) Nimbus SDK Contributors.
// Licensed under the MIT License.


use super::*;

/// Builds an engine over the OpenSSL backend.
pub(crate) fn make_cipher(mode: CipherMode, key: &[u8], iv: &[u8]) -> SymmetricCipher {
    let backend = OsslCipherBackend::new(mode).expect("Failed to create backend");
    SymmetricCipher::new(
        mode,
        KeyMaterial::from(key),
        iv.to_vec(),
        None,
        Box::new(backend),
    )
    .expect("Failed to create cipher")
}

/// Builds a decryption engine bound to an expected tag.
pub(crate) fn make_cipher_with_tag(
    mode: CipherMode,
    key: &[u8],
    iv: &[u8],
    tag: &[u8],
) -> SymmetricCipher {
    let backend = OsslCipherBackend::new(mode).expect("Failed to create backend");
    SymmetricCipher::new(
        mode,
        KeyMaterial::from(key),
        iv.to_vec(),
        Some(tag.to_vec()),
        Box::new(backend),
    )
    .expect("Failed to create cipher")
}

/// Runs a full encryption over `plaintext` in one buffer call.
pub(crate) fn encrypt_all(cipher: &mut SymmetricCipher, plaintext: &[u8]) -> Vec<u8> {
    let mut out = cipher.encrypt_buffer(plaintext).expect("Failed to encrypt");
    let tail = cipher
        .finalize_encryption()
        .expect("Failed to finalize encryption");
    out.extend_from_slice(&tail);
    out
}

/// Runs a full decryption over `ciphertext` in one buffer call.
pub(crate) fn decrypt_all(cipher: &mut SymmetricCipher, ciphertext: &[u8]) -> Vec<u8> {
    let mut out = cipher.decrypt_buffer(ciphertext).expect("Failed to decrypt");
    let tail = cipher
        .finalize_decryption()
        .expect("Failed to finalize decryption");
    out.extend_from_slice(&tail);
    out
}

/// Deterministic non-trivial payload of `len` bytes.
pub(crate) fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
