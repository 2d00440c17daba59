//! AEAD symmetric encryption with AES-256-GCM.
//!
//! Used both for pre-shared-key channels and as the inner cipher of the
//! ECIES construction, where the key is derived from an ECDH shared secret.
//! Wire format is `nonce (12 bytes) || ciphertext || tag (16 bytes)` with a
//! fresh random nonce drawn per call.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;

use crate::PrimitivesError;

/// AES-GCM nonce length (12 bytes).
const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length (16 bytes).
const TAG_LEN: usize = 16;

/// A 32-byte AES-256-GCM key.
///
/// Provides authenticated encryption and decryption. Every encryption call
/// draws a fresh random nonce; reusing a nonce under a fixed key destroys
/// the AEAD guarantees, so no API for caller-supplied nonces is exposed.
pub struct SymmetricKey {
    /// The 32-byte AES key.
    key: [u8; 32],
}

impl SymmetricKey {
    /// Create a SymmetricKey from a byte slice.
    ///
    /// If the input is shorter than 32 bytes, it is left-padded with zeros.
    /// If the input is 32 bytes or longer, the first 32 bytes are used.
    ///
    /// # Arguments
    /// * `key` - The key bytes (ideally 32 bytes).
    ///
    /// # Returns
    /// A new `SymmetricKey`.
    pub fn new(key: &[u8]) -> Self {
        let mut padded = [0u8; 32];
        if key.len() < 32 {
            padded[32 - key.len()..].copy_from_slice(key);
        } else {
            padded.copy_from_slice(&key[..32]);
        }
        SymmetricKey { key: padded }
    }

    /// Generate a random 32-byte symmetric key.
    ///
    /// # Returns
    /// A new `SymmetricKey` with cryptographically random bytes.
    pub fn new_random() -> Self {
        let mut key = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut key);
        SymmetricKey { key }
    }

    /// Create a SymmetricKey from a Base64-encoded string.
    ///
    /// # Arguments
    /// * `b64` - A Base64 (standard encoding) string of the key bytes.
    ///
    /// # Returns
    /// `Ok(SymmetricKey)` on success, or an error if the Base64 is invalid.
    pub fn from_base64(b64: &str) -> Result<Self, PrimitivesError> {
        use base64::Engine;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| PrimitivesError::EncryptionError(e.to_string()))?;
        Ok(Self::new(&bytes))
    }

    /// Encrypt a plaintext message using AES-256-GCM.
    ///
    /// A fresh 12-byte nonce is drawn from the OS random number generator.
    /// The output format is: nonce (12 bytes) || ciphertext || tag (16 bytes).
    ///
    /// # Arguments
    /// * `plaintext` - The data to encrypt.
    ///
    /// # Returns
    /// `Ok(Vec<u8>)` containing the encrypted data, or an error if encryption
    /// fails.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| PrimitivesError::EncryptionError(e.to_string()))?;

        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext_and_tag = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| PrimitivesError::EncryptionError("AEAD encryption failed".to_string()))?;

        let mut result = Vec::with_capacity(NONCE_LEN + ciphertext_and_tag.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext_and_tag);
        Ok(result)
    }

    /// Decrypt a ciphertext message using AES-256-GCM.
    ///
    /// Expected input format: nonce (12 bytes) || ciphertext || tag (16 bytes).
    ///
    /// # Arguments
    /// * `message` - The encrypted data (nonce + ciphertext + tag).
    ///
    /// # Returns
    /// `Ok(Vec<u8>)` containing the decrypted plaintext, or a
    /// `DecryptionError` if the message is truncated or the authentication
    /// tag does not match under this key.
    pub fn decrypt(&self, message: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        if message.len() < NONCE_LEN + TAG_LEN {
            return Err(PrimitivesError::DecryptionError(
                "message is too short to be a valid encrypted message".to_string(),
            ));
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| PrimitivesError::DecryptionError(e.to_string()))?;

        let nonce = Nonce::from_slice(&message[..NONCE_LEN]);
        cipher
            .decrypt(nonce, &message[NONCE_LEN..])
            .map_err(|_| PrimitivesError::DecryptionError("authentication failed".to_string()))
    }

    /// Get the raw key bytes.
    ///
    /// # Returns
    /// A reference to the 32-byte key.
    pub fn to_bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl Clone for SymmetricKey {
    fn clone(&self) -> Self {
        SymmetricKey { key: self.key }
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.key.zeroize();
    }
}

impl PartialEq for SymmetricKey {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SymmetricKey {}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("SymmetricKey(..)")
    }
}
