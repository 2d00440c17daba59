//! Asymmetric (ECIES) and symmetric encryption layers.
//!
//! The asymmetric path generates a fresh ephemeral keypair per message,
//! computes an ECDH shared secret with the recipient's long-term public key,
//! and hashes the compressed shared point down to an AES-256-GCM key. The
//! ephemeral key travels in the envelope; per-message ephemerals give
//! forward secrecy without a prior handshake.
//!
//! Decryption failure is an ordinary `EnvelopeError::Authentication` value,
//! never a panic: on a broadcast relay most envelopes are someone else's
//! mail and every key-trial is expected to fail far more often than it
//! succeeds.

use relay_primitives::ec::{PrivateKey, PublicKey, SymmetricKey};
use relay_primitives::hash::sha256;

use crate::envelope::Envelope;
use crate::EnvelopeError;

/// Derive the AEAD key for an ECDH pair: SHA-256 of the compressed shared
/// point.
fn shared_key(
    private_key: &PrivateKey,
    public_key: &PublicKey,
) -> Result<SymmetricKey, EnvelopeError> {
    let shared_point = private_key.derive_shared_secret(public_key)?;
    Ok(SymmetricKey::new(&sha256(&shared_point.to_compressed())))
}

/// Encrypt bytes to a recipient's public key.
///
/// Generates a fresh ephemeral keypair for this call only; the ephemeral
/// private key is dropped as soon as the shared secret is derived.
///
/// # Arguments
/// * `plaintext` - The bytes to encrypt (a nested envelope's encoding).
/// * `recipient` - The recipient's long-term public key.
///
/// # Returns
/// `Ok(Envelope::AsymEncrypted)` carrying the ephemeral public key and the
/// AEAD ciphertext.
pub fn encrypt_asym(
    plaintext: &[u8],
    recipient: &PublicKey,
) -> Result<Envelope, EnvelopeError> {
    let ephemeral = PrivateKey::new();
    let key = shared_key(&ephemeral, recipient)?;
    let ciphertext = key.encrypt(plaintext)?;
    Ok(Envelope::AsymEncrypted {
        ephemeral_public_key: ephemeral.pub_key(),
        ciphertext,
    })
}

/// Attempt to decrypt an asymmetrically encrypted envelope with one key.
///
/// # Arguments
/// * `ephemeral_public_key` - The sender's per-message ephemeral public key.
/// * `ciphertext` - The AEAD ciphertext (nonce || ct || tag).
/// * `key` - The candidate recipient private key.
///
/// # Returns
/// `Ok(plaintext)` if this key authenticates the ciphertext, or
/// `EnvelopeError::Authentication` if it does not (expected and non-fatal,
/// it generally means the envelope was not addressed to this key).
pub fn decrypt_asym(
    ephemeral_public_key: &PublicKey,
    ciphertext: &[u8],
    key: &PrivateKey,
) -> Result<Vec<u8>, EnvelopeError> {
    let key = shared_key(key, ephemeral_public_key)?;
    key.decrypt(ciphertext)
        .map_err(|_| EnvelopeError::Authentication)
}

/// Encrypt bytes under a pre-shared symmetric key.
///
/// # Arguments
/// * `plaintext` - The bytes to encrypt (a nested envelope's encoding).
/// * `key` - The pre-shared symmetric key.
///
/// # Returns
/// `Ok(Envelope::SymEncrypted)` carrying the AEAD ciphertext.
pub fn encrypt_sym(
    plaintext: &[u8],
    key: &SymmetricKey,
) -> Result<Envelope, EnvelopeError> {
    let ciphertext = key.encrypt(plaintext)?;
    Ok(Envelope::SymEncrypted { ciphertext })
}

/// Attempt to decrypt a symmetrically encrypted envelope with one key.
///
/// # Arguments
/// * `ciphertext` - The AEAD ciphertext (nonce || ct || tag).
/// * `key` - The candidate pre-shared key.
///
/// # Returns
/// `Ok(plaintext)` on success, or `EnvelopeError::Authentication` if the
/// key does not authenticate the ciphertext.
pub fn decrypt_sym(
    ciphertext: &[u8],
    key: &SymmetricKey,
) -> Result<Vec<u8>, EnvelopeError> {
    key.decrypt(ciphertext)
        .map_err(|_| EnvelopeError::Authentication)
}
