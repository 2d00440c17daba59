//! Hash function primitives for the relay messaging SDK.
//!
//! Provides SHA-256, the single digest used by the envelope codec: payloads
//! are hashed before signing, and ECDH shared points are hashed down to
//! fixed-width symmetric keys.

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
