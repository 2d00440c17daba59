//! Payload signing and verification.
//!
//! The signer's identity travels inside the signature itself: verification
//! recovers the public key from `(hash, signature, recovery_id)` and then
//! explicitly re-checks the signature against the recovered key. Recovery
//! alone succeeds syntactically on garbage input, so the explicit validity
//! check is mandatory before trusting the recovered key.

use relay_primitives::ec::{PrivateKey, PublicKey, Signature};
use relay_primitives::hash::sha256;

use crate::envelope::Envelope;
use crate::EnvelopeError;

/// The outcome of verifying a signed envelope.
#[derive(Clone, Debug)]
pub struct Verification {
    /// The public key recovered from the signature. Only meaningful when
    /// `valid` is true.
    pub public_key: PublicKey,
    /// Whether the signature validates against the recovered key.
    pub valid: bool,
}

/// Sign a payload, producing a signed envelope.
///
/// Computes `SHA-256(payload)` and signs the hash with a recoverable ECDSA
/// signature; fresh randomness is mixed into nonce generation by the
/// underlying primitive.
///
/// # Arguments
/// * `payload` - The serialized payload bytes to sign.
/// * `signer` - The private key to sign with.
///
/// # Returns
/// `Ok(Envelope::Signed)` carrying the payload, signature, and recovery id.
pub fn sign(payload: &[u8], signer: &PrivateKey) -> Result<Envelope, EnvelopeError> {
    let hash = sha256(payload);
    let (signature, recovery_id) = signer.sign(&hash)?;
    Ok(Envelope::Signed {
        payload: payload.to_vec(),
        signature,
        recovery_id,
    })
}

/// Verify a signed envelope's payload, signature, and recovery id.
///
/// Recomputes the payload hash, recovers the candidate signer key, and
/// confirms the signature validates against it.
///
/// # Arguments
/// * `payload` - The payload bytes from the signed envelope.
/// * `signature` - The signature over the payload hash.
/// * `recovery_id` - The recovery id emitted at signing time.
///
/// # Returns
/// `Ok(Verification)` with the recovered key and validity flag, or an error
/// if recovery itself fails structurally (bad recovery id, off-curve point).
pub fn verify(
    payload: &[u8],
    signature: &Signature,
    recovery_id: u8,
) -> Result<Verification, EnvelopeError> {
    let hash = sha256(payload);
    let public_key = signature.recover(&hash, recovery_id)?;
    let valid = signature.verify(&hash, &public_key);
    Ok(Verification { public_key, valid })
}
