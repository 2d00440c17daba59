//! Recoverable ECDSA signatures on secp256k1.
//!
//! Signing mixes fresh OS randomness into RFC6979 nonce generation and
//! emits a recovery id, so the verifier can reconstruct the signer's public
//! key from the signature and message hash alone. Signatures are serialized
//! as raw 64-byte `R || S` with the recovery id carried separately.

use k256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use k256::ecdsa::{self, RecoveryId, VerifyingKey};
use rand::rngs::OsRng;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized signature in bytes (32-byte R + 32-byte S).
const SIGNATURE_BYTES_LEN: usize = 64;

/// An ECDSA signature with R and S components.
///
/// Provides raw 64-byte serialization, randomized recoverable signing with
/// low-S normalization, verification, and public key recovery.
#[derive(Clone, Debug)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    ///
    /// # Arguments
    /// * `r` - The R component (32 bytes, big-endian).
    /// * `s` - The S component (32 bytes, big-endian).
    ///
    /// # Returns
    /// A new `Signature` with the given R and S values.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Parse a 64-byte `R || S` signature.
    ///
    /// # Arguments
    /// * `bytes` - 64-byte signature.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the length is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_BYTES_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_BYTES_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    /// Serialize the signature as 64 bytes of `R || S`.
    ///
    /// # Returns
    /// A 64-byte array containing R followed by S.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// Sign a 32-byte message hash, producing a recoverable signature.
    ///
    /// RFC6979 nonce generation is seeded with additional fresh OS randomness
    /// so nonce reuse cannot occur even under a faulty RNG. The signature is
    /// low-S normalized and the recovery id is found by trial recovery against
    /// the signer's own public key.
    ///
    /// # Arguments
    /// * `hash` - The 32-byte message hash to sign.
    /// * `priv_key` - The private key to sign with.
    ///
    /// # Returns
    /// `Ok((Signature, recovery_id))` on success, or an error if signing fails.
    pub fn sign_recoverable(
        hash: &[u8; 32],
        priv_key: &PrivateKey,
    ) -> Result<(Self, u8), PrimitivesError> {
        let signing_key = priv_key.signing_key();

        let k256_sig: ecdsa::Signature = signing_key
            .sign_prehash_with_rng(&mut OsRng, hash)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        // Low-S normalization; the recovery id must be computed for the
        // normalized form, so recover it by trial afterwards.
        let k256_sig = k256_sig.normalize_s().unwrap_or(k256_sig);
        let recovery_id = RecoveryId::trial_recovery_from_prehash(
            signing_key.verifying_key(),
            hash,
            &k256_sig,
        )
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        Ok((Signature { r, s }, recovery_id.to_byte()))
    }

    /// Verify this signature against a message hash and public key.
    ///
    /// # Arguments
    /// * `hash` - The 32-byte message hash that was signed.
    /// * `pub_key` - The public key to verify against.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, hash: &[u8; 32], pub_key: &PublicKey) -> bool {
        let k256_sig = match ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        ) {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        pub_key.verifying_key().verify_prehash(hash, &k256_sig).is_ok()
    }

    /// Recover the public key that produced this signature.
    ///
    /// Recovery succeeds syntactically for many invalid inputs; the caller
    /// must confirm the result with an explicit `verify` before trusting the
    /// recovered key.
    ///
    /// # Arguments
    /// * `hash` - The 32-byte message hash that was signed.
    /// * `recovery_id` - The recovery id emitted at signing time (0..=3).
    ///
    /// # Returns
    /// `Ok(PublicKey)` if recovery succeeds, or an error otherwise.
    pub fn recover(
        &self,
        hash: &[u8; 32],
        recovery_id: u8,
    ) -> Result<PublicKey, PrimitivesError> {
        let recovery_id = RecoveryId::from_byte(recovery_id).ok_or_else(|| {
            PrimitivesError::InvalidSignature("invalid recovery id".to_string())
        })?;

        let k256_sig = ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(self.r),
            k256::FieldBytes::from(self.s),
        )
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let recovered_key = VerifyingKey::recover_from_prehash(hash, &k256_sig, recovery_id)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        Ok(PublicKey::from_k256_verifying_key(&recovered_key))
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.r == other.r && self.s == other.s
    }
}

impl Eq for Signature {}
