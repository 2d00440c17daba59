//! The envelope tagged union and its binary encoding.
//!
//! Exactly one variant is active per binary blob. An encrypted variant's
//! ciphertext, once decrypted, is itself the bytes of a nested envelope
//! (always a signed one as produced by `Codec::encode`, though the format
//! does not forbid further nesting).

use relay_primitives::ec::{PublicKey, Signature};

use crate::frame::{frame, unframe};
use crate::EnvelopeError;

/// Tag byte for a signed envelope.
const TAG_SIGNED: u8 = 0;
/// Tag byte for an asymmetrically encrypted envelope.
const TAG_ASYM: u8 = 1;
/// Tag byte for a symmetrically encrypted envelope.
const TAG_SYM: u8 = 2;

/// A self-describing message envelope.
///
/// Parsing validates the blob arity and field shapes for the tag before
/// destructuring, so short or misshapen frames surface as
/// `EnvelopeError::Malformed` rather than a runtime fault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Envelope {
    /// An authenticated plaintext: the payload plus a recoverable signature
    /// over its SHA-256 hash.
    Signed {
        /// The serialized payload bytes that were hashed and signed.
        payload: Vec<u8>,
        /// The 64-byte `R || S` signature over the payload hash.
        signature: Signature,
        /// Recovery id for reconstructing the signer's public key (0..=3).
        recovery_id: u8,
    },
    /// A nested envelope encrypted to a recipient's public key via a
    /// per-message ephemeral ECDH exchange.
    AsymEncrypted {
        /// The ephemeral public key generated for this message only.
        ephemeral_public_key: PublicKey,
        /// AEAD output: nonce || ciphertext || tag.
        ciphertext: Vec<u8>,
    },
    /// A nested envelope encrypted under a pre-shared symmetric key.
    SymEncrypted {
        /// AEAD output: nonce || ciphertext || tag.
        ciphertext: Vec<u8>,
    },
}

impl Envelope {
    /// Serialize the envelope into its framed binary form.
    ///
    /// # Returns
    /// The envelope as a self-describing byte string.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Envelope::Signed {
                payload,
                signature,
                recovery_id,
            } => frame(
                TAG_SIGNED,
                &[payload, &signature.to_bytes(), &[*recovery_id]],
            ),
            Envelope::AsymEncrypted {
                ephemeral_public_key,
                ciphertext,
            } => frame(
                TAG_ASYM,
                &[&ephemeral_public_key.to_compressed(), ciphertext],
            ),
            Envelope::SymEncrypted { ciphertext } => frame(TAG_SYM, &[ciphertext]),
        }
    }

    /// Parse an envelope from its framed binary form.
    ///
    /// # Arguments
    /// * `bytes` - The framed byte string.
    ///
    /// # Returns
    /// `Ok(Envelope)` on success, or `EnvelopeError::Malformed` if the frame
    /// is truncated, has the wrong blob arity for its tag, carries an
    /// unrecognized tag, or holds fields that fail shape validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let (tag, blobs) = unframe(bytes)?;
        match tag {
            TAG_SIGNED => {
                let [payload, sig, recid] = expect_arity::<3>(tag, blobs)?;
                let signature = Signature::from_bytes(&sig)
                    .map_err(|e| EnvelopeError::Malformed(e.to_string()))?;
                if recid.len() != 1 {
                    return Err(EnvelopeError::Malformed(format!(
                        "recovery id blob has {} bytes, expected 1",
                        recid.len()
                    )));
                }
                Ok(Envelope::Signed {
                    payload,
                    signature,
                    recovery_id: recid[0],
                })
            }
            TAG_ASYM => {
                let [eph, ciphertext] = expect_arity::<2>(tag, blobs)?;
                let ephemeral_public_key = PublicKey::from_bytes(&eph)
                    .map_err(|e| EnvelopeError::Malformed(e.to_string()))?;
                Ok(Envelope::AsymEncrypted {
                    ephemeral_public_key,
                    ciphertext,
                })
            }
            TAG_SYM => {
                let [ciphertext] = expect_arity::<1>(tag, blobs)?;
                Ok(Envelope::SymEncrypted { ciphertext })
            }
            other => Err(EnvelopeError::Malformed(format!(
                "unrecognized envelope tag {}",
                other
            ))),
        }
    }
}

/// Validate the blob count for a tag before destructuring.
fn expect_arity<const N: usize>(
    tag: u8,
    blobs: Vec<Vec<u8>>,
) -> Result<[Vec<u8>; N], EnvelopeError> {
    let got = blobs.len();
    blobs.try_into().map_err(|_| {
        EnvelopeError::Malformed(format!(
            "tag {} expects {} blobs, got {}",
            tag, N, got
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_primitives::ec::PrivateKey;
    use relay_primitives::hash::sha256;

    fn signed_envelope(payload: &[u8]) -> Envelope {
        let key = PrivateKey::new();
        let hash = sha256(payload);
        let (signature, recovery_id) = key.sign(&hash).unwrap();
        Envelope::Signed {
            payload: payload.to_vec(),
            signature,
            recovery_id,
        }
    }

    /// Test binary round-trip of each variant.
    #[test]
    fn test_envelope_round_trip() {
        let signed = signed_envelope(b"payload bytes");
        assert_eq!(Envelope::from_bytes(&signed.to_bytes()).unwrap(), signed);

        let asym = Envelope::AsymEncrypted {
            ephemeral_public_key: PrivateKey::new().pub_key(),
            ciphertext: vec![9u8; 44],
        };
        assert_eq!(Envelope::from_bytes(&asym.to_bytes()).unwrap(), asym);

        let sym = Envelope::SymEncrypted {
            ciphertext: vec![3u8; 40],
        };
        assert_eq!(Envelope::from_bytes(&sym.to_bytes()).unwrap(), sym);
    }

    /// Test that an unrecognized tag is malformed, not a panic.
    #[test]
    fn test_envelope_unknown_tag() {
        let bytes = crate::frame::frame(42, &[b"whatever"]);
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(EnvelopeError::Malformed(_))
        ));
    }

    /// Test that wrong blob arity for a tag is rejected before destructuring.
    #[test]
    fn test_envelope_arity_validation() {
        // Signed with only two blobs
        let bytes = crate::frame::frame(0, &[b"payload", &[0u8; 64]]);
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(EnvelopeError::Malformed(_))
        ));

        // Sym with two blobs
        let bytes = crate::frame::frame(2, &[b"ct", b"extra"]);
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(EnvelopeError::Malformed(_))
        ));
    }

    /// Test field shape validation: bad signature length, bad ephemeral key.
    #[test]
    fn test_envelope_field_validation() {
        // 63-byte signature blob
        let bytes = crate::frame::frame(0, &[b"payload".as_ref(), &[0u8; 63], &[1u8]]);
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(EnvelopeError::Malformed(_))
        ));

        // recovery id blob with two bytes
        let bytes = crate::frame::frame(0, &[b"payload".as_ref(), &[0u8; 64], &[1u8, 2u8]]);
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(EnvelopeError::Malformed(_))
        ));

        // ephemeral key bytes that are not a curve point
        let bytes = crate::frame::frame(1, &[&[0xFFu8; 33], b"ct".as_ref()]);
        assert!(matches!(
            Envelope::from_bytes(&bytes),
            Err(EnvelopeError::Malformed(_))
        ));
    }
}
