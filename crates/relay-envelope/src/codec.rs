//! The envelope codec: encode, decode dispatcher, and key ring.
//!
//! `encode` layers sign-then-optionally-encrypt; `decode` peels layers in
//! the mirror order, trying every locally held key against encrypted tags
//! and terminating at the innermost signed layer. Every failure mode is
//! absorbed and surfaced uniformly as `None`: the relay is a broadcast log
//! and the overwhelming majority of non-results are simply other people's
//! mail, so callers must not be able to build logic on *why* a decode
//! produced nothing.

use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use relay_primitives::ec::{PrivateKey, PublicKey, SymmetricKey};

use crate::envelope::Envelope;
use crate::{encrypted, signed, EnvelopeError};

/// Maximum nesting depth `decode` will recurse through.
///
/// `encode` never wraps more than one encryption layer around the signed
/// layer, but the format does not forbid nesting, so the dispatcher bounds
/// recursion rather than trusting the sender.
const MAX_DECODE_DEPTH: usize = 8;

/// Supplies the local party's signing key.
///
/// The codec is constructed from an explicit provider (a wallet or other
/// key-custody implementation) rather than reading ambient process state.
/// The codec never persists or transmits the key it is given.
pub trait KeyProvider {
    /// Produce the local party's long-term private key.
    fn private_key(&self) -> Result<PrivateKey, EnvelopeError>;
}

/// How an encoded envelope is sealed after signing.
///
/// At most one form of encryption applies per envelope.
#[derive(Clone, Debug)]
pub enum Seal {
    /// Signed but unencrypted: authenticated plaintext.
    None,
    /// Encrypted to a specific recipient's public key (ECIES).
    Recipient(PublicKey),
    /// Encrypted under a pre-shared symmetric key.
    SharedKey(SymmetricKey),
}

/// A successfully decoded message.
#[derive(Clone, Debug)]
pub struct DecodedMessage {
    /// The deserialized payload.
    pub data: serde_json::Value,
    /// The *signer's* recovered public key (not the recipient's).
    pub public_key: PublicKey,
}

impl DecodedMessage {
    /// Deserialize the payload into a concrete type.
    ///
    /// # Returns
    /// `Ok(T)` if the payload matches the target shape, or a serialization
    /// error otherwise.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// The secure message envelope codec.
///
/// Owns one primary private key (used for signing and as the first
/// decryption candidate) and two append-only key rings tried in insertion
/// order during decode: private keys for asymmetric layers and symmetric
/// keys for pre-shared-key layers.
pub struct Codec {
    /// The public key corresponding to the primary private key.
    public_key: PublicKey,
    /// Private key ring; entry 0 is the primary key. Copy-on-append so an
    /// in-flight decode iterates a consistent snapshot.
    private_keys: RwLock<Arc<Vec<PrivateKey>>>,
    /// Symmetric key ring, same append-only discipline.
    symmetric_keys: RwLock<Arc<Vec<SymmetricKey>>>,
}

impl Codec {
    /// Create a codec from the local party's private key.
    ///
    /// # Arguments
    /// * `private_key` - The primary signing and decryption key.
    ///
    /// # Returns
    /// A new `Codec` with the derived public key exposed via `public_key()`.
    pub fn new(private_key: PrivateKey) -> Self {
        let public_key = private_key.pub_key();
        Codec {
            public_key,
            private_keys: RwLock::new(Arc::new(vec![private_key])),
            symmetric_keys: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Create a codec from an explicit key provider.
    ///
    /// # Arguments
    /// * `provider` - The wallet or key-custody implementation.
    ///
    /// # Returns
    /// `Ok(Codec)` or the provider's error.
    pub fn from_provider(provider: &impl KeyProvider) -> Result<Self, EnvelopeError> {
        Ok(Codec::new(provider.private_key()?))
    }

    /// The public key of the primary private key.
    ///
    /// # Returns
    /// The local party's long-term public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Register an additional private key as a decryption candidate.
    ///
    /// Keys are tried in insertion order during decode; entries are never
    /// removed. Typical use is key rotation, to keep reading messages
    /// encrypted to an old key.
    ///
    /// # Arguments
    /// * `private_key` - The key to append to the ring.
    pub fn add_key(&self, private_key: PrivateKey) {
        let mut guard = self.private_keys.write().expect("key ring lock poisoned");
        let mut keys = Vec::clone(&guard);
        keys.push(private_key);
        *guard = Arc::new(keys);
    }

    /// Register a pre-shared symmetric key as a decryption candidate.
    ///
    /// # Arguments
    /// * `key` - The key to append to the symmetric ring.
    pub fn add_symmetric_key(&self, key: SymmetricKey) {
        let mut guard = self
            .symmetric_keys
            .write()
            .expect("key ring lock poisoned");
        let mut keys = Vec::clone(&guard);
        keys.push(key);
        *guard = Arc::new(keys);
    }

    /// Encode a payload into a signed, optionally encrypted envelope.
    ///
    /// The payload is serialized, signed with the primary key, and the
    /// resulting signed envelope is then wrapped in at most one encryption
    /// layer according to `seal`.
    ///
    /// # Arguments
    /// * `payload` - The structured payload to send.
    /// * `seal` - Whether and how to encrypt the signed envelope.
    ///
    /// # Returns
    /// `Ok(bytes)` of the outermost envelope, ready to post to the relay.
    pub fn encode<T: Serialize>(
        &self,
        payload: &T,
        seal: Seal,
    ) -> Result<Vec<u8>, EnvelopeError> {
        let payload_bytes = serde_json::to_vec(payload)?;
        let signer = self.primary_key();
        let signed_bytes = signed::sign(&payload_bytes, &signer)?.to_bytes();

        match seal {
            Seal::None => Ok(signed_bytes),
            Seal::Recipient(recipient) => {
                Ok(encrypted::encrypt_asym(&signed_bytes, &recipient)?.to_bytes())
            }
            Seal::SharedKey(key) => {
                Ok(encrypted::encrypt_sym(&signed_bytes, &key)?.to_bytes())
            }
        }
    }

    /// Decode an envelope received from the relay.
    ///
    /// Returns the deserialized payload and the signer's recovered public
    /// key if the envelope is well-formed, addressed to one of the locally
    /// held keys (or unencrypted), and carries a valid signature. Returns
    /// `None` in every other case without distinguishing why; garbage bytes,
    /// other recipients' mail, and tampered envelopes all look the same to
    /// the caller.
    ///
    /// # Arguments
    /// * `bytes` - The envelope bytes.
    ///
    /// # Returns
    /// `Some(DecodedMessage)` or `None`.
    pub fn decode(&self, bytes: &[u8]) -> Option<DecodedMessage> {
        match self.try_decode(bytes, 0) {
            Ok(message) => Some(message),
            // A bad signature on an otherwise well-formed envelope can
            // indicate active tampering rather than broadcast noise, so it
            // gets its own diagnostic. The return value is the same.
            Err(EnvelopeError::SignatureInvalid) => {
                tracing::debug!("dropping envelope with invalid signature");
                None
            }
            Err(err) => {
                tracing::trace!(%err, "dropping envelope");
                None
            }
        }
    }

    /// One step of the decode state machine.
    ///
    /// Encrypted tags run the key-trial loop and recurse into the decrypted
    /// plaintext, which is itself a full envelope; the signed tag is the
    /// terminal state.
    fn try_decode(
        &self,
        bytes: &[u8],
        depth: usize,
    ) -> Result<DecodedMessage, EnvelopeError> {
        if depth >= MAX_DECODE_DEPTH {
            return Err(EnvelopeError::Malformed(
                "envelope nesting too deep".to_string(),
            ));
        }

        match Envelope::from_bytes(bytes)? {
            Envelope::Signed {
                payload,
                signature,
                recovery_id,
            } => {
                // A structural recovery failure (out-of-range recovery id,
                // off-curve point) is malformed input; SignatureInvalid is
                // reserved for a recovered key that fails verification.
                let verification = signed::verify(&payload, &signature, recovery_id)
                    .map_err(|e| EnvelopeError::Malformed(e.to_string()))?;
                if !verification.valid {
                    return Err(EnvelopeError::SignatureInvalid);
                }
                let data = serde_json::from_slice(&payload)?;
                Ok(DecodedMessage {
                    data,
                    public_key: verification.public_key,
                })
            }
            Envelope::AsymEncrypted {
                ephemeral_public_key,
                ciphertext,
            } => {
                let keys = self.private_key_snapshot();
                for key in keys.iter() {
                    if let Ok(plaintext) =
                        encrypted::decrypt_asym(&ephemeral_public_key, &ciphertext, key)
                    {
                        return self.try_decode(&plaintext, depth + 1);
                    }
                }
                Err(EnvelopeError::UnknownRecipient)
            }
            Envelope::SymEncrypted { ciphertext } => {
                let keys = self.symmetric_key_snapshot();
                for key in keys.iter() {
                    if let Ok(plaintext) = encrypted::decrypt_sym(&ciphertext, key) {
                        return self.try_decode(&plaintext, depth + 1);
                    }
                }
                Err(EnvelopeError::UnknownRecipient)
            }
        }
    }

    /// The primary signing key (entry 0 of the private key ring).
    fn primary_key(&self) -> PrivateKey {
        let guard = self.private_keys.read().expect("key ring lock poisoned");
        guard[0].clone()
    }

    /// A consistent snapshot of the private key ring.
    fn private_key_snapshot(&self) -> Arc<Vec<PrivateKey>> {
        Arc::clone(&self.private_keys.read().expect("key ring lock poisoned"))
    }

    /// A consistent snapshot of the symmetric key ring.
    fn symmetric_key_snapshot(&self) -> Arc<Vec<SymmetricKey>> {
        Arc::clone(&self.symmetric_keys.read().expect("key ring lock poisoned"))
    }
}
