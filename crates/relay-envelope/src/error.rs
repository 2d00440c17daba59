/// Error types for envelope operations.
///
/// All of these are absorbed inside `Codec::decode` and surfaced uniformly
/// as "no result"; they exist so the layers underneath the dispatcher can
/// report what happened as ordinary values rather than panics.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The envelope bytes do not parse as a known, well-formed frame.
    #[error("malformed envelope: {0}")]
    Malformed(String),

    /// The AEAD tag did not match under the tried key. Expected for the
    /// majority of envelopes on a broadcast relay ("not my message").
    #[error("authentication failed under the tried key")]
    Authentication,

    /// The recovered-key verification failed on the innermost signed layer.
    #[error("signature verification failed on the signed layer")]
    SignatureInvalid,

    /// Every key in the ring failed to decrypt an encrypted layer.
    #[error("no held key decrypts this envelope")]
    UnknownRecipient,

    /// The payload could not be serialized or deserialized.
    #[error("payload serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An underlying cryptographic primitive failed.
    #[error("{0}")]
    Primitives(#[from] relay_primitives::PrimitivesError),
}
