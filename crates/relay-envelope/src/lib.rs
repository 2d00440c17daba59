#![deny(missing_docs)]

//! Secure message envelopes for a shared, untrusted broadcast relay.
//!
//! Messages posted to the relay are always authenticated (signed with a
//! recoverable signature, so the sender's identity travels inside the
//! signature) and optionally confidential: encrypted either to a specific
//! recipient's public key or under a pre-shared symmetric key. Receiving is
//! the mirror image: the [`Codec`] inspects an envelope, tries every
//! locally held key against encrypted layers, verifies the innermost
//! signature, and silently returns nothing for envelopes that are malformed,
//! tampered with, or simply addressed to somebody else.

mod error;
mod frame;

pub mod codec;
pub mod encrypted;
pub mod envelope;
pub mod signed;

pub use codec::{Codec, DecodedMessage, KeyProvider, Seal};
pub use envelope::Envelope;
pub use error::EnvelopeError;

// The key and signature types appear throughout the public API; re-export
// them so callers don't need a direct relay-primitives dependency.
pub use relay_primitives::ec::{PrivateKey, PublicKey, SymmetricKey};
