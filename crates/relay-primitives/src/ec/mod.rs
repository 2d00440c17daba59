//! Elliptic curve cryptography for the envelope codec.
//!
//! secp256k1 key pairs, recoverable ECDSA signatures, ECDH shared secrets,
//! and AES-256-GCM symmetric keys.

pub mod private_key;
pub mod public_key;
pub mod signature;
pub mod symmetric;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
pub use symmetric::SymmetricKey;
