//! Relay messaging SDK - Cryptographic primitives.
//!
//! This crate provides the foundational building blocks for the envelope codec:
//! - Hash functions (SHA-256)
//! - Elliptic curve cryptography (secp256k1 keys, recoverable signatures)
//! - AEAD symmetric encryption (AES-256-GCM)
//!
//! Nothing in this crate knows about the envelope wire format; it only deals
//! in keys, hashes, signatures, and raw byte encryption.

pub mod hash;
pub mod ec;

mod error;
pub use error::PrimitivesError;
