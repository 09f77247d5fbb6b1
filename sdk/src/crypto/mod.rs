//! # Cryptographic Primitives
//!
//! Everything that touches key material or hashes. The pipeline only ever
//! sees the [`KeyCapability`] trait; [`Ed25519Keys`] is the implementation
//! that speaks the ledger's key and address encodings.

pub mod capability;
pub mod hash;
pub mod keys;

pub use capability::{Ed25519Keys, KeyCapability, KeyPairInfo};
pub use hash::{double_sha256, sha256};
pub use keys::{BumoKeypair, BumoPublicKey, BumoSignature, KeyError};
