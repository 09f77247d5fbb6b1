//! # Hashing Utilities
//!
//! The ledger only speaks SHA-256, so that is all this module offers:
//!
//! - [`sha256`]: transaction hashes are the SHA-256 of the encoded blob,
//!   and addresses keep the tail of the SHA-256 of the public key.
//! - [`double_sha256`]: the checksum appended to every encoded key and
//!   address is the first four bytes of `SHA-256(SHA-256(body))`.

use sha2::{Digest, Sha256};

use crate::config::CHECKSUM_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use bumo_sdk::crypto::sha256;
///
/// let hash = sha256(b"bumo");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute `SHA-256(SHA-256(data))`.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// The 4-byte checksum appended to encoded keys and addresses.
pub fn checksum(body: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let digest = double_sha256(body);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&digest[..CHECKSUM_LENGTH]);
    out
}

/// Splits `data` into body and trailing checksum and checks that they
/// agree. Returns the body on success.
pub fn verify_checksum(data: &[u8]) -> Option<&[u8]> {
    if data.len() <= CHECKSUM_LENGTH {
        return None;
    }
    let (body, sum) = data.split_at(data.len() - CHECKSUM_LENGTH);
    (checksum(body) == sum).then_some(body)
}
