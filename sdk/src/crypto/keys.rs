//! # Key Management
//!
//! Ed25519 keypairs and the ledger's string encodings for them.
//!
//! Nothing on the wire is a raw key. Every key and address is wrapped in a
//! small envelope that names its type and ends in a checksum:
//!
//! ```text
//! private key = base58( DA 37 9F | 01 | seed[32] | 00 | checksum[4] )   -> "priv..."
//! public key  = hex(    B0 | 01 | raw_pub[32] | checksum[4] )
//! address     = base58( 01 56 | 01 | sha256(raw_pub)[12..32] | checksum[4] ) -> "bu..."
//! checksum    = sha256(sha256(everything before it))[..4]
//! ```
//!
//! "base58" here is the ledger's variant ([`BUMO_ALPHABET`]), not Bitcoin's.
//! With the Bitcoin alphabet addresses would come out as `BUQ...`.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (thanks, ed25519-dalek).
//! - Key generation uses `OsRng`.
//! - Secret key material is never logged and never shows up in `Debug`.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use super::hash::{checksum, sha256, verify_checksum};
use crate::config::{
    ADDRESS_HASH_LENGTH, ADDRESS_PREFIX, BUMO_ALPHABET, ED25519_KEY_TYPE,
    ENCODED_ADDRESS_LENGTH, ENCODED_PRIVATE_KEY_LENGTH, ENCODED_PUBLIC_KEY_LENGTH,
    PRIVATE_KEY_FILL, PRIVATE_KEY_PREFIX, PUBLIC_KEY_PREFIX, RAW_KEY_LENGTH, SIGNATURE_LENGTH,
};

/// Errors that can occur during key operations.
///
/// Deliberately say nothing about *which* byte was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid private key encoding")]
    InvalidPrivateKey,

    #[error("invalid public key encoding")]
    InvalidPublicKey,

    #[error("invalid signature encoding: expected 64 hex-encoded bytes")]
    InvalidSignature,
}

// ---------------------------------------------------------------------------
// BumoKeypair
// ---------------------------------------------------------------------------

/// An account keypair: the Ed25519 signing key plus the encodings the
/// ledger expects.
///
/// Does not implement `Serialize`. Exporting a private key should be an
/// explicit call to [`encoded_private_key`](Self::encoded_private_key).
///
/// # Examples
///
/// ```
/// use bumo_sdk::crypto::keys::BumoKeypair;
///
/// let kp = BumoKeypair::generate();
/// assert!(kp.encoded_private_key().starts_with("priv"));
/// assert!(kp.address().starts_with("bu"));
///
/// let sig = kp.sign(b"blob");
/// assert!(kp.public_key().verify(b"blob", &sig));
/// ```
pub struct BumoKeypair {
    signing_key: SigningKey,
}

impl BumoKeypair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic keypair from a 32-byte seed. Weak seed, weak key.
    pub fn from_seed(seed: &[u8; RAW_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse a base58 `priv...` string.
    pub fn from_encoded_private_key(encoded: &str) -> Result<Self, KeyError> {
        let data = bs58::decode(encoded)
            .with_alphabet(&BUMO_ALPHABET)
            .into_vec()
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        if data.len() != ENCODED_PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidPrivateKey);
        }
        let body = verify_checksum(&data).ok_or(KeyError::InvalidPrivateKey)?;

        let (prefix, rest) = body.split_at(PRIVATE_KEY_PREFIX.len());
        if prefix != PRIVATE_KEY_PREFIX || rest[0] != ED25519_KEY_TYPE {
            return Err(KeyError::InvalidPrivateKey);
        }
        let seed = &rest[1..1 + RAW_KEY_LENGTH];
        if rest[1 + RAW_KEY_LENGTH] != PRIVATE_KEY_FILL {
            return Err(KeyError::InvalidPrivateKey);
        }

        let mut arr = [0u8; RAW_KEY_LENGTH];
        arr.copy_from_slice(seed);
        Ok(Self::from_seed(&arr))
    }

    /// Export the private key in its base58 `priv...` form.
    ///
    /// **Handle with care.** Whoever holds this string controls the account.
    pub fn encoded_private_key(&self) -> String {
        let mut body = Vec::with_capacity(ENCODED_PRIVATE_KEY_LENGTH);
        body.extend_from_slice(&PRIVATE_KEY_PREFIX);
        body.push(ED25519_KEY_TYPE);
        body.extend_from_slice(&self.signing_key.to_bytes());
        body.push(PRIVATE_KEY_FILL);
        let sum = checksum(&body);
        body.extend_from_slice(&sum);
        bs58::encode(body).with_alphabet(&BUMO_ALPHABET).into_string()
    }

    /// The public half.
    pub fn public_key(&self) -> BumoPublicKey {
        BumoPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// The account address derived from the public key.
    pub fn address(&self) -> String {
        self.public_key().address()
    }

    /// Sign a message. Ed25519 is deterministic: same key, same message,
    /// same signature.
    pub fn sign(&self, message: &[u8]) -> BumoSignature {
        BumoSignature {
            bytes: self.signing_key.sign(message).to_bytes(),
        }
    }
}

impl Clone for BumoKeypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for BumoKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even partially.
        write!(f, "BumoKeypair(address={})", self.address())
    }
}

impl PartialEq for BumoKeypair {
    /// Compares public keys only.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for BumoKeypair {}

// ---------------------------------------------------------------------------
// BumoPublicKey
// ---------------------------------------------------------------------------

/// A raw Ed25519 public key with the ledger's hex envelope.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BumoPublicKey {
    bytes: [u8; RAW_KEY_LENGTH],
}

impl BumoPublicKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; RAW_KEY_LENGTH] {
        &self.bytes
    }

    /// Hex envelope `B0 01 <raw> <checksum>`, as sent next to signatures.
    pub fn to_encoded(&self) -> String {
        let mut body = Vec::with_capacity(ENCODED_PUBLIC_KEY_LENGTH);
        body.push(PUBLIC_KEY_PREFIX);
        body.push(ED25519_KEY_TYPE);
        body.extend_from_slice(&self.bytes);
        let sum = checksum(&body);
        body.extend_from_slice(&sum);
        hex::encode(body)
    }

    /// Parse the hex envelope. Also checks that the bytes are a valid
    /// Ed25519 point.
    pub fn from_encoded(encoded: &str) -> Result<Self, KeyError> {
        let data = hex::decode(encoded).map_err(|_| KeyError::InvalidPublicKey)?;
        if data.len() != ENCODED_PUBLIC_KEY_LENGTH {
            return Err(KeyError::InvalidPublicKey);
        }
        let body = verify_checksum(&data).ok_or(KeyError::InvalidPublicKey)?;
        if body[0] != PUBLIC_KEY_PREFIX || body[1] != ED25519_KEY_TYPE {
            return Err(KeyError::InvalidPublicKey);
        }

        let mut bytes = [0u8; RAW_KEY_LENGTH];
        bytes.copy_from_slice(&body[2..]);
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// The base58 `bu...` address for this key.
    pub fn address(&self) -> String {
        let digest = sha256(&self.bytes);
        let mut body = Vec::with_capacity(ENCODED_ADDRESS_LENGTH);
        body.extend_from_slice(&ADDRESS_PREFIX);
        body.push(ED25519_KEY_TYPE);
        body.extend_from_slice(&digest[digest.len() - ADDRESS_HASH_LENGTH..]);
        let sum = checksum(&body);
        body.extend_from_slice(&sum);
        bs58::encode(body).with_alphabet(&BUMO_ALPHABET).into_string()
    }

    /// `true` iff `signature` is valid for `message` under this key.
    pub fn verify(&self, message: &[u8], signature: &BumoSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let sig = DalekSignature::from_bytes(&signature.bytes);
        verifying_key.verify(message, &sig).is_ok()
    }
}

impl fmt::Display for BumoPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_encoded())
    }
}

impl fmt::Debug for BumoPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BumoPublicKey({})", &hex::encode(self.bytes)[..16])
    }
}

// ---------------------------------------------------------------------------
// BumoSignature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BumoSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl BumoSignature {
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// 128 hex characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let data = hex::decode(s).map_err(|_| KeyError::InvalidSignature)?;
        let bytes: [u8; SIGNATURE_LENGTH] = data
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self { bytes })
    }
}

impl fmt::Debug for BumoSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "BumoSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

// ---------------------------------------------------------------------------
// Format checks
// ---------------------------------------------------------------------------

/// `true` iff `address` is a well-formed `bu...` address with a valid
/// checksum.
pub fn is_valid_address(address: &str) -> bool {
    let Ok(data) = bs58::decode(address).with_alphabet(&BUMO_ALPHABET).into_vec() else {
        return false;
    };
    if data.len() != ENCODED_ADDRESS_LENGTH {
        return false;
    }
    match verify_checksum(&data) {
        Some(body) => body[..2] == ADDRESS_PREFIX && body[2] == ED25519_KEY_TYPE,
        None => false,
    }
}

/// `true` iff `encoded` parses as a `priv...` private key.
pub fn is_valid_private_key(encoded: &str) -> bool {
    BumoKeypair::from_encoded_private_key(encoded).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ledger-issued key material, checked against an independent encoder.
    const LEDGER_PRIVATE_KEY: &str = "privbyQCRp7DLqKtRFCqKQJr81TurTqG6UKXMMtGAmPG3abcM9XHjWvq";
    const LEDGER_PUBLIC_KEY: &str =
        "b0011765082a9352e04678ef38d38046dc01306edef676547456c0c23e270aaed7ffe9e31477";
    const LEDGER_ADDRESS: &str = "buQnnUEBREw2hB6pWHGPzwanX7d28xk6KVcp";
    const LEDGER_ADDRESSES: [&str; 3] = [
        "buQnc3AGCo6ycWJCce516MDbPHKjK7ywwkuo",
        "buQsurH1M4rjLkfjzkxR9KXJ6jSu2r9xBNEw",
        "buQBjJD1BSJ7nzAbzdTenAhpFjmxRVEEtmxH",
    ];

    #[test]
    fn ledger_addresses_are_valid() {
        for address in LEDGER_ADDRESSES {
            assert!(is_valid_address(address), "{address}");
        }
        assert!(is_valid_address(LEDGER_ADDRESS));
    }

    #[test]
    fn bitcoin_alphabet_spelling_is_rejected() {
        // Same bytes as LEDGER_ADDRESSES[0], spelled with Bitcoin's alphabet.
        assert!(!is_valid_address("BUQnc3AGCo6ycWJCce516MDBPHKjK7ywwkUo"));
    }

    #[test]
    fn ledger_private_key_derives_known_public_key_and_address() {
        assert!(is_valid_private_key(LEDGER_PRIVATE_KEY));
        let kp = BumoKeypair::from_encoded_private_key(LEDGER_PRIVATE_KEY).unwrap();
        assert_eq!(kp.public_key().to_encoded(), LEDGER_PUBLIC_KEY);
        assert_eq!(kp.address(), LEDGER_ADDRESS);
        assert_eq!(kp.encoded_private_key(), LEDGER_PRIVATE_KEY);
        assert_eq!(
            BumoPublicKey::from_encoded(LEDGER_PUBLIC_KEY).unwrap().address(),
            LEDGER_ADDRESS
        );
    }

    #[test]
    fn seeded_keys_match_known_encodings() {
        let kp = BumoKeypair::from_seed(&[1u8; 32]);
        assert_eq!(
            kp.encoded_private_key(),
            "privbrhfoxo6qjwKBwNnAraALQ7TpSaTYgNihq1cR4Z7HpeULNtoCH1U"
        );
        assert_eq!(
            kp.public_key().to_encoded(),
            "b0018a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c4c77e59c"
        );
        assert_eq!(kp.address(), "buQmFKZAC9JP3qkxeTgv8RMAX4mpsYnkV7fs");
    }

    #[test]
    fn generated_keys_have_expected_prefixes() {
        let kp = BumoKeypair::generate();
        assert!(kp.encoded_private_key().starts_with("priv"));
        assert!(kp.address().starts_with("bu"));
        assert!(kp.public_key().to_encoded().starts_with("b001"));
        assert_eq!(kp.public_key().to_encoded().len(), ENCODED_PUBLIC_KEY_LENGTH * 2);
    }

    #[test]
    fn private_key_roundtrip() {
        let kp = BumoKeypair::generate();
        let encoded = kp.encoded_private_key();
        let restored = BumoKeypair::from_encoded_private_key(&encoded).unwrap();
        assert_eq!(kp, restored);
        assert_eq!(restored.encoded_private_key(), encoded);
    }

    #[test]
    fn public_key_roundtrip() {
        let pk = BumoKeypair::generate().public_key();
        let restored = BumoPublicKey::from_encoded(&pk.to_encoded()).unwrap();
        assert_eq!(pk, restored);
    }

    #[test]
    fn deterministic_from_seed() {
        let seed = [7u8; 32];
        let a = BumoKeypair::from_seed(&seed);
        let b = BumoKeypair::from_seed(&seed);
        assert_eq!(a.address(), b.address());
        assert_eq!(a.encoded_private_key(), b.encoded_private_key());
    }

    #[test]
    fn address_validation() {
        let kp = BumoKeypair::generate();
        assert!(is_valid_address(&kp.address()));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("not-an-address"));
        // A private key is valid base58 with a valid checksum, but the wrong
        // prefix and length.
        assert!(!is_valid_address(&kp.encoded_private_key()));
    }

    #[test]
    fn tampered_address_fails_checksum() {
        let address = BumoKeypair::from_seed(&[1u8; 32]).address();
        let mut chars: Vec<char> = address.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'a' { 'b' } else { 'a' };
        let tampered: String = chars.into_iter().collect();
        assert!(!is_valid_address(&tampered));
    }

    #[test]
    fn private_key_validation() {
        let kp = BumoKeypair::generate();
        assert!(is_valid_private_key(&kp.encoded_private_key()));
        assert!(!is_valid_private_key(&kp.address()));
        assert!(!is_valid_private_key("privbad"));
        assert!(!is_valid_private_key(""));
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = BumoKeypair::generate();
        let sig = kp.sign(b"blob bytes");
        assert!(kp.public_key().verify(b"blob bytes", &sig));
        assert!(!kp.public_key().verify(b"other bytes", &sig));
        assert!(!BumoKeypair::generate().public_key().verify(b"blob bytes", &sig));
    }

    #[test]
    fn signature_hex_roundtrip() {
        let sig = BumoKeypair::generate().sign(b"x");
        let hex_str = sig.to_hex();
        assert_eq!(hex_str.len(), 128);
        assert_eq!(BumoSignature::from_hex(&hex_str).unwrap(), sig);
        assert_eq!(BumoSignature::from_hex("abcd"), Err(KeyError::InvalidSignature));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let kp = BumoKeypair::generate();
        let debug_str = format!("{:?}", kp);
        assert!(debug_str.starts_with("BumoKeypair(address="));
        assert!(!debug_str.contains(&kp.encoded_private_key()));
    }
}
