//! The signing/addressing capability the rest of the SDK depends on.
//!
//! Validation, signing and account creation never touch `ed25519-dalek`
//! directly; they go through [`KeyCapability`]. That keeps the pipeline
//! testable with a stub, and lets a hardware or remote signer slot in
//! without touching the encoder or the validation engine.

use serde::{Deserialize, Serialize};

use super::keys::{self, BumoKeypair, BumoPublicKey, BumoSignature, KeyError};

/// A freshly generated account, in its encoded string forms.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPairInfo {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

impl std::fmt::Debug for KeyPairInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairInfo")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Key generation, format checks, and signing over raw bytes.
///
/// Object-safe so it can live behind `Arc<dyn KeyCapability>`.
pub trait KeyCapability: Send + Sync {
    /// Generates a new account keypair.
    fn generate_key_pair(&self) -> KeyPairInfo;

    /// Address checksum validation.
    fn is_valid_address(&self, address: &str) -> bool;

    /// Private-key format validation.
    fn is_valid_private_key(&self, private_key: &str) -> bool;

    /// Derives the encoded public key for an encoded private key.
    fn public_key_for(&self, private_key: &str) -> Result<String, KeyError>;

    /// Signs `message` and returns the hex signature.
    fn sign(&self, message: &[u8], private_key: &str) -> Result<String, KeyError>;

    /// Checks a hex signature against an encoded public key.
    fn verify(&self, message: &[u8], signature: &str, public_key: &str) -> bool;
}

/// The default capability: Ed25519 keys in the ledger's encodings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Keys;

impl KeyCapability for Ed25519Keys {
    fn generate_key_pair(&self) -> KeyPairInfo {
        let kp = BumoKeypair::generate();
        KeyPairInfo {
            private_key: kp.encoded_private_key(),
            public_key: kp.public_key().to_encoded(),
            address: kp.address(),
        }
    }

    fn is_valid_address(&self, address: &str) -> bool {
        keys::is_valid_address(address)
    }

    fn is_valid_private_key(&self, private_key: &str) -> bool {
        keys::is_valid_private_key(private_key)
    }

    fn public_key_for(&self, private_key: &str) -> Result<String, KeyError> {
        let kp = BumoKeypair::from_encoded_private_key(private_key)?;
        Ok(kp.public_key().to_encoded())
    }

    fn sign(&self, message: &[u8], private_key: &str) -> Result<String, KeyError> {
        let kp = BumoKeypair::from_encoded_private_key(private_key)?;
        Ok(kp.sign(message).to_hex())
    }

    fn verify(&self, message: &[u8], signature: &str, public_key: &str) -> bool {
        let (Ok(pk), Ok(sig)) = (
            BumoPublicKey::from_encoded(public_key),
            BumoSignature::from_hex(signature),
        ) else {
            return false;
        };
        pk.verify(message, &sig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_pair_is_self_consistent() {
        let caps = Ed25519Keys;
        let info = caps.generate_key_pair();
        assert!(caps.is_valid_private_key(&info.private_key));
        assert!(caps.is_valid_address(&info.address));
        assert_eq!(caps.public_key_for(&info.private_key).unwrap(), info.public_key);
    }

    #[test]
    fn ledger_key_material_is_accepted() {
        let caps = Ed25519Keys;
        let private_key = "privbyQCRp7DLqKtRFCqKQJr81TurTqG6UKXMMtGAmPG3abcM9XHjWvq";
        assert!(caps.is_valid_private_key(private_key));
        assert_eq!(
            caps.public_key_for(private_key).unwrap(),
            "b0011765082a9352e04678ef38d38046dc01306edef676547456c0c23e270aaed7ffe9e31477"
        );
        assert!(caps.is_valid_address("buQnc3AGCo6ycWJCce516MDbPHKjK7ywwkuo"));
        assert!(caps.is_valid_address("buQsurH1M4rjLkfjzkxR9KXJ6jSu2r9xBNEw"));
        assert!(!caps.is_valid_private_key("buQnc3AGCo6ycWJCce516MDbPHKjK7ywwkuo"));
    }

    #[test]
    fn generated_address_reads_bu() {
        assert!(Ed25519Keys.generate_key_pair().address.starts_with("buQ"));
    }

    #[test]
    fn sign_then_verify() {
        let caps = Ed25519Keys;
        let info = caps.generate_key_pair();
        let sig = caps.sign(b"payload", &info.private_key).unwrap();
        assert!(caps.verify(b"payload", &sig, &info.public_key));
        assert!(!caps.verify(b"tampered", &sig, &info.public_key));
        assert!(!caps.verify(b"payload", "zz", &info.public_key));
    }

    #[test]
    fn bad_private_key_is_an_error() {
        let caps = Ed25519Keys;
        assert_eq!(caps.sign(b"x", "privnope"), Err(KeyError::InvalidPrivateKey));
        assert_eq!(caps.public_key_for(""), Err(KeyError::InvalidPrivateKey));
    }

    #[test]
    fn debug_hides_private_key() {
        let info = Ed25519Keys.generate_key_pair();
        let dbg = format!("{:?}", info);
        assert!(!dbg.contains(&info.private_key));
        assert!(dbg.contains(&info.address));
    }

    #[test]
    fn camel_case_serialization() {
        let info = Ed25519Keys.generate_key_pair();
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("privateKey").is_some());
        assert!(json.get("publicKey").is_some());
        assert!(json.get("address").is_some());
    }
}
