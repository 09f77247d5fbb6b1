//! Value types that flow through the transaction pipeline.
//!
//! A [`TransactionDraft`] is built fresh per submission, encoded once into an
//! [`EncodedTransaction`], and then discarded. Signatures are computed over
//! the encoded bytes and travel alongside them as [`SignaturePair`]s.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::sha256;
use crate::errors::EncodeError;
use crate::operation::OperationDescriptor;

// ---------------------------------------------------------------------------
// TransactionDraft
// ---------------------------------------------------------------------------

/// A validated, not yet encoded transaction.
///
/// Drafts only come out of [`super::TransactionBuilder`],
/// [`TransactionDraft::from_args`] or [`super::decode`], so every field has
/// already passed validation. Numeric fields are bounded to `[1, 2^63-1]`;
/// `ceil_ledger_seq` of zero is stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub(crate) source_address: String,
    pub(crate) gas_price: u64,
    pub(crate) fee_limit: u64,
    pub(crate) nonce: u64,
    pub(crate) ceil_ledger_seq: Option<u64>,
    pub(crate) operations: Vec<OperationDescriptor>,
    pub(crate) metadata: Option<Vec<u8>>,
}

impl TransactionDraft {
    pub fn source_address(&self) -> &str {
        &self.source_address
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn fee_limit(&self) -> u64 {
        self.fee_limit
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Last ledger sequence at which the transaction may still be applied.
    pub fn ceil_ledger_seq(&self) -> Option<u64> {
        self.ceil_ledger_seq
    }

    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub fn metadata(&self) -> Option<&[u8]> {
        self.metadata.as_deref()
    }
}

// ---------------------------------------------------------------------------
// EncodedTransaction
// ---------------------------------------------------------------------------

/// The canonical wire bytes of a transaction: exactly what gets signed and
/// submitted.
///
/// Serializes as its lowercase hex string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedTransaction(Vec<u8>);

impl EncodedTransaction {
    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parses a hex blob, e.g. one produced by another client.
    pub fn from_hex(blob: &str) -> Result<Self, EncodeError> {
        hex::decode(blob)
            .map(Self)
            .map_err(|_| EncodeError::InvalidHex {
                field: "transactionBlob".into(),
            })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex, the form the node accepts as `transaction_blob`.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// The ledger's transaction hash: hex SHA-256 of the blob.
    pub fn hash(&self) -> String {
        hex::encode(sha256(&self.0))
    }
}

impl fmt::Debug for EncodedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedTransaction({} bytes, {})", self.0.len(), self.hash())
    }
}

impl fmt::Display for EncodedTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for EncodedTransaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EncodedTransaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SignaturePair
// ---------------------------------------------------------------------------

/// One signature over an encoded blob plus the key that produced it.
///
/// Serialized with the node's field names (`sign_data`, `public_key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePair {
    /// Hex Ed25519 signature over the blob bytes.
    pub sign_data: String,
    /// Encoded public key of the signer.
    pub public_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let blob = EncodedTransaction::from_bytes(vec![0x0a, 0x01, 0xff]);
        assert_eq!(blob.to_hex(), "0a01ff");
        assert_eq!(EncodedTransaction::from_hex("0a01ff").unwrap(), blob);
        assert_eq!(blob.to_string(), "0a01ff");
        assert_eq!(blob.len(), 3);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        let err = EncodedTransaction::from_hex("xyz").unwrap_err();
        assert!(matches!(err, EncodeError::InvalidHex { .. }));
    }

    #[test]
    fn serde_uses_hex() {
        let blob = EncodedTransaction::from_bytes(vec![0x0a, 0x01, 0xff]);
        assert_eq!(serde_json::to_value(&blob).unwrap(), serde_json::json!("0a01ff"));
        let back: EncodedTransaction = serde_json::from_value(serde_json::json!("0a01ff")).unwrap();
        assert_eq!(back, blob);
        assert!(serde_json::from_value::<EncodedTransaction>(serde_json::json!("zz")).is_err());
    }

    #[test]
    fn hash_is_sha256_of_blob() {
        let blob = EncodedTransaction::from_bytes(b"abc".to_vec());
        assert_eq!(
            blob.hash(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn signature_pair_uses_node_field_names() {
        let pair = SignaturePair {
            sign_data: "aa".into(),
            public_key: "b001".into(),
        };
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json, serde_json::json!({"sign_data": "aa", "public_key": "b001"}));
    }
}
