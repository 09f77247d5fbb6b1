//! # Error Taxonomy
//!
//! Every fallible SDK call returns [`SdkError`]. The variants follow the
//! four ways a submission can go wrong, in the order they can happen:
//!
//! 1. [`ValidationError`]: caller input rejected before any bytes exist.
//!    Always recoverable: fix the input and rebuild from scratch.
//! 2. [`EncodeError`]: a built operation does not fit the wire schema.
//!    This is an integration defect, not a user mistake.
//! 3. [`DomainError`]: the node accepted the request and said no.
//! 4. [`TransportError`]: we never got a usable answer. The transaction
//!    may or may not have landed, so nothing is retried.
//!
//! Each error has a stable numeric [`code`](SdkError::code) and string
//! [`key`](SdkError::key) that callers can branch on. Descriptions are for
//! humans and may be reworded; codes and keys may not.

use thiserror::Error;

pub use crate::crypto::keys::KeyError;

/// Shorthand used throughout the crate.
pub type SdkResult<T> = Result<T, SdkError>;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Identifies which validation rule rejected the input.
///
/// Several keys are field-specific (amounts, fees, addresses) so that a UI
/// can highlight the right input without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKey {
    InvalidSourceAddress,
    InvalidDestAddress,
    InvalidInitBalance,
    InvalidAddress,
    InvalidAssetAmount,
    InvalidBuAmount,
    InvalidNonce,
    InvalidGasPrice,
    InvalidFeeLimit,
    InvalidCeilLedgerSeq,
    OperationsEmpty,
    InvalidOperations,
    MetadataNotHexString,
    InvalidPrivateKey,
    PrivateKeyNull,
    EmptyString,
    InvalidArguments,
    UrlEmpty,
}

impl ValidationKey {
    /// Stable numeric code.
    pub fn code(self) -> u32 {
        match self {
            Self::InvalidSourceAddress => 11002,
            Self::InvalidDestAddress => 11003,
            Self::InvalidInitBalance => 11004,
            Self::InvalidAddress => 11006,
            Self::InvalidAssetAmount => 11024,
            Self::InvalidBuAmount => 11026,
            Self::InvalidNonce => 11048,
            Self::InvalidGasPrice => 11049,
            Self::InvalidFeeLimit => 11050,
            Self::OperationsEmpty => 11051,
            Self::InvalidCeilLedgerSeq => 11052,
            Self::PrivateKeyNull => 11057,
            Self::UrlEmpty => 11062,
            Self::InvalidPrivateKey => 11065,
            Self::InvalidArguments => 15016,
            Self::InvalidOperations => 15022,
            Self::MetadataNotHexString => 15028,
            Self::EmptyString => 15029,
        }
    }

    /// Stable string key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidSourceAddress => "INVALID_SOURCEADDRESS_ERROR",
            Self::InvalidDestAddress => "INVALID_DESTADDRESS_ERROR",
            Self::InvalidInitBalance => "INVALID_INITBALANCE_ERROR",
            Self::InvalidAddress => "INVALID_ADDRESS_ERROR",
            Self::InvalidAssetAmount => "INVALID_ASSET_AMOUNT_ERROR",
            Self::InvalidBuAmount => "INVALID_BU_AMOUNT_ERROR",
            Self::InvalidNonce => "INVALID_NONCE_ERROR",
            Self::InvalidGasPrice => "INVALID_GASPRICE_ERROR",
            Self::InvalidFeeLimit => "INVALID_FEELIMIT_ERROR",
            Self::InvalidCeilLedgerSeq => "INVALID_CEILLEDGERSEQ_ERROR",
            Self::OperationsEmpty => "OPERATIONS_EMPTY_ERROR",
            Self::InvalidOperations => "INVALID_OPERATIONS",
            Self::MetadataNotHexString => "METADATA_NOT_HEX_STRING_ERROR",
            Self::InvalidPrivateKey => "INVALID_PRIVATEKEY_ERROR",
            Self::PrivateKeyNull => "PRIVATEKEY_NULL_ERROR",
            Self::EmptyString => "EMPTY_STRING_ERROR",
            Self::InvalidArguments => "INVALID_ARGUMENTS",
            Self::UrlEmpty => "URL_EMPTY_ERROR",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::InvalidSourceAddress => "Invalid sourceAddress",
            Self::InvalidDestAddress => "Invalid destAddress",
            Self::InvalidInitBalance => "InitBalance must be between 1 and max(int64)",
            Self::InvalidAddress => "Invalid address",
            Self::InvalidAssetAmount => "AssetAmount must be between 1 and max(int64)",
            Self::InvalidBuAmount => "BuAmount must be between 1 and max(int64)",
            Self::InvalidNonce => "Nonce must be between 1 and max(int64)",
            Self::InvalidGasPrice => "GasPrice must be between 1 and max(int64)",
            Self::InvalidFeeLimit => "FeeLimit must be between 1 and max(int64)",
            Self::InvalidCeilLedgerSeq => "CeilLedgerSeq must be between 1 and max(int64)",
            Self::OperationsEmpty => "Operations cannot be empty",
            Self::InvalidOperations => "Operations must be a list of {kind, fields} objects",
            Self::MetadataNotHexString => "Metadata must be a hex string",
            Self::InvalidPrivateKey => "Invalid privateKey",
            Self::PrivateKeyNull => "PrivateKeys cannot be empty",
            Self::EmptyString => "Value must be a non-empty string",
            Self::InvalidArguments => "Invalid arguments",
            Self::UrlEmpty => "Url cannot be empty",
        }
    }
}

/// Caller input failed a validation rule. Carries the one field that
/// failed first; later fields are not inspected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {} (field `{field}`)", key.as_str(), key.description())]
pub struct ValidationError {
    /// Which rule fired.
    pub key: ValidationKey,
    /// The argument name that triggered it.
    pub field: String,
}

impl ValidationError {
    pub fn new(key: ValidationKey, field: impl Into<String>) -> Self {
        Self {
            key,
            field: field.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// A draft does not fit the wire schema.
///
/// Validation should make these unreachable; seeing one means a builder and
/// the encoder disagree about a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The transaction has no operations.
    #[error("transaction has no operations")]
    NoOperations,

    /// The transaction exceeds the per-transaction operation limit.
    #[error("transaction has {count} operations, limit is {limit}")]
    TooManyOperations { count: usize, limit: usize },

    /// A numeric field does not fit a signed 64-bit wire integer.
    #[error("field `{field}` value {value} is outside the wire integer range")]
    OutOfRange { field: String, value: String },

    /// An operation field is missing.
    #[error("{kind} operation is missing field `{field}`")]
    MissingField { kind: String, field: String },

    /// An operation field has the wrong shape.
    #[error("{kind} operation field `{field}` must be {expected}")]
    FieldType {
        kind: String,
        field: String,
        expected: &'static str,
    },

    /// A metadata field is not valid hex.
    #[error("field `{field}` is not valid hex")]
    InvalidHex { field: String },

    /// A blob could not be decoded back into a draft.
    #[error("blob decode failed: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Domain (node-reported)
// ---------------------------------------------------------------------------

/// An outcome reported by the node for a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Signature weight is not enough")]
    NotEnoughWeight,
    #[error("Nonce incorrect")]
    NonceIncorrect,
    #[error("The balance is not enough")]
    BalanceNotEnough,
    #[error("Source address equal to dest address")]
    SourceDestEqual,
    #[error("Dest address already exists")]
    DestAccountExists,
    #[error("Account does not exist")]
    AccountNotExist,
    #[error("Balance is not enough for the asset reserve")]
    AccountAssetLowReserve,
    #[error("Init balance is not enough for the account reserve")]
    AccountInitLowReserve,
    #[error("Fee not enough")]
    FeeNotEnough,
    #[error("Transaction was discarded")]
    DiscardTransaction,
    /// Any node code without a dedicated variant.
    #[error("Transaction failed (node code {node_code})")]
    TransactionFail { node_code: i64 },
}

impl DomainError {
    /// Maps a node result code. Returns `None` for the success sentinel.
    pub fn from_node_code(code: i64) -> Option<Self> {
        let err = match code {
            crate::config::SUCCESS_CODE => return None,
            93 => Self::NotEnoughWeight,
            99 => Self::NonceIncorrect,
            100 => Self::BalanceNotEnough,
            101 => Self::SourceDestEqual,
            102 => Self::DestAccountExists,
            103 => Self::AccountNotExist,
            104 => Self::AccountAssetLowReserve,
            106 => Self::AccountInitLowReserve,
            111 => Self::FeeNotEnough,
            160 => Self::DiscardTransaction,
            other => Self::TransactionFail { node_code: other },
        };
        Some(err)
    }

    /// Stable numeric code (the node's own code, 151 for the catch-all).
    pub fn code(self) -> u32 {
        match self {
            Self::NotEnoughWeight => 93,
            Self::NonceIncorrect => 99,
            Self::BalanceNotEnough => 100,
            Self::SourceDestEqual => 101,
            Self::DestAccountExists => 102,
            Self::AccountNotExist => 103,
            Self::AccountAssetLowReserve => 104,
            Self::AccountInitLowReserve => 106,
            Self::FeeNotEnough => 111,
            Self::DiscardTransaction => 160,
            Self::TransactionFail { .. } => 151,
        }
    }

    /// Stable string key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotEnoughWeight => "NOT_ENOUGH_WEIGHT",
            Self::NonceIncorrect => "NONCE_INCORRECT",
            Self::BalanceNotEnough => "BALANCE_NOT_ENOUGH",
            Self::SourceDestEqual => "SOURCE_DEST_EQUAL",
            Self::DestAccountExists => "DEST_ACCOUNT_EXISTS",
            Self::AccountNotExist => "ACCOUNT_NOT_EXIST",
            Self::AccountAssetLowReserve => "ACCOUNT_ASSET_LOW_RESERVE",
            Self::AccountInitLowReserve => "ACCOUNT_INIT_LOW_RESERVE",
            Self::FeeNotEnough => "FEE_NOT_ENOUGH",
            Self::DiscardTransaction => "DISCARD_TRANSACTION",
            Self::TransactionFail { .. } => "TRANSACTION_FAIL",
        }
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// The request did not produce a usable node response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request itself was malformed (empty path, unsupported method).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded its deadline.
    #[error("request timed out")]
    Timeout,

    /// The node answered with a non-success HTTP status.
    #[error("node returned HTTP status {0}")]
    Status(u16),

    /// The body could not be parsed or lacks an expected member.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    fn code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 20004,
            Self::Network(_) | Self::Timeout | Self::Status(_) => 11007,
            Self::MalformedResponse(_) => 20003,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST_ERROR",
            Self::Network(_) | Self::Timeout | Self::Status(_) => "CONNECTNETWORK_ERROR",
            Self::MalformedResponse(_) => "INVALID_RESPONSE_ERROR",
        }
    }
}

// ---------------------------------------------------------------------------
// SdkError
// ---------------------------------------------------------------------------

/// The one error type every public SDK operation returns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An operation kind name that no builder is registered for.
    #[error("Operation cannot be resolved: `{0}`")]
    OperationUnresolvable(String),

    /// A key could not be decoded or used after passing validation.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The node reported an unexpected failure on a query path.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SdkError {
    /// Stable numeric code for the caller-facing envelope.
    pub fn code(&self) -> u32 {
        match self {
            Self::Validation(e) => e.key.code(),
            Self::Encode(_) => 20001,
            Self::Domain(e) => e.code(),
            Self::Transport(e) => e.code(),
            Self::OperationUnresolvable(_) => 15030,
            Self::Key(_) => 20002,
            Self::Internal(_) => 20000,
        }
    }

    /// Stable string key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.key.as_str(),
            Self::Encode(_) => "ENCODE_ERROR",
            Self::Domain(e) => e.as_str(),
            Self::Transport(e) => e.as_str(),
            Self::OperationUnresolvable(_) => "OPERATION_UNRESOLVABLE",
            Self::Key(_) => "KEY_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Description for the envelope. Validation errors use the rule's fixed
    /// text; everything else is surfaced verbatim.
    pub fn description(&self) -> String {
        match self {
            Self::Validation(e) => e.key.description().to_string(),
            other => other.to_string(),
        }
    }

    /// Shorthand for the validation key, if this is a validation error.
    pub fn validation_key(&self) -> Option<ValidationKey> {
        match self {
            Self::Validation(e) => Some(e.key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_code_table_is_total() {
        let table = [
            (93, DomainError::NotEnoughWeight),
            (99, DomainError::NonceIncorrect),
            (100, DomainError::BalanceNotEnough),
            (101, DomainError::SourceDestEqual),
            (102, DomainError::DestAccountExists),
            (103, DomainError::AccountNotExist),
            (104, DomainError::AccountAssetLowReserve),
            (106, DomainError::AccountInitLowReserve),
            (111, DomainError::FeeNotEnough),
            (160, DomainError::DiscardTransaction),
        ];
        for (code, expected) in table {
            assert_eq!(DomainError::from_node_code(code), Some(expected));
            assert_eq!(expected.code() as i64, code);
        }
        for code in [1, 4, 92, 105, 110, 159, 161, -1, i64::MAX] {
            let err = DomainError::from_node_code(code).unwrap();
            assert_eq!(err.as_str(), "TRANSACTION_FAIL");
            assert_eq!(err, DomainError::TransactionFail { node_code: code });
        }
    }

    #[test]
    fn success_code_is_not_an_error() {
        assert_eq!(DomainError::from_node_code(0), None);
    }

    #[test]
    fn validation_keys_are_distinct() {
        use std::collections::HashSet;
        let all = [
            ValidationKey::InvalidSourceAddress,
            ValidationKey::InvalidDestAddress,
            ValidationKey::InvalidInitBalance,
            ValidationKey::InvalidAddress,
            ValidationKey::InvalidAssetAmount,
            ValidationKey::InvalidBuAmount,
            ValidationKey::InvalidNonce,
            ValidationKey::InvalidGasPrice,
            ValidationKey::InvalidFeeLimit,
            ValidationKey::InvalidCeilLedgerSeq,
            ValidationKey::OperationsEmpty,
            ValidationKey::InvalidOperations,
            ValidationKey::MetadataNotHexString,
            ValidationKey::InvalidPrivateKey,
            ValidationKey::PrivateKeyNull,
            ValidationKey::EmptyString,
            ValidationKey::InvalidArguments,
            ValidationKey::UrlEmpty,
        ];
        let codes: HashSet<_> = all.iter().map(|k| k.code()).collect();
        let names: HashSet<_> = all.iter().map(|k| k.as_str()).collect();
        assert_eq!(codes.len(), all.len());
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn sdk_error_exposes_stable_key_and_code() {
        let err: SdkError =
            ValidationError::new(ValidationKey::InvalidAssetAmount, "assetAmount").into();
        assert_eq!(err.key(), "INVALID_ASSET_AMOUNT_ERROR");
        assert_eq!(err.code(), 11024);
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidAssetAmount));

        let err: SdkError = DomainError::NonceIncorrect.into();
        assert_eq!(err.key(), "NONCE_INCORRECT");
        assert_eq!(err.code(), 99);
        assert_eq!(err.description(), "Nonce incorrect");
        assert_eq!(err.validation_key(), None);
    }

    #[test]
    fn validation_error_message_names_field() {
        let err = ValidationError::new(ValidationKey::InvalidNonce, "nonce");
        let msg = err.to_string();
        assert!(msg.contains("INVALID_NONCE_ERROR"));
        assert!(msg.contains("`nonce`"));
    }
}
