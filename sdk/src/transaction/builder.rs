//! Transaction construction.
//!
//! Two entry points produce a [`TransactionDraft`]:
//!
//! - [`TransactionDraft::from_args`] takes the loose argument object the
//!   node's REST clients pass around (`{sourceAddress, nonce, operations:
//!   [{kind, fields}], ...}`) with every number as a decimal string.
//! - [`TransactionBuilder`] is the typed path: numbers are `u64` and
//!   operations are already-built descriptors.
//!
//! Both run the same header rules, so a value rejected by one is rejected by
//! the other with the same error key.

use serde_json::Value;

use super::types::TransactionDraft;
use crate::crypto::KeyCapability;
use crate::errors::{SdkResult, ValidationError, ValidationKey};
use crate::operation::{build_operation, OperationDescriptor};
use crate::validation::{self, parse_positive_integer, Args, FieldRule, Schema};

const SOURCE_ADDRESS: FieldRule = FieldRule::new().required().string().address();
const FEE_FIELD: FieldRule = FieldRule::new().required().string().numeric();
const CEIL_LEDGER_SEQ: FieldRule = FieldRule::new().string().numeric();
const METADATA: FieldRule = FieldRule::new().string().hex();

/// Header rules shared by both construction paths.
pub const HEADER_SCHEMA: Schema = &[
    ("sourceAddress", SOURCE_ADDRESS),
    ("gasPrice", FEE_FIELD),
    ("feeLimit", FEE_FIELD),
    ("nonce", FEE_FIELD),
    ("ceilLedgerSeq", CEIL_LEDGER_SEQ),
    ("metadata", METADATA),
];

/// Header rules plus the operation list, for [`TransactionDraft::from_args`].
pub const TRANSACTION_SCHEMA: Schema = &[
    ("sourceAddress", SOURCE_ADDRESS),
    ("gasPrice", FEE_FIELD),
    ("feeLimit", FEE_FIELD),
    ("nonce", FEE_FIELD),
    ("ceilLedgerSeq", CEIL_LEDGER_SEQ),
    ("operations", FieldRule::new().required().operations()),
    ("metadata", METADATA),
];

// ---------------------------------------------------------------------------
// From loose arguments
// ---------------------------------------------------------------------------

impl TransactionDraft {
    /// Validates a loose argument object and builds every operation in it.
    ///
    /// ```
    /// use bumo_sdk::crypto::{BumoKeypair, Ed25519Keys};
    /// use bumo_sdk::transaction::TransactionDraft;
    /// use serde_json::json;
    ///
    /// let source = BumoKeypair::from_seed(&[1u8; 32]).address();
    /// let args = json!({
    ///     "sourceAddress": source,
    ///     "gasPrice": "1000",
    ///     "feeLimit": "1000000",
    ///     "nonce": "1",
    ///     "operations": [{"kind": "issue-asset", "fields": {"code": "CNY", "assetAmount": "1000"}}],
    /// });
    /// let draft = TransactionDraft::from_args(args.as_object().unwrap().clone(), &Ed25519Keys).unwrap();
    /// assert_eq!(draft.operations().len(), 1);
    /// ```
    pub fn from_args(mut args: Args, keys: &dyn KeyCapability) -> SdkResult<Self> {
        if is_zero(args.get("ceilLedgerSeq")) {
            args.remove("ceilLedgerSeq");
        }
        validation::validate(&mut args, TRANSACTION_SCHEMA, keys)?;

        let items = match args.remove("operations") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        if items.is_empty() {
            return Err(ValidationError::new(ValidationKey::OperationsEmpty, "operations").into());
        }

        let operations = items
            .into_iter()
            .map(|item| {
                let kind = item.get("kind").and_then(Value::as_str).unwrap_or_default();
                let fields = item
                    .get("fields")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                build_operation(kind, fields, keys)
            })
            .collect::<SdkResult<Vec<_>>>()?;

        draft_from_header(&args, operations)
    }
}

fn is_zero(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s == "0",
        Some(Value::Number(n)) => n.as_u64() == Some(0),
        _ => false,
    }
}

/// Assembles a draft from a header that already passed [`HEADER_SCHEMA`].
fn draft_from_header(
    header: &Args,
    operations: Vec<OperationDescriptor>,
) -> SdkResult<TransactionDraft> {
    let number = |field: &str| -> SdkResult<u64> {
        header
            .get(field)
            .and_then(parse_positive_integer)
            .ok_or_else(|| ValidationError::new(ValidationKey::InvalidArguments, field).into())
    };

    let metadata = match header.get("metadata").and_then(Value::as_str) {
        Some(text) => Some(
            hex::decode(text)
                .map_err(|_| ValidationError::new(ValidationKey::MetadataNotHexString, "metadata"))?,
        ),
        None => None,
    };

    Ok(TransactionDraft {
        source_address: header
            .get("sourceAddress")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        gas_price: number("gasPrice")?,
        fee_limit: number("feeLimit")?,
        nonce: number("nonce")?,
        ceil_ledger_seq: match header.get("ceilLedgerSeq") {
            Some(_) => Some(number("ceilLedgerSeq")?),
            None => None,
        },
        operations,
        metadata: metadata.filter(|m| !m.is_empty()),
    })
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a [`TransactionDraft`].
///
/// # Example
///
/// ```
/// use bumo_sdk::crypto::{BumoKeypair, Ed25519Keys};
/// use bumo_sdk::operation::PayCoin;
/// use bumo_sdk::transaction::TransactionBuilder;
///
/// let source = BumoKeypair::from_seed(&[1u8; 32]).address();
/// let dest = BumoKeypair::from_seed(&[2u8; 32]).address();
///
/// let draft = TransactionBuilder::new(source)
///     .gas_price(1000)
///     .fee_limit(1_000_000)
///     .nonce(1)
///     .operation(PayCoin::new(dest, 10).build(&Ed25519Keys).unwrap())
///     .build(&Ed25519Keys)
///     .unwrap();
/// assert_eq!(draft.nonce(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    source_address: String,
    gas_price: Option<u64>,
    fee_limit: Option<u64>,
    nonce: Option<u64>,
    ceil_ledger_seq: Option<u64>,
    operations: Vec<OperationDescriptor>,
    metadata: Option<Vec<u8>>,
}

impl TransactionBuilder {
    /// Starts a transaction sent from `source_address`.
    pub fn new(source_address: impl Into<String>) -> Self {
        Self {
            source_address: source_address.into(),
            ..Default::default()
        }
    }

    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn fee_limit(mut self, fee_limit: u64) -> Self {
        self.fee_limit = Some(fee_limit);
        self
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Zero means "no ceiling", same as never calling this.
    pub fn ceil_ledger_seq(mut self, seq: u64) -> Self {
        self.ceil_ledger_seq = (seq != 0).then_some(seq);
        self
    }

    /// Appends one operation. Order is kept on the wire.
    pub fn operation(mut self, op: OperationDescriptor) -> Self {
        self.operations.push(op);
        self
    }

    pub fn operations(mut self, ops: impl IntoIterator<Item = OperationDescriptor>) -> Self {
        self.operations.extend(ops);
        self
    }

    /// Raw transaction metadata. Empty is the same as none.
    pub fn metadata(mut self, metadata: impl Into<Vec<u8>>) -> Self {
        let metadata = metadata.into();
        self.metadata = (!metadata.is_empty()).then_some(metadata);
        self
    }

    /// Runs the header rules and produces the draft.
    pub fn build(self, keys: &dyn KeyCapability) -> SdkResult<TransactionDraft> {
        let mut header = Args::new();
        header.insert("sourceAddress".into(), Value::String(self.source_address));
        for (field, value) in [
            ("gasPrice", self.gas_price),
            ("feeLimit", self.fee_limit),
            ("nonce", self.nonce),
            ("ceilLedgerSeq", self.ceil_ledger_seq),
        ] {
            if let Some(v) = value {
                header.insert(field.into(), Value::String(v.to_string()));
            }
        }
        if let Some(metadata) = &self.metadata {
            header.insert("metadata".into(), Value::String(hex::encode(metadata)));
        }

        validation::validate(&mut header, HEADER_SCHEMA, keys)?;
        if self.operations.is_empty() {
            return Err(ValidationError::new(ValidationKey::OperationsEmpty, "operations").into());
        }

        draft_from_header(&header, self.operations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{BumoKeypair, Ed25519Keys};
    use crate::errors::SdkError;
    use crate::operation::{IssueAsset, OperationKind};
    use serde_json::json;

    fn addr(seed: u8) -> String {
        BumoKeypair::from_seed(&[seed; 32]).address()
    }

    fn base_args() -> Args {
        json!({
            "sourceAddress": addr(1),
            "gasPrice": "1000",
            "feeLimit": "1000000",
            "nonce": "12",
            "operations": [
                {"kind": "issue-asset", "fields": {"code": "CNY", "assetAmount": "1000"}},
                {"kind": "pay-coin", "fields": {"destAddress": addr(2), "buAmount": "5"}},
            ],
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn key_of(err: SdkError) -> ValidationKey {
        err.validation_key().expect("validation error")
    }

    #[test]
    fn from_args_builds_operations_in_order() {
        let draft = TransactionDraft::from_args(base_args(), &Ed25519Keys).unwrap();
        assert_eq!(draft.nonce(), 12);
        assert_eq!(draft.gas_price(), 1000);
        assert_eq!(draft.ceil_ledger_seq(), None);
        let kinds: Vec<_> = draft.operations().iter().map(|op| op.kind()).collect();
        assert_eq!(kinds, vec![OperationKind::IssueAsset, OperationKind::PayCoin]);
    }

    #[test]
    fn from_args_rejects_bad_header_fields() {
        let cases = [
            ("sourceAddress", json!("buBad"), ValidationKey::InvalidSourceAddress),
            ("gasPrice", json!("0"), ValidationKey::InvalidGasPrice),
            ("feeLimit", json!("-5"), ValidationKey::InvalidFeeLimit),
            ("nonce", json!("9223372036854775808"), ValidationKey::InvalidNonce),
            ("ceilLedgerSeq", json!("01"), ValidationKey::InvalidCeilLedgerSeq),
            ("metadata", json!("xyz"), ValidationKey::MetadataNotHexString),
            ("operations", json!("issue-asset"), ValidationKey::InvalidOperations),
        ];
        for (field, value, expected) in cases {
            let mut args = base_args();
            args.insert(field.into(), value);
            let err = TransactionDraft::from_args(args, &Ed25519Keys).unwrap_err();
            assert_eq!(key_of(err), expected, "field {}", field);
        }
    }

    #[test]
    fn from_args_missing_nonce_is_invalid_nonce() {
        let mut args = base_args();
        args.remove("nonce");
        let err = TransactionDraft::from_args(args, &Ed25519Keys).unwrap_err();
        assert_eq!(key_of(err), ValidationKey::InvalidNonce);
    }

    #[test]
    fn from_args_empty_operations() {
        let mut args = base_args();
        args.insert("operations".into(), json!([]));
        let err = TransactionDraft::from_args(args, &Ed25519Keys).unwrap_err();
        assert_eq!(key_of(err), ValidationKey::OperationsEmpty);
    }

    #[test]
    fn from_args_unknown_kind() {
        let mut args = base_args();
        args.insert("operations".into(), json!([{"kind": "mint", "fields": {}}]));
        let err = TransactionDraft::from_args(args, &Ed25519Keys).unwrap_err();
        assert_eq!(err, SdkError::OperationUnresolvable("mint".into()));
    }

    #[test]
    fn from_args_surfaces_operation_errors() {
        let mut args = base_args();
        args.insert(
            "operations".into(),
            json!([{"kind": "issue-asset", "fields": {"code": "CNY", "assetAmount": "0"}}]),
        );
        let err = TransactionDraft::from_args(args, &Ed25519Keys).unwrap_err();
        assert_eq!(key_of(err), ValidationKey::InvalidAssetAmount);
    }

    #[test]
    fn ceil_ledger_seq_zero_is_absent() {
        let mut args = base_args();
        args.insert("ceilLedgerSeq".into(), json!("0"));
        let draft = TransactionDraft::from_args(args, &Ed25519Keys).unwrap();
        assert_eq!(draft.ceil_ledger_seq(), None);

        let mut args = base_args();
        args.insert("ceilLedgerSeq".into(), json!("250"));
        let draft = TransactionDraft::from_args(args, &Ed25519Keys).unwrap();
        assert_eq!(draft.ceil_ledger_seq(), Some(250));
    }

    #[test]
    fn metadata_is_decoded_to_bytes() {
        let mut args = base_args();
        args.insert("metadata".into(), json!("0a0b"));
        let draft = TransactionDraft::from_args(args, &Ed25519Keys).unwrap();
        assert_eq!(draft.metadata(), Some(&[0x0a, 0x0b][..]));
    }

    #[test]
    fn builder_requires_header_numbers() {
        let op = IssueAsset::new("CNY", 1).build(&Ed25519Keys).unwrap();
        let err = TransactionBuilder::new(addr(1))
            .fee_limit(1)
            .nonce(1)
            .operation(op.clone())
            .build(&Ed25519Keys)
            .unwrap_err();
        assert_eq!(key_of(err), ValidationKey::InvalidGasPrice);

        let err = TransactionBuilder::new(addr(1))
            .gas_price(1)
            .fee_limit(1)
            .nonce(0)
            .operation(op)
            .build(&Ed25519Keys)
            .unwrap_err();
        assert_eq!(key_of(err), ValidationKey::InvalidNonce);
    }

    #[test]
    fn builder_requires_operations() {
        let err = TransactionBuilder::new(addr(1))
            .gas_price(1)
            .fee_limit(1)
            .nonce(1)
            .build(&Ed25519Keys)
            .unwrap_err();
        assert_eq!(key_of(err), ValidationKey::OperationsEmpty);
    }

    #[test]
    fn builder_and_args_agree() {
        let from_args = TransactionDraft::from_args(base_args(), &Ed25519Keys).unwrap();
        let typed = TransactionBuilder::new(addr(1))
            .gas_price(1000)
            .fee_limit(1_000_000)
            .nonce(12)
            .operations(from_args.operations().to_vec())
            .metadata(Vec::new())
            .build(&Ed25519Keys)
            .unwrap();
        assert_eq!(typed, from_args);
    }
}
