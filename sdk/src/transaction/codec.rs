//! Canonical encoder: [`TransactionDraft`] to wire bytes and back.
//!
//! Encoding is a pure function of the draft. Operations keep their list
//! order, proto3 omits zero/empty fields, and `prost` writes fields in tag
//! order, so the same draft always yields the same bytes.
//!
//! The encoder re-checks every field against the wire schema instead of
//! trusting the builders. A mismatch is an [`EncodeError`], never a silently
//! dropped or truncated field.

use prost::Message;
use serde_json::Value;

use super::types::{EncodedTransaction, TransactionDraft};
use super::wire;
use crate::config::MAX_OPERATIONS;
use crate::errors::EncodeError;
use crate::operation::{OperationDescriptor, OperationKind};
use crate::validation::Args;

/// Encodes a draft into the exact bytes that get signed.
pub fn encode(draft: &TransactionDraft) -> Result<EncodedTransaction, EncodeError> {
    if draft.operations.is_empty() {
        return Err(EncodeError::NoOperations);
    }
    if draft.operations.len() > MAX_OPERATIONS {
        return Err(EncodeError::TooManyOperations {
            count: draft.operations.len(),
            limit: MAX_OPERATIONS,
        });
    }

    let operations = draft
        .operations
        .iter()
        .map(encode_operation)
        .collect::<Result<Vec<_>, _>>()?;

    let tx = wire::Transaction {
        source_address: draft.source_address.clone(),
        nonce: to_wire("nonce", draft.nonce)?,
        fee_limit: to_wire("feeLimit", draft.fee_limit)?,
        gas_price: to_wire("gasPrice", draft.gas_price)?,
        ceil_ledger_seq: to_wire("ceilLedgerSeq", draft.ceil_ledger_seq.unwrap_or(0))?,
        metadata: draft.metadata.clone().unwrap_or_default(),
        operations,
        chain_id: 0,
    };

    let bytes = tx.encode_to_vec();
    tracing::debug!(
        operations = draft.operations.len(),
        bytes = bytes.len(),
        "transaction encoded"
    );
    Ok(EncodedTransaction::from_bytes(bytes))
}

/// Decodes wire bytes back into a draft.
///
/// Only the operation kinds this SDK builds are accepted. The result holds
/// exactly the fields [`encode`] would have written, so
/// `decode(&encode(d)?)? == d`.
pub fn decode(blob: &EncodedTransaction) -> Result<TransactionDraft, EncodeError> {
    let tx = wire::Transaction::decode(blob.as_bytes())
        .map_err(|e| EncodeError::Decode(e.to_string()))?;

    if tx.operations.is_empty() {
        return Err(EncodeError::NoOperations);
    }
    if tx.operations.len() > MAX_OPERATIONS {
        return Err(EncodeError::TooManyOperations {
            count: tx.operations.len(),
            limit: MAX_OPERATIONS,
        });
    }

    let operations = tx
        .operations
        .iter()
        .map(decode_operation)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionDraft {
        source_address: tx.source_address,
        gas_price: from_wire("gasPrice", tx.gas_price)?,
        fee_limit: from_wire("feeLimit", tx.fee_limit)?,
        nonce: from_wire("nonce", tx.nonce)?,
        ceil_ledger_seq: match tx.ceil_ledger_seq {
            0 => None,
            seq => Some(from_wire("ceilLedgerSeq", seq)?),
        },
        operations,
        metadata: (!tx.metadata.is_empty()).then_some(tx.metadata),
    })
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

fn encode_operation(op: &OperationDescriptor) -> Result<wire::Operation, EncodeError> {
    let f = FieldReader {
        kind: op.kind(),
        args: op.fields(),
    };

    let mut out = wire::Operation {
        source_address: f.opt_text("sourceAddress")?,
        metadata: f.opt_hex("metadata")?,
        ..Default::default()
    };

    match op.kind() {
        OperationKind::IssueAsset => {
            out.r#type = wire::OperationType::IssueAsset as i32;
            out.issue_asset = Some(wire::OperationIssueAsset {
                code: f.text("code")?,
                amount: f.amount("assetAmount")?,
            });
        }
        OperationKind::PayAsset => {
            out.r#type = wire::OperationType::PayAsset as i32;
            out.pay_asset = Some(wire::OperationPayAsset {
                dest_address: f.text("destAddress")?,
                asset: Some(wire::Asset {
                    key: Some(wire::AssetKey {
                        issuer: f.text("issuer")?,
                        code: f.text("code")?,
                        r#type: 0,
                    }),
                    amount: f.amount("assetAmount")?,
                }),
                input: String::new(),
            });
        }
        OperationKind::PayCoin => {
            out.r#type = wire::OperationType::PayCoin as i32;
            out.pay_coin = Some(wire::OperationPayCoin {
                dest_address: f.text("destAddress")?,
                amount: f.amount("buAmount")?,
                input: String::new(),
            });
        }
        OperationKind::CreateAccount => {
            out.r#type = wire::OperationType::CreateAccount as i32;
            out.create_account = Some(wire::OperationCreateAccount {
                dest_address: f.text("destAddress")?,
                r#priv: Some(wire::AccountPrivilege::single_signer()),
                init_balance: f.amount("initBalance")?,
                init_input: String::new(),
            });
        }
        OperationKind::SetMetadata => {
            out.r#type = wire::OperationType::SetMetadata as i32;
            out.set_metadata = Some(wire::OperationSetMetadata {
                key: f.text("key")?,
                value: f.text("value")?,
                version: f.opt_amount("version")?,
            });
        }
    }

    Ok(out)
}

fn decode_operation(op: &wire::Operation) -> Result<OperationDescriptor, EncodeError> {
    let op_type = wire::OperationType::try_from(op.r#type)
        .map_err(|_| EncodeError::Decode(format!("unknown operation type {}", op.r#type)))?;

    let mut args = Args::new();
    put_text(&mut args, "sourceAddress", &op.source_address);
    if !op.metadata.is_empty() {
        args.insert("metadata".into(), Value::String(hex::encode(&op.metadata)));
    }

    let kind = match op_type {
        wire::OperationType::IssueAsset => {
            let body = require_body(op.issue_asset.as_ref(), OperationKind::IssueAsset)?;
            put_text(&mut args, "code", &body.code);
            put_amount(&mut args, "assetAmount", body.amount)?;
            OperationKind::IssueAsset
        }
        wire::OperationType::PayAsset => {
            let body = require_body(op.pay_asset.as_ref(), OperationKind::PayAsset)?;
            let asset = body.asset.as_ref().ok_or_else(|| missing(OperationKind::PayAsset, "asset"))?;
            let key = asset.key.as_ref().ok_or_else(|| missing(OperationKind::PayAsset, "code"))?;
            put_text(&mut args, "destAddress", &body.dest_address);
            put_text(&mut args, "code", &key.code);
            put_text(&mut args, "issuer", &key.issuer);
            put_amount(&mut args, "assetAmount", asset.amount)?;
            OperationKind::PayAsset
        }
        wire::OperationType::PayCoin => {
            let body = require_body(op.pay_coin.as_ref(), OperationKind::PayCoin)?;
            put_text(&mut args, "destAddress", &body.dest_address);
            put_amount(&mut args, "buAmount", body.amount)?;
            OperationKind::PayCoin
        }
        wire::OperationType::CreateAccount => {
            let body = require_body(op.create_account.as_ref(), OperationKind::CreateAccount)?;
            put_text(&mut args, "destAddress", &body.dest_address);
            put_amount(&mut args, "initBalance", body.init_balance)?;
            OperationKind::CreateAccount
        }
        wire::OperationType::SetMetadata => {
            let body = require_body(op.set_metadata.as_ref(), OperationKind::SetMetadata)?;
            put_text(&mut args, "key", &body.key);
            put_text(&mut args, "value", &body.value);
            if body.version != 0 {
                put_amount(&mut args, "version", body.version)?;
            }
            OperationKind::SetMetadata
        }
        other => {
            return Err(EncodeError::Decode(format!(
                "operation type {:?} is not supported",
                other
            )))
        }
    };

    Ok(OperationDescriptor::sealed(kind, args))
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Reads typed wire values out of an operation's fields.
struct FieldReader<'a> {
    kind: OperationKind,
    args: &'a Args,
}

impl FieldReader<'_> {
    fn text(&self, field: &str) -> Result<String, EncodeError> {
        match self.args.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(self.wrong_type(field, "a string")),
            None => Err(missing(self.kind, field)),
        }
    }

    fn opt_text(&self, field: &str) -> Result<String, EncodeError> {
        match self.args.get(field) {
            Some(_) => self.text(field),
            None => Ok(String::new()),
        }
    }

    fn amount(&self, field: &str) -> Result<i64, EncodeError> {
        let text = self.text(field)?;
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.wrong_type(field, "a decimal integer string"));
        }
        let value = text.parse::<u64>().map_err(|_| EncodeError::OutOfRange {
            field: field.to_string(),
            value: text.clone(),
        })?;
        to_wire(field, value)
    }

    fn opt_amount(&self, field: &str) -> Result<i64, EncodeError> {
        match self.args.get(field) {
            Some(_) => self.amount(field),
            None => Ok(0),
        }
    }

    fn opt_hex(&self, field: &str) -> Result<Vec<u8>, EncodeError> {
        match self.args.get(field) {
            Some(_) => hex::decode(self.text(field)?).map_err(|_| EncodeError::InvalidHex {
                field: field.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn wrong_type(&self, field: &str, expected: &'static str) -> EncodeError {
        EncodeError::FieldType {
            kind: self.kind.to_string(),
            field: field.to_string(),
            expected,
        }
    }
}

fn to_wire(field: &str, value: u64) -> Result<i64, EncodeError> {
    i64::try_from(value).map_err(|_| EncodeError::OutOfRange {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Wire integers read back into a draft must be strictly positive.
fn from_wire(field: &str, value: i64) -> Result<u64, EncodeError> {
    if value <= 0 {
        return Err(EncodeError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value as u64)
}

fn missing(kind: OperationKind, field: &str) -> EncodeError {
    EncodeError::MissingField {
        kind: kind.to_string(),
        field: field.to_string(),
    }
}

fn require_body<T>(body: Option<&T>, kind: OperationKind) -> Result<&T, EncodeError> {
    body.ok_or_else(|| missing(kind, "body"))
}

fn put_text(args: &mut Args, name: &str, value: &str) {
    if !value.is_empty() {
        args.insert(name.to_string(), Value::String(value.to_string()));
    }
}

fn put_amount(args: &mut Args, name: &str, value: i64) -> Result<(), EncodeError> {
    let value = from_wire(name, value)?;
    args.insert(name.to_string(), Value::String(value.to_string()));
    Ok(())
}
