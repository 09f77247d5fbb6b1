//! Submission gateway.
//!
//! Wraps a blob and its signatures into the node's `submitTransaction`
//! payload, sends it, and turns the node's per-item result into either a
//! transaction hash or one [`DomainError`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::types::{EncodedTransaction, SignaturePair};
use crate::config::{PATH_SUBMIT_TRANSACTION, SUCCESS_CODE};
use crate::errors::{DomainError, SdkResult, TransportError, ValidationError, ValidationKey};
use crate::normalize::integer_value;
use crate::transport::{request_json, HttpMethod, Transport};

/// A transaction the node accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitted {
    pub hash: String,
}

/// The `submitTransaction` body: one item holding the hex blob and the
/// signatures in signing order.
pub fn submission_payload(blob: &EncodedTransaction, signatures: &[SignaturePair]) -> Value {
    json!({
        "items": [{
            "transaction_blob": blob.to_hex(),
            "signatures": signatures,
        }]
    })
}

/// Submits a signed blob. Exactly one request is made; failures are
/// reported, never retried.
pub async fn submit(
    transport: &dyn Transport,
    blob: &EncodedTransaction,
    signatures: &[SignaturePair],
) -> SdkResult<Submitted> {
    if signatures.is_empty() {
        return Err(ValidationError::new(ValidationKey::InvalidArguments, "signatures").into());
    }

    let payload = submission_payload(blob, signatures);
    let response = request_json(transport, HttpMethod::Post, PATH_SUBMIT_TRANSACTION, &payload).await?;
    interpret(&response, blob)
}

/// Reads the first result item. Later items, if any, are ignored.
fn interpret(response: &Value, blob: &EncodedTransaction) -> SdkResult<Submitted> {
    let first = response
        .get("results")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .ok_or_else(|| {
            tracing::warn!("submission response has no results");
            TransportError::MalformedResponse("missing results[0]".into())
        })?;

    let code = first
        .get("error_code")
        .and_then(integer_value)
        .ok_or_else(|| TransportError::MalformedResponse("missing results[0].error_code".into()))?;

    if code == SUCCESS_CODE {
        let hash = first
            .get("hash")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| blob.hash());
        tracing::info!(%hash, "transaction submitted");
        return Ok(Submitted { hash });
    }

    let err = DomainError::from_node_code(code).unwrap_or(DomainError::TransactionFail { node_code: code });
    let desc = first
        .get("error_desc")
        .and_then(Value::as_str)
        .unwrap_or_default();
    tracing::warn!(node_code = code, error = err.as_str(), desc, "transaction rejected");
    Err(err.into())
}
