//! # Operation Builders
//!
//! One builder per operation kind. A builder validates its arguments against
//! the kind's static schema and seals them into an [`OperationDescriptor`],
//! the only thing the encoder accepts. Builders never perform I/O.
//!
//! ```text
//! asset.rs    : issue-asset, pay-asset
//! coin.rs     : pay-coin (native BU transfer)
//! account.rs  : create-account
//! metadata.rs : set-metadata
//! ```
//!
//! Dispatch is a closed [`OperationKind`] enumeration. Kind names arriving
//! as strings are parsed once at the boundary and anything unknown fails
//! with `OPERATION_UNRESOLVABLE`.

pub mod account;
pub mod asset;
pub mod coin;
pub mod metadata;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::crypto::KeyCapability;
use crate::errors::{SdkError, SdkResult};
use crate::validation::{self, Args, FieldRule, Schema};

pub use account::CreateAccount;
pub use asset::{IssueAsset, PayAsset};
pub use coin::PayCoin;
pub use metadata::SetMetadata;

/// Optional on every kind: the account the operation acts on, when it
/// differs from the transaction source.
pub(crate) const SOURCE_ADDRESS: FieldRule = FieldRule::new().string().address();

/// Optional on every kind: hex-encoded operation metadata.
pub(crate) const METADATA: FieldRule = FieldRule::new().string().hex();

// ---------------------------------------------------------------------------
// OperationKind
// ---------------------------------------------------------------------------

/// Every operation kind this SDK can build and encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    IssueAsset,
    PayAsset,
    PayCoin,
    CreateAccount,
    SetMetadata,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        Self::IssueAsset,
        Self::PayAsset,
        Self::PayCoin,
        Self::CreateAccount,
        Self::SetMetadata,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IssueAsset => "issue-asset",
            Self::PayAsset => "pay-asset",
            Self::PayCoin => "pay-coin",
            Self::CreateAccount => "create-account",
            Self::SetMetadata => "set-metadata",
        }
    }

    /// The static schema the builder for this kind validates against.
    pub fn schema(self) -> Schema {
        match self {
            Self::IssueAsset => asset::ISSUE_SCHEMA,
            Self::PayAsset => asset::PAY_SCHEMA,
            Self::PayCoin => coin::PAY_COIN_SCHEMA,
            Self::CreateAccount => account::CREATE_ACCOUNT_SCHEMA,
            Self::SetMetadata => metadata::SET_METADATA_SCHEMA,
        }
    }

    /// Validates `args` against this kind's schema and seals them. Fields the
    /// schema does not name are dropped.
    pub fn build(self, mut args: Args, keys: &dyn KeyCapability) -> SdkResult<OperationDescriptor> {
        let schema = self.schema();
        validation::validate(&mut args, schema, keys)?;
        args.retain(|name, _| schema.iter().any(|(field, _)| *field == name.as_str()));
        tracing::trace!(kind = self.as_str(), "operation built");
        Ok(OperationDescriptor::sealed(self, args))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SdkError::OperationUnresolvable(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// OperationDescriptor
// ---------------------------------------------------------------------------

/// A validated operation, ready for the encoder.
///
/// Only builders create descriptors, so holding one means the fields passed
/// the kind's schema. There is no way to mutate it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    kind: OperationKind,
    fields: Args,
}

impl OperationDescriptor {
    pub(crate) fn sealed(kind: OperationKind, fields: Args) -> Self {
        Self { kind, fields }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn fields(&self) -> &Args {
        &self.fields
    }

    /// A field as a string slice, if present and a string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Builds an operation from a kind name and loose arguments.
///
/// ```
/// use bumo_sdk::crypto::Ed25519Keys;
/// use bumo_sdk::operation::{build_operation, OperationKind};
/// use serde_json::json;
///
/// let args = json!({"code": "CNY", "assetAmount": "1000"});
/// let op = build_operation("issue-asset", args.as_object().unwrap().clone(), &Ed25519Keys).unwrap();
/// assert_eq!(op.kind(), OperationKind::IssueAsset);
///
/// let err = build_operation("burn-asset", Default::default(), &Ed25519Keys).unwrap_err();
/// assert_eq!(err.key(), "OPERATION_UNRESOLVABLE");
/// ```
pub fn build_operation(
    kind: &str,
    args: Args,
    keys: &dyn KeyCapability,
) -> SdkResult<OperationDescriptor> {
    kind.parse::<OperationKind>()?.build(args, keys)
}

/// Inserts an optional string argument.
pub(crate) fn put_opt(args: &mut Args, name: &str, value: Option<String>) {
    if let Some(v) = value {
        args.insert(name.to_string(), Value::String(v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ed25519Keys;
    use crate::errors::ValidationKey;
    use serde_json::json;

    fn args(v: Value) -> Args {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in OperationKind::ALL {
            assert_eq!(kind.as_str().parse::<OperationKind>().unwrap(), kind);
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn unknown_kind_is_unresolvable() {
        let err = "issueAsset".parse::<OperationKind>().unwrap_err();
        assert_eq!(err, SdkError::OperationUnresolvable("issueAsset".into()));
        assert_eq!(err.code(), 15030);
    }

    #[test]
    fn build_keeps_fields_unchanged() {
        let input = args(json!({"code": "CNY", "assetAmount": "1000", "metadata": "ab"}));
        let op = build_operation("issue-asset", input.clone(), &Ed25519Keys).unwrap();
        assert_eq!(op.fields(), &input);
        assert_eq!(op.field_str("code"), Some("CNY"));
    }

    #[test]
    fn build_drops_unknown_fields() {
        let input = args(json!({"code": "CNY", "assetAmount": "1", "memo": "hi"}));
        let op = build_operation("issue-asset", input, &Ed25519Keys).unwrap();
        assert!(op.fields().get("memo").is_none());
        assert_eq!(op.fields().len(), 2);
    }

    #[test]
    fn build_surfaces_the_first_violation() {
        let err = build_operation("issue-asset", args(json!({"code": "CNY", "assetAmount": "0"})), &Ed25519Keys)
            .unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidAssetAmount));
    }

    #[test]
    fn every_kind_shares_source_and_metadata_rules() {
        for kind in OperationKind::ALL {
            let schema = kind.schema();
            assert!(schema.iter().any(|(f, r)| *f == "sourceAddress" && *r == SOURCE_ADDRESS));
            assert!(schema.iter().any(|(f, r)| *f == "metadata" && *r == METADATA));
        }
    }
}
