//! Asset operations: issuing a new asset and paying an issued one.

use serde_json::Value;

use super::{put_opt, OperationDescriptor, OperationKind, METADATA, SOURCE_ADDRESS};
use crate::crypto::KeyCapability;
use crate::errors::SdkResult;
use crate::validation::{Args, FieldRule, Schema};

pub const ISSUE_SCHEMA: Schema = &[
    ("sourceAddress", SOURCE_ADDRESS),
    ("code", FieldRule::new().required().string()),
    ("assetAmount", FieldRule::new().required().string().numeric()),
    ("metadata", METADATA),
];

pub const PAY_SCHEMA: Schema = &[
    ("sourceAddress", SOURCE_ADDRESS),
    ("destAddress", FieldRule::new().required().string().address()),
    ("code", FieldRule::new().required().string()),
    ("issuer", FieldRule::new().required().string().address()),
    ("assetAmount", FieldRule::new().required().string().numeric()),
    ("metadata", METADATA),
];

/// Issues `asset_amount` units of asset `code`, owned by the source account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueAsset {
    pub source_address: Option<String>,
    pub code: String,
    pub asset_amount: u64,
    pub metadata: Option<String>,
}

impl IssueAsset {
    pub fn new(code: impl Into<String>, asset_amount: u64) -> Self {
        Self {
            source_address: None,
            code: code.into(),
            asset_amount,
            metadata: None,
        }
    }

    pub fn into_args(self) -> Args {
        let mut args = Args::new();
        put_opt(&mut args, "sourceAddress", self.source_address);
        args.insert("code".into(), Value::String(self.code));
        args.insert("assetAmount".into(), Value::String(self.asset_amount.to_string()));
        put_opt(&mut args, "metadata", self.metadata);
        args
    }

    pub fn build(self, keys: &dyn KeyCapability) -> SdkResult<OperationDescriptor> {
        OperationKind::IssueAsset.build(self.into_args(), keys)
    }
}

/// Transfers `asset_amount` units of the asset `(issuer, code)` to
/// `dest_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayAsset {
    pub source_address: Option<String>,
    pub dest_address: String,
    pub code: String,
    pub issuer: String,
    pub asset_amount: u64,
    pub metadata: Option<String>,
}

impl PayAsset {
    pub fn new(
        dest_address: impl Into<String>,
        code: impl Into<String>,
        issuer: impl Into<String>,
        asset_amount: u64,
    ) -> Self {
        Self {
            source_address: None,
            dest_address: dest_address.into(),
            code: code.into(),
            issuer: issuer.into(),
            asset_amount,
            metadata: None,
        }
    }

    pub fn into_args(self) -> Args {
        let mut args = Args::new();
        put_opt(&mut args, "sourceAddress", self.source_address);
        args.insert("destAddress".into(), Value::String(self.dest_address));
        args.insert("code".into(), Value::String(self.code));
        args.insert("issuer".into(), Value::String(self.issuer));
        args.insert("assetAmount".into(), Value::String(self.asset_amount.to_string()));
        put_opt(&mut args, "metadata", self.metadata);
        args
    }

    pub fn build(self, keys: &dyn KeyCapability) -> SdkResult<OperationDescriptor> {
        OperationKind::PayAsset.build(self.into_args(), keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{BumoKeypair, Ed25519Keys};
    use crate::errors::ValidationKey;

    fn addr(seed: u8) -> String {
        BumoKeypair::from_seed(&[seed; 32]).address()
    }

    #[test]
    fn issue_builds() {
        let op = IssueAsset::new("CNY", 1000).build(&Ed25519Keys).unwrap();
        assert_eq!(op.kind(), OperationKind::IssueAsset);
        assert_eq!(op.field_str("assetAmount"), Some("1000"));
    }

    #[test]
    fn issue_rejects_zero_amount() {
        let err = IssueAsset::new("CNY", 0).build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidAssetAmount));
    }

    #[test]
    fn issue_rejects_amount_above_wire_range() {
        let err = IssueAsset::new("CNY", u64::MAX).build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidAssetAmount));
    }

    #[test]
    fn issue_rejects_blank_code() {
        let err = IssueAsset::new("  ", 1).build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::EmptyString));
    }

    #[test]
    fn issue_rejects_numeric_code() {
        let args = serde_json::json!({"code": 123, "assetAmount": "1"})
            .as_object()
            .cloned()
            .unwrap();
        let err = OperationKind::IssueAsset.build(args, &Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::EmptyString));
    }

    #[test]
    fn issue_rejects_bad_metadata() {
        let mut op = IssueAsset::new("CNY", 1);
        op.metadata = Some("zz".into());
        let err = op.build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::MetadataNotHexString));
    }

    #[test]
    fn pay_builds() {
        let op = PayAsset::new(addr(1), "CNY", addr(2), 5).build(&Ed25519Keys).unwrap();
        assert_eq!(op.kind(), OperationKind::PayAsset);
        assert_eq!(op.field_str("issuer"), Some(addr(2).as_str()));
    }

    #[test]
    fn pay_checks_dest_before_issuer() {
        let err = PayAsset::new("bad", "CNY", "also-bad", 5).build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidDestAddress));

        let err = PayAsset::new(addr(1), "CNY", "bad", 5).build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidArguments));
    }

    #[test]
    fn pay_rejects_bad_source() {
        let mut op = PayAsset::new(addr(1), "CNY", addr(2), 5);
        op.source_address = Some("buNotAnAddress".into());
        let err = op.build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidSourceAddress));
    }
}
