//! Account metadata writes.

use serde_json::Value;

use super::{put_opt, OperationDescriptor, OperationKind, METADATA, SOURCE_ADDRESS};
use crate::crypto::KeyCapability;
use crate::errors::SdkResult;
use crate::validation::{Args, FieldRule, Schema};

pub const SET_METADATA_SCHEMA: Schema = &[
    ("sourceAddress", SOURCE_ADDRESS),
    ("key", FieldRule::new().required().string()),
    ("value", FieldRule::new().required().string()),
    ("version", FieldRule::new().string().numeric()),
    ("metadata", METADATA),
];

/// Writes `value` under `key` in the source account's metadata.
///
/// `version`, when set, must match the entry's current version on the node
/// or the write is rejected there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetMetadata {
    pub source_address: Option<String>,
    pub key: String,
    pub value: String,
    pub version: Option<u64>,
    pub metadata: Option<String>,
}

impl SetMetadata {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source_address: None,
            key: key.into(),
            value: value.into(),
            version: None,
            metadata: None,
        }
    }

    pub fn into_args(self) -> Args {
        let mut args = Args::new();
        put_opt(&mut args, "sourceAddress", self.source_address);
        args.insert("key".into(), Value::String(self.key));
        args.insert("value".into(), Value::String(self.value));
        put_opt(&mut args, "version", self.version.map(|v| v.to_string()));
        put_opt(&mut args, "metadata", self.metadata);
        args
    }

    pub fn build(self, keys: &dyn KeyCapability) -> SdkResult<OperationDescriptor> {
        OperationKind::SetMetadata.build(self.into_args(), keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ed25519Keys;
    use crate::errors::ValidationKey;

    #[test]
    fn builds_with_and_without_version() {
        let op = SetMetadata::new("k", "v").build(&Ed25519Keys).unwrap();
        assert!(op.fields().get("version").is_none());

        let mut set = SetMetadata::new("k", "v");
        set.version = Some(3);
        let op = set.build(&Ed25519Keys).unwrap();
        assert_eq!(op.field_str("version"), Some("3"));
    }

    #[test]
    fn zero_version_uses_generic_key() {
        let mut set = SetMetadata::new("k", "v");
        set.version = Some(0);
        let err = set.build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidArguments));
    }

    #[test]
    fn blank_value_rejected() {
        let err = SetMetadata::new("k", " ").build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::EmptyString));
    }
}
