//! Native coin (BU) transfer.

use serde_json::Value;

use super::{put_opt, OperationDescriptor, OperationKind, METADATA, SOURCE_ADDRESS};
use crate::crypto::KeyCapability;
use crate::errors::SdkResult;
use crate::validation::{Args, FieldRule, Schema};

pub const PAY_COIN_SCHEMA: Schema = &[
    ("sourceAddress", SOURCE_ADDRESS),
    ("destAddress", FieldRule::new().required().string().address()),
    ("buAmount", FieldRule::new().required().string().numeric()),
    ("metadata", METADATA),
];

/// Sends `bu_amount` of the native coin to `dest_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayCoin {
    pub source_address: Option<String>,
    pub dest_address: String,
    pub bu_amount: u64,
    pub metadata: Option<String>,
}

impl PayCoin {
    pub fn new(dest_address: impl Into<String>, bu_amount: u64) -> Self {
        Self {
            source_address: None,
            dest_address: dest_address.into(),
            bu_amount,
            metadata: None,
        }
    }

    pub fn into_args(self) -> Args {
        let mut args = Args::new();
        put_opt(&mut args, "sourceAddress", self.source_address);
        args.insert("destAddress".into(), Value::String(self.dest_address));
        args.insert("buAmount".into(), Value::String(self.bu_amount.to_string()));
        put_opt(&mut args, "metadata", self.metadata);
        args
    }

    pub fn build(self, keys: &dyn KeyCapability) -> SdkResult<OperationDescriptor> {
        OperationKind::PayCoin.build(self.into_args(), keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{BumoKeypair, Ed25519Keys};
    use crate::errors::ValidationKey;

    #[test]
    fn builds_and_validates_amount() {
        let dest = BumoKeypair::from_seed(&[9u8; 32]).address();
        let op = PayCoin::new(dest.clone(), 10).build(&Ed25519Keys).unwrap();
        assert_eq!(op.field_str("buAmount"), Some("10"));

        let err = PayCoin::new(dest, 0).build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidBuAmount));
    }

    #[test]
    fn rejects_bad_destination() {
        let err = PayCoin::new("", 10).build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidDestAddress));
    }
}
