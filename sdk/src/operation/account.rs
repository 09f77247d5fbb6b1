//! Account activation.

use serde_json::Value;

use super::{put_opt, OperationDescriptor, OperationKind, METADATA, SOURCE_ADDRESS};
use crate::crypto::KeyCapability;
use crate::errors::SdkResult;
use crate::validation::{Args, FieldRule, Schema};

pub const CREATE_ACCOUNT_SCHEMA: Schema = &[
    ("sourceAddress", SOURCE_ADDRESS),
    ("destAddress", FieldRule::new().required().string().address()),
    ("initBalance", FieldRule::new().required().string().numeric()),
    ("metadata", METADATA),
];

/// Activates `dest_address` on the ledger, funding it with `init_balance`.
///
/// The new account always gets the default privilege: master weight 1 and
/// a transaction threshold of 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccount {
    pub source_address: Option<String>,
    pub dest_address: String,
    pub init_balance: u64,
    pub metadata: Option<String>,
}

impl CreateAccount {
    pub fn new(dest_address: impl Into<String>, init_balance: u64) -> Self {
        Self {
            source_address: None,
            dest_address: dest_address.into(),
            init_balance,
            metadata: None,
        }
    }

    pub fn into_args(self) -> Args {
        let mut args = Args::new();
        put_opt(&mut args, "sourceAddress", self.source_address);
        args.insert("destAddress".into(), Value::String(self.dest_address));
        args.insert("initBalance".into(), Value::String(self.init_balance.to_string()));
        put_opt(&mut args, "metadata", self.metadata);
        args
    }

    pub fn build(self, keys: &dyn KeyCapability) -> SdkResult<OperationDescriptor> {
        OperationKind::CreateAccount.build(self.into_args(), keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{BumoKeypair, Ed25519Keys};
    use crate::errors::ValidationKey;

    #[test]
    fn builds() {
        let dest = BumoKeypair::from_seed(&[5u8; 32]).address();
        let op = CreateAccount::new(dest, 10_000_000).build(&Ed25519Keys).unwrap();
        assert_eq!(op.kind(), OperationKind::CreateAccount);
        assert_eq!(op.field_str("initBalance"), Some("10000000"));
    }

    #[test]
    fn zero_init_balance_rejected() {
        let dest = BumoKeypair::from_seed(&[5u8; 32]).address();
        let err = CreateAccount::new(dest, 0).build(&Ed25519Keys).unwrap_err();
        assert_eq!(err.validation_key(), Some(ValidationKey::InvalidInitBalance));
    }
}
