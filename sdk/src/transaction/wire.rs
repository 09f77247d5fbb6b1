//! Ledger wire schema (version [`WIRE_SCHEMA_VERSION`]).
//!
//! Hand-written `prost` messages mirroring the node's `Transaction` and
//! `Operation` protobuf definitions. Only the subset of the node schema this
//! SDK can produce is declared; tags match the node exactly. Any change to a
//! tag or wire type here must bump [`WIRE_SCHEMA_VERSION`].
//!
//! [`WIRE_SCHEMA_VERSION`]: crate::config::WIRE_SCHEMA_VERSION

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    #[prost(string, tag = "1")]
    pub source_address: String,
    #[prost(int64, tag = "2")]
    pub nonce: i64,
    #[prost(int64, tag = "3")]
    pub fee_limit: i64,
    #[prost(int64, tag = "4")]
    pub gas_price: i64,
    #[prost(int64, tag = "5")]
    pub ceil_ledger_seq: i64,
    #[prost(bytes = "vec", tag = "6")]
    pub metadata: Vec<u8>,
    #[prost(message, repeated, tag = "7")]
    pub operations: Vec<Operation>,
    #[prost(int64, tag = "8")]
    pub chain_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Operation {
    #[prost(enumeration = "OperationType", tag = "1")]
    pub r#type: i32,
    #[prost(string, tag = "2")]
    pub source_address: String,
    #[prost(bytes = "vec", tag = "3")]
    pub metadata: Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub create_account: Option<OperationCreateAccount>,
    #[prost(message, optional, tag = "5")]
    pub issue_asset: Option<OperationIssueAsset>,
    #[prost(message, optional, tag = "6")]
    pub pay_asset: Option<OperationPayAsset>,
    #[prost(message, optional, tag = "7")]
    pub set_metadata: Option<OperationSetMetadata>,
    #[prost(message, optional, tag = "10")]
    pub pay_coin: Option<OperationPayCoin>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum OperationType {
    Unknown = 0,
    CreateAccount = 1,
    IssueAsset = 2,
    PayAsset = 3,
    SetMetadata = 4,
    SetSignerWeight = 5,
    SetThreshold = 6,
    PayCoin = 7,
    Log = 8,
    SetPrivilege = 9,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationIssueAsset {
    #[prost(string, tag = "1")]
    pub code: String,
    #[prost(int64, tag = "2")]
    pub amount: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AssetKey {
    #[prost(string, tag = "1")]
    pub issuer: String,
    #[prost(string, tag = "2")]
    pub code: String,
    #[prost(int32, tag = "3")]
    pub r#type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Asset {
    #[prost(message, optional, tag = "1")]
    pub key: Option<AssetKey>,
    #[prost(int64, tag = "2")]
    pub amount: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationPayAsset {
    #[prost(string, tag = "1")]
    pub dest_address: String,
    #[prost(message, optional, tag = "2")]
    pub asset: Option<Asset>,
    #[prost(string, tag = "3")]
    pub input: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationPayCoin {
    #[prost(string, tag = "1")]
    pub dest_address: String,
    #[prost(int64, tag = "2")]
    pub amount: i64,
    #[prost(string, tag = "3")]
    pub input: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountThreshold {
    #[prost(int64, tag = "1")]
    pub tx_threshold: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountPrivilege {
    #[prost(int64, tag = "1")]
    pub master_weight: i64,
    #[prost(message, optional, tag = "3")]
    pub thresholds: Option<AccountThreshold>,
}

impl AccountPrivilege {
    /// Master weight 1, transaction threshold 1: the account's own key alone
    /// can sign for it.
    pub fn single_signer() -> Self {
        Self {
            master_weight: 1,
            thresholds: Some(AccountThreshold { tx_threshold: 1 }),
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationCreateAccount {
    #[prost(string, tag = "1")]
    pub dest_address: String,
    #[prost(message, optional, tag = "3")]
    pub r#priv: Option<AccountPrivilege>,
    #[prost(int64, tag = "5")]
    pub init_balance: i64,
    #[prost(string, tag = "6")]
    pub init_input: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationSetMetadata {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub value: String,
    #[prost(int64, tag = "3")]
    pub version: i64,
}
