//! # SDK Configuration & Constants
//!
//! Every magic number the SDK relies on lives here: key and address
//! prefixes, wire limits, REST paths, and the client options that point the
//! SDK at a node. If a constant is duplicated somewhere else, it belongs
//! here instead.
//!
//! The key/address prefixes and the wire limits are shared knowledge with
//! the ledger node. Changing them breaks compatibility with every deployed
//! node, so treat them as frozen.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationKey};

// ---------------------------------------------------------------------------
// Key & Address Encoding
// ---------------------------------------------------------------------------

/// Prefix bytes of a base58-encoded private key. Chosen so that every
/// encoded private key starts with the characters `priv`.
pub const PRIVATE_KEY_PREFIX: [u8; 3] = [0xDA, 0x37, 0x9F];

/// Prefix byte of a hex-encoded public key.
pub const PUBLIC_KEY_PREFIX: u8 = 0xB0;

/// Prefix bytes of a base58-encoded address. Every address starts with `bu`.
pub const ADDRESS_PREFIX: [u8; 2] = [0x01, 0x56];

/// Key type tag for Ed25519. The only key type this SDK produces.
pub const ED25519_KEY_TYPE: u8 = 0x01;

/// Filler byte written after the raw private key seed.
pub const PRIVATE_KEY_FILL: u8 = 0x00;

/// The ledger's base58 alphabet: Bitcoin's with `b`/`B` and `u`/`U`
/// swapped. Every key and address string uses it.
pub static BUMO_ALPHABET: bs58::Alphabet =
    bs58::Alphabet::new_unwrap(b"123456789AbCDEFGHJKLMNPQRSTuVWXYZaBcdefghijkmnopqrstUvwxyz");

/// Checksum length appended to every encoded key and address.
pub const CHECKSUM_LENGTH: usize = 4;

/// Raw Ed25519 key length in bytes (seed and public key alike).
pub const RAW_KEY_LENGTH: usize = 32;

/// Number of trailing SHA-256 bytes of the public key kept in an address.
pub const ADDRESS_HASH_LENGTH: usize = 20;

/// Decoded length of a private key: prefix + type + seed + fill + checksum.
pub const ENCODED_PRIVATE_KEY_LENGTH: usize =
    PRIVATE_KEY_PREFIX.len() + 1 + RAW_KEY_LENGTH + 1 + CHECKSUM_LENGTH;

/// Decoded length of a public key: prefix + type + raw key + checksum.
pub const ENCODED_PUBLIC_KEY_LENGTH: usize = 1 + 1 + RAW_KEY_LENGTH + CHECKSUM_LENGTH;

/// Decoded length of an address: prefix + type + hash + checksum.
pub const ENCODED_ADDRESS_LENGTH: usize =
    ADDRESS_PREFIX.len() + 1 + ADDRESS_HASH_LENGTH + CHECKSUM_LENGTH;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Wire Schema
// ---------------------------------------------------------------------------

/// Version of the transaction wire schema in [`crate::transaction::wire`].
/// Bump whenever a field, tag, or type changes there.
pub const WIRE_SCHEMA_VERSION: u32 = 1;

/// Maximum number of operations a single transaction may carry. The node
/// rejects anything larger, so the encoder does too.
pub const MAX_OPERATIONS: usize = 1000;

/// Largest value any numeric wire field can hold (`int64` on the wire).
pub const MAX_WIRE_INTEGER: u64 = i64::MAX as u64;

// ---------------------------------------------------------------------------
// Node Protocol
// ---------------------------------------------------------------------------

/// Node result code meaning "success".
pub const SUCCESS_CODE: i64 = 0;

/// Default fee limit is this many times the current gas price.
pub const FEE_LIMIT_MULTIPLIER: u64 = 1000;

/// REST path for account queries.
pub const PATH_GET_ACCOUNT: &str = "getAccount";

/// REST path for ledger header (and fee) queries.
pub const PATH_GET_LEDGER: &str = "getLedger";

/// REST path for transaction submission.
pub const PATH_SUBMIT_TRANSACTION: &str = "submitTransaction";

/// Default timeout for a single request to the node. The SDK never retries
/// on its own; callers that need a tighter deadline should wrap the call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// SdkOptions
// ---------------------------------------------------------------------------

/// Where and how to reach the ledger node.
///
/// Deserializable so that callers can load it from whatever config format
/// their application uses; every field except `host` has a default.
///
/// ```
/// use bumo_sdk::config::SdkOptions;
/// use std::time::Duration;
///
/// let options = SdkOptions::new("seed1.bumotest.io:26002")
///     .secure(true)
///     .timeout(Duration::from_secs(5));
/// assert_eq!(options.base_url(), "https://seed1.bumotest.io:26002");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkOptions {
    /// Node host, optionally with a port (`127.0.0.1:36002`). No scheme.
    pub host: String,

    /// Use HTTPS instead of HTTP.
    #[serde(default)]
    pub secure: bool,

    /// Per-request timeout.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}

impl SdkOptions {
    /// Creates options for a plain-HTTP node with the default timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            secure: false,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Toggles HTTPS.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Scheme + host, without a trailing slash.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}", scheme, self.host.trim().trim_end_matches('/'))
    }

    /// Rejects options that cannot possibly reach a node.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::new(ValidationKey::UrlEmpty, "host"));
        }
        Ok(())
    }
}

/// Serializes a `Duration` as whole seconds.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
