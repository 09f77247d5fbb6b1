//! Declarative argument validation.
//!
//! Every operation kind and the transaction header describe their inputs as
//! a static [`Schema`]: an ordered list of `(field, FieldRule)` pairs. One
//! interpreter, [`validate`], walks the schema and stops at the first
//! violation, so exactly one error comes back per call. Which error wins is
//! decided by declaration order in the schema, not by severity.
//!
//! Per field, the rules run in this order:
//!
//! 1. `required` and absent: the field is filled with `""` and the later
//!    rules judge the empty value. Absence alone is never the error.
//! 2. `numeric`: a decimal string matching `^[1-9]\d*$` that fits in
//!    `(0, 2^63-1]`.
//! 3. `private_key`: accepted by the key capability.
//! 4. `address`: accepted by the key capability's checksum check.
//! 5. `operations`: a list of `{kind, fields}` objects.
//! 6. `hex`: survives a hex decode/encode round trip unchanged.
//! 7. `string`: if it is a string, it is not blank.
//!
//! Rules 2-7 only look at fields that are present. An explicit JSON `null`
//! counts as absent and is dropped from the arguments.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::config::MAX_WIRE_INTEGER;
use crate::crypto::KeyCapability;
use crate::errors::{ValidationError, ValidationKey};

/// Flat argument object handed to builders.
pub type Args = Map<String, Value>;

/// A static, ordered list of field rules.
pub type Schema = &'static [(&'static str, FieldRule)];

static POSITIVE_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9]\d*$").expect("static regex is valid"));

// ---------------------------------------------------------------------------
// FieldRule
// ---------------------------------------------------------------------------

/// Independent boolean checks applied to one field.
///
/// Built with const combinators so schemas can be `static`:
///
/// ```
/// use bumo_sdk::validation::FieldRule;
///
/// const AMOUNT: FieldRule = FieldRule::new().required().string().numeric();
/// assert!(AMOUNT.required && AMOUNT.numeric && !AMOUNT.address);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldRule {
    pub required: bool,
    pub string: bool,
    pub numeric: bool,
    pub address: bool,
    pub private_key: bool,
    pub operations: bool,
    pub hex: bool,
}

impl FieldRule {
    pub const fn new() -> Self {
        Self {
            required: false,
            string: false,
            numeric: false,
            address: false,
            private_key: false,
            operations: false,
            hex: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The value must be a string with at least one non-blank character.
    pub const fn string(mut self) -> Self {
        self.string = true;
        self
    }

    pub const fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    pub const fn address(mut self) -> Self {
        self.address = true;
        self
    }

    pub const fn private_key(mut self) -> Self {
        self.private_key = true;
        self
    }

    pub const fn operations(mut self) -> Self {
        self.operations = true;
        self
    }

    pub const fn hex(mut self) -> Self {
        self.hex = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Runs `schema` over `args`, filling required-but-absent fields with `""`
/// and dropping explicit nulls. Returns the first violation.
pub fn validate(
    args: &mut Args,
    schema: Schema,
    keys: &dyn KeyCapability,
) -> Result<(), ValidationError> {
    args.retain(|_, v| !v.is_null());

    for &(field, rule) in schema {
        if rule.required && !args.contains_key(field) {
            args.insert(field.to_string(), Value::String(String::new()));
        }

        let Some(value) = args.get(field) else {
            continue;
        };

        if rule.numeric && parse_positive_integer(value).is_none() {
            return Err(ValidationError::new(numeric_key(field), field));
        }

        if rule.private_key && !value.as_str().is_some_and(|s| keys.is_valid_private_key(s)) {
            return Err(ValidationError::new(ValidationKey::InvalidPrivateKey, field));
        }

        if rule.address && !value.as_str().is_some_and(|s| keys.is_valid_address(s)) {
            return Err(ValidationError::new(address_key(field), field));
        }

        if rule.operations && !is_operation_list(value) {
            return Err(ValidationError::new(ValidationKey::InvalidOperations, field));
        }

        if rule.hex && !is_hex_string(value) {
            return Err(ValidationError::new(
                ValidationKey::MetadataNotHexString,
                field,
            ));
        }

        if rule.string && !value.as_str().is_some_and(|s| !s.trim().is_empty()) {
            return Err(ValidationError::new(ValidationKey::EmptyString, field));
        }
    }

    Ok(())
}

/// Parses a strictly positive decimal string that fits a wire integer.
///
/// Only strings qualify: a JSON number is rejected, because by the time it
/// was parsed into one its precision may already be gone.
pub fn parse_positive_integer(value: &Value) -> Option<u64> {
    let s = value.as_str()?;
    if !POSITIVE_DECIMAL.is_match(s) {
        return None;
    }
    s.parse::<u64>().ok().filter(|n| *n <= MAX_WIRE_INTEGER)
}

/// `true` iff `value` is a string that survives hex decode/encode unchanged
/// (even length, lowercase digits only).
pub fn is_hex_string(value: &Value) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    hex::decode(s).is_ok_and(|bytes| hex::encode(bytes) == s)
}

/// `true` iff `value` is a list of objects, each with a non-empty string
/// `kind` and an object `fields`.
pub fn is_operation_list(value: &Value) -> bool {
    let Some(items) = value.as_array() else {
        return false;
    };
    items.iter().all(|item| {
        let kind_ok = item
            .get("kind")
            .and_then(Value::as_str)
            .is_some_and(|k| !k.trim().is_empty());
        let fields_ok = item.get("fields").is_some_and(Value::is_object);
        kind_ok && fields_ok
    })
}

fn numeric_key(field: &str) -> ValidationKey {
    match field {
        "buAmount" => ValidationKey::InvalidBuAmount,
        "assetAmount" => ValidationKey::InvalidAssetAmount,
        "gasPrice" => ValidationKey::InvalidGasPrice,
        "feeLimit" => ValidationKey::InvalidFeeLimit,
        "ceilLedgerSeq" => ValidationKey::InvalidCeilLedgerSeq,
        "nonce" => ValidationKey::InvalidNonce,
        "initBalance" => ValidationKey::InvalidInitBalance,
        _ => ValidationKey::InvalidArguments,
    }
}

fn address_key(field: &str) -> ValidationKey {
    match field {
        "sourceAddress" => ValidationKey::InvalidSourceAddress,
        "destAddress" => ValidationKey::InvalidDestAddress,
        _ => ValidationKey::InvalidArguments,
    }
}
