//! Response normalization.
//!
//! Node responses carry 64-bit amounts, nonces and sequence numbers that do
//! not survive a trip through `f64`. Raw text is parsed with `serde_json`'s
//! `arbitrary_precision` feature, so every numeric literal keeps its exact
//! decimal text, and then [`normalize`] rewrites every integer it can find
//! into a canonical base-10 string.
//!
//! Three encodings of the same integer all normalize to the same string:
//!
//! | Input                                        | Output                   |
//! |----------------------------------------------|--------------------------|
//! | `9223372036854775807`                        | `"9223372036854775807"`  |
//! | `"9223372036854775807"`                      | unchanged                |
//! | `{"low": -1, "high": 2147483647}`            | `"9223372036854775807"`  |

use serde_json::{Map, Number, Value};

use crate::errors::TransportError;

/// Parses raw response text and normalizes it.
pub fn parse_response(raw: &str) -> Result<Value, TransportError> {
    serde_json::from_str::<Value>(raw)
        .map(normalize)
        .map_err(|e| TransportError::MalformedResponse(e.to_string()))
}

/// Rewrites every integer in `value` as its decimal string.
///
/// Objects made only of `low`/`high` 32-bit halves (with an optional
/// `unsigned` flag) are collapsed into one 64-bit integer first. Containers
/// recurse; floats, strings, booleans and null pass through unchanged.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Number(n) => normalize_number(n),
        Value::Object(map) => match split_long(&map) {
            Some(text) => Value::String(text),
            None => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, normalize(v)))
                    .collect(),
            ),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        other => other,
    }
}

/// Reads an integer that may already have been normalized to a string.
pub fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

fn normalize_number(n: Number) -> Value {
    let text = n.to_string();
    if is_integer_literal(&text) {
        Value::String(text)
    } else {
        Value::Number(n)
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Recognizes `{low, high[, unsigned]}` and returns the combined integer.
fn split_long(map: &Map<String, Value>) -> Option<String> {
    let allowed = |k: &String| k == "low" || k == "high" || k == "unsigned";
    if !map.keys().all(allowed) {
        return None;
    }

    let low = half(map.get("low")?)?;
    let high = half(map.get("high")?)?;
    let unsigned = match map.get("unsigned") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => return None,
    };

    let bits = (u64::from(high) << 32) | u64::from(low);
    Some(if unsigned {
        bits.to_string()
    } else {
        (bits as i64).to_string()
    })
}

/// One 32-bit half, accepted in either signed or unsigned form.
fn half(value: &Value) -> Option<u32> {
    let n = value.as_i64()?;
    if let Ok(v) = i32::try_from(n) {
        return Some(v as u32);
    }
    u32::try_from(n).ok()
}
