//! Caller-facing response envelope.
//!
//! Library APIs return `SdkResult<T>`. Callers that need the flat
//! `{errorCode, errorDesc, result}` shape (JSON bridges, language bindings)
//! convert with [`SdkResponse::from_result`]. The result passes through
//! [`normalize`] on the way out, so every integer leaves as a decimal string.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{SdkError, SdkResult};
use crate::normalize::normalize;

/// `errorCode == 0` means success and `result` holds the value; otherwise
/// `result` is an empty object and `errorDesc` explains the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkResponse {
    pub error_code: u32,
    pub error_desc: String,
    pub result: Value,
}

impl SdkResponse {
    pub fn from_result<T: Serialize>(result: SdkResult<T>) -> Self {
        match result.and_then(|v| {
            serde_json::to_value(v)
                .map(normalize)
                .map_err(|e| SdkError::Internal(format!("serialize result: {}", e)))
        }) {
            Ok(value) => Self {
                error_code: 0,
                error_desc: String::new(),
                result: value,
            },
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn from_error(err: &SdkError) -> Self {
        Self {
            error_code: err.code(),
            error_desc: err.description(),
            result: Value::Object(Map::new()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }
}

impl<T: Serialize> From<SdkResult<T>> for SdkResponse {
    fn from(result: SdkResult<T>) -> Self {
        Self::from_result(result)
    }
}
