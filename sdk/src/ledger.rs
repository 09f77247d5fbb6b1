//! Ledger header and fee queries.
//!
//! Nothing here is cached. Fees are read fresh on every call so concurrent
//! submissions never share a stale gas price; callers that want a cache own
//! it and decide when to drop it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{FEE_LIMIT_MULTIPLIER, PATH_GET_LEDGER, SUCCESS_CODE};
use crate::errors::{SdkError, SdkResult, TransportError};
use crate::normalize::integer_value;
use crate::transport::{request_json, HttpMethod, Transport};

/// The latest closed ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNumber {
    /// Full header as reported, integers normalized to strings.
    pub header: Value,
    /// `header.seq`.
    pub block_number: String,
}

/// Fee parameters for a new transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultFees {
    pub gas_price: u64,
    /// `FEE_LIMIT_MULTIPLIER` times the gas price.
    pub fee_limit: u64,
}

#[derive(Clone)]
pub struct LedgerService {
    transport: Arc<dyn Transport>,
}

impl LedgerService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get_block_number(&self) -> SdkResult<BlockNumber> {
        let result = self.get_ledger(&Value::Null).await?;
        let header = result.get("header").cloned().unwrap_or(Value::Null);
        let block_number = header
            .get("seq")
            .and_then(Value::as_str)
            .ok_or_else(|| TransportError::MalformedResponse("missing header.seq".into()))?
            .to_string();
        Ok(BlockNumber {
            header,
            block_number,
        })
    }

    pub async fn default_fees(&self) -> SdkResult<DefaultFees> {
        let result = self.get_ledger(&json!({ "with_fee": true })).await?;
        let gas_price = result
            .pointer("/fees/gas_price")
            .and_then(integer_value)
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| TransportError::MalformedResponse("missing fees.gas_price".into()))?;
        let fee_limit = gas_price.checked_mul(FEE_LIMIT_MULTIPLIER).ok_or_else(|| {
            SdkError::Internal(format!("fee limit overflows for gas price {}", gas_price))
        })?;
        Ok(DefaultFees {
            gas_price,
            fee_limit,
        })
    }

    /// `getLedger`, returning `result` on success and `Internal` otherwise.
    async fn get_ledger(&self, query: &Value) -> SdkResult<Value> {
        let response =
            request_json(self.transport.as_ref(), HttpMethod::Get, PATH_GET_LEDGER, query).await?;
        let code = response
            .get("error_code")
            .and_then(integer_value)
            .ok_or_else(|| TransportError::MalformedResponse("missing error_code".into()))?;
        if code != SUCCESS_CODE {
            return Err(SdkError::Internal(format!("getLedger returned error code {}", code)));
        }
        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Canned {
        body: String,
        queries: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl Transport for Canned {
        async fn request(
            &self,
            _method: HttpMethod,
            _path: &str,
            payload: &Value,
        ) -> Result<String, TransportError> {
            self.queries.lock().unwrap().push(payload.clone());
            Ok(self.body.clone())
        }
    }

    fn service(body: &str) -> (LedgerService, Arc<Canned>) {
        let canned = Arc::new(Canned {
            body: body.to_string(),
            queries: Mutex::new(Vec::new()),
        });
        (LedgerService::new(canned.clone()), canned)
    }

    #[tokio::test]
    async fn block_number_reads_header_seq() {
        let (ledger, _) = service(r#"{"error_code":0,"result":{"header":{"seq":4521,"hash":"ab"}}}"#);
        let block = ledger.get_block_number().await.unwrap();
        assert_eq!(block.block_number, "4521");
        assert_eq!(block.header["hash"], json!("ab"));
    }

    #[tokio::test]
    async fn non_zero_code_is_internal() {
        let (ledger, _) = service(r#"{"error_code":4,"result":{}}"#);
        let err = ledger.get_block_number().await.unwrap_err();
        assert_eq!(err.key(), "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn default_fees_multiply_gas_price() {
        let (ledger, canned) =
            service(r#"{"error_code":0,"result":{"fees":{"gas_price":1000,"base_reserve":10000000}}}"#);
        let fees = ledger.default_fees().await.unwrap();
        assert_eq!(fees, DefaultFees { gas_price: 1000, fee_limit: 1_000_000 });

        ledger.default_fees().await.unwrap();
        let queries = canned.queries.lock().unwrap();
        assert_eq!(queries.len(), 2, "fees are fetched on every call");
        assert_eq!(queries[0], json!({"with_fee": true}));
    }

    #[tokio::test]
    async fn missing_gas_price_is_malformed() {
        let (ledger, _) = service(r#"{"error_code":0,"result":{}}"#);
        let err = ledger.default_fees().await.unwrap_err();
        assert_eq!(err.key(), "INVALID_RESPONSE_ERROR");
    }
}
