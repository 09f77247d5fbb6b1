//! Account queries and key generation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{PATH_GET_ACCOUNT, SUCCESS_CODE};
use crate::crypto::{KeyCapability, KeyPairInfo};
use crate::errors::{DomainError, SdkResult, TransportError, ValidationError, ValidationKey};
use crate::normalize::integer_value;
use crate::transport::{request_json, HttpMethod, Transport};

/// An account as the node reports it, with defaults filled in.
///
/// Every integer is a decimal string, so 64-bit balances survive intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: String,
    /// `"0"` when the node omits it.
    pub balance: String,
    /// `"0"` for an account that never sent a transaction.
    pub nonce: String,
    pub assets: Vec<Value>,
    /// Signers and thresholds; `{}` when the node omits it.
    #[serde(rename = "priv")]
    pub privilege: Value,
}

/// Result of an address format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressCheck {
    pub is_valid: bool,
}

/// `{balance}` projection of [`AccountInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub balance: String,
}

/// `{nonce}` projection of [`AccountInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNonce {
    pub nonce: String,
}

/// `{assets}` projection of [`AccountInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAssets {
    pub assets: Vec<Value>,
}

/// Account operations against one node.
#[derive(Clone)]
pub struct AccountService {
    transport: Arc<dyn Transport>,
    keys: Arc<dyn KeyCapability>,
}

impl AccountService {
    pub fn new(transport: Arc<dyn Transport>, keys: Arc<dyn KeyCapability>) -> Self {
        Self { transport, keys }
    }

    /// Generates a fresh keypair locally. The account only exists on the
    /// ledger once a `create-account` operation activates it.
    pub fn create(&self) -> KeyPairInfo {
        self.keys.generate_key_pair()
    }

    pub fn check_valid(&self, address: &str) -> AddressCheck {
        AddressCheck {
            is_valid: self.keys.is_valid_address(address),
        }
    }

    /// Fetches the account. Fails with `INVALID_ADDRESS_ERROR` before any
    /// I/O for a malformed address, and with `ACCOUNT_NOT_EXIST` when the
    /// node reports any non-zero code.
    pub async fn get_info(&self, address: &str) -> SdkResult<AccountInfo> {
        if !self.keys.is_valid_address(address) {
            return Err(ValidationError::new(ValidationKey::InvalidAddress, "address").into());
        }

        let response = request_json(
            self.transport.as_ref(),
            HttpMethod::Get,
            PATH_GET_ACCOUNT,
            &json!({ "address": address }),
        )
        .await?;

        let code = response
            .get("error_code")
            .and_then(integer_value)
            .ok_or_else(|| TransportError::MalformedResponse("missing error_code".into()))?;
        if code != SUCCESS_CODE {
            tracing::debug!(address, node_code = code, "account lookup failed");
            return Err(DomainError::AccountNotExist.into());
        }

        let result = response.get("result").cloned().unwrap_or(Value::Null);
        Ok(account_from_result(address, &result))
    }

    pub async fn get_balance(&self, address: &str) -> SdkResult<AccountBalance> {
        let AccountInfo { balance, .. } = self.get_info(address).await?;
        Ok(AccountBalance { balance })
    }

    pub async fn get_nonce(&self, address: &str) -> SdkResult<AccountNonce> {
        let AccountInfo { nonce, .. } = self.get_info(address).await?;
        Ok(AccountNonce { nonce })
    }

    pub async fn get_assets(&self, address: &str) -> SdkResult<AccountAssets> {
        let AccountInfo { assets, .. } = self.get_info(address).await?;
        Ok(AccountAssets { assets })
    }
}

fn account_from_result(queried: &str, result: &Value) -> AccountInfo {
    let text = |name: &str, default: &str| {
        result
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    AccountInfo {
        address: text("address", queried),
        balance: text("balance", "0"),
        nonce: text("nonce", "0"),
        assets: result
            .get("assets")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        privilege: match result.get("priv") {
            Some(p @ Value::Object(_)) => p.clone(),
            _ => json!({}),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    #[test]
    fn defaults_fill_missing_members() {
        let info = account_from_result("buQaddr", &json!({}));
        assert_eq!(info.address, "buQaddr");
        assert_eq!(info.balance, "0");
        assert_eq!(info.nonce, "0");
        assert!(info.assets.is_empty());
        assert_eq!(info.privilege, json!({}));
    }

    #[test]
    fn normalized_members_are_kept() {
        let result = normalize(json!({
            "address": "buQother",
            "balance": 9223372036854775807i64,
            "nonce": 12,
            "assets": [{"amount": 5, "key": {"code": "CNY", "issuer": "buQx"}}],
            "priv": {"master_weight": 1, "thresholds": {"tx_threshold": 1}}
        }));
        let info = account_from_result("buQaddr", &result);
        assert_eq!(info.address, "buQother");
        assert_eq!(info.balance, "9223372036854775807");
        assert_eq!(info.nonce, "12");
        assert_eq!(info.assets[0]["amount"], json!("5"));
        assert_eq!(info.privilege["master_weight"], json!("1"));
    }

    #[test]
    fn serializes_with_priv_key() {
        let info = account_from_result("buQaddr", &json!({}));
        let v = serde_json::to_value(&info).unwrap();
        assert!(v.get("priv").is_some());
        assert!(v.get("privilege").is_none());
    }
}
