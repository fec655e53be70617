use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::utils::error::{RelayError, Result};

/// Request body accepted by `POST /buy-esim`.
///
/// `amount` is a human-readable decimal token amount; it is scaled by the
/// configured token decimals into base units before the balance comparison.
/// `token` is accepted for wire compatibility but unused downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRequest {
    #[serde(rename = "userAddress")]
    pub user_address: String,
    pub amount: AmountField,
    pub token: Option<String>,
}

/// Callers send `amount` as either a JSON string or a JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Text(String),
    Number(serde_json::Number),
}

impl AmountField {
    /// 以字串形式解析，避免浮點數精度損失
    pub fn as_decimal(&self) -> Result<Decimal> {
        let raw = match self {
            AmountField::Text(s) => s.trim().to_string(),
            AmountField::Number(n) => n.to_string(),
        };

        Decimal::from_str(&raw).map_err(|e| RelayError::ValidationError {
            message: format!("amount '{}' is not a valid decimal: {}", raw, e),
        })
    }
}

/// What the relay forwards to the fulfillment provider.
#[derive(Debug, Clone, Serialize)]
pub struct FulfillmentOrder {
    #[serde(rename = "userAddress")]
    pub user_address: String,
    pub amount: Decimal,
}

/// The provider's response body, preserved verbatim so a success response can
/// relay it untouched. Unknown fields land in `payload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentResult {
    pub success: bool,
    #[serde(flatten)]
    pub payload: HashMap<String, serde_json::Value>,
}

/// A balance read from the remote ledger, in base units. Read-only to this
/// system; never persisted.
#[derive(Debug, Clone)]
pub struct BalanceRecord {
    pub user_address: String,
    pub balance: u128,
}
