use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::OracleConfig;
use crate::domain::model::BalanceRecord;
use crate::domain::ports::BalanceOracle;
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;

/// 4-byte selector of `balances(address)` on the payment contract.
const BALANCES_SELECTOR: &str = "27e235e3";

/// Reads prepaid balances from the payment contract via JSON-RPC `eth_call`.
/// Read-only: no signer is involved.
pub struct EthereumOracle {
    client: reqwest::Client,
    rpc_url: String,
    contract_address: String,
}

#[derive(Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
}

impl EthereumOracle {
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            rpc_url: config.rpc_url.clone(),
            contract_address: config.contract_address.clone(),
        })
    }

    /// ABI call data: selector followed by the 32-byte left-padded address.
    fn call_data(&self, address: &str) -> String {
        let hex = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .unwrap_or(address)
            .to_lowercase();
        format!("0x{}{:0>64}", BALANCES_SELECTOR, hex)
    }
}

#[async_trait]
impl BalanceOracle for EthereumOracle {
    async fn balance_of(&self, address: &str) -> Result<BalanceRecord> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: serde_json::json!([
                { "to": self.contract_address, "data": self.call_data(address) },
                "latest"
            ]),
        };

        tracing::debug!("eth_call balances({}) via {}", address, self.rpc_url);
        let response: RpcResponse = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(RelayError::OracleError {
                message: format!("RPC error: {}", err),
            });
        }

        let word = response
            .result
            .as_ref()
            .and_then(|v| v.as_str())
            .ok_or_else(|| RelayError::OracleError {
                message: "missing eth_call result".to_string(),
            })?;

        let balance = decode_uint_word(word)?;
        Ok(BalanceRecord {
            user_address: address.to_string(),
            balance,
        })
    }
}

/// Decodes a 0x-prefixed 32-byte big-endian word into `u128`. Values above
/// `u128::MAX` are an error, not a truncation.
fn decode_uint_word(word: &str) -> Result<u128> {
    let hex = word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
        .unwrap_or(word);

    if hex.is_empty() {
        return Err(RelayError::OracleError {
            message: "empty eth_call result".to_string(),
        });
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RelayError::OracleError {
            message: format!("malformed eth_call result: {}", word),
        });
    }

    let significant = hex.trim_start_matches('0');
    if significant.len() > 32 {
        return Err(RelayError::OracleError {
            message: "balance exceeds u128 range".to_string(),
        });
    }
    if significant.is_empty() {
        return Ok(0);
    }

    u128::from_str_radix(significant, 16).map_err(|e| RelayError::OracleError {
        message: format!("malformed eth_call result: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OracleConfig;

    fn oracle() -> EthereumOracle {
        let config = OracleConfig {
            rpc_url: "http://localhost:8545".to_string(),
            contract_address: "0x000000000000000000000000000000000000dEaD".to_string(),
            ..OracleConfig::default()
        };
        EthereumOracle::new(&config).unwrap()
    }

    #[test]
    fn test_call_data_pads_address_to_32_bytes() {
        let data = oracle().call_data("0x52908400098527886E0F7030069857D2E4169EE7");
        assert_eq!(
            data,
            "0x27e235e300000000000000000000000052908400098527886e0f7030069857d2e4169ee7"
        );
        assert_eq!(data.len(), 2 + 8 + 64);
    }

    #[test]
    fn test_decode_uint_word() {
        assert_eq!(decode_uint_word("0x0").unwrap(), 0);
        assert_eq!(
            decode_uint_word("0x0000000000000000000000000000000000000000000000008ac7230489e80000")
                .unwrap(),
            10u128.pow(19)
        );
        assert_eq!(decode_uint_word(&format!("0x{:064x}", u128::MAX)).unwrap(), u128::MAX);
    }

    #[test]
    fn test_decode_uint_word_rejects_oversized_values() {
        // 2^128：最高位落在第 33 個十六進位字元
        let word = format!("0x{:0>64}", "100000000000000000000000000000000");
        assert!(decode_uint_word(&word).is_err());
    }

    #[test]
    fn test_decode_uint_word_rejects_garbage() {
        assert!(decode_uint_word("0x").is_err());
        assert!(decode_uint_word("not-hex").is_err());
    }
}
