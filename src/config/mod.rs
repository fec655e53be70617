use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::core::purchase::PurchasePolicy;
use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{self, Validate};

#[derive(Debug, Clone, Parser)]
#[command(name = "esim-relay")]
#[command(about = "Payment-verified eSIM purchase relay")]
pub struct CliConfig {
    #[arg(long, default_value = "5000")]
    pub port: u16,

    #[arg(long, default_value = "./frontend/build")]
    pub static_dir: String,

    #[arg(long, help = "TOML file with oracle/fulfillment settings")]
    pub config_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON-formatted logs")]
    pub json_logs: bool,
}

/// Upstream settings, merged from an optional TOML file and environment
/// variables (env wins). Secrets are expected to arrive via `.env`/env.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelayConfig {
    #[serde(default)]
    pub oracle: OracleConfig,
    #[serde(default)]
    pub fulfillment: FulfillmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub rpc_url: String,
    pub contract_address: String,
    pub token_decimals: u32,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            rpc_url: String::new(),
            contract_address: String::new(),
            token_decimals: 18,
            timeout_seconds: 10,
            retry_attempts: 3,
            retry_delay_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FulfillmentConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl RelayConfig {
    /// 先讀設定檔（若有），再以環境變數覆寫
    pub fn load(config_file: Option<&str>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| RelayError::ConfigError {
            message: format!("failed to parse {}: {}", path, e),
        })
    }

    fn apply_env(&mut self) {
        if let Ok(value) = std::env::var("BLOCKCHAIN_RPC_URL") {
            self.oracle.rpc_url = value;
        }
        if let Ok(value) = std::env::var("CONTRACT_ADDRESS") {
            self.oracle.contract_address = value;
        }
        if let Ok(value) = std::env::var("ESIM_API_URL") {
            self.fulfillment.endpoint = value;
        }
    }

    pub fn purchase_policy(&self) -> PurchasePolicy {
        PurchasePolicy {
            token_decimals: self.oracle.token_decimals,
            oracle_retry_attempts: self.oracle.retry_attempts,
            oracle_retry_delay_ms: self.oracle.retry_delay_ms,
        }
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        if self.oracle.rpc_url.is_empty() {
            return Err(RelayError::MissingConfigError {
                field: "oracle.rpc_url (env BLOCKCHAIN_RPC_URL)".to_string(),
            });
        }
        if self.oracle.contract_address.is_empty() {
            return Err(RelayError::MissingConfigError {
                field: "oracle.contract_address (env CONTRACT_ADDRESS)".to_string(),
            });
        }
        if self.fulfillment.endpoint.is_empty() {
            return Err(RelayError::MissingConfigError {
                field: "fulfillment.endpoint (env ESIM_API_URL)".to_string(),
            });
        }

        validation::validate_url("oracle.rpc_url", &self.oracle.rpc_url)?;
        validation::validate_url("fulfillment.endpoint", &self.fulfillment.endpoint)?;
        validation::validate_account_address(
            "oracle.contract_address",
            &self.oracle.contract_address,
        )?;
        validation::validate_range("oracle.token_decimals", self.oracle.token_decimals, 0, 30)?;
        validation::validate_range("oracle.retry_attempts", self.oracle.retry_attempts, 1, 10)?;
        validation::validate_range("oracle.timeout_seconds", self.oracle.timeout_seconds, 1, 300)?;
        validation::validate_range(
            "fulfillment.timeout_seconds",
            self.fulfillment.timeout_seconds,
            1,
            300,
        )?;
        Ok(())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("static_dir", &self.static_dir)?;
        Ok(())
    }
}
