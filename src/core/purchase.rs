use std::time::Duration;

use crate::core::units;
use crate::domain::model::{BalanceRecord, FulfillmentOrder, FulfillmentResult, PurchaseRequest};
use crate::domain::ports::{BalanceOracle, FulfillmentProvider};
use crate::utils::error::{RelayError, Result};
use crate::utils::validation;

/// Tunables for the purchase handshake. Retries apply to the ledger read
/// only; the fulfillment call has no idempotency key and is never retried.
#[derive(Debug, Clone)]
pub struct PurchasePolicy {
    /// Decimal places of the payment token; request amounts are scaled by
    /// `10^token_decimals` before the balance comparison.
    pub token_decimals: u32,
    pub oracle_retry_attempts: u32,
    pub oracle_retry_delay_ms: u64,
}

impl Default for PurchasePolicy {
    fn default() -> Self {
        Self {
            token_decimals: 18,
            oracle_retry_attempts: 3,
            oracle_retry_delay_ms: 250,
        }
    }
}

/// The payment-verification-then-fulfillment handshake.
///
/// Stateless per request: one ledger read, one conditional provider call,
/// three terminal outcomes (rejected, fulfilled, failed).
pub struct PurchaseService<O, F> {
    oracle: O,
    provider: F,
    policy: PurchasePolicy,
}

impl<O: BalanceOracle, F: FulfillmentProvider> PurchaseService<O, F> {
    pub fn new(oracle: O, provider: F, policy: PurchasePolicy) -> Self {
        Self {
            oracle,
            provider,
            policy,
        }
    }

    pub async fn purchase(&self, request: &PurchaseRequest) -> Result<FulfillmentResult> {
        // 先驗證請求，任何上游呼叫之前
        validation::validate_account_address("userAddress", &request.user_address)?;
        let amount = request.amount.as_decimal()?;
        validation::validate_positive_amount("amount", amount)?;

        if let Some(token) = &request.token {
            tracing::debug!("token field present ({}), not used downstream", token);
        }

        let required = units::to_base_units(amount, self.policy.token_decimals)?;

        let record = self.balance_with_retry(&request.user_address).await?;
        tracing::debug!(
            "recorded balance for {}: {} (required {})",
            record.user_address,
            record.balance,
            required
        );

        if record.balance < required {
            tracing::info!(
                "payment not verified for {}: balance {} < required {}",
                request.user_address,
                record.balance,
                required
            );
            return Err(RelayError::InsufficientBalanceError {
                balance: record.balance,
                required,
            });
        }

        let order = FulfillmentOrder {
            user_address: request.user_address.clone(),
            amount,
        };
        let receipt = self.provider.issue(&order).await?;

        if !receipt.success {
            // 供應商錯誤細節只記錄在伺服器端，不回傳給呼叫者
            tracing::warn!(
                "fulfillment provider rejected order for {}: {:?}",
                request.user_address,
                receipt.payload
            );
            return Err(RelayError::FulfillmentRejectedError);
        }

        tracing::info!("eSIM issued for {}", request.user_address);
        Ok(receipt)
    }

    /// Ledger reads are transiently flaky; retry with bounded exponential
    /// backoff before giving up.
    async fn balance_with_retry(&self, address: &str) -> Result<BalanceRecord> {
        let attempts = self.policy.oracle_retry_attempts.max(1);

        for attempt in 0..attempts {
            match self.oracle.balance_of(address).await {
                Ok(record) => return Ok(record),
                Err(e) => {
                    tracing::warn!("balance query failed (attempt {}): {}", attempt + 1, e);
                    if attempt + 1 >= attempts {
                        return Err(e);
                    }
                    let shift = attempt.min(16);
                    let factor = 1u64.checked_shl(shift).unwrap_or(u64::MAX);
                    let backoff = self.policy.oracle_retry_delay_ms.saturating_mul(factor);
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
            }
        }

        Err(RelayError::OracleError {
            message: "exhausted retries".to_string(),
        })
    }
}
