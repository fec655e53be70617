use crate::domain::model::{BalanceRecord, FulfillmentOrder, FulfillmentResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only view of the prepaid balances recorded on the remote ledger.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    /// Returns the balance recorded for `address`, in ledger base units.
    async fn balance_of(&self, address: &str) -> Result<BalanceRecord>;
}

/// The third-party service that issues the purchased eSIM.
#[async_trait]
pub trait FulfillmentProvider: Send + Sync {
    async fn issue(&self, order: &FulfillmentOrder) -> Result<FulfillmentResult>;
}
