use std::time::Duration;

use crate::config::FulfillmentConfig;
use crate::domain::model::{FulfillmentOrder, FulfillmentResult};
use crate::domain::ports::FulfillmentProvider;
use crate::utils::error::Result;
use async_trait::async_trait;

/// HTTP client for the third-party eSIM provider.
pub struct EsimApi {
    client: reqwest::Client,
    endpoint: String,
}

impl EsimApi {
    pub fn new(config: &FulfillmentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl FulfillmentProvider for EsimApi {
    async fn issue(&self, order: &FulfillmentOrder) -> Result<FulfillmentResult> {
        tracing::debug!("requesting eSIM issuance from {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(order)
            .send()
            .await?
            .error_for_status()?;

        let receipt: FulfillmentResult = response.json().await?;
        Ok(receipt)
    }
}
