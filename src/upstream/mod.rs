//! Outbound calls to the transaction-data provider.
//!
//! One request per `/api/volume` call: no retries, no fan-out across chains.

mod bitquery;
mod covalent;

use std::sync::Arc;

use eyre::Result;
use reqwest::Client;
use tracing::info;

use crate::aggregator::aggregate;
use crate::chain::Chain;
use crate::config::{Config, ProviderKind};
use crate::error::ApiError;
use crate::models::VolumeResponse;

#[derive(Clone)]
pub struct Upstream {
    client: Client,
    config: Arc<Config>,
}

impl Upstream {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the address's history from the configured provider and aggregate it.
    pub async fn volume(&self, chain: &Chain, address: &str) -> Result<VolumeResponse, ApiError> {
        let (records, schema) = match self.config.provider {
            ProviderKind::Covalent => (
                covalent::fetch(&self.client, &self.config, chain, address).await?,
                &covalent::SCHEMA,
            ),
            ProviderKind::Bitquery => (
                bitquery::fetch(&self.client, &self.config, chain, address).await?,
                &bitquery::SCHEMA,
            ),
        };

        let result = aggregate(&records, schema);
        info!(
            "{} volume for {} on {}: {} USD over {} txs",
            self.config.provider, address, chain.name, result.volume_usd, result.count
        );

        Ok(result)
    }
}
