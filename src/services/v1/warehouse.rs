//! Warehouse endpoints, version 1.

use serde_json::Value;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{HttpMethod, Transport};

/// Seller warehouse directory.
#[derive(Debug, Clone)]
pub struct WarehouseService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> WarehouseService<T> {
    /// Service against the default host.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OzonError::Config`] for invalid credentials.
    pub fn new(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self { client: ApiClient::new(config, transport)? })
    }

    /// Service over an existing client.
    #[must_use]
    pub fn from_client(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Lists the seller's warehouses.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn list(&self) -> Result<Value> {
        self.client.request::<Value>(HttpMethod::Post, "/v1/warehouse/list", None).await
    }
}
