//! Promotional actions endpoints, version 1.
//!
//! Served from a different origin than the rest of the seller API.

use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::record;
use crate::transport::{HttpMethod, Transport};

/// Origin of the promotions API.
const ACTIONS_HOST: &str = "https://seller-api.ozon.ru";

/// Promotional actions: availability, candidates, participation.
#[derive(Debug, Clone)]
pub struct ActionsService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> ActionsService<T> {
    /// Service against the promotions host (unless `config` overrides it).
    ///
    /// # Errors
    ///
    /// Returns [`crate::OzonError::Config`] for invalid credentials.
    pub fn new(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self { client: ApiClient::with_default_host(config, transport, ACTIONS_HOST)? })
    }

    /// Service over an existing client.
    #[must_use]
    pub fn from_client(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Actions available to the seller.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn list(&self) -> Result<Value> {
        self.client.request::<Value>(HttpMethod::Get, "/v1/actions", None).await
    }

    /// Products eligible for an action.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn candidates(&self, action_id: i64, offset: u32, limit: u32) -> Result<Value> {
        let body = json!({ "action_id": action_id, "offset": offset, "limit": limit });
        self.client.request(HttpMethod::Post, "/v1/actions/candidates", Some(&body)).await
    }

    /// Products participating in an action.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn products(&self, action_id: i64, offset: u32, limit: u32) -> Result<Value> {
        let body = json!({ "action_id": action_id, "offset": offset, "limit": limit });
        self.client.request(HttpMethod::Post, "/v1/actions/products", Some(&body)).await
    }

    /// Adds products to an action.
    ///
    /// Each entry is reduced to `product_id` and `action_price`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn products_activate(&self, action_id: i64, products: Value) -> Result<Value> {
        let products: Vec<Value> = record::ensure_collection(products)
            .into_iter()
            .map(|product| match product {
                Value::Object(map) => {
                    Value::Object(record::pick(&map, &["product_id", "action_price"]))
                }
                other => other,
            })
            .collect();

        let body = json!({ "action_id": action_id, "products": products });
        self.client
            .request(HttpMethod::Post, "/v1/actions/products/activate", Some(&body))
            .await
    }

    /// Removes products from an action.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn products_deactivate(
        &self,
        action_id: i64,
        product_ids: &[i64],
    ) -> Result<Value> {
        let body = json!({ "action_id": action_id, "product_ids": product_ids });
        self.client
            .request(HttpMethod::Post, "/v1/actions/products/deactivate", Some(&body))
            .await
    }
}
