//! Cross-border posting endpoints, version 2.

use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::enums::{PostingStatus, SortDirection};
use crate::error::Result;
use crate::record::{self, Record};
use crate::services::{GetOrder, OrderList, UnfulfilledOrderList};
use crate::transport::{HttpMethod, Transport};

use super::{ensure_status_list, list_defaults, picked_filter, scalar_list};

const PATH: &str = "/v2/posting/crossborder";

/// Cross-border postings: listing, approval, shipping via external
/// providers.
#[derive(Debug, Clone)]
pub struct CrossborderService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> CrossborderService<T> {
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

    /// Lists postings.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn list(&self, request: Record) -> Result<Value> {
        let mut request = record::merged(
            list_defaults(),
            record::pick(&request, &["filter", "dir", "offset", "limit"]),
        );
        request.insert("filter".to_owned(), Value::Object(picked_filter(&request)));

        let body = Value::Object(request);
        self.client.request(HttpMethod::Post, &format!("{PATH}/list"), Some(&body)).await
    }

    /// Lists postings awaiting processing.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn unfulfilled_list(&self, request: Record) -> Result<Value> {
        let mut defaults = Record::new();
        defaults.insert("status".to_owned(), PostingStatus::list_value());
        defaults.insert("dir".to_owned(), SortDirection::Ascending.into());
        defaults.insert("offset".to_owned(), json!(0));
        defaults.insert("limit".to_owned(), json!(10));

        let picked = record::pick(&request, &["status", "dir", "offset", "limit"]);
        let mut request = record::merged(defaults, picked);
        ensure_status_list(&mut request);

        let body = Value::Object(request);
        self.client
            .request(HttpMethod::Post, &format!("{PATH}/unfulfilled/list"), Some(&body))
            .await
    }

    /// Fetches one posting by number.
    ///
    /// Cross-border postings have no optional detail sections; `options` is
    /// accepted for interface parity and ignored.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn get(&self, posting_number: &str, _options: Record) -> Result<Value> {
        let body = json!({ "posting_number": posting_number });
        self.client.request(HttpMethod::Post, &format!("{PATH}/get"), Some(&body)).await
    }

    /// Approves a posting for processing.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn approve(&self, posting_number: &str) -> Result<bool> {
        let body = json!({ "posting_number": posting_number });
        let result = self
            .client
            .request(HttpMethod::Post, &format!("{PATH}/approve"), Some(&body))
            .await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Cancels items of a posting.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn cancel(
        &self,
        posting_number: &str,
        sku: Value,
        cancel_reason_id: i64,
        cancel_reason_message: &str,
    ) -> Result<bool> {
        let body = json!({
            "posting_number": posting_number,
            "sku": scalar_list(sku),
            "cancel_reason_id": cancel_reason_id,
            "cancel_reason_message": cancel_reason_message,
        });
        let result = self
            .client
            .request(HttpMethod::Post, &format!("{PATH}/cancel"), Some(&body))
            .await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Cancellation reason dictionary.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn cancel_reasons(&self) -> Result<Value> {
        let body = json!({});
        self.client
            .request(HttpMethod::Post, &format!("{PATH}/cancel-reason/list"), Some(&body))
            .await
    }

    /// Ships a posting through an external provider.
    ///
    /// Each item is reduced to `quantity` and `sku`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn ship(
        &self,
        posting_number: &str,
        tracking_number: &str,
        shipping_provider_id: i64,
        items: Value,
    ) -> Result<Value> {
        let items: Vec<Value> = record::ensure_collection(items)
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Value::Object(record::pick(&map, &["quantity", "sku"])),
                other => other,
            })
            .collect();

        let body = json!({
            "posting_number": posting_number,
            "tracking_number": tracking_number,
            "shipping_provider_id": shipping_provider_id,
            "items": items,
        });
        self.client.request(HttpMethod::Post, &format!("{PATH}/ship"), Some(&body)).await
    }

    /// Shipping provider dictionary.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn shipping_providers(&self) -> Result<Value> {
        let body = json!({});
        self.client
            .request(HttpMethod::Post, &format!("{PATH}/shipping-provider/list"), Some(&body))
            .await
    }
}

impl<T: Transport> OrderList for CrossborderService<T> {
    async fn list(&self, request: Record) -> Result<Value> {
        CrossborderService::list(self, request).await
    }
}

impl<T: Transport> UnfulfilledOrderList for CrossborderService<T> {
    async fn unfulfilled_list(&self, request: Record) -> Result<Value> {
        CrossborderService::unfulfilled_list(self, request).await
    }
}

impl<T: Transport> GetOrder for CrossborderService<T> {
    async fn get(&self, posting_number: &str, options: Record) -> Result<Value> {
        CrossborderService::get(self, posting_number, options).await
    }
}
