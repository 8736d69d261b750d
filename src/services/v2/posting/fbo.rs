//! Ozon-fulfilled posting endpoints, version 2.

use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::enums::PostingScheme;
use crate::error::Result;
use crate::record::{self, Record};
use crate::services::{GetOrder, OrderList};
use crate::transport::{HttpMethod, Transport};
use crate::with;

use super::{list_defaults, picked_filter};

const PATH: &str = "/v2/posting/fbo";

/// Ozon-fulfilled postings; read-only, the marketplace runs the logistics.
#[derive(Debug, Clone)]
pub struct FboService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> FboService<T> {
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
        let mut defaults = list_defaults();
        defaults.insert(
            "with".to_owned(),
            Value::Object(with::defaults(2, PostingScheme::Fbo, false)),
        );

        let picked =
            record::pick(&request, &["filter", "dir", "offset", "limit", "with"]);
        let mut request = record::merged(defaults, picked);
        request.insert("filter".to_owned(), Value::Object(picked_filter(&request)));

        let body = Value::Object(request);
        self.client.request(HttpMethod::Post, &format!("{PATH}/list"), Some(&body)).await
    }

    /// Fetches one posting by number.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn get(&self, posting_number: &str, options: Record) -> Result<Value> {
        let body = json!({
            "posting_number": posting_number,
            "with": with::resolve(&options, 2, PostingScheme::Fbo, false),
        });
        self.client.request(HttpMethod::Post, &format!("{PATH}/get"), Some(&body)).await
    }
}

impl<T: Transport> OrderList for FboService<T> {
    async fn list(&self, request: Record) -> Result<Value> {
        FboService::list(self, request).await
    }
}

impl<T: Transport> GetOrder for FboService<T> {
    async fn get(&self, posting_number: &str, options: Record) -> Result<Value> {
        FboService::get(self, posting_number, options).await
    }
}
