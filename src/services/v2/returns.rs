//! Returns reporting endpoints, version 2.

use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::enums::PostingScheme;
use crate::error::{OzonError, Result};
use crate::record::{self, Record};
use crate::transport::{HttpMethod, Transport};

/// Company-level returns reporting.
#[derive(Debug, Clone)]
pub struct ReturnsService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> ReturnsService<T> {
    /// Service against the default host.
    ///
    /// # Errors
    ///
    /// Returns [`OzonError::Config`] for invalid credentials.
    pub fn new(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self { client: ApiClient::new(config, transport)? })
    }

    /// Service over an existing client.
    #[must_use]
    pub fn from_client(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Returns of the company under one fulfillment scheme.
    ///
    /// Only the seller-fulfilled and Ozon-fulfilled schemes have a returns
    /// report.
    ///
    /// # Errors
    ///
    /// [`OzonError::InvalidArgument`] for the cross-border scheme; otherwise
    /// pipeline errors.
    pub async fn company(&self, scheme: PostingScheme, request: Record) -> Result<Value> {
        if scheme == PostingScheme::Crossborder {
            return Err(OzonError::InvalidArgument(format!(
                "unsupported posting scheme: {scheme}"
            )));
        }

        let defaults: Record = [
            ("filter".to_owned(), json!({})),
            ("offset".to_owned(), json!(0)),
            ("limit".to_owned(), json!(10)),
        ]
        .into_iter()
        .collect();
        let request = record::merged(
            defaults,
            record::pick(&request, &["filter", "offset", "limit"]),
        );

        let path = format!("/v2/returns/company/{scheme}");
        let body = Value::Object(request);
        self.client.request(HttpMethod::Post, &path, Some(&body)).await
    }
}
