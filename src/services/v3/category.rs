//! Category attribute endpoints, version 3.

use serde_json::{Value, json};

use crate::cast;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::enums::Language;
use crate::error::Result;
use crate::record::{self, Record};
use crate::transport::{HttpMethod, Transport};

/// Category attribute dictionary against the v3 contract.
#[derive(Debug, Clone)]
pub struct CategoryService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> CategoryService<T> {
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

    /// Attribute lists for one or more categories.
    ///
    /// `query` may carry `attribute_type` and `language`; language defaults
    /// to `DEFAULT`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn attribute(&self, category_ids: &[i64], query: Record) -> Result<Value> {
        let query = cast::cast_record(
            record::pick(&query, &["attribute_type", "language"]),
            &[("attribute_type", "str"), ("language", "str")],
            true,
        )?;

        let mut body = Record::new();
        body.insert("category_id".to_owned(), json!(category_ids));
        body.insert("language".to_owned(), Language::Default.into());
        let body = Value::Object(record::merged(body, query));

        self.client.request(HttpMethod::Post, "/v3/category/attribute", Some(&body)).await
    }
}
