//! Category tree and attribute endpoints, version 1.

use serde_json::{Value, json};

use crate::cast;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::enums::Language;
use crate::error::Result;
use crate::record::{self, Record};
use crate::transport::{HttpMethod, Transport};

/// Read-only access to the marketplace category dictionary.
#[derive(Debug, Clone)]
pub struct CategoriesService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> CategoriesService<T> {
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

    /// Category tree, rooted at `category_id` when given.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn tree(&self, category_id: Option<i64>, language: Language) -> Result<Value> {
        let mut body = Record::new();
        if let Some(category_id) = category_id {
            body.insert("category_id".to_owned(), json!(category_id));
        }
        body.insert("language".to_owned(), language.into());
        let body = Value::Object(body);
        self.client.request(HttpMethod::Post, "/v1/category/tree", Some(&body)).await
    }

    /// Attribute list of a category's product page.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn attributes(
        &self,
        category_id: i64,
        language: Language,
        query: Record,
    ) -> Result<Value> {
        let query = cast::cast_record(
            record::pick(&query, &["attribute_type"]),
            &[("attribute_type", "str")],
            true,
        )?;

        let mut body = Record::new();
        body.insert("category_id".to_owned(), json!(category_id));
        body.insert("language".to_owned(), language.into());
        let body = Value::Object(record::merged(body, query));

        self.client.request(HttpMethod::Post, "/v1/category/attribute", Some(&body)).await
    }
}
