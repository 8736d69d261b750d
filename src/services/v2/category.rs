//! Category attribute endpoints, version 2.

use serde_json::{Value, json};

use crate::cast;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::enums::Language;
use crate::error::Result;
use crate::record::{self, Record};
use crate::transport::{HttpMethod, Transport};

/// Category attribute dictionary against the v2 contract.
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

    /// Attribute list for a category.
    ///
    /// `query` may carry `attribute_type` and `language`; language defaults
    /// to `RU`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn attribute(&self, category_id: i64, query: Record) -> Result<Value> {
        let query = cast::cast_record(
            record::pick(&query, &["attribute_type", "language"]),
            &[("attribute_type", "str"), ("language", "str")],
            true,
        )?;

        let mut body = Record::new();
        body.insert("category_id".to_owned(), json!(category_id));
        body.insert("language".to_owned(), Language::Ru.into());
        let body = Value::Object(record::merged(body, query));

        self.client.request(HttpMethod::Post, "/v2/category/attribute", Some(&body)).await
    }

    /// Dictionary values of one attribute, paginated by `last_value_id`.
    ///
    /// Returns the full envelope, since the caller needs the `has_next`
    /// flag next to `result`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn attribute_values(
        &self,
        category_id: i64,
        attribute_id: i64,
        query: Record,
    ) -> Result<Value> {
        let query = record::pick(&query, &["last_value_id", "limit", "language"]);

        let mut defaults = Record::new();
        defaults.insert("category_id".to_owned(), json!(category_id));
        defaults.insert("attribute_id".to_owned(), json!(attribute_id));
        defaults.insert("limit".to_owned(), json!(1000));
        defaults.insert("last_value_id".to_owned(), json!(0));
        defaults.insert("language".to_owned(), Language::Ru.into());

        let table = [
            ("category_id", "int"),
            ("attribute_id", "int"),
            ("last_value_id", "int"),
            ("limit", "int"),
            ("language", "str"),
        ];
        let body = Value::Object(cast::cast_record(
            record::merged(defaults, query),
            &table,
            true,
        )?);

        self.client
            .request_full(HttpMethod::Post, "/v2/category/attribute/values", Some(&body))
            .await
    }

    /// Attribute values resolved by option id.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn attribute_value_by_option(
        &self,
        language: Language,
        options: Value,
    ) -> Result<Value> {
        let options: Vec<Value> = record::ensure_collection(options)
            .into_iter()
            .map(|option| match option {
                Value::Object(map) => {
                    Value::Object(record::pick(&map, &["attribute_id", "option_id"]))
                }
                other => other,
            })
            .collect();

        let body = json!({ "language": language.as_str(), "options": options });
        self.client
            .request(HttpMethod::Post, "/v2/category/attribute/value/by-option", Some(&body))
            .await
    }
}
