//! Product management endpoints, version 2.

use serde_json::{Value, json};

use crate::cast;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{OzonError, Result};
use crate::record::{self, Record};
use crate::transport::{HttpMethod, Transport};
use crate::validator::{ProductValidator, ValidationMode};

/// Product catalog management against the v2 contract.
#[derive(Debug, Clone)]
pub struct ProductService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> ProductService<T> {
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

    /// Creates product pages.
    ///
    /// With `validate_before_send`, items are validated against the v2
    /// create schema first.
    ///
    /// # Errors
    ///
    /// [`OzonError::Validation`] for rejected items, otherwise pipeline
    /// errors.
    pub async fn import(&self, income: Value, validate_before_send: bool) -> Result<Value> {
        let mut items = collection_under(income, "items");

        if validate_before_send {
            let validator = ProductValidator::new(ValidationMode::Create, 2)?;
            items = items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => validator.validate(map).map(Value::Object),
                    _ => Err(OzonError::InvalidArgument(
                        "product item must be an object".to_owned(),
                    )),
                })
                .collect::<Result<Vec<_>>>()?;
        }

        let body = json!({ "items": items });
        self.client.request(HttpMethod::Post, "/v2/product/import", Some(&body)).await
    }

    /// Product info by any of `product_id`, `sku`, `offer_id`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn info(&self, query: Record) -> Result<Value> {
        let table = [("product_id", "int"), ("sku", "int"), ("offer_id", "str")];
        let query = cast::cast_record(
            record::pick(&query, &["product_id", "sku", "offer_id"]),
            &table,
            true,
        )?;
        let body = Value::Object(query);
        self.client.request(HttpMethod::Post, "/v2/product/info", Some(&body)).await
    }

    /// Product attributes for a filter, paginated.
    ///
    /// Scalar `offer_id`/`product_id` filter values are wrapped into lists;
    /// `offer_id` entries are stringified.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn info_attributes(
        &self,
        filter: Record,
        page: u32,
        page_size: u32,
    ) -> Result<Value> {
        let mut filter = record::pick(&filter, &["offer_id", "product_id"]);

        for key in ["offer_id", "product_id"] {
            if let Some(value) = filter.remove(key) {
                filter.insert(key.to_owned(), Value::Array(record::ensure_collection(value)));
            }
        }
        if let Some(Value::Array(offer_ids)) = filter.get_mut("offer_id") {
            for entry in offer_ids {
                if let Value::Number(n) = entry {
                    *entry = Value::String(n.to_string());
                }
            }
        }

        let body = json!({ "filter": filter, "page": page, "page_size": page_size });
        self.client.request(HttpMethod::Post, "/v2/products/info/attributes", Some(&body)).await
    }

    /// Stock levels, paginated.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn info_stocks(&self, pagination: Record) -> Result<Value> {
        let body = Value::Object(paginated(pagination));
        self.client.request(HttpMethod::Post, "/v2/product/info/stocks", Some(&body)).await
    }

    /// Price info, paginated.
    ///
    /// Still served by the v1 path upstream.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn info_prices(&self, pagination: Record) -> Result<Value> {
        let body = Value::Object(paginated(pagination));
        self.client.request(HttpMethod::Post, "/v1/product/info/prices", Some(&body)).await
    }

    /// Updates stock levels, optionally per warehouse.
    ///
    /// # Errors
    ///
    /// [`OzonError::InvalidArgument`] for an empty payload or an entry with
    /// no recognized keys; otherwise pipeline errors.
    pub async fn import_stocks(&self, input: Value) -> Result<Value> {
        let table = [
            ("product_id", "int"),
            ("offer_id", "str"),
            ("stock", "int"),
            ("warehouse_id", "int"),
        ];
        let stocks = shaped_entries(input, "stocks", "stock", &table)?;
        let body = json!({ "stocks": stocks });
        self.client.request(HttpMethod::Post, "/v2/products/stocks", Some(&body)).await
    }

    /// Deletes products by offer id.
    ///
    /// # Errors
    ///
    /// [`OzonError::InvalidArgument`] for an empty payload or an entry with
    /// no `offer_id`; otherwise pipeline errors.
    pub async fn delete(&self, input: Value) -> Result<Value> {
        let products = shaped_entries(input, "products", "product", &[("offer_id", "str")])?;
        let body = json!({ "products": products });
        self.client.request(HttpMethod::Post, "/v2/products/delete", Some(&body)).await
    }
}

fn collection_under(income: Value, key: &str) -> Vec<Value> {
    match income {
        Value::Object(mut map) if map.contains_key(key) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            Some(other) => vec![other],
            None => unreachable!("contains_key checked"),
        },
        other => record::ensure_collection(other),
    }
}

fn paginated(pagination: Record) -> Record {
    let defaults: Record = [("page".to_owned(), json!(1)), ("page_size".to_owned(), json!(100))]
        .into_iter()
        .collect();
    record::merged(defaults, record::pick(&pagination, &["page", "page_size"]))
}

fn shaped_entries(
    input: Value,
    key: &str,
    entry_name: &str,
    table: &[(&str, &str)],
) -> Result<Vec<Value>> {
    let empty = match &input {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => true,
    };
    if empty {
        return Err(OzonError::InvalidArgument(format!("empty {key} data")));
    }

    let keys: Vec<&str> = table.iter().map(|(name, _)| *name).collect();
    collection_under(input, key)
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let Value::Object(map) = entry else {
                return Err(OzonError::InvalidArgument(format!(
                    "invalid {entry_name} data at index {index}"
                )));
            };
            let picked = record::pick(&map, &keys);
            if picked.is_empty() {
                return Err(OzonError::InvalidArgument(format!(
                    "invalid {entry_name} data at index {index}"
                )));
            }
            Ok(Value::Object(cast::cast_record(picked, table, true)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_shaped_entries_with_warehouse() {
        let entries = shaped_entries(
            json!([{"offer_id": 5, "stock": "3", "warehouse_id": "101"}]),
            "stocks",
            "stock",
            &[
                ("product_id", "int"),
                ("offer_id", "str"),
                ("stock", "int"),
                ("warehouse_id", "int"),
            ],
        )
        .unwrap();
        assert_eq!(
            entries,
            vec![json!({"offer_id": "5", "stock": 3, "warehouse_id": 101})]
        );
    }

    #[test]
    fn test_delete_entry_requires_offer_id() {
        let err = shaped_entries(
            json!({"product_id": 42}),
            "products",
            "product",
            &[("offer_id", "str")],
        )
        .unwrap_err();
        assert!(matches!(err, OzonError::InvalidArgument(_)));
    }
}
