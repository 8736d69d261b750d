//! Product management endpoints, version 1.

use serde_json::{Value, json};

use crate::cast;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{OzonError, Result};
use crate::record::{self, Record};
use crate::transport::{HttpMethod, Transport};
use crate::validator::{ProductValidator, ValidationMode};

const CLASSIFY_KEYS: &[&str] = &[
    "offer_id",
    "shop_category_full_path",
    "shop_category",
    "shop_category_id",
    "vendor",
    "model",
    "name",
    "price",
    "offer_url",
    "img_url",
    "vendor_code",
    "barcode",
];

const FILTER_KEYS: &[&str] = &["offer_id", "product_id", "visibility"];

/// Product catalog management: import, listings, prices, stocks,
/// archiving.
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

    /// Automatically determines product categories.
    ///
    /// Accepts a single product structure, a list, or a `{products: …}`
    /// wrapper.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn classify(&self, income: Value) -> Result<Value> {
        let products: Vec<Value> = collection_under(income, "products")
            .into_iter()
            .map(|product| project(product, CLASSIFY_KEYS))
            .collect();

        let body = json!({ "products": products });
        self.client.request(HttpMethod::Post, "/v1/product/classify", Some(&body)).await
    }

    /// Creates product pages.
    ///
    /// With `validate_before_send`, every item is validated against the v1
    /// create schema before anything is sent. Attribute values are
    /// stringified either way, since the endpoint rejects numeric attribute
    /// values.
    ///
    /// # Errors
    ///
    /// [`OzonError::Validation`] for rejected items, otherwise pipeline
    /// errors.
    pub async fn import(&self, income: Value, validate_before_send: bool) -> Result<Value> {
        let mut items = collection_under(income, "items");

        if validate_before_send {
            let validator = ProductValidator::new(ValidationMode::Create, 1)?;
            items = validate_items(&validator, items)?;
        }

        for item in &mut items {
            stringify_attribute_values(item);
        }

        let body = json!({ "items": items });
        self.client.request(HttpMethod::Post, "/v1/product/import", Some(&body)).await
    }

    /// Creates product pages by marketplace SKU.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn import_by_sku(&self, income: Value) -> Result<Value> {
        let table = [
            ("offer_id", "str"),
            ("price", "str"),
            ("old_price", "str"),
            ("premium_price", "str"),
            ("vat", "str"),
        ];
        let keys = ["sku", "name", "offer_id", "price", "old_price", "premium_price", "vat"];

        let items = collection_under(income, "items")
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => {
                    cast::cast_record(record::pick(&map, &keys), &table, true)
                        .map(Value::Object)
                        .map_err(OzonError::from)
                }
                other => Ok(other),
            })
            .collect::<Result<Vec<Value>>>()?;

        let body = json!({ "items": items });
        self.client.request(HttpMethod::Post, "/v1/product/import-by-sku", Some(&body)).await
    }

    /// Status of a product import task.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn import_info(&self, task_id: i64) -> Result<Value> {
        let body = json!({ "task_id": task_id });
        self.client.request(HttpMethod::Post, "/v1/product/import/info", Some(&body)).await
    }

    /// Product info by internal product id.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn info(&self, product_id: i64) -> Result<Value> {
        let body = json!({ "product_id": product_id });
        self.client.request(HttpMethod::Post, "/v1/product/info", Some(&body)).await
    }

    /// Product info by any of `product_id`, `sku`, `offer_id`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn info_by(&self, query: Record) -> Result<Value> {
        let table = [("product_id", "int"), ("sku", "int"), ("offer_id", "str")];
        let query = cast::cast_record(
            record::pick(&query, &["product_id", "sku", "offer_id"]),
            &table,
            true,
        )?;
        let body = Value::Object(query);
        self.client.request(HttpMethod::Post, "/v1/product/info", Some(&body)).await
    }

    /// Stock levels, paginated.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn info_stocks(&self, pagination: Record) -> Result<Value> {
        let body = Value::Object(paginated(pagination));
        self.client.request(HttpMethod::Post, "/v1/product/info/stocks", Some(&body)).await
    }

    /// Price info, paginated.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn info_prices(&self, pagination: Record) -> Result<Value> {
        let body = Value::Object(paginated(pagination));
        self.client.request(HttpMethod::Post, "/v1/product/info/prices", Some(&body)).await
    }

    /// Product list with an optional filter.
    ///
    /// Bare filter keys (`offer_id`, `product_id`, `visibility`) may be
    /// passed at the top level and are folded into `filter`; `offer_id`
    /// values are normalized to strings and `product_id` values to
    /// integers.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn list(&self, query: Record, pagination: Record) -> Result<Value> {
        let mut query = query;
        if !query.contains_key("filter")
            && query.keys().any(|key| FILTER_KEYS.contains(&key.as_str()))
        {
            let mut wrapped = Record::new();
            wrapped.insert("filter".to_owned(), Value::Object(query));
            query = wrapped;
        }

        if let Some(Value::Object(filter)) = query.remove("filter") {
            let mut filter = record::pick(&filter, FILTER_KEYS);
            if let Some(offer_id) = filter.remove("offer_id") {
                filter.insert("offer_id".to_owned(), stringified_list(offer_id));
            }
            if let Some(product_id) = filter.remove("product_id") {
                filter.insert("product_id".to_owned(), integer_list(product_id));
            }
            query.insert("filter".to_owned(), Value::Object(filter));
        }

        let query = record::merged(pagination, query);
        let defaults: Record = [("page".to_owned(), json!(1)), ("page_size".to_owned(), json!(10))]
            .into_iter()
            .collect();
        let query = record::compact(record::merged(defaults, query));

        let body = Value::Object(query);
        self.client.request(HttpMethod::Post, "/v1/product/list", Some(&body)).await
    }

    /// Updates prices for one or more products.
    ///
    /// # Errors
    ///
    /// [`OzonError::InvalidArgument`] for an empty payload or a price entry
    /// with no recognized keys; otherwise pipeline errors.
    pub async fn import_prices(&self, input: Value) -> Result<Value> {
        let table = [
            ("product_id", "int"),
            ("offer_id", "str"),
            ("price", "str"),
            ("old_price", "str"),
            ("premium_price", "str"),
        ];
        let prices = shaped_entries(input, "prices", "price", &table)?;
        let body = json!({ "prices": prices });
        self.client.request(HttpMethod::Post, "/v1/product/import/prices", Some(&body)).await
    }

    /// Updates stock levels for one or more products.
    ///
    /// # Errors
    ///
    /// [`OzonError::InvalidArgument`] for an empty payload or a stock entry
    /// with no recognized keys; otherwise pipeline errors.
    pub async fn import_stocks(&self, input: Value) -> Result<Value> {
        let table = [("product_id", "int"), ("offer_id", "str"), ("stock", "int")];
        let stocks = shaped_entries(input, "stocks", "stock", &table)?;
        let body = json!({ "stocks": stocks });
        self.client.request(HttpMethod::Post, "/v1/product/import/stocks", Some(&body)).await
    }

    /// Updates product info (not price or stocks).
    ///
    /// # Errors
    ///
    /// [`OzonError::Validation`] when `validate` is set and the record is
    /// rejected; otherwise pipeline errors.
    pub async fn update(&self, product: Record, validate: bool) -> Result<Value> {
        let product = if validate {
            ProductValidator::new(ValidationMode::Update, 1)?.validate(product)?
        } else {
            product
        };
        let body = Value::Object(product);
        self.client.request(HttpMethod::Post, "/v1/product/update", Some(&body)).await
    }

    /// Marks the product as in stock.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn activate(&self, product_id: i64) -> Result<bool> {
        let body = json!({ "product_id": product_id });
        let result =
            self.client.request(HttpMethod::Post, "/v1/product/activate", Some(&body)).await?;
        Ok(result.as_str() == Some("success"))
    }

    /// Marks the product as not in stock.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn deactivate(&self, product_id: i64) -> Result<bool> {
        let body = json!({ "product_id": product_id });
        let result = self
            .client
            .request(HttpMethod::Post, "/v1/product/deactivate", Some(&body))
            .await?;
        Ok(result.as_str() == Some("success"))
    }

    /// Removes a product without stocks or sales.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn delete(&self, product_id: i64, offer_id: Option<&str>) -> Result<bool> {
        let mut body = Record::new();
        body.insert("product_id".to_owned(), json!(product_id));
        if let Some(offer_id) = offer_id {
            body.insert("offer_id".to_owned(), json!(offer_id));
        }
        let body = Value::Object(body);
        let result =
            self.client.request(HttpMethod::Post, "/v1/product/delete", Some(&body)).await?;
        Ok(result.as_str() == Some("deleted"))
    }

    /// Price list with a filter.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn price(&self, filter: Record, pagination: Record) -> Result<Value> {
        let mut body = record::pick(&pagination, &["page", "page_size"]);
        body.insert(
            "filter".to_owned(),
            Value::Object(record::pick(&filter, FILTER_KEYS)),
        );
        let body = Value::Object(body);
        self.client.request(HttpMethod::Post, "/v1/product/list/price", Some(&body)).await
    }

    /// Switches prepayment requirements for products.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn set_prepayment(&self, data: Record) -> Result<Value> {
        let body = Value::Object(record::pick(
            &data,
            &["is_prepayment", "offers_ids", "products_ids"],
        ));
        self.client.request(HttpMethod::Post, "/v1/product/prepayment/set", Some(&body)).await
    }

    /// Places a product into the archive.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn archive(&self, product_id: i64) -> Result<bool> {
        let body = json!({ "product_id": [product_id] });
        let result =
            self.client.request(HttpMethod::Post, "/v1/product/archive", Some(&body)).await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Returns a product from the archive to the store.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn unarchive(&self, product_id: i64) -> Result<bool> {
        let body = json!({ "product_id": [product_id] });
        let result = self
            .client
            .request(HttpMethod::Post, "/v1/product/unarchive", Some(&body))
            .await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Certificate accordance types dictionary.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn certificate_accordance_types(&self) -> Result<Value> {
        let body = json!({});
        self.client
            .request(HttpMethod::Get, "/v1/product/certificate/accordance-types", Some(&body))
            .await
    }

    /// Binds a certificate to products.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn certificate_bind(&self, certificate_id: i64, item_ids: &[i64]) -> Result<bool> {
        let body = json!({
            "certificate_id": certificate_id,
            "item_id": item_ids,
        });
        let result = self
            .client
            .request(HttpMethod::Post, "/v1/product/certificate/bind", Some(&body))
            .await?;
        Ok(result.as_bool().unwrap_or(false))
    }

    /// Uploads a certificate, returning its id.
    ///
    /// # Errors
    ///
    /// [`OzonError::Protocol`] when the response misses the id; otherwise
    /// pipeline errors.
    pub async fn certificate_create(&self, data: Value) -> Result<i64> {
        let result = self
            .client
            .request(HttpMethod::Post, "/v1/product/certificate/create", Some(&data))
            .await?;
        result
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| OzonError::Protocol("certificate response missing id".to_owned()))
    }

    /// Certificate types dictionary.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn certificate_types(&self) -> Result<Value> {
        self.client
            .request::<Value>(HttpMethod::Get, "/v1/product/certificate/types", None)
            .await
    }
}

/// Unwraps `{key: [...]}` or coerces a bare item/list into a collection.
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

fn project(item: Value, keys: &[&str]) -> Value {
    match item {
        Value::Object(map) => Value::Object(record::pick(&map, keys)),
        other => other,
    }
}

fn validate_items(validator: &ProductValidator, items: Vec<Value>) -> Result<Vec<Value>> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => validator.validate(map).map(Value::Object),
            _ => Err(OzonError::InvalidArgument("product item must be an object".to_owned())),
        })
        .collect()
}

/// The import endpoint requires attribute `value` and collection entries to
/// be strings even when they are numeric at the source.
fn stringify_attribute_values(item: &mut Value) {
    let Some(attributes) = item.get_mut("attributes").and_then(Value::as_array_mut) else {
        return;
    };

    for attribute in attributes {
        let stringified = attribute.get("value").and_then(scalar_to_string);
        if let Some(text) = stringified {
            attribute["value"] = Value::String(text);
        }
        if let Some(collection) = attribute.get_mut("collection").and_then(Value::as_array_mut)
        {
            for entry in collection {
                if let Some(text) = scalar_to_string(entry) {
                    *entry = Value::String(text);
                }
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn stringified_list(value: Value) -> Value {
    let items = record::ensure_collection(value)
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Value::String(s),
            Value::Number(n) => Value::String(n.to_string()),
            other => other,
        })
        .collect();
    Value::Array(items)
}

fn integer_list(value: Value) -> Value {
    let items = record::ensure_collection(value)
        .into_iter()
        .map(|item| match &item {
            Value::Number(n) => json!(n.as_i64().unwrap_or_default()),
            Value::String(s) => json!(s.trim().parse::<i64>().unwrap_or_default()),
            _ => item,
        })
        .collect();
    Value::Array(items)
}

fn paginated(pagination: Record) -> Record {
    let defaults: Record = [("page".to_owned(), json!(1)), ("page_size".to_owned(), json!(100))]
        .into_iter()
        .collect();
    record::merged(defaults, record::pick(&pagination, &["page", "page_size"]))
}

/// Wraps price/stock style payloads into `{key: [entries]}` and shapes every
/// entry.
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
    fn test_collection_under_unwraps_wrapper() {
        let items = collection_under(json!({"items": [{"a": 1}]}), "items");
        assert_eq!(items, vec![json!({"a": 1})]);
    }

    #[test]
    fn test_collection_under_wraps_single_item() {
        let items = collection_under(json!({"offer_id": "A"}), "items");
        assert_eq!(items, vec![json!({"offer_id": "A"})]);
    }

    #[test]
    fn test_collection_under_accepts_bare_list() {
        let items = collection_under(json!([{"a": 1}, {"b": 2}]), "items");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_stringify_attribute_values() {
        let mut item = json!({
            "attributes": [
                {"id": 1, "value": 42},
                {"id": 2, "value": "kept", "collection": [1, "two", 3.5]},
            ]
        });
        stringify_attribute_values(&mut item);
        assert_eq!(item["attributes"][0]["value"], json!("42"));
        assert_eq!(item["attributes"][1]["value"], json!("kept"));
        assert_eq!(item["attributes"][1]["collection"], json!(["1", "two", "3.5"]));
    }

    #[test]
    fn test_integer_and_string_lists() {
        assert_eq!(stringified_list(json!([17, "A2"])), json!(["17", "A2"]));
        assert_eq!(stringified_list(json!("solo")), json!(["solo"]));
        assert_eq!(integer_list(json!(["5", 6])), json!([5, 6]));
        assert_eq!(integer_list(json!(9)), json!([9]));
    }

    #[test]
    fn test_shaped_entries_rejects_empty_input() {
        let err = shaped_entries(json!({}), "prices", "price", &[("price", "str")]).unwrap_err();
        assert!(matches!(err, OzonError::InvalidArgument(_)));
    }

    #[test]
    fn test_shaped_entries_rejects_unrecognized_entry() {
        let err = shaped_entries(
            json!([{"unknown_field": 1}]),
            "prices",
            "price",
            &[("price", "str")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OzonError::InvalidArgument(ref msg) if msg.contains("index 0")
        ));
    }

    #[test]
    fn test_shaped_entries_casts_each_entry() {
        let entries = shaped_entries(
            json!({"product_id": 5, "price": 100}),
            "prices",
            "price",
            &[("product_id", "int"), ("price", "str")],
        )
        .unwrap();
        assert_eq!(entries, vec![json!({"product_id": 5, "price": "100"})]);
    }

    #[test]
    fn test_paginated_defaults() {
        let out = paginated(Record::new());
        assert_eq!(out["page"], json!(1));
        assert_eq!(out["page_size"], json!(100));

        let custom: Record = [("page".to_owned(), json!(3))].into_iter().collect();
        assert_eq!(paginated(custom)["page"], json!(3));
    }
}
