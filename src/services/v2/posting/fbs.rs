//! Seller-fulfilled posting endpoints, version 2.

use serde_json::{Value, json};

use crate::cast;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::enums::{PostingScheme, PostingStatus, SortDirection};
use crate::error::{OzonError, Result};
use crate::record::{self, Record};
use crate::services::{GetOrder, OrderList, UnfulfilledOrderList};
use crate::transport::{HttpMethod, Transport};
use crate::with;

use super::{ensure_status_list, list_defaults, picked_filter, scalar_list};

const PATH: &str = "/v2/posting/fbs";

/// Seller-fulfilled postings: listing, shipping, labels, acts, status
/// transitions.
#[derive(Debug, Clone)]
pub struct FbsService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> FbsService<T> {
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

    /// Lists postings.
    ///
    /// The filter is reduced to `since`/`to`/`status`; defaults are
    /// ascending order, offset 0, limit 10.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
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
    /// Defaults: every lifecycle status, sorted by `updated_at` ascending,
    /// barcodes section resolvable via `with`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn unfulfilled_list(&self, request: Record) -> Result<Value> {
        let mut defaults = Record::new();
        defaults.insert(
            "with".to_owned(),
            Value::Object(with::resolve(&request, 2, PostingScheme::Fbs, true)),
        );
        defaults.insert("status".to_owned(), PostingStatus::list_value());
        defaults.insert("sort_by".to_owned(), json!("updated_at"));
        defaults.insert("dir".to_owned(), SortDirection::Ascending.into());
        defaults.insert("offset".to_owned(), json!(0));
        defaults.insert("limit".to_owned(), json!(10));

        let picked = record::pick(
            &request,
            &["with", "status", "sort_by", "dir", "offset", "limit"],
        );
        let mut request = record::merged(defaults, picked);
        ensure_status_list(&mut request);

        let body = Value::Object(request);
        self.client
            .request(HttpMethod::Post, &format!("{PATH}/unfulfilled/list"), Some(&body))
            .await
    }

    /// Fetches one posting by number.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn get(&self, posting_number: &str, options: Record) -> Result<Value> {
        let body = json!({
            "posting_number": posting_number,
            "with": with::resolve(&options, 2, PostingScheme::Fbs, false),
        });
        self.client.request(HttpMethod::Post, &format!("{PATH}/get"), Some(&body)).await
    }

    /// Divides a posting into packages and ships it.
    ///
    /// Each package entry is reduced to its `items`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn ship(&self, packages: Value, posting_number: &str) -> Result<Value> {
        let packages: Vec<Value> = record::ensure_collection(packages)
            .into_iter()
            .map(|package| match package {
                Value::Object(map) => Value::Object(record::pick(&map, &["items"])),
                other => other,
            })
            .collect();

        let body = json!({ "packages": packages, "posting_number": posting_number });
        self.client.request(HttpMethod::Post, &format!("{PATH}/ship"), Some(&body)).await
    }

    /// Package label PDF for one or more postings.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn package_label(&self, posting_number: Value) -> Result<Vec<u8>> {
        let body = json!({ "posting_number": scalar_list(posting_number) });
        self.client
            .request_raw(HttpMethod::Post, &format!("{PATH}/package-label"), Some(&body))
            .await
    }

    /// Moves postings into arbitration.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn arbitration(&self, posting_number: Value) -> Result<bool> {
        let body = json!({ "posting_number": scalar_list(posting_number) });
        let result = self
            .client
            .request(HttpMethod::Post, &format!("{PATH}/arbitration"), Some(&body))
            .await?;
        Ok(result.as_str() == Some("true"))
    }

    /// Cancels a posting.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn cancel(
        &self,
        posting_number: &str,
        cancel_reason_id: i64,
        cancel_reason_message: Option<&str>,
    ) -> Result<bool> {
        let body = json!({
            "posting_number": posting_number,
            "cancel_reason_id": cancel_reason_id,
            "cancel_reason_message": cancel_reason_message,
        });
        let result = self
            .client
            .request(HttpMethod::Post, &format!("{PATH}/cancel"), Some(&body))
            .await?;
        Ok(result.as_str() == Some("true"))
    }

    /// Cancellation reason dictionary.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn cancel_reasons(&self) -> Result<Value> {
        let body = json!({});
        self.client
            .request(HttpMethod::Post, &format!("{PATH}/cancel-reason/list"), Some(&body))
            .await
    }

    /// Marks postings as awaiting delivery.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn awaiting_delivery(&self, posting_number: Value) -> Result<Value> {
        let body = json!({ "posting_number": scalar_list(posting_number) });
        self.client
            .request(HttpMethod::Post, &format!("{PATH}/awaiting-delivery"), Some(&body))
            .await
    }

    /// Fetches a posting by package barcode.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn get_by_barcode(&self, barcode: &str) -> Result<Value> {
        let body = json!({ "barcode": barcode });
        self.client
            .request(HttpMethod::Post, &format!("{PATH}/get-by-barcode"), Some(&body))
            .await
    }

    /// Creates a transfer act, returning its id.
    ///
    /// `params` is reduced to `containers_count` and `delivery_method_id`.
    ///
    /// # Errors
    ///
    /// [`OzonError::Protocol`] when the response misses the act id;
    /// otherwise pipeline errors.
    pub async fn act_create(&self, params: Record) -> Result<i64> {
        let table = [("containers_count", "int"), ("delivery_method_id", "int")];
        let params = cast::cast_record(
            record::pick(&params, &["containers_count", "delivery_method_id"]),
            &table,
            true,
        )?;

        let body = Value::Object(params);
        let result = self
            .client
            .request(HttpMethod::Post, &format!("{PATH}/act/create"), Some(&body))
            .await?;
        result
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| OzonError::Protocol("act create response missing id".to_owned()))
    }

    /// Checks the readiness of a transfer act.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn act_check_status(&self, act_id: i64) -> Result<Value> {
        let body = json!({ "id": act_id });
        self.client
            .request(HttpMethod::Post, &format!("{PATH}/act/check-status"), Some(&body))
            .await
    }

    /// Transfer act PDF.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn act_get_pdf(&self, act_id: i64) -> Result<Vec<u8>> {
        let body = json!({ "id": act_id });
        self.client
            .request_raw(HttpMethod::Post, &format!("{PATH}/act/get-pdf"), Some(&body))
            .await
    }

    /// Container label PDF of a transfer act.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn act_get_container_labels(&self, act_id: i64) -> Result<Vec<u8>> {
        let body = json!({ "id": act_id });
        self.client
            .request_raw(
                HttpMethod::Post,
                &format!("{PATH}/act/get-container-labels"),
                Some(&body),
            )
            .await
    }

    /// Marks postings as delivered.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn delivered(&self, posting_number: Value) -> Result<Value> {
        let body = json!({ "posting_number": scalar_list(posting_number) });
        self.client
            .request(HttpMethod::Post, "/v2/fbs/posting/delivered", Some(&body))
            .await
    }

    /// Marks postings as being delivered.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn delivering(&self, posting_number: Value) -> Result<Value> {
        let body = json!({ "posting_number": scalar_list(posting_number) });
        self.client
            .request(HttpMethod::Post, "/v2/fbs/posting/delivering", Some(&body))
            .await
    }

    /// Marks postings as in last-mile delivery.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn last_mile(&self, posting_number: Value) -> Result<Value> {
        let body = json!({ "posting_number": scalar_list(posting_number) });
        self.client
            .request(HttpMethod::Post, "/v2/fbs/posting/last-mile", Some(&body))
            .await
    }

    /// Sets tracking numbers for postings.
    ///
    /// Accepts one `{posting_number, tracking_number}` mapping or a list of
    /// them.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn set_tracking_number(&self, tracking_numbers: Value) -> Result<Value> {
        let entries = match &tracking_numbers {
            Value::Object(map)
                if map.contains_key("posting_number") || map.contains_key("tracking_number") =>
            {
                vec![tracking_numbers]
            }
            _ => record::ensure_collection(tracking_numbers),
        };

        let entries: Vec<Value> = entries
            .into_iter()
            .map(|entry| match entry {
                Value::Object(map) => Value::Object(record::pick(
                    &map,
                    &["posting_number", "tracking_number"],
                )),
                other => other,
            })
            .collect();

        let body = json!({ "tracking_numbers": entries });
        self.client
            .request(HttpMethod::Post, "/v2/fbs/posting/tracking-number/set", Some(&body))
            .await
    }
}

impl<T: Transport> OrderList for FbsService<T> {
    async fn list(&self, request: Record) -> Result<Value> {
        FbsService::list(self, request).await
    }
}

impl<T: Transport> UnfulfilledOrderList for FbsService<T> {
    async fn unfulfilled_list(&self, request: Record) -> Result<Value> {
        FbsService::unfulfilled_list(self, request).await
    }
}

impl<T: Transport> GetOrder for FbsService<T> {
    async fn get(&self, posting_number: &str, options: Record) -> Result<Value> {
        FbsService::get(self, posting_number, options).await
    }
}
