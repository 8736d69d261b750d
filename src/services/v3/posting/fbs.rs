//! Seller-fulfilled posting endpoints, version 3.

use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::enums::{PostingScheme, SortDirection};
use crate::error::{OzonError, Result};
use crate::record::{self, Record};
use crate::services::{GetOrder, OrderList, UnfulfilledOrderList};
use crate::transport::{HttpMethod, Transport};
use crate::with;

const PATH: &str = "/v3/posting/fbs";

const LIST_FILTER_KEYS: &[&str] = &[
    "delivery_method_id",
    "order_id",
    "provider_id",
    "status",
    "since",
    "to",
    "warehouse_id",
];

const UNFULFILLED_FILTER_KEYS: &[&str] = &[
    "cutoff_from",
    "cutoff_to",
    "delivering_date_from",
    "delivering_date_to",
    "delivery_method_id",
    "provider_id",
    "status",
    "warehouse_id",
];

/// Seller-fulfilled postings against the v3 contract.
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
    /// When the filter names no date range, the last seven days are
    /// queried.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn list(&self, request: Record) -> Result<Value> {
        let mut defaults = Record::new();
        defaults.insert(
            "with".to_owned(),
            Value::Object(with::defaults(3, PostingScheme::Fbs, false)),
        );
        defaults.insert("filter".to_owned(), json!({}));
        defaults.insert("dir".to_owned(), SortDirection::Ascending.into());
        defaults.insert("offset".to_owned(), json!(0));
        defaults.insert("limit".to_owned(), json!(10));

        let picked =
            record::pick(&request, &["with", "filter", "dir", "offset", "limit"]);
        let mut request = record::merged(defaults, picked);

        let filter = match request.get("filter") {
            Some(Value::Object(filter)) => record::pick(filter, LIST_FILTER_KEYS),
            _ => Record::new(),
        };
        let now = Utc::now();
        let window: Record = [
            (
                "since".to_owned(),
                json!((now - Duration::days(7)).to_rfc3339_opts(SecondsFormat::Secs, false)),
            ),
            ("to".to_owned(), json!(now.to_rfc3339_opts(SecondsFormat::Secs, false))),
        ]
        .into_iter()
        .collect();
        request.insert("filter".to_owned(), Value::Object(record::merged(window, filter)));

        let body = Value::Object(request);
        self.client.request(HttpMethod::Post, &format!("{PATH}/list"), Some(&body)).await
    }

    /// Lists postings awaiting processing.
    ///
    /// The v3 contract requires either a `cutoff` or a `delivering_date`
    /// range; earlier versions accept an unconstrained query, so this check
    /// exists only here.
    ///
    /// # Errors
    ///
    /// [`OzonError::InvalidArgument`] when both date ranges are absent;
    /// otherwise pipeline errors.
    pub async fn unfulfilled_list(&self, request: Record) -> Result<Value> {
        let mut defaults = Record::new();
        defaults.insert(
            "with".to_owned(),
            Value::Object(with::defaults(3, PostingScheme::Fbs, false)),
        );
        defaults.insert("filter".to_owned(), json!({}));
        defaults.insert("dir".to_owned(), SortDirection::Ascending.into());
        defaults.insert("offset".to_owned(), json!(0));
        defaults.insert("limit".to_owned(), json!(10));

        let picked =
            record::pick(&request, &["with", "filter", "dir", "offset", "limit"]);
        let mut request = record::merged(defaults, picked);

        let filter = match request.get("filter") {
            Some(Value::Object(filter)) => record::pick(filter, UNFULFILLED_FILTER_KEYS),
            _ => Record::new(),
        };

        let has = |key: &str| {
            filter.get(key).is_some_and(|value| match value {
                Value::Null => false,
                Value::String(s) => !s.is_empty(),
                _ => true,
            })
        };
        if !(has("cutoff_from") || has("cutoff_to"))
            && !(has("delivering_date_from") || has("delivering_date_to"))
        {
            return Err(OzonError::InvalidArgument(
                "not defined mandatory filter date ranges `cutoff` or `delivering_date`"
                    .to_owned(),
            ));
        }

        request.insert("filter".to_owned(), Value::Object(filter));

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
            "with": with::resolve(&options, 3, PostingScheme::Fbs, false),
        });
        self.client.request(HttpMethod::Post, &format!("{PATH}/get"), Some(&body)).await
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
