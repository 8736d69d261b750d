//! Posting (shipment) endpoints, version 2, one module per fulfillment
//! scheme.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::enums::SortDirection;
use crate::record::{self, Record};

pub mod crossborder;
pub mod fbo;
pub mod fbs;

pub use crossborder::CrossborderService;
pub use fbo::FboService;
pub use fbs::FbsService;

/// Builds a `since`/`to` filter range in the RFC 3339 form list endpoints
/// expect.
#[must_use]
pub fn date_range(since: DateTime<Utc>, to: DateTime<Utc>) -> Record {
    let mut filter = Record::new();
    filter.insert(
        "since".to_owned(),
        json!(since.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    filter.insert("to".to_owned(), json!(to.to_rfc3339_opts(SecondsFormat::Secs, true)));
    filter
}

/// Common list defaults: empty filter, ascending, first page of ten.
pub(crate) fn list_defaults() -> Record {
    [
        ("filter".to_owned(), json!({})),
        ("dir".to_owned(), SortDirection::Ascending.into()),
        ("offset".to_owned(), json!(0)),
        ("limit".to_owned(), json!(10)),
    ]
    .into_iter()
    .collect()
}

/// Projects a list filter onto `since`/`to`/`status`.
pub(crate) fn picked_filter(request: &Record) -> Record {
    match request.get("filter") {
        Some(Value::Object(filter)) => record::pick(filter, &["since", "to", "status"]),
        _ => Record::new(),
    }
}

/// Wraps a scalar `status` into a list in place.
pub(crate) fn ensure_status_list(request: &mut Record) {
    if let Some(Value::String(status)) = request.get("status") {
        let status = status.clone();
        request.insert("status".to_owned(), json!([status]));
    }
}

/// Wraps a scalar value into the list form the API expects.
pub(crate) fn scalar_list(value: Value) -> Value {
    match value {
        Value::String(single) => json!([single]),
        other => other,
    }
}
