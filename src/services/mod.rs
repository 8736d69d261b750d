//! Per-endpoint service groups.
//!
//! Each service owns an [`ApiClient`](crate::ApiClient) and shapes request
//! bodies (whitelist projection, type coercion, enum defaults) before
//! delegating to it. Services are versioned the way the HTTP API is
//! (`v1`/`v2`/`v3`); the same resource can exist in several versions with
//! different contracts.

use std::future::Future;

use serde_json::Value;

use crate::error::Result;
use crate::record::Record;

pub mod pass;
pub mod v1;
pub mod v2;
pub mod v3;

/// Services able to page through postings.
pub trait OrderList {
    /// Lists postings; `request` may carry `filter`, `dir`, `offset`,
    /// `limit`.
    fn list(&self, request: Record) -> impl Future<Output = Result<Value>> + Send;
}

/// Services able to page through postings awaiting processing.
pub trait UnfulfilledOrderList {
    /// Lists unprocessed postings.
    fn unfulfilled_list(&self, request: Record) -> impl Future<Output = Result<Value>> + Send;
}

/// Services able to fetch a single posting.
pub trait GetOrder {
    /// Fetches one posting by its number; `options` selects optional detail
    /// sections.
    fn get(
        &self,
        posting_number: &str,
        options: Record,
    ) -> impl Future<Output = Result<Value>> + Send;
}
