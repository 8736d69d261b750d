//! HTTP transport abstraction.
//!
//! The client core never performs I/O itself: it builds [`HttpRequest`]
//! values and hands them to an injected [`Transport`]. The transport owns
//! connection pooling, timeouts, and cancellation; the core imposes nothing
//! beyond a single request/response exchange per call.
//!
//! A [`reqwest`]-backed implementation is provided as [`ReqwestTransport`].
//! Custom transports (test doubles, middleware stacks, alternative HTTP
//! clients) implement the trait directly.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ozon_seller::{ApiClient, ClientConfig, transport::ReqwestTransport};
//!
//! # fn example() -> ozon_seller::Result<()> {
//! let config = ClientConfig::new("12345", "api-key");
//! let client = ApiClient::new(config, ReqwestTransport::new())?;
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::future::Future;

use thiserror::Error;

pub mod http;

pub use http::ReqwestTransport;

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Wire spelling of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// An outbound request described as plain data.
///
/// Built by the client core; the transport executes it verbatim without
/// adding or rewriting headers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL (host + endpoint path).
    pub url: String,
    /// Headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body, absent for body-less requests.
    pub body: Option<String>,
}

/// A response as seen by the transport.
///
/// The body is kept as raw bytes: some endpoints return binary payloads
/// (package labels, transfer acts as PDF) rather than JSON.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Body decoded as UTF-8, lossily for binary payloads.
    #[must_use]
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Failure modes of a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The exchange failed before a response was produced (DNS, TLS,
    /// timeout, connection reset).
    #[error("network failure: {0}")]
    Network(String),

    /// The transport enforced a status policy and rejected the exchange,
    /// but a full response was received. The client runs its regular error
    /// dispatch over the carried body instead of propagating this variant.
    #[error("transport rejected response with status {}", .0.status)]
    Rejected(Box<HttpResponse>),
}

/// A collaborator capable of executing one HTTP exchange.
///
/// Implementations must be cheap to share across calls; the client core
/// holds one transport per instance and issues strictly sequential calls
/// through it. Concurrency, if any, comes from running multiple client
/// instances.
pub trait Transport: Send + Sync {
    /// Executes the request and returns the response, whatever its status.
    ///
    /// Implementations that cannot help but fail on non-2xx statuses must
    /// wrap the received response in [`TransportError::Rejected`] so the
    /// client can still interpret the error body.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = std::result::Result<HttpResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
    }

    #[test]
    fn test_body_text_utf8() {
        let response = HttpResponse {
            status: 200,
            headers: vec![],
            body: br#"{"result":true}"#.to_vec(),
        };
        assert_eq!(response.body_text(), r#"{"result":true}"#);
    }

    #[test]
    fn test_body_text_lossy_for_binary() {
        let response =
            HttpResponse { status: 200, headers: vec![], body: vec![0xff, 0xfe, b'x'] };
        assert!(response.body_text().contains('x'));
    }

    #[test]
    fn test_rejected_error_display() {
        let response = HttpResponse { status: 404, headers: vec![], body: vec![] };
        let err = TransportError::Rejected(Box::new(response));
        assert_eq!(err.to_string(), "transport rejected response with status 404");
    }
}
