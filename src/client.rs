//! The request pipeline: authenticated request building, envelope
//! unwrapping, and error dispatch.
//!
//! # Design
//!
//! [`ApiClient`] is stateless besides its immutable [`Credentials`]: every
//! call builds one [`HttpRequest`], pushes it through the injected
//! [`Transport`], and interprets the response. Any status >= 400, whether
//! returned normally or carried inside [`TransportError::Rejected`], is
//! routed through [`ApiError::from_error_body`], so a call that reaches the
//! server and is refused never returns a bare transport error.
//!
//! Multiple clients may run concurrently without coordination; nothing here
//! retries, caches, or shares mutable state.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{ClientConfig, Credentials, DEFAULT_HOST};
use crate::error::{ApiError, OzonError, Result};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Authenticated client over an injected transport.
///
/// # Examples
///
/// ```rust,no_run
/// use serde_json::json;
/// use ozon_seller::{ApiClient, ClientConfig, transport::{HttpMethod, ReqwestTransport}};
///
/// # async fn example() -> ozon_seller::Result<()> {
/// let config = ClientConfig::new("12345", "api-key");
/// let client = ApiClient::new(config, ReqwestTransport::new())?;
///
/// let body = json!({"page": 1, "page_size": 10});
/// let result = client.request(HttpMethod::Post, "/v1/product/list", Some(&body)).await?;
/// println!("{result}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    credentials: Credentials,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// Client against the default seller API host.
    ///
    /// # Errors
    ///
    /// Returns [`OzonError::Config`] for missing credentials or a malformed
    /// host override.
    pub fn new(config: ClientConfig, transport: T) -> Result<Self> {
        Self::with_default_host(config, transport, DEFAULT_HOST)
    }

    /// Client whose fallback host differs from [`DEFAULT_HOST`].
    ///
    /// Endpoint groups served from another origin (the promotions API) pass
    /// their own default here; an explicit host in `config` still wins.
    ///
    /// # Errors
    ///
    /// Returns [`OzonError::Config`] for missing credentials or a malformed
    /// host override.
    pub fn with_default_host(
        config: ClientConfig,
        transport: T,
        default_host: &str,
    ) -> Result<Self> {
        Ok(Self { credentials: config.resolve(default_host)?, transport })
    }

    /// Effective origin requests are sent to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.credentials.host
    }

    /// Builds an authenticated request without sending it.
    ///
    /// The body, when present, is JSON-serialized and the
    /// `Client-Id`/`Api-Key`/`Content-Type` headers are attached.
    ///
    /// # Errors
    ///
    /// Returns [`OzonError::Serialization`] when the body cannot be encoded.
    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest> {
        let body = body
            .map(|b| serde_json::to_string(b).map_err(OzonError::Serialization))
            .transpose()?
            .filter(|text| !text.is_empty());

        Ok(HttpRequest {
            method,
            url: format!("{}{path}", self.credentials.host),
            headers: vec![
                ("Client-Id".to_owned(), self.credentials.client_id.clone()),
                ("Api-Key".to_owned(), self.credentials.api_key.clone()),
                ("Content-Type".to_owned(), "application/json".to_owned()),
            ],
            body,
        })
    }

    /// Sends a request and returns the payload, unwrapping a `{result: …}`
    /// envelope when present.
    ///
    /// # Errors
    ///
    /// [`OzonError::Api`] for server rejections, [`OzonError::Transport`]
    /// for network failures, [`OzonError::Protocol`] for non-JSON success
    /// bodies.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let value = self.request_full(method, path, body).await?;

        Ok(match value {
            Value::Object(mut map)
                if matches!(map.get("result"), Some(result) if !result.is_null()) =>
            {
                map.remove("result").expect("checked above")
            }
            other => other,
        })
    }

    /// Sends a request and returns the parsed response without unwrapping
    /// the envelope.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request`].
    pub async fn request_full<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let response = self.execute(method, path, body).await?;
        serde_json::from_slice(&response.body)
            .map_err(|e| OzonError::Protocol(e.to_string()))
    }

    /// Sends a request and returns the raw response body.
    ///
    /// For endpoints that answer with binary payloads (package labels,
    /// transfer acts).
    ///
    /// # Errors
    ///
    /// [`OzonError::Api`] for server rejections, [`OzonError::Transport`]
    /// for network failures.
    pub async fn request_raw<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        Ok(self.execute(method, path, body).await?.body)
    }

    #[instrument(skip(self, body), fields(method = method.as_str(), path))]
    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpResponse> {
        let request = self.build_request(method, path, body)?;

        match self.transport.send(request).await {
            Ok(response) if response.status >= 400 => {
                Err(ApiError::from_error_body(&response.body_text()).into())
            }
            Ok(response) => {
                debug!(status = response.status, "request completed");
                Ok(response)
            }
            // A transport that enforces statuses still hands us the response;
            // interpret its body exactly like an in-band error.
            Err(TransportError::Rejected(response)) => {
                Err(ApiError::from_error_body(&response.body_text()).into())
            }
            Err(TransportError::Network(message)) => Err(OzonError::Transport(message)),
        }
    }
}
