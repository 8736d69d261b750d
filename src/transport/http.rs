//! Default transport backed by [`reqwest`].

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Client;

use super::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Shared client with connection pooling enabled.
///
/// A singleton keeps the pool alive across transport instances instead of
/// re-establishing connections per instance.
static DEFAULT_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("default reqwest client")
});

/// [`Transport`] implementation over a pooled [`reqwest::Client`].
///
/// Non-2xx responses are returned as ordinary [`HttpResponse`] values; the
/// client core decides what a given status means. Only connection-level
/// failures surface as [`TransportError::Network`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Transport over the shared pooled client (30 s total timeout, 10 s
    /// connect timeout).
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_CLIENT.clone() }
    }

    /// Transport over a caller-configured client.
    ///
    /// Use this to change timeouts, proxies, or TLS settings; the client
    /// core intentionally has no knobs for any of that.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> std::result::Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?
            .to_vec();

        Ok(HttpResponse { status, headers, body })
    }
}
