//! Seller credentials and host configuration.
//!
//! Every request carries the seller's `Client-Id` and `Api-Key` headers; the
//! host is normalized to scheme + authority at construction so endpoint
//! paths concatenate cleanly.

use url::Url;

use crate::error::{OzonError, Result};

/// Default origin of the seller API.
pub const DEFAULT_HOST: &str = "https://api-seller.ozon.ru";

/// Seller credentials plus an optional host override.
///
/// The original API accepted either an ordered triple or a named mapping;
/// here the named struct is canonical and [`ClientConfig::from_parts`] covers
/// the positional form.
///
/// # Examples
///
/// ```
/// use ozon_seller::ClientConfig;
///
/// let config = ClientConfig::new("12345", "secret-key");
/// let staging = ClientConfig::new("12345", "secret-key")
///     .with_host("https://staging.example.com/ignored/path");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Seller account identifier, sent as the `Client-Id` header.
    pub client_id: String,
    /// API key, sent as the `Api-Key` header.
    pub api_key: String,
    /// Optional host override; reduced to scheme + authority when resolved.
    pub host: Option<String>,
}

impl ClientConfig {
    /// Config pointing at the default host.
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), api_key: api_key.into(), host: None }
    }

    /// Positional constructor mirroring the `(client_id, api_key, host)`
    /// triple.
    pub fn from_parts(
        client_id: impl Into<String>,
        api_key: impl Into<String>,
        host: Option<String>,
    ) -> Self {
        Self { client_id: client_id.into(), api_key: api_key.into(), host }
    }

    /// Overrides the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Validates the config and resolves the effective host.
    ///
    /// `default_host` applies when no override is set; an override is parsed
    /// and reduced to scheme + authority (path and query stripped).
    ///
    /// # Errors
    ///
    /// Returns [`OzonError::Config`] when `client_id` or `api_key` is empty,
    /// or when the host override is not a valid URL with a host part.
    pub fn resolve(&self, default_host: &str) -> Result<Credentials> {
        if self.client_id.is_empty() || self.api_key.is_empty() {
            return Err(OzonError::Config(
                "not defined mandatory config parameters `client_id` or `api_key`".to_owned(),
            ));
        }

        let host = match self.host.as_deref().filter(|h| !h.is_empty()) {
            Some(host) => origin_of(host)?,
            None => default_host.trim_end_matches('/').to_owned(),
        };

        Ok(Credentials {
            client_id: self.client_id.clone(),
            api_key: self.api_key.clone(),
            host,
        })
    }
}

/// Validated, immutable per-client configuration.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Seller account identifier.
    pub client_id: String,
    /// API key.
    pub api_key: String,
    /// Effective origin, no trailing slash.
    pub host: String,
}

/// Reduces a URL to `scheme://host[:port]`.
fn origin_of(raw: &str) -> Result<String> {
    let url = Url::parse(raw)
        .map_err(|e| OzonError::Config(format!("invalid host '{raw}': {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| OzonError::Config(format!("host '{raw}' has no authority part")))?;

    Ok(match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_default_host() {
        let credentials = ClientConfig::new("123", "key").resolve(DEFAULT_HOST).unwrap();
        assert_eq!(credentials.host, "https://api-seller.ozon.ru");
        assert_eq!(credentials.client_id, "123");
        assert_eq!(credentials.api_key, "key");
    }

    #[test]
    fn test_resolve_trims_default_host_slash() {
        let credentials = ClientConfig::new("123", "key")
            .resolve("https://seller-api.ozon.ru/")
            .unwrap();
        assert_eq!(credentials.host, "https://seller-api.ozon.ru");
    }

    #[test]
    fn test_resolve_strips_path_and_query_from_override() {
        let config = ClientConfig::new("123", "key")
            .with_host("https://proxy.example.com/v2/forward?x=1");
        let credentials = config.resolve(DEFAULT_HOST).unwrap();
        assert_eq!(credentials.host, "https://proxy.example.com");
    }

    #[test]
    fn test_resolve_keeps_explicit_port() {
        let config = ClientConfig::new("123", "key").with_host("http://localhost:8080/mock");
        let credentials = config.resolve(DEFAULT_HOST).unwrap();
        assert_eq!(credentials.host, "http://localhost:8080");
    }

    #[test]
    fn test_resolve_rejects_empty_client_id() {
        let err = ClientConfig::new("", "key").resolve(DEFAULT_HOST).unwrap_err();
        assert!(matches!(err, OzonError::Config(_)));
    }

    #[test]
    fn test_resolve_rejects_empty_api_key() {
        let err = ClientConfig::new("123", "").resolve(DEFAULT_HOST).unwrap_err();
        assert!(matches!(err, OzonError::Config(_)));
    }

    #[test]
    fn test_resolve_rejects_malformed_host() {
        let config = ClientConfig::new("123", "key").with_host("not a url");
        assert!(matches!(config.resolve(DEFAULT_HOST), Err(OzonError::Config(_))));
    }

    #[test]
    fn test_empty_host_override_falls_back_to_default() {
        let config = ClientConfig::from_parts("123", "key", Some(String::new()));
        let credentials = config.resolve(DEFAULT_HOST).unwrap();
        assert_eq!(credentials.host, "https://api-seller.ozon.ru");
    }
}
