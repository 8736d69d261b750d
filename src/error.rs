//! Error types for the Ozon seller API client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration** ([`OzonError::Config`]): invalid constructor arguments,
//!   fatal and not recoverable by caller logic
//! - **Validation** ([`ValidationError`]): a product record failed schema
//!   validation before any network call; caller-correctable
//! - **Wire** ([`OzonError::Serialization`], [`OzonError::Protocol`]): a body
//!   could not be encoded or a response could not be decoded
//! - **Marketplace** ([`ApiError`]): the server rejected the request; carries
//!   the machine error kind and the raw `details` payload

use serde_json::{Map, Value};
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, OzonError>;

/// Errors surfaced by the client.
///
/// Every failure is returned synchronously to the caller; the client never
/// retries on its own.
#[derive(Debug, Error)]
pub enum OzonError {
    /// Invalid constructor arguments (missing credentials, unknown schema
    /// version, malformed host URL).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A method argument was rejected before any request was built
    /// (empty import payload, unsupported posting scheme, missing mandatory
    /// filter ranges).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A product record failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A type table referenced an unrecognized type tag.
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),

    /// The outbound body could not be encoded as JSON.
    #[error("request body serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be parsed as JSON when JSON was
    /// expected, or the parsed value misses a field the contract promises.
    #[error("invalid json response: {0}")]
    Protocol(String),

    /// The transport failed without producing a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The marketplace rejected the request with an error envelope.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A product record failed validation against the schema document.
///
/// Raised before any network call, so the caller can correct the record and
/// resubmit without side effects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A key required by the current mode is absent.
    #[error("required property not defined: {0}")]
    MissingRequired(String),

    /// A required string-typed key holds an empty string.
    #[error("empty value for property: {0}")]
    EmptyValue(String),

    /// A constrained key holds a value outside its allowed option set.
    #[error("incorrect property value '{value}' for `{key}` key")]
    InvalidOption {
        /// The offending key.
        key: String,
        /// The rejected value, verbatim.
        value: Value,
    },
}

/// A type table referenced a type tag outside the supported alias set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type: {tag}")]
pub struct UnsupportedTypeError {
    /// The unrecognized tag, verbatim.
    pub tag: String,
}

/// Marketplace-side rejection parsed from a non-2xx response body.
///
/// The server's machine error code is resolved to a registered
/// [`ApiErrorKind`]; codes without a registered kind fall back to
/// [`ApiErrorKind::Generic`] with the raw body text as message. The raw
/// `details`/`data` payload is always preserved for programmatic inspection.
#[derive(Debug, Clone, Error)]
#[error("ozon api error [{kind}]: {message}")]
pub struct ApiError {
    /// Resolved error kind.
    pub kind: ApiErrorKind,
    /// Human-readable message from the envelope, or the raw body text when
    /// the envelope was missing or unrecognized.
    pub message: String,
    /// Numeric code from a flat error envelope, 0 otherwise.
    pub code: i64,
    /// Structured error payload (`details` or `error.data`), `{}` if absent.
    pub details: Value,
}

impl ApiError {
    /// Generic error carrying a message and whatever payload was available.
    #[must_use]
    pub fn generic(message: String, code: i64, details: Value) -> Self {
        Self { kind: ApiErrorKind::Generic, message, code, details }
    }

    /// Parses a non-2xx response body into a typed error.
    ///
    /// Dispatch order:
    /// 1. Unparseable body: generic error with the body text as message.
    /// 2. No nested `error.code`: generic error from the flat
    ///    `message`/`code`/`details` fields (`"Ozon error"`, 0, `{}` when
    ///    absent).
    /// 3. `error.code` resolves to a registered kind: typed error with
    ///    `error.message` and `error.data`.
    /// 4. Otherwise: generic error carrying the raw body text.
    #[must_use]
    pub fn from_error_body(body: &str) -> Self {
        let Ok(parsed) = serde_json::from_str::<Value>(body) else {
            return Self::generic(body.to_owned(), 0, empty_details());
        };

        let error = parsed.get("error");
        let code = error.and_then(|e| e.get("code")).and_then(Value::as_str);

        let Some(code) = code.filter(|c| !c.is_empty()) else {
            let message = parsed
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Ozon error")
                .to_owned();
            let numeric = parsed.get("code").and_then(Value::as_i64).unwrap_or(0);
            let details = parsed.get("details").cloned().unwrap_or_else(empty_details);
            return Self::generic(message, numeric, details);
        };

        let Some(kind) = ApiErrorKind::registered(code) else {
            return Self::generic(body.to_owned(), 0, empty_details());
        };

        // `error` is present whenever `error.code` parsed above.
        let error = error.expect("error object present");
        let message =
            error.get("message").and_then(Value::as_str).unwrap_or_default().to_owned();
        let details = error.get("data").cloned().unwrap_or_else(empty_details);

        Self { kind, message, code: 0, details }
    }
}

fn empty_details() -> Value {
    Value::Object(Map::new())
}

/// Registered marketplace error kinds.
///
/// The server reports machine codes such as `PRODUCT_NOT_FOUND_ERROR`; the
/// code is normalized via [`kind_name`] and looked up here. Adding a new kind
/// is a one-line registration; the dispatch logic never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiErrorKind {
    /// Fallback for unrecognized or unparseable error codes.
    Generic,
    /// `ACCESS_DENIED`
    AccessDenied,
    /// `BAD_REQUEST`
    BadRequest,
    /// `ITEM_NOT_FOUND_ERROR`
    ItemNotFound,
    /// `PRODUCT_NOT_FOUND_ERROR`
    ProductNotFound,
    /// `POSTING_NOT_FOUND_ERROR`
    PostingNotFound,
    /// `NOT_FOUND_IN_SORTING_CENTER_ERROR`
    NotFoundInSortingCenter,
    /// `TOO_MANY_REQUESTS_ERROR`
    TooManyRequests,
}

impl ApiErrorKind {
    /// Resolves a raw server error code to a registered kind.
    ///
    /// Returns `None` when no kind is registered under the derived name, in
    /// which case dispatch falls back to [`ApiErrorKind::Generic`].
    #[must_use]
    pub fn registered(code: &str) -> Option<Self> {
        match kind_name(code).as_str() {
            "AccessDenied" => Some(Self::AccessDenied),
            "BadRequest" => Some(Self::BadRequest),
            "ItemNotFound" => Some(Self::ItemNotFound),
            "ProductNotFound" => Some(Self::ProductNotFound),
            "PostingNotFound" => Some(Self::PostingNotFound),
            "NotFoundInSortingCenter" => Some(Self::NotFoundInSortingCenter),
            "TooManyRequests" => Some(Self::TooManyRequests),
            _ => None,
        }
    }

    /// Canonical name used in [`std::fmt::Display`] output.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "Generic",
            Self::AccessDenied => "AccessDenied",
            Self::BadRequest => "BadRequest",
            Self::ItemNotFound => "ItemNotFound",
            Self::ProductNotFound => "ProductNotFound",
            Self::PostingNotFound => "PostingNotFound",
            Self::NotFoundInSortingCenter => "NotFoundInSortingCenter",
            Self::TooManyRequests => "TooManyRequests",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the canonical kind name from a server error code.
///
/// The code is lower-cased, split on `_`, a trailing `error` token is
/// dropped, and the remaining tokens are title-cased and concatenated:
/// `PRODUCT_NOT_FOUND_ERROR` becomes `ProductNotFound`.
#[must_use]
pub fn kind_name(code: &str) -> String {
    let lowered = code.to_lowercase();
    let mut parts: Vec<&str> = lowered.split('_').filter(|p| !p.is_empty()).collect();
    if parts.last() == Some(&"error") {
        parts.pop();
    }
    parts
        .iter()
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
