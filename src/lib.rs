//! Async client for the Ozon seller API.
//!
//! Builds authenticated requests, validates and normalizes outbound product
//! data against versioned schema documents, and maps marketplace error
//! responses to typed errors.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │  Endpoint services  │  services::{v1,v2,v3,pass}: shape bodies via
//! │  (per resource/ver) │  projection, coercion, and enum defaults
//! └─────────┬───────────┘
//!           │
//! ┌─────────▼───────────┐
//! │      ApiClient      │  header injection, {result: …} unwrapping,
//! │  (request pipeline) │  error-code → typed-error dispatch
//! └─────────┬───────────┘
//!           │
//! ┌─────────▼───────────┐
//! │      Transport      │  injected collaborator; reqwest-backed
//! │    (trait + impl)   │  implementation provided
//! └─────────────────────┘
//! ```
//!
//! The client core performs no I/O of its own, keeps no state beyond its
//! immutable credentials, and never retries. Connection pooling, timeouts,
//! and cancellation belong to the injected [`Transport`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use ozon_seller::{ClientConfig, transport::ReqwestTransport};
//! use ozon_seller::services::v1::ProductService;
//!
//! # async fn example() -> ozon_seller::Result<()> {
//! let config = ClientConfig::new("12345", "api-key");
//! let products = ProductService::new(config, ReqwestTransport::new())?;
//!
//! // Validated product import: the item is checked against the v1 create
//! // schema before any bytes leave the process.
//! let item = json!({
//!     "offer_id": "MUG-300",
//!     "name": "Mug",
//!     "description": "Ceramic mug, 300 ml",
//!     "category_id": 17036076,
//!     "price": "590",
//!     "vat": "0.2",
//!     "height": 95, "depth": 85, "width": 85, "dimension_unit": "mm",
//!     "weight": 320, "weight_unit": "g",
//!     "images": ["https://img.example.com/mug.jpg"],
//! });
//! let result = products.import(item, true).await?;
//! println!("task: {result}");
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every operation returns [`Result`]. Server rejections are parsed into
//! [`ApiError`] with the machine error code resolved to a registered
//! [`ApiErrorKind`]; unknown codes degrade to a generic error that still
//! carries the raw body. Validation failures ([`ValidationError`]) are
//! raised before any network call.
//!
//! ```rust
//! use ozon_seller::{ApiError, ApiErrorKind};
//!
//! let err = ApiError::from_error_body(
//!     r#"{"error":{"code":"PRODUCT_NOT_FOUND_ERROR","message":"gone"}}"#,
//! );
//! assert_eq!(err.kind, ApiErrorKind::ProductNotFound);
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the request pipeline ([`ApiClient`])
//! - [`transport`]: transport trait and the reqwest implementation
//! - [`validator`] / [`schema`]: schema-driven product validation
//! - [`cast`] / [`record`]: type coercion and record shaping primitives
//! - [`services`]: per-endpoint groups (`v1`, `v2`, `v3`, `pass`)
//! - [`enums`] / [`with`]: wire constants and optional-section resolution
//! - [`error`]: the error taxonomy

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod cast;
pub mod client;
pub mod config;
pub mod enums;
pub mod error;
pub mod record;
pub mod schema;
pub mod services;
pub mod transport;
pub mod validator;
pub mod with;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_HOST};
pub use error::{
    ApiError, ApiErrorKind, OzonError, Result, UnsupportedTypeError, ValidationError,
};
pub use record::Record;
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError,
};
pub use validator::{ProductValidator, ValidationMode};
