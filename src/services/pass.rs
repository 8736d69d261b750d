//! Warehouse driver pass endpoints.

use serde_json::Value;

use crate::cast;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::record::{self, Record};
use crate::transport::{HttpMethod, Transport};

/// Field/type table shared by create and update.
const PASS_FIELDS: &[(&str, &str)] = &[
    ("car_model", "string"),
    ("car_number", "string"),
    ("driver_name", "string"),
    ("driver_patronymic", "string"),
    ("driver_surname", "string"),
    ("end_unloading_time", "string"),
    ("is_regular_pass", "boolean"),
    ("start_unloading_time", "string"),
    ("telephone", "string"),
    ("trailer_number", "string"),
    ("unload_date", "string"),
];

/// Driver pass management for warehouse deliveries.
#[derive(Debug, Clone)]
pub struct PassService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> PassService<T> {
    /// Service against the default host.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OzonError::Config`] for invalid credentials.
    pub fn new(config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self { client: ApiClient::new(config, transport)? })
    }

    /// Service over an existing client.
    #[must_use]
    pub fn from_client(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// Requests a new pass.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn create(&self, data: Record) -> Result<Value> {
        let body = Value::Object(shape(data)?);
        self.client.request_full(HttpMethod::Post, "/pass/create", Some(&body)).await
    }

    /// Fetches the most recent pass, full envelope included.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn get_last(&self) -> Result<Value> {
        let body = serde_json::json!({});
        self.client.request_full(HttpMethod::Post, "/pass/get/last", Some(&body)).await
    }

    /// Updates an existing pass.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`crate::OzonError`]).
    pub async fn update(&self, data: Record) -> Result<Value> {
        let body = Value::Object(shape(data)?);
        self.client.request(HttpMethod::Post, "/pass/update", Some(&body)).await
    }
}

fn shape(data: Record) -> Result<Record> {
    let keys: Vec<&str> = PASS_FIELDS.iter().map(|(key, _)| *key).collect();
    Ok(cast::cast_record(record::pick(&data, &keys), PASS_FIELDS, true)?)
}
