//! Seller/customer chat endpoints, version 1.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};

use crate::cast;
use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::{OzonError, Result};
use crate::record::{self, Record};
use crate::transport::{HttpMethod, Transport};

/// Chats between the seller and customers.
#[derive(Debug, Clone)]
pub struct ChatService<T> {
    client: ApiClient<T>,
}

impl<T: Transport> ChatService<T> {
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

    /// Chats the seller participates in.
    ///
    /// `query` may carry `chat_id_list`, `page`, `page_size`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn list(&self, query: Record) -> Result<Value> {
        let query = cast::cast_record(
            record::pick(&query, &["chat_id_list", "page", "page_size"]),
            &[("page", "int"), ("page_size", "int")],
            true,
        )?;
        let body = Value::Object(query);
        self.client.request(HttpMethod::Post, "/v1/chat/list", Some(&body)).await
    }

    /// Message history of a chat.
    ///
    /// `query` may carry `from_message_id` and `limit`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn history(&self, chat_id: &str, query: Record) -> Result<Value> {
        let mut query = record::pick(&query, &["from_message_id", "limit"]);
        query.insert("chat_id".to_owned(), json!(chat_id));
        let body = Value::Object(query);
        self.client.request(HttpMethod::Post, "/v1/chat/history", Some(&body)).await
    }

    /// Sends a text message into an existing chat.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<bool> {
        let body = json!({ "chat_id": chat_id, "text": text });
        let result =
            self.client.request(HttpMethod::Post, "/v1/chat/send/message", Some(&body)).await?;
        Ok(result.as_str() == Some("success"))
    }

    /// Sends a file into an existing chat.
    ///
    /// The caller supplies the file name and raw content; the payload is
    /// base64-encoded on the wire.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn send_file(&self, chat_id: &str, name: &str, content: &[u8]) -> Result<bool> {
        let body = json!({
            "chat_id": chat_id,
            "base64_content": STANDARD.encode(content),
            "name": name,
        });
        let result =
            self.client.request(HttpMethod::Post, "/v1/chat/send/file", Some(&body)).await?;
        Ok(result.as_str() == Some("success"))
    }

    /// Opens a chat about a posting, returning the chat id.
    ///
    /// # Errors
    ///
    /// [`OzonError::Protocol`] when the response misses the chat id;
    /// otherwise pipeline errors.
    pub async fn start(&self, posting_number: &str) -> Result<String> {
        let body = json!({ "posting_number": posting_number });
        let result =
            self.client.request(HttpMethod::Post, "/v1/chat/start", Some(&body)).await?;
        result
            .get("chat_id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| OzonError::Protocol("chat start response missing chat_id".to_owned()))
    }

    /// Messages received after `from_message_id`.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors ([`OzonError`]).
    pub async fn updates(
        &self,
        chat_id: &str,
        from_message_id: &str,
        limit: u32,
    ) -> Result<Value> {
        let body = json!({
            "chat_id": chat_id,
            "from_message_id": from_message_id,
            "limit": limit,
        });
        self.client.request(HttpMethod::Post, "/v1/chat/updates", Some(&body)).await
    }
}
