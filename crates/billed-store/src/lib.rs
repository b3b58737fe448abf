mod http;
mod mock;

pub use http::HttpStore;
pub use mock::MockStore;

use std::sync::Arc;

use async_trait::async_trait;
use billed_core::bill::{Bill, CreateBill};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("store error: {0}")]
    Internal(String),
}

/// A file attachment on its way to the backend, plus the owner's email.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub file_name: String,
    pub content_type: String,
    pub email: String,
    pub data: Bytes,
}

/// What the backend hands back once an attachment is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentReceipt {
    pub file_url: String,
    pub key: String,
}

/// The remote persistence boundary the app talks to.
///
/// `HttpStore` talks to a running backend; `MockStore` is the test double.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch every bill visible to the current user.
    async fn list_bills(&self) -> Result<Vec<Bill>, StoreError>;

    /// Upload a file attachment ahead of bill creation.
    async fn create_attachment(
        &self,
        input: NewAttachment,
    ) -> Result<AttachmentReceipt, StoreError>;

    /// Persist a new bill record.
    async fn create_bill(&self, input: &CreateBill) -> Result<Bill, StoreError>;
}

// -- Configuration --

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5678";

/// Connection settings for the production backend.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_url: String,
    pub api_token: Option<String>,
}

impl StoreConfig {
    /// Build from environment variables, falling back to the backend's
    /// default local port.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("BILLED_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_token: std::env::var("BILLED_API_TOKEN").ok(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
        }
    }
}

// -- Factory --

/// Create a production `Store` from configuration.
pub fn create_store(config: &StoreConfig) -> Arc<dyn Store> {
    match &config.api_token {
        Some(token) => Arc::new(HttpStore::with_token(&config.api_url, token.clone())),
        None => Arc::new(HttpStore::new(&config.api_url)),
    }
}
