use async_trait::async_trait;
use billed_core::bill::{Bill, CreateBill};
use reqwest::multipart;
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::{AttachmentReceipt, NewAttachment, Store, StoreError};

/// HTTP implementation of `Store` against a running billed backend.
pub struct HttpStore {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            token: None,
        }
    }

    pub fn with_token(base_url: &str, token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            token: Some(token),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let builder = self.client.get(format!("{}{path}", self.base_url));
        let resp = self
            .with_auth(builder)
            .send()
            .await
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let builder = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body);
        let resp = self
            .with_auth(builder)
            .send()
            .await
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        handle_response(resp).await
    }
}

async fn handle_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, StoreError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| StoreError::Internal(format!("json decode: {e}")))
    } else {
        Err(parse_error_with_status(status, resp).await)
    }
}

/// Turn a failed response into the backend's error shape. The backend
/// wording ("Erreur 404") is kept intact so page error regions can render
/// it verbatim; when the body carries no message, one is synthesized from
/// the status code in the same form.
async fn parse_error_with_status(status: StatusCode, resp: reqwest::Response) -> StoreError {
    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or_else(|| format!("Erreur {}", status.as_u16()));
    store_error(status, msg)
}

fn store_error(status: StatusCode, msg: String) -> StoreError {
    match status {
        StatusCode::NOT_FOUND => StoreError::NotFound(msg),
        StatusCode::BAD_REQUEST => StoreError::InvalidInput(msg),
        _ => StoreError::Internal(msg),
    }
}

#[async_trait]
impl Store for HttpStore {
    async fn list_bills(&self) -> Result<Vec<Bill>, StoreError> {
        self.get_json("/bills").await
    }

    async fn create_attachment(
        &self,
        input: NewAttachment,
    ) -> Result<AttachmentReceipt, StoreError> {
        let part = multipart::Part::bytes(input.data.to_vec())
            .file_name(input.file_name.clone())
            .mime_str(&input.content_type)
            .map_err(|e| StoreError::InvalidInput(format!("content type: {e}")))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("email", input.email);
        let builder = self
            .client
            .post(format!("{}/bills", self.base_url))
            .multipart(form);
        let resp = self
            .with_auth(builder)
            .send()
            .await
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        handle_response(resp).await
    }

    async fn create_bill(&self, input: &CreateBill) -> Result<Bill, StoreError> {
        self.post_json("/bills", input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let store = HttpStore::new("http://127.0.0.1:5678/");
        assert_eq!(store.base_url(), "http://127.0.0.1:5678");
    }

    #[test]
    fn maps_statuses_to_backend_errors() {
        match store_error(StatusCode::NOT_FOUND, "Erreur 404".into()) {
            StoreError::NotFound(msg) => assert_eq!(msg, "Erreur 404"),
            other => panic!("unexpected error: {other:?}"),
        }
        match store_error(StatusCode::BAD_REQUEST, "Erreur 400".into()) {
            StoreError::InvalidInput(msg) => assert_eq!(msg, "Erreur 400"),
            other => panic!("unexpected error: {other:?}"),
        }
        match store_error(StatusCode::INTERNAL_SERVER_ERROR, "Erreur 500".into()) {
            StoreError::Internal(msg) => assert_eq!(msg, "Erreur 500"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_display_keeps_backend_message_visible() {
        let err = store_error(StatusCode::NOT_FOUND, "Erreur 404".into());
        assert!(err.to_string().contains("Erreur 404"));
    }
}
