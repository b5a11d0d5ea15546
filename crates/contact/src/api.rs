use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde_json::Value;

use crate::ContactForm;

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("contact request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("contact response is not valid json: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What the contact endpoint answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiReply {
    pub ok: bool,
    pub error: Option<String>,
}

impl ApiReply {
    /// Reads the `error` field of a JSON body. Non-string values are kept
    /// in their JSON form.
    pub fn from_body(ok: bool, body: &Value) -> Self {
        let error = body.get("error").and_then(|error| match error {
            Value::Null => None,
            Value::String(error) => Some(error.to_owned()),
            other => Some(other.to_string()),
        });

        Self { ok, error }
    }
}

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn send(&self, form: &ContactForm) -> Result<ApiReply, TransportError>;
}

#[async_trait]
impl<T: ContactApi + ?Sized> ContactApi for Arc<T> {
    async fn send(&self, form: &ContactForm) -> Result<ApiReply, TransportError> {
        (**self).send(form).await
    }
}

/// Posts the contact form as JSON to the contact endpoint.
#[derive(Clone, Debug)]
pub struct HttpContactApi {
    client: Client,
    endpoint: Url,
}

impl HttpContactApi {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn send(&self, form: &ContactForm) -> Result<ApiReply, TransportError> {
        let body = serde_json::to_vec(form)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<Value>(&bytes)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            "contact endpoint replied"
        );

        Ok(ApiReply::from_body(status.is_success(), &body))
    }
}
