use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::chat::error::{ChatError, ChatResult};
use crate::chat::models::CompletionRequest;

/// Performs one request/response exchange with a chat-completion endpoint.
///
/// Implementations hold no conversation state. A successful call returns the
/// decoded JSON body; non-success statuses and network failures are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        endpoint: &Url,
        payload: &CompletionRequest<'_>,
    ) -> ChatResult<Value>;
}

// reqwest-backed transport shared by every session
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> ChatResult<Self> {
        info!("Building HTTP transport with request timeout of {:?}", timeout);
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &Url,
        payload: &CompletionRequest<'_>,
    ) -> ChatResult<Value> {
        debug!("POST {} with {} messages", endpoint, payload.messages.len());

        let response = self.client.post(endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ChatError::MalformedResponse(format!("body is not JSON: {}", e)))
    }
}

/// Pulls `choices[0].message.content` out of a completion body.
pub fn extract_content(body: &Value) -> ChatResult<String> {
    body.get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ChatError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}
