use std::sync::Arc;

use log::{debug, error, info};
use reqwest::Url;

use crate::chat::error::{ChatError, ChatResult};
use crate::chat::models::{CompletionRequest, SamplingOptions, Turn};
use crate::chat::transport::{extract_content, Transport};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant.";
pub const TEMPERATURE: f64 = 0.7;

/// One linear conversation with a chat-completion endpoint.
///
/// The transcript always starts with a single system turn. `submit` records
/// the user turn before calling out, so a failed exchange still leaves it in
/// place; the assistant turn is only added when a reply was parsed. The whole
/// transcript is resent on every call, so payloads grow with the conversation.
pub struct Session {
    endpoint: Url,
    model: String,
    transcript: Vec<Turn>,
    transport: Arc<dyn Transport>,
}

impl Session {
    pub fn new(
        endpoint: Url,
        model: impl Into<String>,
        system: Option<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let system = system
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        Self {
            endpoint,
            model: model.into(),
            transcript: vec![Turn::system(system)],
            transport,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn history(&self) -> &[Turn] {
        &self.transcript
    }

    /// Drops everything but the initial system turn.
    pub fn reset(&mut self) {
        info!("Resetting transcript ({} turns discarded)", self.transcript.len() - 1);
        self.transcript.truncate(1);
    }

    pub async fn submit(&mut self, query: &str) -> ChatResult<String> {
        if query.trim().is_empty() {
            error!("Rejected empty query");
            return Err(ChatError::EmptyQuery);
        }

        self.transcript.push(Turn::user(query));

        let payload = CompletionRequest {
            model: &self.model,
            option: SamplingOptions { temperature: TEMPERATURE },
            messages: &self.transcript,
        };

        info!(
            "Sending {} turns to {} (model: {})",
            self.transcript.len(),
            self.endpoint,
            self.model
        );

        let content = match self.transport.post_json(&self.endpoint, &payload).await {
            Ok(body) => {
                debug!("Response JSON: {}", body);
                extract_content(&body)
            }
            Err(e) => Err(e),
        };

        match content {
            Ok(content) => {
                info!("Response length: {} characters", content.len());
                self.transcript.push(Turn::assistant(content.clone()));
                Ok(content)
            }
            Err(e) => {
                error!("An error occurred: {}", e);
                Err(e)
            }
        }
    }
}
