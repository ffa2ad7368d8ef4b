use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::redact_credentials;
use crate::errors::QuizError;
use super::provider::LLMProvider;
use super::types::{CompletionOptions, LLMResponse, Message};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Client for the chat-completions endpoint of OpenAI or any server that
/// speaks the same protocol.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self::with_base_url(api_key, model, OPENAI_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, model: Option<&str>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, QuizError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuizError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    fn request_body(&self, prompt: &str, system: Option<&str>, options: &CompletionOptions) -> Value {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(Message::system(sys));
        }
        messages.push(Message::user(prompt));

        json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
        options: &CompletionOptions,
    ) -> Result<LLMResponse, QuizError> {
        let body = self.request_body(prompt, system, options);
        debug!(model = %self.model, prompt_chars = prompt.len(), "Sending chat completion");

        let mut request = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if !self.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let resp = request.send().await.map_err(|e| {
            let detail = redact_credentials(&e.to_string(), &[self.api_key.as_str()]);
            if e.is_timeout() {
                QuizError::Timeout(format!("Chat completion timed out: {}", detail))
            } else {
                QuizError::Network(format!("Chat completion request failed: {}", detail))
            }
        })?;

        let status = resp.status();
        let text = resp.text().await
            .map_err(|e| QuizError::Network(format!("Failed to read completion response: {}", e)))?;

        parse_completion(status, &decode_body(&text), &self.model)
    }

    fn provider_name(&self) -> &str {
        if self.base_url == OPENAI_BASE_URL { "openai" } else { "openai_compatible" }
    }

    fn model_name(&self) -> &str { &self.model }
}

/// Proxies and local servers may answer errors with plain text or HTML; such
/// bodies decode to `Null` so the status mapping still applies.
fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or(Value::Null)
}

/// Map a chat-completions HTTP response onto a result.
pub fn parse_completion(status: StatusCode, data: &Value, model: &str) -> Result<LLMResponse, QuizError> {
    let api_message = data["error"]["message"].as_str().unwrap_or("Unknown error").to_string();

    match status.as_u16() {
        401 => return Err(QuizError::Authentication(format!("Invalid API key: {}", api_message))),
        402 => return Err(QuizError::Billing(api_message)),
        429 if data["error"]["code"].as_str() == Some("insufficient_quota") => {
            return Err(QuizError::Billing(api_message));
        }
        429 => return Err(QuizError::RateLimit(api_message)),
        _ => {}
    }
    if !status.is_success() || data.get("error").is_some() {
        return Err(QuizError::LLMApi(format!("HTTP {}: {}", status.as_u16(), api_message)));
    }

    let content = data["choices"][0]["message"]["content"].as_str()
        .ok_or_else(|| QuizError::LLMApi("No content in completion response".into()))?
        .trim()
        .to_string();

    Ok(LLMResponse {
        content,
        input_tokens: data["usage"]["prompt_tokens"].as_u64(),
        output_tokens: data["usage"]["completion_tokens"].as_u64(),
        model: data["model"].as_str().unwrap_or(model).to_string(),
    })
}
