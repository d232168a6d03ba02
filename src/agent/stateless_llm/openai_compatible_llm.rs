use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::stateless_llm_interface::StatelessLLMInterface;
use crate::agent::interface::{ChatResponse, Message};

/// OpenAI compatible LLM implementation (`/chat/completions`).
/// Covers OpenAI itself and the hosted providers that mirror its API.
pub struct OpenAICompatibleLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionReply {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAICompatibleLLM {
    pub fn new(
        client: Client,
        model: String,
        base_url: String,
        api_key: Option<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model, base_url
        );
        Self {
            client,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            temperature,
            max_tokens,
        }
    }
}

#[async_trait]
impl StatelessLLMInterface for OpenAICompatibleLLM {
    fn name(&self) -> &str {
        "openai_compatible"
    }

    async fn chat_completion(&self, messages: &[Message]) -> Result<Option<ChatResponse>, anyhow::Error> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("Chat completion request: {} messages", messages.len());

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completion API error: {} - {}", status, body);
        }

        parse_completion_reply(response.json().await?)
    }
}

/// Map a `/chat/completions` reply to the first choice's message.
///
/// No choices, or a choice without a message, yields `None`.
pub(crate) fn parse_completion_reply(json: Value) -> anyhow::Result<Option<ChatResponse>> {
    let reply: CompletionReply = serde_json::from_value(json)?;
    Ok(reply
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .map(|message| ChatResponse {
            content: message.content,
        }))
}
