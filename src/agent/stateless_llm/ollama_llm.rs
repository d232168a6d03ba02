use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::stateless_llm_interface::StatelessLLMInterface;
use crate::agent::interface::{ChatResponse, Message};

/// Ollama LLM implementation using the native `/api/chat` endpoint
pub struct OllamaLLM {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct ChatReply {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

impl OllamaLLM {
    pub fn new(client: Client, model: String, base_url: String, temperature: f32, max_tokens: u32) -> Self {
        info!("Initialized OllamaLLM: model={}, base_url={}", model, base_url);
        Self {
            client,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature,
            max_tokens,
        }
    }
}

#[async_trait]
impl StatelessLLMInterface for OllamaLLM {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat_completion(&self, messages: &[Message]) -> Result<Option<ChatResponse>, anyhow::Error> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        let url = format!("{}/api/chat", self.base_url);
        debug!("Ollama chat request: {} messages", messages.len());

        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama API error: {} - {}", status, body);
        }

        parse_chat_reply(response.json().await?)
    }
}

/// Map an `/api/chat` reply; a missing `message` yields `None`.
pub(crate) fn parse_chat_reply(json: Value) -> anyhow::Result<Option<ChatResponse>> {
    let reply: ChatReply = serde_json::from_value(json)?;
    Ok(reply.message.map(|m| ChatResponse { content: m.content }))
}
