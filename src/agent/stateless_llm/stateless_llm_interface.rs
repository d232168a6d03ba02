use async_trait::async_trait;

use crate::agent::interface::{ChatResponse, Message};

/// Interface for a stateless language model.
/// Stateless means the LLM doesn't store memory, system prompts, or user messages
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Run one chat completion over `messages`.
    ///
    /// `Ok(None)` means the backend answered without a usable reply.
    async fn chat_completion(&self, messages: &[Message]) -> Result<Option<ChatResponse>, anyhow::Error>;
}
