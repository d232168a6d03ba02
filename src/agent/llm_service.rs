use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::agent::interface::{ChatResponse, Message};
use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::agent::stateless_llm_factory::StatelessLLMFactory;
use crate::config_manager::LlmSettings;
use crate::error::{ServiceError, ServiceResult};
use crate::utils::BackgroundRuntime;

pub const INVALID_RESPONSE: &str = "Invalid response from LLM";
const PROBE_PROMPT: &str = "Test.";

/// Synchronous adapter over a chat-completion backend.
///
/// Like the translation adapter, backend calls run on a dedicated worker and
/// the caller blocks for the result. Nothing is retried.
pub struct LlmService {
    llm: Arc<dyn StatelessLLMInterface>,
    runtime: BackgroundRuntime,
    settings: LlmSettings,
}

impl LlmService {
    /// Build the service; `None` selects the default local Ollama model.
    pub fn new(settings: Option<LlmSettings>) -> ServiceResult<Self> {
        let settings = settings.unwrap_or_default();
        let llm = StatelessLLMFactory::create_llm(&settings)?;
        Self::with_llm(settings, llm)
    }

    pub fn with_llm(settings: LlmSettings, llm: Arc<dyn StatelessLLMInterface>) -> ServiceResult<Self> {
        info!("Initializing LLMService");

        let runtime = BackgroundRuntime::new("llm-worker")
            .map_err(|e| ServiceError::Configuration(e.to_string()))?;

        info!("LLM model initialized successfully ({})", llm.name());
        debug!(
            "LLMService configured with: model={}, provider={}, base_url={}",
            settings.model, settings.model_provider, settings.base_url
        );

        Ok(Self {
            llm,
            runtime,
            settings,
        })
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Send `text` (preceded by `system_prompt`, if any) to the model.
    ///
    /// Empty or whitespace-only text returns "" without a backend call.
    pub fn process_text(&self, text: &str, system_prompt: Option<&str>) -> ServiceResult<String> {
        if text.trim().is_empty() {
            warn!("Empty text provided for LLM processing");
            return Ok(String::new());
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(prompt) = system_prompt.filter(|p| !p.is_empty()) {
            messages.push(Message::system(prompt));
        }
        messages.push(Message::user(text));

        info!("Processing text with LLM");
        let reply = self.invoke(messages).map_err(|e| {
            error!("LLM processing error: {:#}", e);
            ServiceError::Llm(format!("Chat completion failed: {e:#}"))
        })?;

        match reply.and_then(|r| r.content) {
            Some(content) => Ok(content),
            None => {
                error!("LLM processing error: {}", INVALID_RESPONSE);
                Err(ServiceError::Llm(INVALID_RESPONSE.to_string()))
            }
        }
    }

    /// Probe the backend with a trivial prompt. Never fails; errors read as "unavailable".
    pub fn is_available(&self) -> bool {
        match self.invoke(vec![Message::user(PROBE_PROMPT)]) {
            Ok(reply) => reply.map_or(false, |r| r.content.is_some()),
            Err(e) => {
                error!("LLM availability check failed: {:#}", e);
                false
            }
        }
    }

    fn invoke(&self, messages: Vec<Message>) -> anyhow::Result<Option<ChatResponse>> {
        let llm = self.llm.clone();
        self.runtime
            .block_on(async move { llm.chat_completion(&messages).await })?
    }
}
