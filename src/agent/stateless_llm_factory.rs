use std::sync::Arc;
use tracing::info;

use crate::agent::stateless_llm::ollama_llm::OllamaLLM;
use crate::agent::stateless_llm::openai_compatible_llm::OpenAICompatibleLLM;
use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::config_manager::LlmSettings;
use crate::error::{ServiceError, ServiceResult};

/// Factory for creating stateless LLM instances
pub struct StatelessLLMFactory;

impl StatelessLLMFactory {
    /// Create an LLM based on `settings.model_provider`.
    ///
    /// # Arguments
    /// * `settings` - LLM settings (model, base URL, sampling options, API key)
    pub fn create_llm(settings: &LlmSettings) -> ServiceResult<Arc<dyn StatelessLLMInterface>> {
        info!("Initializing LLM: {}", settings.model_provider);

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ServiceError::Configuration(format!("failed to build HTTP client: {e}")))?;

        match settings.model_provider.to_ascii_lowercase().as_str() {
            "ollama" => Ok(Arc::new(OllamaLLM::new(
                client,
                settings.model.clone(),
                settings.base_url.clone(),
                settings.temperature,
                settings.max_tokens,
            ))),
            "openai" | "openai_compatible" | "mistral" | "mistralai" | "groq" | "deepseek"
            | "together" | "lmstudio" | "vllm" => Ok(Arc::new(OpenAICompatibleLLM::new(
                client,
                settings.model.clone(),
                settings.base_url.clone(),
                settings.api_key.clone(),
                settings.temperature,
                settings.max_tokens,
            ))),
            other => Err(ServiceError::Configuration(format!(
                "Unsupported LLM provider: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_providers_map_to_backends() {
        let settings = LlmSettings::default();
        assert_eq!(StatelessLLMFactory::create_llm(&settings).unwrap().name(), "ollama");

        let settings = LlmSettings {
            model_provider: "OpenAI".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            ..LlmSettings::default()
        };
        assert_eq!(
            StatelessLLMFactory::create_llm(&settings).unwrap().name(),
            "openai_compatible"
        );
    }

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        let settings = LlmSettings {
            model_provider: "carrier-pigeon".to_string(),
            ..LlmSettings::default()
        };
        let err = StatelessLLMFactory::create_llm(&settings).err().unwrap();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }
}
