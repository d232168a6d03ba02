use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_NAME: &str = "mistral";
pub const DEFAULT_MODEL_PROVIDER: &str = "ollama";
pub const DEFAULT_MODEL_URL: &str = "http://localhost:11434";

/// Settings for the chat-completion backend (`[llm]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_model_provider")]
    pub model_provider: String,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Only ever read from `LLM_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_model_provider() -> String {
    DEFAULT_MODEL_PROVIDER.to_string()
}

fn default_base_url() -> String {
    DEFAULT_MODEL_URL.to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            model_provider: default_model_provider(),
            temperature: 0.0,
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            api_key: None,
        }
    }
}
