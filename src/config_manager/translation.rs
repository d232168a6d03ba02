use serde::{Deserialize, Serialize};

/// Sentinel source language asking the backend to auto-detect
pub const AUTO_LANGUAGE: &str = "auto";

/// Settings for the translation backend (`[translation]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationSettings {
    #[serde(default = "default_source_lang")]
    pub source_lang: String,

    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    #[serde(default = "default_true")]
    pub use_cache: bool,

    /// Backend request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// "google" or "libretranslate"
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Only ever read from `TRANSLATION_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

fn default_source_lang() -> String {
    AUTO_LANGUAGE.to_string()
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    5
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_cache_capacity() -> usize {
    1000
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
            use_cache: true,
            timeout: default_timeout(),
            provider: default_provider(),
            base_url: None,
            cache_capacity: default_cache_capacity(),
            api_key: None,
        }
    }
}
