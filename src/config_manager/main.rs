use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config_manager::llm::LlmSettings;
use crate::config_manager::system::{LoggingSettings, ServerSettings};
use crate::config_manager::translation::TranslationSettings;
use crate::config_manager::utils::mask_secret;
use crate::error::ServiceResult;

/// Prefix for structured env overrides, e.g. `TRANSLATE2LLM__LLM__MODEL=llama3`
pub const ENV_PREFIX: &str = "TRANSLATE2LLM";

pub const LLM_API_KEY_ENV: &str = "LLM_API_KEY";
pub const TRANSLATION_API_KEY_ENV: &str = "TRANSLATION_API_KEY";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Application configuration read from an INI file plus environment overrides.
///
/// Every section and key is optional; anything missing falls back to its
/// default. Settings are read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub translation: TranslationSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Config {
    /// Load configuration from `path`, then apply process environment overrides.
    pub fn load(path: &str) -> ServiceResult<Self> {
        let mut config = Self::load_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read the INI file and the `TRANSLATE2LLM__*` variables.
    ///
    /// A missing file is not an error: the defaults apply.
    pub fn load_file(path: &str) -> ServiceResult<Self> {
        Self::load_file_with_env(path, None)
    }

    /// Like [`Config::load_file`], reading `TRANSLATE2LLM__*` variables from
    /// `env` instead of the process environment when given.
    pub fn load_file_with_env(path: &str, env: Option<config::Map<String, String>>) -> ServiceResult<Self> {
        info!("Initializing configuration from {}", path);

        if Path::new(path).exists() {
            debug!("Configuration file found");
        } else {
            warn!("Configuration file not found at {}", path);
        }

        let raw = config::Config::builder()
            .add_source(config::File::new(path, config::FileFormat::Ini).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let config: Config = raw.try_deserialize()?;
        Ok(config)
    }

    /// Apply API keys and log level from the environment.
    ///
    /// `lookup` stands in for `std::env::var` so tests can run without
    /// touching the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(LLM_API_KEY_ENV) {
            self.llm.api_key = Some(key);
        }
        if let Some(key) = non_empty(TRANSLATION_API_KEY_ENV) {
            self.translation.api_key = Some(key);
        }
        if let Some(level) = non_empty(LOG_LEVEL_ENV) {
            self.logging.level = level;
        }
    }

    pub fn log_summary(&self) {
        let llm = &self.llm;
        debug!(
            "Loaded LLM config: model={}, model_provider={}, temperature={}, base_url={}, max_tokens={}, api_key={}",
            llm.model,
            llm.model_provider,
            llm.temperature,
            llm.base_url,
            llm.max_tokens,
            mask_secret(llm.api_key.as_deref())
        );

        let translation = &self.translation;
        debug!(
            "Loaded translation config: provider={}, source_lang={}, target_lang={}, use_cache={}, timeout={}s, api_key={}",
            translation.provider,
            translation.source_lang,
            translation.target_lang,
            translation.use_cache,
            translation.timeout,
            mask_secret(translation.api_key.as_deref())
        );
    }
}
