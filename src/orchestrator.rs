use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::agent::LlmService;
use crate::config_manager::Config;
use crate::error::{ServiceError, ServiceResult};
use crate::translate::TranslationService;

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub original_text: String,
    /// `None` only for empty or whitespace-only input
    pub detected_language: Option<String>,
    pub translated_text: String,
    pub llm_response: String,
}

/// Detect, translate when needed, then ask the LLM.
///
/// Holds nothing besides its two adapters, both built once at startup.
pub struct TranslateLlm {
    translation: TranslationService,
    llm: LlmService,
}

impl TranslateLlm {
    pub fn new(translation: TranslationService, llm: LlmService) -> Self {
        Self { translation, llm }
    }

    /// Build both adapters from loaded configuration
    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        info!("Initializing TranslateLLM service");

        let translation = TranslationService::new(&config.translation)?;
        let llm = LlmService::new(Some(config.llm.clone()))?;

        debug!("TranslateLLM service initialized successfully");
        Ok(Self::new(translation, llm))
    }

    pub fn translation(&self) -> &TranslationService {
        &self.translation
    }

    pub fn llm(&self) -> &LlmService {
        &self.llm
    }

    /// Run the full pipeline over `text`.
    ///
    /// `source_lang` skips detection. Translation happens only when the
    /// detected language differs from `target_lang`, or from the configured
    /// default target when none is given. Adapter errors are returned as-is.
    pub fn process(
        &self,
        text: &str,
        target_lang: Option<&str>,
        source_lang: Option<&str>,
        system_prompt: Option<&str>,
    ) -> ServiceResult<ProcessResult> {
        if text.trim().is_empty() {
            warn!("Empty text provided");
            return Ok(ProcessResult {
                original_text: text.to_string(),
                detected_language: None,
                translated_text: text.to_string(),
                llm_response: String::new(),
            });
        }

        self.run(text, target_lang, source_lang, system_prompt)
            .map_err(|e| {
                match &e {
                    ServiceError::Translation(msg) => error!("Translation error: {}", msg),
                    ServiceError::Llm(msg) => error!("LLM error: {}", msg),
                    other => error!("Unexpected error: {}", other),
                }
                e
            })
    }

    fn run(
        &self,
        text: &str,
        target_lang: Option<&str>,
        source_lang: Option<&str>,
        system_prompt: Option<&str>,
    ) -> ServiceResult<ProcessResult> {
        let target_lang = target_lang.filter(|lang| !lang.is_empty());

        let detected = match source_lang.filter(|lang| !lang.is_empty()) {
            Some(lang) => lang.to_string(),
            None => self.translation.detect_language(text)?,
        };
        info!("Detected language: {}", detected);

        let needs_translation = match target_lang {
            Some(target) => detected != target,
            None => detected != self.translation.target_lang(),
        };

        let translated_text = if needs_translation {
            let translated = self.translation.translate(text, target_lang, Some(&detected))?;
            info!("Text translated successfully");
            translated
        } else {
            text.to_string()
        };

        let llm_response = self.llm.process_text(&translated_text, system_prompt)?;
        info!("LLM processing completed");

        Ok(ProcessResult {
            original_text: text.to_string(),
            detected_language: Some(detected),
            translated_text,
            llm_response,
        })
    }
}
