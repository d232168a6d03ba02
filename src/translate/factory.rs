use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::google::GoogleTranslator;
use super::interface::TranslatorInterface;
use super::libretranslate::LibreTranslator;
use crate::config_manager::TranslationSettings;
use crate::error::{ServiceError, ServiceResult};

/// Factory for creating translation backends
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator based on `settings.provider`.
    ///
    /// The HTTP client carries the configured timeout; it is the only
    /// timeout applied to translation calls.
    pub fn create_translator(settings: &TranslationSettings) -> ServiceResult<Arc<dyn TranslatorInterface>> {
        info!("Initializing translator: {}", settings.provider);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .build()
            .map_err(|e| ServiceError::Configuration(format!("failed to build HTTP client: {e}")))?;

        match settings.provider.to_ascii_lowercase().as_str() {
            "google" | "googletrans" => Ok(Arc::new(GoogleTranslator::new(
                client,
                settings.base_url.clone(),
            ))),
            "libretranslate" | "libre" => Ok(Arc::new(LibreTranslator::new(
                client,
                settings.base_url.clone(),
                settings.api_key.clone(),
            ))),
            other => Err(ServiceError::Configuration(format!(
                "Unsupported translation provider: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_providers() {
        let mut settings = TranslationSettings::default();
        assert_eq!(TranslatorFactory::create_translator(&settings).unwrap().name(), "google");

        settings.provider = "LibreTranslate".to_string();
        assert_eq!(
            TranslatorFactory::create_translator(&settings).unwrap().name(),
            "libretranslate"
        );
    }

    #[test]
    fn test_unknown_provider_is_configuration_error() {
        let settings = TranslationSettings {
            provider: "babelfish".to_string(),
            ..TranslationSettings::default()
        };
        let err = TranslatorFactory::create_translator(&settings).err().unwrap();
        assert!(matches!(err, ServiceError::Configuration(_)));
    }
}
