use std::future::Future;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::cache::{CacheKey, TranslationCache};
use super::factory::TranslatorFactory;
use super::interface::TranslatorInterface;
use super::languages;
use crate::config_manager::{TranslationSettings, AUTO_LANGUAGE};
use crate::error::{ServiceError, ServiceResult};
use crate::utils::BackgroundRuntime;

/// Detected-language placeholder for empty input
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Synchronous translation adapter.
///
/// Backend calls are asynchronous; each one is submitted to a dedicated
/// background worker created with the service and the caller blocks until
/// it resolves. Failed calls are not retried and never cached.
pub struct TranslationService {
    translator: Arc<dyn TranslatorInterface>,
    runtime: BackgroundRuntime,
    cache: Option<TranslationCache>,
    source_lang: String,
    target_lang: String,
}

impl TranslationService {
    /// Build the service with the backend named in `settings.provider`
    pub fn new(settings: &TranslationSettings) -> ServiceResult<Self> {
        let translator = TranslatorFactory::create_translator(settings)?;
        Self::with_translator(settings, translator)
    }

    pub fn with_translator(
        settings: &TranslationSettings,
        translator: Arc<dyn TranslatorInterface>,
    ) -> ServiceResult<Self> {
        info!("Initializing TranslationService with backend {}", translator.name());

        let runtime = BackgroundRuntime::new("translation-worker")
            .map_err(|e| ServiceError::Configuration(e.to_string()))?;

        let cache = settings
            .use_cache
            .then(|| TranslationCache::new(settings.cache_capacity));

        debug!(
            "TranslationService configured with: source_lang={}, target_lang={}, use_cache={}",
            settings.source_lang, settings.target_lang, settings.use_cache
        );

        Ok(Self {
            translator,
            runtime,
            cache,
            source_lang: settings.source_lang.clone(),
            target_lang: settings.target_lang.clone(),
        })
    }

    /// Default target language used when a call does not name one
    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    pub fn cache(&self) -> Option<&TranslationCache> {
        self.cache.as_ref()
    }

    /// Whether `code` is a supported language identifier.
    ///
    /// "auto" is not a language; callers skip validation for it.
    pub fn validate_language_code(&self, code: &str) -> bool {
        languages::is_supported(code)
    }

    /// Detect the language of `text`.
    ///
    /// Empty or whitespace-only text yields "und" without a backend call.
    pub fn detect_language(&self, text: &str) -> ServiceResult<String> {
        if text.trim().is_empty() {
            warn!("Empty text provided for language detection");
            return Ok(UNDETERMINED_LANGUAGE.to_string());
        }

        let translator = self.translator.clone();
        let owned = text.to_string();
        let detected = self
            .resolve(async move { translator.detect(&owned).await })
            .map_err(|e| {
                error!("Language detection error: {:#}", e);
                ServiceError::Translation(format!("Language detection failed: {e:#}"))
            })?;

        debug!("Detected language: {}", detected);
        Ok(detected)
    }

    /// Translate `text`, falling back to the configured languages when
    /// `target_lang` or `source_lang` is absent.
    ///
    /// Empty or whitespace-only text is returned unchanged.
    pub fn translate(
        &self,
        text: &str,
        target_lang: Option<&str>,
        source_lang: Option<&str>,
    ) -> ServiceResult<String> {
        if text.trim().is_empty() {
            warn!("Empty text provided for translation");
            return Ok(text.to_string());
        }

        let target = target_lang
            .filter(|lang| !lang.is_empty())
            .unwrap_or(self.target_lang.as_str());
        let source = source_lang
            .filter(|lang| !lang.is_empty())
            .unwrap_or(self.source_lang.as_str());

        if target != AUTO_LANGUAGE && !self.validate_language_code(target) {
            error!("Invalid target language code: {}", target);
            return Err(ServiceError::InvalidArgument(format!(
                "Invalid target language code: {target}"
            )));
        }

        if source != AUTO_LANGUAGE && !self.validate_language_code(source) {
            error!("Invalid source language code: {}", source);
            return Err(ServiceError::InvalidArgument(format!(
                "Invalid source language code: {source}"
            )));
        }

        info!(
            "Translating text from {} to {}",
            languages::language_name(source).unwrap_or(source),
            languages::language_name(target).unwrap_or(target)
        );

        let key = CacheKey::new(text, target, source);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key) {
                debug!("Translation cache hit ({} entries)", cache.len());
                return Ok(hit);
            }
        }

        let translated = self.call_backend(&key)?;

        if let Some(cache) = &self.cache {
            cache.insert(key, translated.clone());
        }

        Ok(translated)
    }

    fn call_backend(&self, key: &CacheKey) -> ServiceResult<String> {
        let translator = self.translator.clone();
        let key = key.clone();
        let (source, target) = (key.source_lang.clone(), key.target_lang.clone());

        let translated = self
            .resolve(async move {
                translator
                    .translate(&key.text, &key.target_lang, &key.source_lang)
                    .await
            })
            .map_err(|e| {
                error!("Translation error: {:#}", e);
                ServiceError::Translation(format!("Translation request failed: {e:#}"))
            })?;

        debug!("Translated text from {} to {}", source, target);
        Ok(translated)
    }

    /// Drive a backend future to completion on the background worker
    fn resolve<F, T>(&self, future: F) -> anyhow::Result<T>
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.runtime.block_on(future)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockTranslator;
    use std::thread;

    fn service_with(mock: Arc<MockTranslator>, use_cache: bool) -> TranslationService {
        let settings = TranslationSettings {
            use_cache,
            ..TranslationSettings::default()
        };
        TranslationService::with_translator(&settings, mock).unwrap()
    }

    #[test]
    fn test_validate_language_code() {
        let service = service_with(Arc::new(MockTranslator::detecting("es")), true);

        assert!(service.validate_language_code("en"));
        assert!(service.validate_language_code("es"));
        assert!(service.validate_language_code("fr"));
        assert!(!service.validate_language_code("xx"));
        assert!(!service.validate_language_code("invalid"));
        assert!(!service.validate_language_code("EN"));
        assert!(!service.validate_language_code("zh_TW"));
    }

    #[test]
    fn test_translate_rejects_non_canonical_codes() {
        let mock = Arc::new(MockTranslator::detecting("es"));
        let service = service_with(mock.clone(), true);

        let err = service.translate("Hola", Some("EN"), Some("es")).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(msg) if msg.contains("EN")));
        assert_eq!(mock.translate_calls(), 0);
        assert!(service.cache().unwrap().is_empty());
    }

    #[test]
    fn test_detect_language() {
        let mock = Arc::new(MockTranslator::detecting("es"));
        let service = service_with(mock.clone(), true);

        assert_eq!(service.detect_language("¿Cómo estás hoy?").unwrap(), "es");
        assert_eq!(mock.detect_calls(), 1);
    }

    #[test]
    fn test_detect_language_empty_text_skips_backend() {
        let mock = Arc::new(MockTranslator::detecting("es"));
        let service = service_with(mock.clone(), true);

        assert_eq!(service.detect_language("   ").unwrap(), UNDETERMINED_LANGUAGE);
        assert_eq!(service.detect_language("").unwrap(), UNDETERMINED_LANGUAGE);
        assert_eq!(mock.detect_calls(), 0);
    }

    #[test]
    fn test_detect_language_backend_failure() {
        let service = service_with(Arc::new(MockTranslator::failing("service down")), true);

        let err = service.detect_language("Hola").unwrap_err();
        match err {
            ServiceError::Translation(msg) => assert!(msg.contains("service down")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_translate_uses_defaults() {
        let mock = Arc::new(MockTranslator::detecting("es"));
        let service = service_with(mock.clone(), false);

        let translated = service.translate("Hola", None, None).unwrap();
        assert_eq!(translated, "[auto->en] Hola");
    }

    #[test]
    fn test_translate_empty_text_is_noop() {
        let mock = Arc::new(MockTranslator::detecting("es"));
        let service = service_with(mock.clone(), true);

        assert_eq!(service.translate("", Some("en"), None).unwrap(), "");
        assert_eq!(service.translate("  \n", Some("en"), None).unwrap(), "  \n");
        assert_eq!(mock.translate_calls(), 0);
    }

    #[test]
    fn test_translate_rejects_invalid_codes() {
        let mock = Arc::new(MockTranslator::detecting("es"));
        let service = service_with(mock.clone(), true);

        let err = service.translate("Hola", Some("xx"), None).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));

        let err = service.translate("Hola", Some("en"), Some("invalid")).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));

        assert_eq!(mock.translate_calls(), 0);
    }

    #[test]
    fn test_translate_cache_hit_skips_backend() {
        let mock = Arc::new(MockTranslator::detecting("es").with_translation("How are you today?"));
        let service = service_with(mock.clone(), true);

        let first = service.translate("¿Cómo estás hoy?", Some("en"), Some("es")).unwrap();
        let second = service.translate("¿Cómo estás hoy?", Some("en"), Some("es")).unwrap();

        assert_eq!(first, "How are you today?");
        assert_eq!(first, second);
        assert_eq!(mock.translate_calls(), 1);
        assert_eq!(service.cache().unwrap().len(), 1);
    }

    #[test]
    fn test_translate_without_cache_calls_backend_each_time() {
        let mock = Arc::new(MockTranslator::detecting("es"));
        let service = service_with(mock.clone(), false);

        service.translate("Hola", Some("en"), Some("es")).unwrap();
        service.translate("Hola", Some("en"), Some("es")).unwrap();

        assert_eq!(mock.translate_calls(), 2);
        assert!(service.cache().is_none());
    }

    #[test]
    fn test_translate_backend_failure_is_not_cached() {
        let mock = Arc::new(MockTranslator::failing("quota exceeded"));
        let service = service_with(mock.clone(), true);

        for _ in 0..2 {
            let err = service.translate("Hola", Some("en"), Some("es")).unwrap_err();
            match err {
                ServiceError::Translation(msg) => assert!(msg.contains("quota exceeded")),
                other => panic!("unexpected error: {other:?}"),
            }
        }

        assert_eq!(mock.translate_calls(), 2);
        assert!(service.cache().unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_translations_do_not_cross_talk() {
        let mock = Arc::new(MockTranslator::detecting("es").with_delay_ms(10));
        let service = Arc::new(service_with(mock.clone(), true));

        let targets = ["en", "fr", "de", "it"];
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = service.clone();
                let target = targets[i % targets.len()];
                thread::spawn(move || {
                    let text = format!("mensaje {i}");
                    let translated = service.translate(&text, Some(target), Some("es")).unwrap();
                    (text, target, translated)
                })
            })
            .collect();

        for handle in handles {
            let (text, target, translated) = handle.join().unwrap();
            assert_eq!(translated, format!("[es->{target}] {text}"));
        }
        assert_eq!(mock.translate_calls(), 8);
    }
}
