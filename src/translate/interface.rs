use async_trait::async_trait;

/// Interface for a remote translation backend.
///
/// Implementations are asynchronous; `TranslationService` drives them to
/// completion on its background worker and exposes a blocking API.
#[async_trait]
pub trait TranslatorInterface: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Translate `text` from `source_lang` (may be "auto") into `target_lang`
    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, anyhow::Error>;

    /// Detect the language of `text`, returning a language code
    async fn detect(&self, text: &str) -> Result<String, anyhow::Error>;
}
