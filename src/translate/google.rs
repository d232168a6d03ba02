use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::interface::TranslatorInterface;
use super::languages::normalize_code;

pub const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Translator backed by the public Google Translate web endpoint (`client=gtx`).
///
/// Detection reuses the translate call: the detected source language comes
/// back in the third element of the response array.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, endpoint: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| GOOGLE_TRANSLATE_URL.to_string());
        debug!("Initialized GoogleTranslator: endpoint={}", endpoint);
        Self { client, endpoint }
    }

    async fn request(&self, text: &str, source_lang: &str, target_lang: &str) -> anyhow::Result<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .header(reqwest::header::USER_AGENT, "Mozilla/5.0")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Google Translate API error: {} - {}", status, body);
        }

        Ok(response.json().await?)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
pub(crate) fn parse_translation(json: &Value) -> Option<String> {
    let segments = json.get(0)?.as_array()?;
    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    if translated.is_empty() {
        None
    } else {
        Some(translated)
    }
}

pub(crate) fn parse_detected_language(json: &Value) -> Option<String> {
    json.get(2)
        .and_then(|v| v.as_str())
        .filter(|lang| !lang.is_empty())
        .map(normalize_code)
}

#[async_trait]
impl TranslatorInterface for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, anyhow::Error> {
        let json = self.request(text, source_lang, target_lang).await?;
        parse_translation(&json)
            .ok_or_else(|| anyhow::anyhow!("Google Translate returned no translated text"))
    }

    async fn detect(&self, text: &str) -> Result<String, anyhow::Error> {
        let json = self.request(text, "auto", "en").await?;
        parse_detected_language(&json)
            .ok_or_else(|| anyhow::anyhow!("Google Translate returned no detected language"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_translation_joins_segments() {
        let body = json!([
            [["How are you ", "¿Cómo estás ", null, null, 10], ["today?", "hoy?", null, null, 10]],
            null,
            "es"
        ]);
        assert_eq!(parse_translation(&body).as_deref(), Some("How are you today?"));
    }

    #[test]
    fn test_parse_translation_rejects_empty_payload() {
        assert_eq!(parse_translation(&json!([[], null, "es"])), None);
        assert_eq!(parse_translation(&json!({})), None);
    }

    #[test]
    fn test_parse_detected_language_normalizes_code() {
        let body = json!([[["Hello", "你好", null, null, 10]], null, "zh-CN"]);
        assert_eq!(parse_detected_language(&body).as_deref(), Some("zh-cn"));
        assert_eq!(parse_detected_language(&json!([[], null, null])), None);
    }
}
