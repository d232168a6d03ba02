use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::interface::TranslatorInterface;
use super::languages::normalize_code;

pub const DEFAULT_LIBRETRANSLATE_URL: &str = "http://localhost:5000";

/// Translator backed by a LibreTranslate server
pub struct LibreTranslator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateReply {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct DetectReply {
    language: String,
    #[serde(default)]
    confidence: f64,
}

impl LibreTranslator {
    pub fn new(client: Client, base_url: Option<String>, api_key: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_LIBRETRANSLATE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        debug!("Initialized LibreTranslator: base_url={}", base_url);
        Self {
            client,
            base_url,
            api_key,
        }
    }

    async fn post(&self, path: &str, mut body: serde_json::Value) -> anyhow::Result<reqwest::Response> {
        if let Some(api_key) = &self.api_key {
            body["api_key"] = serde_json::Value::String(api_key.clone());
        }

        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("LibreTranslate API error: {} - {}", status, body);
        }

        Ok(response)
    }
}

#[async_trait]
impl TranslatorInterface for LibreTranslator {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, anyhow::Error> {
        let body = json!({
            "q": text,
            "source": source_lang,
            "target": target_lang,
            "format": "text",
        });

        parse_translation(self.post("/translate", body).await?.json().await?)
    }

    async fn detect(&self, text: &str) -> Result<String, anyhow::Error> {
        parse_detection(self.post("/detect", json!({ "q": text })).await?.json().await?)
    }
}

pub(crate) fn parse_translation(json: Value) -> anyhow::Result<String> {
    let reply: TranslateReply = serde_json::from_value(json)?;
    Ok(reply.translated_text)
}

/// Pick the highest-confidence candidate of a `/detect` reply
pub(crate) fn parse_detection(json: Value) -> anyhow::Result<String> {
    let replies: Vec<DetectReply> = serde_json::from_value(json)?;

    let best = replies
        .into_iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .ok_or_else(|| anyhow::anyhow!("LibreTranslate detected no language"))?;

    debug!("LibreTranslate detected {} ({:.1})", best.language, best.confidence);
    Ok(normalize_code(&best.language))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translation() {
        let json = json!({ "translatedText": "How are you today?" });
        assert_eq!(parse_translation(json).unwrap(), "How are you today?");

        assert!(parse_translation(json!({ "error": "quota" })).is_err());
    }

    #[test]
    fn test_parse_detection_picks_highest_confidence() {
        let json = json!([
            { "language": "pt", "confidence": 41.0 },
            { "language": "es", "confidence": 92.5 },
            { "language": "it", "confidence": 12.0 }
        ]);
        assert_eq!(parse_detection(json).unwrap(), "es");
    }

    #[test]
    fn test_parse_detection_normalizes_code() {
        let json = json!([{ "language": "zh_CN", "confidence": 80.0 }]);
        assert_eq!(parse_detection(json).unwrap(), "zh-cn");
    }

    #[test]
    fn test_parse_detection_empty_list_fails() {
        let err = parse_detection(json!([])).unwrap_err();
        assert!(err.to_string().contains("detected no language"));
    }
}
