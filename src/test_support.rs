//! In-memory backends for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::agent::interface::{ChatResponse, Message};
use crate::agent::stateless_llm::StatelessLLMInterface;
use crate::translate::TranslatorInterface;

/// Translator with a fixed detection result.
///
/// Translations are `"[source->target] text"` unless a fixed translation is set.
pub struct MockTranslator {
    detected: Result<String, String>,
    fixed_translation: Option<String>,
    fail_translate: Option<String>,
    delay: Option<Duration>,
    detect_calls: AtomicUsize,
    translate_calls: AtomicUsize,
    last_translate_args: Mutex<Option<(String, String)>>,
}

impl MockTranslator {
    pub fn detecting(lang: &str) -> Self {
        Self {
            detected: Ok(lang.to_string()),
            fixed_translation: None,
            fail_translate: None,
            delay: None,
            detect_calls: AtomicUsize::new(0),
            translate_calls: AtomicUsize::new(0),
            last_translate_args: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            detected: Err(message.to_string()),
            fail_translate: Some(message.to_string()),
            ..Self::detecting("und")
        }
    }

    pub fn with_translation(mut self, translation: &str) -> Self {
        self.fixed_translation = Some(translation.to_string());
        self
    }

    pub fn with_delay_ms(mut self, millis: u64) -> Self {
        self.delay = Some(Duration::from_millis(millis));
        self
    }

    pub fn detect_calls(&self) -> usize {
        self.detect_calls.load(Ordering::SeqCst)
    }

    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }

    /// (target, source) of the most recent translate call
    pub fn last_translate_args(&self) -> Option<(String, String)> {
        self.last_translate_args.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslatorInterface for MockTranslator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(
        &self,
        text: &str,
        target_lang: &str,
        source_lang: &str,
    ) -> Result<String, anyhow::Error> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_translate_args.lock().unwrap() =
            Some((target_lang.to_string(), source_lang.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.fail_translate {
            anyhow::bail!("{}", message);
        }

        Ok(match &self.fixed_translation {
            Some(translation) => translation.clone(),
            None => format!("[{source_lang}->{target_lang}] {text}"),
        })
    }

    async fn detect(&self, _text: &str) -> Result<String, anyhow::Error> {
        self.detect_calls.fetch_add(1, Ordering::SeqCst);
        self.detected.clone().map_err(|message| anyhow::anyhow!(message))
    }
}

/// Chat model returning a canned reply and recording what it was sent
pub struct MockChatModel {
    reply: Result<Option<ChatResponse>, String>,
    calls: AtomicUsize,
    last_messages: Mutex<Vec<Message>>,
}

impl MockChatModel {
    fn with_reply(reply: Result<Option<ChatResponse>, String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(content: &str) -> Self {
        Self::with_reply(Ok(Some(ChatResponse::with_content(content))))
    }

    /// Backend answers with nothing at all
    pub fn empty() -> Self {
        Self::with_reply(Ok(None))
    }

    /// Backend answers without a content field
    pub fn without_content() -> Self {
        Self::with_reply(Ok(Some(ChatResponse { content: None })))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Err(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Vec<Message> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatelessLLMInterface for MockChatModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat_completion(&self, messages: &[Message]) -> Result<Option<ChatResponse>, anyhow::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        self.reply.clone().map_err(|message| anyhow::anyhow!(message))
    }
}
