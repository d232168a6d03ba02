pub mod llm;
pub mod main;
pub mod system;
pub mod translation;
pub mod utils;

pub use llm::LlmSettings;
pub use main::Config;
pub use system::{LogFormat, LoggingSettings, ServerSettings};
pub use translation::{TranslationSettings, AUTO_LANGUAGE};
