//! Runs a handful of greetings through the pipeline and prints the results.

use anyhow::Result;
use tracing::{error, info, warn};

use translate2llm::config_manager::{utils::resolve_config_path, Config};
use translate2llm::utils::logging::init_tracing;
use translate2llm::TranslateLlm;

const DEMO_PROMPT: &str = "You are a helpful assistant. Please provide a friendly response.";

const SAMPLES: [&str; 5] = [
    "¿Cómo estás hoy?",
    "Comment allez-vous aujourd'hui?",
    "Wie geht es Ihnen heute?",
    "Come stai oggi?",
    "How are you today?",
];

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::load(&resolve_config_path())?;
    init_tracing(&config.logging);

    let service = TranslateLlm::from_config(&config)?;

    if !service.llm().is_available() {
        warn!(
            "LLM backend at {} is not available. Make sure it is running.",
            config.llm.base_url
        );
        return Ok(());
    }

    for text in SAMPLES {
        info!("Processing: {}", text);
        match service.process(text, Some("en"), None, Some(DEMO_PROMPT)) {
            Ok(result) => {
                println!("\nOriginal text: {}", result.original_text);
                println!(
                    "Detected language: {}",
                    result.detected_language.as_deref().unwrap_or("-")
                );
                println!("Translated text: {}", result.translated_text);
                println!("LLM response: {}", result.llm_response);
                println!("{}", "-".repeat(50));
            }
            Err(e) => error!("Error processing text '{}': {}", text, e),
        }
    }

    Ok(())
}
