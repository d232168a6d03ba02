use anyhow::Result;
use tracing::{info, warn};

use translate2llm::config_manager::{utils::resolve_config_path, Config};
use translate2llm::routes;
use translate2llm::state::AppState;
use translate2llm::utils::logging::init_tracing;
use translate2llm::TranslateLlm;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config_path = resolve_config_path();
    let config = Config::load(&config_path)?;

    init_tracing(&config.logging);
    info!("Loaded configuration from: {}", config_path);
    config.log_summary();

    // Adapter construction spins up worker threads that block during startup
    let service_config = config.clone();
    let service =
        tokio::task::spawn_blocking(move || TranslateLlm::from_config(&service_config)).await??;

    let app_state = AppState::new(service);

    let probe = app_state.service.clone();
    if !tokio::task::spawn_blocking(move || probe.llm().is_available()).await? {
        warn!(
            "LLM backend at {} is not reachable; requests will fail until it is",
            config.llm.base_url
        );
    }

    let app = routes::create_routes(app_state);

    let addr = config.server.socket_addr()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
