use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::ServiceError;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "Translate2LLM API";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

type ApiError = (StatusCode, Json<Value>);

/// Request body for `POST /translate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,

    #[serde(default = "default_target_lang")]
    pub target_lang: String,

    /// Skips detection when present
    #[serde(default)]
    pub source_lang: Option<String>,

    /// An explicit `null` disables the system prompt
    #[serde(default = "default_system_prompt")]
    pub system_prompt: Option<String>,
}

fn default_target_lang() -> String {
    "en".to_string()
}

fn default_system_prompt() -> Option<String> {
    Some(DEFAULT_SYSTEM_PROMPT.to_string())
}

/// Response body for `POST /translate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub original_text: String,
    pub detected_language: Option<String>,
    pub translated_text: String,
    pub llm_response: String,
    pub target_language: String,
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/translate", post(translate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let service = state.service.clone();
    let target_language = request.target_lang.clone();

    // The pipeline blocks on its backends; keep it off the async workers
    let result = tokio::task::spawn_blocking(move || {
        service.process(
            &request.text,
            Some(&request.target_lang),
            request.source_lang.as_deref(),
            request.system_prompt.as_deref(),
        )
    })
    .await
    .map_err(|e| {
        error!("Unexpected error: {}", e);
        detail(StatusCode::INTERNAL_SERVER_ERROR, format!("Internal server error: {e}"))
    })?
    .map_err(error_response)?;

    Ok(Json(TranslateResponse {
        original_text: result.original_text,
        detected_language: result.detected_language,
        translated_text: result.translated_text,
        llm_response: result.llm_response,
        target_language,
    }))
}

fn detail(status: StatusCode, message: String) -> ApiError {
    (status, Json(json!({ "detail": message })))
}

/// Map a pipeline failure to a status code and a kind-specific message prefix
fn error_response(err: ServiceError) -> ApiError {
    match err {
        ServiceError::Translation(msg) => {
            error!("Translation error: {}", msg);
            detail(StatusCode::INTERNAL_SERVER_ERROR, format!("Translation failed: {msg}"))
        }
        ServiceError::Llm(msg) => {
            error!("LLM error: {}", msg);
            detail(StatusCode::INTERNAL_SERVER_ERROR, format!("LLM processing failed: {msg}"))
        }
        ServiceError::InvalidArgument(msg) => {
            error!("Invalid argument: {}", msg);
            detail(StatusCode::BAD_REQUEST, format!("Invalid argument: {msg}"))
        }
        other => {
            error!("Unexpected error: {}", other);
            detail(StatusCode::INTERNAL_SERVER_ERROR, format!("Internal server error: {other}"))
        }
    }
}
