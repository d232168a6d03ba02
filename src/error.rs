use thiserror::Error;

/// Failure kinds surfaced by the translation and LLM adapters.
///
/// Adapters only wrap errors that originate in a backend; everything else
/// travels up unchanged to the HTTP boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Backend translation or language detection failure
    #[error("{0}")]
    Translation(String),

    /// Backend chat-completion failure or malformed response
    #[error("{0}")]
    Llm(String),

    /// Construction-time failure (settings, backend client)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unsupported language code
    #[error("{0}")]
    InvalidArgument(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::Configuration(err.to_string())
    }
}
