pub mod agent;
pub mod config_manager;
pub mod error;
pub mod orchestrator;
pub mod routes;
pub mod state;
pub mod translate;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use error::{ServiceError, ServiceResult};
pub use orchestrator::{ProcessResult, TranslateLlm};
