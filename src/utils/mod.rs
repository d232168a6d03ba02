pub mod background_runtime;
pub mod logging;

pub use background_runtime::{BackgroundRuntime, BackgroundRuntimeError};
