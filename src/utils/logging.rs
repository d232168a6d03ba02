use tracing_subscriber::EnvFilter;

use crate::config_manager::{LogFormat, LoggingSettings};

/// Install the global tracing subscriber. Call once at process start.
pub fn init_tracing(settings: &LoggingSettings) {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(settings.filter_directive()));

    match settings.log_format() {
        LogFormat::Full => builder.init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
