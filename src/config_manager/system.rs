use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// HTTP listener settings (`[server]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Line layout of the tracing formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Compact,
    Pretty,
}

/// Logging settings (`[logging]` section, `LOG_LEVEL` wins)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,

    /// `full`, `compact` or `pretty`
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "INFO".to_string()
}

fn default_format() -> String {
    "full".to_string()
}

impl LoggingSettings {
    /// Accepts both tracing names and the classic WARNING/CRITICAL spellings.
    pub fn tracing_level(&self) -> &'static str {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" | "warning" => "warn",
            "error" | "critical" | "fatal" => "error",
            _ => "info",
        }
    }

    /// Unrecognized values fall back to the full layout.
    pub fn log_format(&self) -> LogFormat {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "compact" => LogFormat::Compact,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Full,
        }
    }

    /// `EnvFilter` directive for this crate and the HTTP tracing layer
    pub fn filter_directive(&self) -> String {
        let level = self.tracing_level();
        format!("translate2llm={level},translate2llm_demo={level},tower_http={level}")
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
