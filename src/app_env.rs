use anyhow::Context;
use std::env;

/// Filesystem path of the SQLite database file. The parent directory is created on
/// startup if the path contains one.
pub const DB_PATH: &str = "DB_PATH";
/// Port the HTTP listener binds on
pub const PORT: &str = "PORT";
/// Name of the environment the service runs in, reported by the health endpoint
pub const APP_ENVIRONMENT: &str = "APP_ENVIRONMENT";
/// Log level configuration for the application. For formatting info, see
/// [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// Process-wide settings, resolved from the environment exactly once at startup and
/// handed to the rest of the application explicitly
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub port: u16,
    pub environment: String,
}

impl AppConfig {
    /// Reads the application config from the environment. Every variable is optional
    /// and falls back to a development-friendly default.
    pub fn from_env() -> Result<AppConfig, anyhow::Error> {
        Ok(AppConfig {
            database_path: env::var(DB_PATH).unwrap_or_else(|_| "todo.db".to_owned()),
            port: parse_port(env::var(PORT).ok())?,
            environment: env::var(APP_ENVIRONMENT).unwrap_or_else(|_| "development".to_owned()),
        })
    }
}

fn parse_port(raw_port: Option<String>) -> Result<u16, anyhow::Error> {
    match raw_port {
        Some(port) => port
            .parse()
            .with_context(|| format!("{PORT} must be a valid port number, got \"{port}\"")),
        None => Ok(5001),
    }
}
