use std::path::PathBuf;
use std::str::FromStr;

use common::config::ModelConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tracing::Level;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Directory holding stored PDFs.
    pub dir: PathBuf,
    /// Largest accepted upload, in MiB.
    pub max_size_mb: u64,
}

impl UploadConfig {
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Enables `/debug-info` and forces DEBUG log output.
    pub debug: bool,
}

impl LoggingConfig {
    /// Max level for the fmt subscriber; unknown names fall back to INFO.
    pub fn max_level(&self) -> Level {
        if self.debug {
            return Level::DEBUG;
        }
        Level::from_str(self.level.trim()).unwrap_or(Level::INFO)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub model: ModelConfig,
    pub upload: UploadConfig,
    pub logging: LoggingConfig,
}

/// Flat environment variables accepted alongside the `PDFCHAT__*` ones.
/// They take precedence when both are set.
const FLAT_ENV_KEYS: &[(&str, &str)] = &[
    ("GEMINI_API_KEY", "model.api_key"),
    ("AI_MODEL_NAME", "model.model_name"),
    ("RETRY_ATTEMPTS", "model.retry_attempts"),
    ("TIMEOUT_SECONDS", "model.timeout_secs"),
    ("DATABASE_URL", "database.url"),
    ("MAX_FILE_SIZE_MB", "upload.max_size_mb"),
    ("UPLOAD_DIR", "upload.dir"),
    ("DEBUG", "logging.debug"),
    ("LOG_LEVEL", "logging.level"),
];

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://pdf_chat.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("upload.dir", "uploads/pdf_files")?
            .set_default("upload.max_size_mb", 20)?
            .set_default("logging.level", "info")?
            .set_default("logging.debug", false)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PDFCHAT__MODEL__API_KEY)
            .add_source(
                Environment::with_prefix("PDFCHAT")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allow_origins")
                    .try_parsing(true),
            );

        for (var, key) in FLAT_ENV_KEYS {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "model.api_key (GEMINI_API_KEY) must be set".into(),
            ));
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "model.timeout_secs (TIMEOUT_SECONDS) must be greater than zero".into(),
            ));
        }
        if self.upload.max_size_mb == 0 {
            return Err(ConfigError::Message(
                "upload.max_size_mb must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
