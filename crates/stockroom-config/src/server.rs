use crate::{env_flag, env_or};

/// HTTP listener and process-level settings.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Expose `/metrics` and record request metrics.
    pub metrics_enabled: bool,
    /// bcrypt work factor used for new password hashes.
    pub bcrypt_cost: u32,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Directory for the rolling log files.
    pub log_dir: String,
    /// Default filter level when `RUST_LOG` is not set.
    pub level: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            metrics_enabled: env_flag("METRICS_ENABLED", true),
            bcrypt_cost: env_or("BCRYPT_COST", 12),
            logging: LoggingConfig {
                log_dir: env_or("LOG_DIR", "storage/logs".to_string()),
                level: env_or("LOG_LEVEL", "info".to_string()),
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
