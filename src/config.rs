use serde::{Deserialize, Serialize};
use crate::client::api::{DEFAULT_API_LOG_FILE, DEFAULT_TIMEOUT_SECONDS};
use crate::error::ApiError;
use crate::{v_debug, v_info};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TravelMateConfig {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the API, including the /api prefix
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthConfig {
    /// File the bearer token is saved to after register/login
    pub token_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Append every request/response pair to `api_log_file`
    pub api_logging: bool,
    pub api_log_file: String,
    /// 0 = quiet, 1 = basic, 2 = full
    pub verbosity: u8,
}

impl Default for TravelMateConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: crate::DEFAULT_API_BASE_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            },
            auth: AuthConfig {
                token_file: crate::AUTH_TOKEN_FILE.to_string(),
            },
            logging: LoggingConfig {
                api_logging: false,
                api_log_file: DEFAULT_API_LOG_FILE.to_string(),
                verbosity: 1,
            },
        }
    }
}

impl TravelMateConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            v_debug!("📋 Loading configuration from {}", config_path.display());
            Self::load(config_path)
        } else {
            v_info!("📋 Creating default configuration at {}", config_path.display());
            let config = TravelMateConfig::default();
            config.save(config_path)?;
            v_info!("💡 Edit {} to point at a different server", config_path.display());
            Ok(config)
        }
    }

    pub fn load(config_path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let config_str = fs::read_to_string(config_path)?;
        toml::from_str(&config_str).map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self, config_path: impl AsRef<Path>) -> Result<(), ApiError> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string_pretty(self).map_err(|e| ApiError::Config(e.to_string()))?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ApiError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.api.base_url
            )));
        }
        if self.api.timeout_seconds == 0 {
            return Err(ApiError::Config("timeout_seconds must be greater than 0".to_string()));
        }
        if self.auth.token_file.trim().is_empty() {
            return Err(ApiError::Config("token_file must not be empty".to_string()));
        }
        if self.logging.api_logging && self.logging.api_log_file.trim().is_empty() {
            return Err(ApiError::Config("api_log_file must be set when api_logging is on".to_string()));
        }
        if self.logging.verbosity > crate::verbosity::MAX_VERBOSITY {
            return Err(ApiError::Config(format!(
                "verbosity must be between 0 and {}",
                crate::verbosity::MAX_VERBOSITY
            )));
        }

        v_debug!("✅ Configuration validation passed");
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        v_debug!("📋 Configuration Summary:");
        v_debug!("   🌐 API: {}", self.api.base_url);
        v_debug!("   ⏰ Timeout: {}s", self.api.timeout_seconds);
        v_debug!("   🔑 Token file: {}", self.auth.token_file);
        if self.logging.api_logging {
            v_debug!("   📝 API log: {}", self.logging.api_log_file);
        }
    }
}
