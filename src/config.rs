use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub scanner: ScannerConfig,
    pub logging: LoggingConfig,
}

/// BscScan API client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// BscScan API endpoint URL
    pub endpoint: String,
    /// API key; uppercase alphanumeric, at least 20 characters
    pub api_key: String,
}

/// Scan behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Maximum outbound requests per rolling one-second window
    pub rate_limit: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum retries on a rate-limited API response
    pub max_retries: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            scanner: ScannerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.bscscan.com/api".to_string(),
            api_key: String::new(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            rate_limit: 5,
            timeout_seconds: 30,
            max_retries: 3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables.
    /// Environment variables take precedence over file values.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file().unwrap_or_default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file; a missing file yields defaults
    pub fn load_from_file() -> Result<Self, ConfigError> {
        let config_path = env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if !Path::new(&config_path).exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| ConfigError::FileNotFound(config_path.clone()))?;
        let config: AppConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parsing(e.to_string()))?;
        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(api_key) = env::var("BSCSCAN_API_KEY") {
            self.api.api_key = api_key;
        }
        if let Ok(endpoint) = env::var("BSCSCAN_ENDPOINT") {
            self.api.endpoint = endpoint;
        }
        if let Ok(rate_limit) = env::var("SCANNER_RATE_LIMIT") {
            self.scanner.rate_limit = rate_limit.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SCANNER_RATE_LIMIT".to_string(),
                value: rate_limit,
            })?;
        }
        if let Ok(timeout) = env::var("SCANNER_TIMEOUT_SECONDS") {
            self.scanner.timeout_seconds =
                timeout.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "SCANNER_TIMEOUT_SECONDS".to_string(),
                    value: timeout,
                })?;
        }
        if let Ok(retries) = env::var("SCANNER_MAX_RETRIES") {
            self.scanner.max_retries = retries.parse().map_err(|_| ConfigError::InvalidValue {
                key: "SCANNER_MAX_RETRIES".to_string(),
                value: retries,
            })?;
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.endpoint.starts_with("http://") && !self.api.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.api.endpoint.clone()));
        }

        validate_api_key(&self.api.api_key)?;

        if self.scanner.rate_limit == 0 || self.scanner.rate_limit > 50 {
            return Err(ConfigError::InvalidValue {
                key: "scanner.rate_limit".to_string(),
                value: self.scanner.rate_limit.to_string(),
            });
        }

        if self.scanner.timeout_seconds == 0 || self.scanner.timeout_seconds > 300 {
            return Err(ConfigError::InvalidValue {
                key: "scanner.timeout_seconds".to_string(),
                value: self.scanner.timeout_seconds.to_string(),
            });
        }

        if self.scanner.max_retries > 20 {
            return Err(ConfigError::InvalidValue {
                key: "scanner.max_retries".to_string(),
                value: self.scanner.max_retries.to_string(),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                value: self.logging.level.clone(),
            });
        }

        Ok(())
    }

    /// Generate a sample configuration file with a placeholder key
    pub fn generate_sample_config() -> Result<String, ConfigError> {
        let mut config = Self::default();
        config.api.api_key = "YOUR_API_KEY_HERE".to_string();
        toml::to_string_pretty(&config).map_err(|e| ConfigError::Parsing(e.to_string()))
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parsing(e.to_string()))?;
        fs::write(path, content).map_err(|_| ConfigError::FileNotFound(path.to_string()))?;
        Ok(())
    }
}

/// Validate the BscScan API key format: at least 20 characters, alphanumeric
/// with letters uppercase. Keys are typically 34 characters long.
pub fn validate_api_key(api_key: &str) -> Result<(), ConfigError> {
    if api_key.is_empty() {
        return Err(ConfigError::MissingApiKey);
    }

    if api_key.len() < 20 {
        return Err(ConfigError::InvalidApiKey(format!(
            "key too short: {} characters, expected at least 20",
            api_key.len()
        )));
    }

    if !api_key
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(ConfigError::InvalidApiKey(
            "key must contain only uppercase letters and digits".to_string(),
        ));
    }

    Ok(())
}
