use thiserror::Error;

/// Main error type for the BSC wallet scanner
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: HTTP {status}: {body}")]
    Network { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("BscScan API error: {0}")]
    Api(String),

    #[error("Rate limit retry budget exhausted after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API key is missing; run `scanner init` and edit config.toml")]
    MissingApiKey,

    #[error("API key format is invalid: {0}")]
    InvalidApiKey(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Configuration parsing failed: {0}")]
    Parsing(String),

    #[error("Invalid configuration value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ScanError>;

impl ScanError {
    /// Short category tag used by the event sink and the CLI error report
    pub fn category(&self) -> &'static str {
        match self {
            ScanError::InvalidAddress(_) => "VALIDATION",
            ScanError::Config(_) => "CONFIG",
            ScanError::Network { .. } => "NETWORK",
            ScanError::Transport(_) => "NETWORK",
            ScanError::Protocol(_) => "PROTOCOL",
            ScanError::Api(_) => "API",
            ScanError::RateLimitExceeded { .. } => "RATE_LIMIT",
            ScanError::Io(_) => "FILE",
        }
    }

    /// Check if the error is recoverable (a later attempt may succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            ScanError::Network { .. } => true,
            ScanError::Transport(_) => true,
            ScanError::RateLimitExceeded { .. } => true,

            ScanError::InvalidAddress(_) => false,
            ScanError::Config(_) => false,
            ScanError::Protocol(_) => false,
            ScanError::Api(_) => false,
            ScanError::Io(_) => false,
        }
    }

    /// Suggested remedy printed alongside the error by the CLI
    pub fn suggestion(&self) -> &'static str {
        match self {
            ScanError::InvalidAddress(_) => {
                "Check the wallet address: 40 hex characters with an optional 0x prefix"
            }
            ScanError::Config(_) => "Verify config.toml and the BSCSCAN_API_KEY environment variable",
            ScanError::Network { .. } | ScanError::Transport(_) => {
                "Check internet connection and BscScan service status, then try again"
            }
            ScanError::Protocol(_) => "The API returned an unexpected response; try again later",
            ScanError::Api(_) => "Verify the API key and check BscScan service status",
            ScanError::RateLimitExceeded { .. } => {
                "Wait for the rate limit to reset or upgrade the API plan"
            }
            ScanError::Io(_) => "Verify file paths and directory permissions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let err = ScanError::InvalidAddress("0x123".to_string());
        assert_eq!(err.category(), "VALIDATION");

        let err = ScanError::Api("Invalid API Key".to_string());
        assert_eq!(err.category(), "API");

        let err = ScanError::RateLimitExceeded { attempts: 3 };
        assert_eq!(err.category(), "RATE_LIMIT");
    }

    #[test]
    fn test_error_recoverability() {
        assert!(ScanError::Network {
            status: 502,
            body: "Bad Gateway".to_string()
        }
        .is_recoverable());
        assert!(ScanError::RateLimitExceeded { attempts: 3 }.is_recoverable());

        assert!(!ScanError::InvalidAddress("xyz".to_string()).is_recoverable());
        assert!(!ScanError::Config(ConfigError::MissingApiKey).is_recoverable());
        assert!(!ScanError::Api("NOTOK".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = ScanError::Network {
            status: 503,
            body: "Service Unavailable".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Network error: HTTP 503: Service Unavailable"
        );

        let err = ScanError::RateLimitExceeded { attempts: 3 };
        assert!(format!("{}", err).contains("3 attempts"));
    }

    #[test]
    fn test_config_error_wrapping() {
        let err: ScanError = ConfigError::MissingApiKey.into();
        assert!(format!("{}", err).starts_with("Configuration error"));
        assert_eq!(err.category(), "CONFIG");
    }

    #[test]
    fn test_suggestion_present_for_all_categories() {
        let errors = vec![
            ScanError::InvalidAddress("x".to_string()),
            ScanError::Config(ConfigError::MissingApiKey),
            ScanError::Protocol("bad body".to_string()),
            ScanError::Api("NOTOK".to_string()),
            ScanError::RateLimitExceeded { attempts: 5 },
        ];
        for err in errors {
            assert!(!err.suggestion().is_empty());
        }
    }
}
