pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod output;
pub mod scanner;
pub mod terminal;

pub use config::{ApiConfig, AppConfig, LoggingConfig, ScannerConfig};
pub use error::{ConfigError, Result, ScanError};
pub use events::{EventSink, LogSink};
pub use models::{NormalizedTransaction, RawTransfer, ScanSummary};
pub use output::{OutputFormat, ReportWriter};
pub use scanner::{validate_address, RateLimiter, ScanResult, TransferFetcher, WalletScanner};
pub use terminal::TerminalReporter;
