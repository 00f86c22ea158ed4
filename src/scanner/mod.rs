pub mod fetcher;
pub mod normalizer;
pub mod rate_limiter;
pub mod wallet_scanner;

pub use fetcher::TransferFetcher;
pub use normalizer::TransactionNormalizer;
pub use rate_limiter::RateLimiter;
pub use wallet_scanner::{validate_address, ScanResult, WalletScanner};
