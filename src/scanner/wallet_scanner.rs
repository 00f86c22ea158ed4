use crate::config::AppConfig;
use crate::error::{Result, ScanError};
use crate::events::EventSink;
use crate::logging::LogContext;
use crate::models::{NormalizedTransaction, ScanSummary};
use crate::scanner::fetcher::TransferFetcher;
use crate::scanner::normalizer::TransactionNormalizer;
use crate::scanner::rate_limiter::RateLimiter;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Ordered, deduplicated scan output: API order (newest first), first
/// occurrence kept for each transaction hash.
pub type ScanResult = Vec<NormalizedTransaction>;

/// Orchestrates one wallet scan: validate, fetch, normalize.
///
/// Owns the rate limiter and the fetcher for the lifetime of the scan and
/// reports every step boundary through the event sink.
pub struct WalletScanner {
    fetcher: TransferFetcher,
    normalizer: TransactionNormalizer,
    events: Arc<dyn EventSink>,
    raw_count: AtomicUsize,
    unique_count: AtomicUsize,
}

impl WalletScanner {
    pub fn new(config: &AppConfig, events: Arc<dyn EventSink>) -> Result<Self> {
        let rate_limiter = Arc::new(RateLimiter::new(config.scanner.rate_limit));
        let fetcher = TransferFetcher::new(
            config.api.endpoint.clone(),
            config.api.api_key.clone(),
            config.scanner.timeout_seconds,
            config.scanner.max_retries,
            rate_limiter,
        )?;

        Ok(Self {
            fetcher,
            normalizer: TransactionNormalizer::new(),
            events,
            raw_count: AtomicUsize::new(0),
            unique_count: AtomicUsize::new(0),
        })
    }

    /// Scan a wallet for token transfer transactions
    pub async fn scan(&self, wallet_address: &str) -> Result<ScanResult> {
        let context = LogContext::new("scanner", "scan").with_address(wallet_address);
        context.info("Starting wallet scan");

        self.events
            .on_step("SCAN", &format!("Initiating scan for wallet: {}", wallet_address));

        self.events
            .on_step("VALIDATION", "Validating wallet address format");
        if let Err(e) = validate_address(wallet_address) {
            self.events.on_error("VALIDATION", &e.to_string());
            return Err(e);
        }
        self.events
            .on_success("VALIDATION", "Wallet address format valid");

        self.events
            .on_step("API", "Fetching token transfer transactions");
        let raw_transfers = match self.fetcher.fetch(wallet_address, self.events.as_ref()).await {
            Ok(transfers) => transfers,
            Err(e) => {
                self.events
                    .on_error(e.category(), &format!("Scan failed: {}", e));
                return Err(e);
            }
        };
        self.raw_count.store(raw_transfers.len(), Ordering::Relaxed);

        if raw_transfers.is_empty() {
            self.events
                .on_warning("API", "No token transfer transactions found");
            self.unique_count.store(0, Ordering::Relaxed);
            return Ok(Vec::new());
        }
        self.events.on_success(
            "API",
            &format!("Retrieved {} raw transactions", raw_transfers.len()),
        );

        self.events.on_step("PROCESS", "Processing transaction data");
        let transactions = self
            .normalizer
            .normalize(&raw_transfers, self.events.as_ref());
        self.unique_count.store(transactions.len(), Ordering::Relaxed);
        self.events.on_success(
            "PROCESS",
            &format!("Filtered to {} unique transactions", transactions.len()),
        );

        context.info("Wallet scan completed");
        Ok(transactions)
    }

    /// Counters from the most recent scan
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            raw_count: self.raw_count.load(Ordering::Relaxed),
            unique_count: self.unique_count.load(Ordering::Relaxed),
            requests_made: self.fetcher.requests_made(),
        }
    }
}

/// Validate a wallet address: exactly 40 hex characters after stripping an
/// optional 0x prefix, case-insensitive.
pub fn validate_address(address: &str) -> Result<()> {
    let stripped = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    if stripped.len() != 40 {
        return Err(ScanError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            stripped.len()
        )));
    }

    if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ScanError::InvalidAddress(
            "address contains non-hexadecimal characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LogSink;

    #[test]
    fn test_scanner_construction_from_config() {
        let scanner = WalletScanner::new(&AppConfig::default(), Arc::new(LogSink));
        assert!(scanner.is_ok());
    }

    #[test]
    fn test_validate_address_accepts_valid_forms() {
        assert!(validate_address("0xc51beb5b222aed7f0b56042f04895ee41886b763").is_ok());
        assert!(validate_address("c51beb5b222aed7f0b56042f04895ee41886b763").is_ok());
        assert!(validate_address("0XC51BEB5B222AED7F0B56042F04895EE41886B763").is_ok());
        assert!(validate_address("0xF977814e90dA44bFA03b6295A0616a897441aceC").is_ok());
    }

    #[test]
    fn test_validate_address_rejects_invalid_forms() {
        // Too short / too long
        assert!(validate_address("0xc51beb5b222aed7f0b56042f04895ee41886b76").is_err());
        assert!(validate_address("0xc51beb5b222aed7f0b56042f04895ee41886b7631").is_err());
        // Non-hex character
        assert!(validate_address("0xg51beb5b222aed7f0b56042f04895ee41886b763").is_err());
        // Empty and prefix-only
        assert!(validate_address("").is_err());
        assert!(validate_address("0x").is_err());
    }

    #[test]
    fn test_validate_address_error_variant() {
        let err = validate_address("nope").unwrap_err();
        assert!(matches!(err, ScanError::InvalidAddress(_)));
        assert_eq!(err.category(), "VALIDATION");
    }
}
