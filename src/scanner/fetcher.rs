use crate::error::{Result, ScanError};
use crate::events::EventSink;
use crate::logging::LogContext;
use crate::models::RawTransfer;
use crate::scanner::rate_limiter::RateLimiter;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Fixed backoff between rate-limited attempts
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(1);

/// Sentinel block range covering the full chain history
const START_BLOCK: &str = "0";
const END_BLOCK: &str = "999999999";

/// Maximum page size the tokentx action allows
const PAGE_SIZE: &str = "1000";

/// BscScan response envelope. `result` is an array on success and a plain
/// string on most rejections, so it stays untyped until the status is known.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    status: String,
    message: String,
    #[serde(default)]
    result: Value,
}

/// Fetches the token-transfer list for one wallet from the BscScan API.
///
/// Rate-limited on every attempt; retries only on the API's own rate-limit
/// rejection, with a bounded budget. Transport failures surface to the caller.
pub struct TransferFetcher {
    client: Client,
    endpoint: String,
    api_key: String,
    max_retries: u32,
    rate_limiter: Arc<RateLimiter>,
    request_count: AtomicU32,
}

impl TransferFetcher {
    pub fn new(
        endpoint: String,
        api_key: String,
        timeout_seconds: u64,
        max_retries: u32,
        rate_limiter: Arc<RateLimiter>,
    ) -> Result<Self> {
        let context = LogContext::new("fetcher", "initialization")
            .with_metadata("endpoint", json!(endpoint))
            .with_metadata("timeout_seconds", json!(timeout_seconds));
        context.debug("Initializing transfer fetcher");

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent("bsc-wallet-scanner/0.1")
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            max_retries,
            rate_limiter,
            request_count: AtomicU32::new(0),
        })
    }

    /// Total requests issued over the lifetime of this fetcher
    pub fn requests_made(&self) -> u32 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Fetch one page of token transfers for a validated wallet address,
    /// newest first.
    pub async fn fetch(&self, address: &str, events: &dyn EventSink) -> Result<Vec<RawTransfer>> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            self.rate_limiter.admit().await;

            let envelope = self.request_page(address).await?;

            if envelope.status == "1" {
                let transfers: Vec<RawTransfer> = serde_json::from_value(envelope.result)
                    .map_err(|e| ScanError::Protocol(format!("malformed result list: {}", e)))?;
                LogContext::new("fetcher", "fetch")
                    .with_address(address)
                    .with_metadata("transfer_count", json!(transfers.len()))
                    .debug("Token transfer list retrieved");
                return Ok(transfers);
            }

            if envelope.message.to_lowercase().contains("rate limit") {
                if attempt > self.max_retries {
                    return Err(ScanError::RateLimitExceeded { attempts: attempt });
                }
                events.on_warning("API", "Rate limit detected, backing off before retry");
                LogContext::new("fetcher", "rate_limit_backoff")
                    .with_retry_count(attempt)
                    .warn("API rejected request due to rate limiting");
                sleep(RATE_LIMIT_BACKOFF).await;
                continue;
            }

            // The API reports an empty history as status "0" with this message
            if envelope.message.starts_with("No transactions found") {
                return Ok(Vec::new());
            }

            return Err(ScanError::Api(envelope.message));
        }
    }

    async fn request_page(&self, address: &str) -> Result<ApiEnvelope> {
        self.request_count.fetch_add(1, Ordering::Relaxed);

        let started = std::time::Instant::now();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("module", "account"),
                ("action", "tokentx"),
                ("address", address),
                ("startblock", START_BLOCK),
                ("endblock", END_BLOCK),
                ("page", "1"),
                ("offset", PAGE_SIZE),
                ("sort", "desc"),
                ("apikey", &self.api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        LogContext::new("fetcher", "request")
            .with_address(address)
            .with_metadata("status", json!(status.as_u16()))
            .with_duration_ms(started.elapsed().as_millis() as u64)
            .debug("API response received");

        if !status.is_success() {
            return Err(ScanError::Network {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ScanError::Protocol(format!("malformed response envelope: {}", e)))
    }
}
