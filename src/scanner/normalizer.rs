use crate::events::EventSink;
use crate::models::{NormalizedTransaction, RawTransfer};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Known ERC-20 method signatures (first 10 characters of the input data)
const METHOD_SIGNATURES: &[(&str, &str)] = &[
    ("0xa9059cbb", "transfer"),
    ("0x23b872dd", "transferFrom"),
    ("0x095ea7b3", "approve"),
    ("0xa0712d68", "mint"),
    ("0x42966c68", "burn"),
];

/// Emit a progress event every this many records
const PROGRESS_INTERVAL: usize = 100;

/// Converts raw API records into the canonical transaction shape and removes
/// duplicates by transaction hash, keeping the first occurrence.
///
/// Every per-record failure mode has a defined fallback (missing fields
/// become "N/A", bad amounts drop to the symbol-only form, bad timestamps
/// become "Unknown"), so a malformed record degrades instead of aborting
/// the batch. Fallbacks on the token amount are reported as warnings.
pub struct TransactionNormalizer;

impl TransactionNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(
        &self,
        raw_transfers: &[RawTransfer],
        events: &dyn EventSink,
    ) -> Vec<NormalizedTransaction> {
        let total = raw_transfers.len();
        let mut processed = Vec::with_capacity(total);

        for (i, tx) in raw_transfers.iter().enumerate() {
            if i % PROGRESS_INTERVAL == 0 || i + 1 == total {
                events.on_progress(i + 1, total, "Processing transactions");
            }

            processed.push(self.normalize_record(tx, i, events));
        }

        dedup_by_hash(processed)
    }

    fn normalize_record(
        &self,
        tx: &RawTransfer,
        index: usize,
        events: &dyn EventSink,
    ) -> NormalizedTransaction {
        let symbol = tx.token_symbol.as_deref().unwrap_or("UNK");
        let name = tx.token_name.as_deref().unwrap_or("Unknown");

        let token = match format_token_amount(tx.value.as_deref(), tx.token_decimal.as_deref()) {
            Some(amount) => format!("{} {} ({})", amount, symbol, name),
            None => {
                events.on_warning(
                    "PROCESS",
                    &format!("Record {}: token amount not convertible, omitting amount", index),
                );
                format!("{} ({})", symbol, name)
            }
        };

        NormalizedTransaction {
            hash: tx.hash.clone().unwrap_or_else(|| "N/A".to_string()),
            method: extract_method(tx),
            age: calculate_age(tx.time_stamp.as_deref(), Utc::now()),
            from: tx
                .from
                .as_deref()
                .map(|a| a.to_lowercase())
                .unwrap_or_else(|| "N/A".to_string()),
            to: tx
                .to
                .as_deref()
                .map(|a| a.to_lowercase())
                .unwrap_or_else(|| "N/A".to_string()),
            token,
        }
    }
}

impl Default for TransactionNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first occurrence of each hash, preserving relative order
fn dedup_by_hash(transactions: Vec<NormalizedTransaction>) -> Vec<NormalizedTransaction> {
    let mut seen = HashSet::new();
    transactions
        .into_iter()
        .filter(|tx| seen.insert(tx.hash.clone()))
        .collect()
}

/// Resolve the canonical method name for a transfer record.
///
/// An explicit function name wins; otherwise the leading 10 characters of
/// the input data are looked up as a method signature. Records with no input
/// data at all are plain token transfers.
fn extract_method(tx: &RawTransfer) -> String {
    if let Some(name) = tx.function_name.as_deref() {
        if !name.is_empty() {
            return name.to_string();
        }
    }

    if let Some(input) = tx.input.as_deref() {
        if input.len() >= 10 {
            // Byte 10 can fall inside a multi-byte character in garbage input
            let signature = match input.get(..10) {
                Some(s) => s,
                None => return "unknown".to_string(),
            };
            return METHOD_SIGNATURES
                .iter()
                .find(|(sig, _)| *sig == signature)
                .map(|(_, method)| method.to_string())
                .unwrap_or_else(|| "unknown".to_string());
        }
    }

    "transfer".to_string()
}

/// Human-readable relative age of a Unix timestamp string
fn calculate_age(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let parsed = timestamp
        .and_then(|ts| ts.parse::<i64>().ok())
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0));

    let tx_time = match parsed {
        Some(t) => t,
        None => return "Unknown".to_string(),
    };

    let diff = now.signed_duration_since(tx_time);
    if diff.num_days() >= 1 {
        format!("{} days ago", diff.num_days())
    } else if diff.num_hours() >= 1 {
        format!("{} hours ago", diff.num_hours())
    } else if diff.num_minutes() >= 1 {
        format!("{} minutes ago", diff.num_minutes())
    } else {
        "Just now".to_string()
    }
}

/// Convert a raw integer amount to a fixed-point decimal with six fractional
/// digits, rounding half-up. Returns None when the value or decimals cannot
/// be interpreted.
fn format_token_amount(value: Option<&str>, decimals: Option<&str>) -> Option<String> {
    let value: u128 = value?.parse().ok()?;
    let decimals: u32 = decimals?.parse().ok()?;
    let divisor = 10u128.checked_pow(decimals)?;

    let mut whole = value / divisor;
    let remainder = value % divisor;
    let frac = if decimals <= 6 {
        remainder * 10u128.pow(6 - decimals)
    } else {
        // Round on the seventh fractional digit, carrying into the whole part
        let cut = 10u128.pow(decimals - 6);
        let mut frac = remainder / cut;
        if (remainder % cut) * 2 >= cut {
            frac += 1;
        }
        if frac == 1_000_000 {
            whole += 1;
            frac = 0;
        }
        frac
    };

    Some(format!("{}.{:06}", whole, frac))
}
