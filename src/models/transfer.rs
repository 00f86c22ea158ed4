use serde::{Deserialize, Serialize};

/// One token-transfer record as returned by the BscScan `tokentx` action.
///
/// Every field arrives as a string; missing fields are tolerated and
/// resolved to defaults during normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawTransfer {
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    /// Raw integer amount as a decimal string
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "tokenName")]
    pub token_name: Option<String>,
    #[serde(default, rename = "tokenSymbol")]
    pub token_symbol: Option<String>,
    #[serde(default, rename = "tokenDecimal")]
    pub token_decimal: Option<String>,
    /// Transaction input data; first 10 characters carry the method signature
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default, rename = "functionName")]
    pub function_name: Option<String>,
    /// Unix timestamp as a decimal string
    #[serde(default, rename = "timeStamp")]
    pub time_stamp: Option<String>,
}

/// Canonical transaction record produced by normalization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedTransaction {
    pub hash: String,
    /// Canonical method name, e.g. "transfer", "approve", or "unknown"
    pub method: String,
    /// Human-readable relative time, e.g. "3 days ago"
    pub age: String,
    /// Lowercase sender address
    pub from: String,
    /// Lowercase recipient address
    pub to: String,
    /// Formatted "<amount> <symbol> (<name>)" string
    pub token: String,
}

/// Counters surfaced to the CLI after a completed scan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub raw_count: usize,
    pub unique_count: usize,
    pub requests_made: u32,
}
