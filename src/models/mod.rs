pub mod transfer;

pub use transfer::{NormalizedTransaction, RawTransfer, ScanSummary};
