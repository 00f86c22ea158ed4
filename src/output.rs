use crate::error::Result;
use crate::models::NormalizedTransaction;
use clap::ValueEnum;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Scan results land under this directory
const RESULT_DIR: &str = "result";

/// Output file shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full records: hash, method, age, from, to, token
    Full,
    /// Unique sender addresses only
    Addresses,
}

/// Serializes normalized transactions to a text file in one of two shapes
pub struct ReportWriter {
    format: OutputFormat,
}

impl ReportWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write the report under the result directory and return the final path
    pub fn write(&self, transactions: &[NormalizedTransaction], file_name: &str) -> Result<PathBuf> {
        self.write_under(Path::new(RESULT_DIR), transactions, file_name)
    }

    /// Write the report under an explicit base directory, creating it if needed
    pub fn write_under(
        &self,
        base_dir: &Path,
        transactions: &[NormalizedTransaction],
        file_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(base_dir)?;
        let path = base_dir.join(file_name);
        let mut file = fs::File::create(&path)?;

        match self.format {
            OutputFormat::Full => write_full(&mut file, transactions)?,
            OutputFormat::Addresses => write_addresses(&mut file, transactions)?,
        }

        Ok(path)
    }
}

fn write_full(out: &mut impl Write, transactions: &[NormalizedTransaction]) -> std::io::Result<()> {
    writeln!(out, "BSC Wallet Scanner - Full Transaction Data")?;
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(out)?;

    for tx in transactions {
        writeln!(out, "Hash: {}", tx.hash)?;
        writeln!(out, "Method: {}", tx.method)?;
        writeln!(out, "Age: {}", tx.age)?;
        writeln!(out, "From: {}", tx.from)?;
        writeln!(out, "To: {}", tx.to)?;
        writeln!(out, "Token: {}", tx.token)?;
        writeln!(out, "{}", "-".repeat(50))?;
    }

    Ok(())
}

fn write_addresses(
    out: &mut impl Write,
    transactions: &[NormalizedTransaction],
) -> std::io::Result<()> {
    writeln!(out, "BSC Wallet Scanner - Wallet Addresses (From)")?;
    writeln!(out, "{}", "=".repeat(80))?;
    writeln!(out)?;

    let addresses: BTreeSet<&str> = transactions.iter().map(|tx| tx.from.as_str()).collect();
    for address in addresses {
        writeln!(out, "{}", address)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_transactions() -> Vec<NormalizedTransaction> {
        vec![
            NormalizedTransaction {
                hash: "0xabc".to_string(),
                method: "transfer".to_string(),
                age: "3 days ago".to_string(),
                from: "0xaaa1111111111111111111111111111111111111".to_string(),
                to: "0xbbb2222222222222222222222222222222222222".to_string(),
                token: "1.000000 WBNB (Wrapped BNB)".to_string(),
            },
            NormalizedTransaction {
                hash: "0xdef".to_string(),
                method: "approve".to_string(),
                age: "5 hours ago".to_string(),
                from: "0xaaa1111111111111111111111111111111111111".to_string(),
                to: "0xccc3333333333333333333333333333333333333".to_string(),
                token: "0.500000 CAKE (PancakeSwap Token)".to_string(),
            },
        ]
    }

    #[test]
    fn test_full_format_shape() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(OutputFormat::Full);
        let path = writer
            .write_under(dir.path(), &sample_transactions(), "wallet.txt")
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("BSC Wallet Scanner - Full Transaction Data\n"));
        assert!(content.contains(&"=".repeat(80)));
        assert!(content.contains("Hash: 0xabc"));
        assert!(content.contains("Method: transfer"));
        assert!(content.contains("Age: 3 days ago"));
        assert!(content.contains("From: 0xaaa1111111111111111111111111111111111111"));
        assert!(content.contains("To: 0xbbb2222222222222222222222222222222222222"));
        assert!(content.contains("Token: 1.000000 WBNB (Wrapped BNB)"));
        assert_eq!(content.matches(&"-".repeat(50)).count(), 2);
    }

    #[test]
    fn test_addresses_format_deduplicates_senders() {
        let dir = tempdir().unwrap();
        let writer = ReportWriter::new(OutputFormat::Addresses);
        let path = writer
            .write_under(dir.path(), &sample_transactions(), "wallet.txt")
            .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("BSC Wallet Scanner - Wallet Addresses (From)\n"));
        // Both records share one sender
        assert_eq!(
            content
                .matches("0xaaa1111111111111111111111111111111111111")
                .count(),
            1
        );
        assert!(!content.contains("Hash:"));
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("result");
        let writer = ReportWriter::new(OutputFormat::Full);

        let path = writer.write_under(&nested, &[], "empty.txt").unwrap();

        assert!(path.exists());
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("BSC Wallet Scanner"));
    }
}
