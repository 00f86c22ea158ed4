use bsc_wallet_scanner::config::AppConfig;
use bsc_wallet_scanner::error::ScanError;
use bsc_wallet_scanner::logging::init_logging;
use bsc_wallet_scanner::output::{OutputFormat, ReportWriter};
use bsc_wallet_scanner::scanner::WalletScanner;
use bsc_wallet_scanner::terminal::{
    print_banner, print_completion, print_error_report, TerminalReporter,
};
use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "scanner", about = "BSC wallet token-transfer scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a wallet's token transfer history and write it to a file
    Scan {
        /// Wallet address: 40 hex characters with an optional 0x prefix
        address: String,
        /// Output file shape
        #[arg(long, value_enum, default_value = "full")]
        format: OutputFormat,
        /// Output file name, written under the result directory
        #[arg(long, default_value = "wallet.txt")]
        output: String,
    },
    /// Write a starter config.toml with a placeholder API key
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            if let Err(e) = run_init() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Scan {
            address,
            format,
            output,
        } => {
            if let Err(e) = run_scan(&address, format, &output).await {
                print_error_report(e.category(), &e.to_string(), e.suggestion());
                std::process::exit(1);
            }
        }
    }
}

fn run_init() -> Result<(), ScanError> {
    let path = Path::new("config.toml");
    if path.exists() {
        println!("config.toml already exists, leaving it untouched");
        return Ok(());
    }

    let sample = AppConfig::generate_sample_config().map_err(ScanError::Config)?;
    std::fs::write(path, sample)?;
    println!("Wrote config.toml; set your BscScan API key before scanning");
    Ok(())
}

async fn run_scan(address: &str, format: OutputFormat, output: &str) -> Result<(), ScanError> {
    let config = AppConfig::load()?;
    init_logging(&config.logging.level);

    print_banner();

    let events = Arc::new(TerminalReporter::new());
    let scanner = WalletScanner::new(&config, events)?;

    let transactions = scanner.scan(address).await?;

    let writer = ReportWriter::new(format);
    let path = writer.write(&transactions, output)?;

    print_completion(&scanner.summary(), &path);
    Ok(())
}
