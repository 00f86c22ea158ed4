use crate::events::EventSink;
use crate::models::ScanSummary;
use chrono::Local;
use std::io::Write;
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[94m";
const CYAN: &str = "\x1b[96m";

/// ANSI-colored event reporter for interactive terminal sessions
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    fn timestamp() -> String {
        Local::now().format("%H:%M:%S").to_string()
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TerminalReporter {
    fn on_step(&self, category: &str, message: &str) {
        println!(
            "{BLUE}[{}] {BOLD}[{}]{RESET} → {}",
            Self::timestamp(),
            category,
            message
        );
    }

    fn on_success(&self, category: &str, message: &str) {
        println!(
            "{GREEN}[{}] {BOLD}[{}]{RESET} {GREEN}✓ {}{RESET}",
            Self::timestamp(),
            category,
            message
        );
    }

    fn on_warning(&self, category: &str, message: &str) {
        println!(
            "{YELLOW}[{}] {BOLD}[{}]{RESET} {YELLOW}⚠ {}{RESET}",
            Self::timestamp(),
            category,
            message
        );
    }

    fn on_error(&self, category: &str, message: &str) {
        eprintln!(
            "{RED}[{}] {BOLD}[{}]{RESET} {RED}✗ {}{RESET}",
            Self::timestamp(),
            category,
            message
        );
    }

    fn on_progress(&self, current: usize, total: usize, label: &str) {
        let percentage = if total > 0 {
            current as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let filled = (percentage / 2.0) as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(50 - filled.min(50));

        print!(
            "\r{GREEN}[PROGRESS] {} {:.1}% ({}/{}) {}{RESET}",
            bar, percentage, current, total, label
        );
        let _ = std::io::stdout().flush();

        if current == total {
            println!();
        }
    }
}

/// Startup banner
pub fn print_banner() {
    println!("{CYAN}{BOLD}");
    println!("╔{}╗", "═".repeat(62));
    println!("║{:^62}║", "BSC Wallet Scanner");
    println!("║{:^62}║", "Token transfer history analysis");
    println!("╚{}╝", "═".repeat(62));
    println!("{RESET}");
}

/// Final report block after a successful scan
pub fn print_completion(summary: &ScanSummary, output_path: &Path) {
    println!("\n{GREEN}{}", "=".repeat(60));
    println!("Scan completed successfully");
    println!("Raw transactions fetched:  {}", summary.raw_count);
    println!("Unique transactions kept:  {}", summary.unique_count);
    println!("API requests made:         {}", summary.requests_made);
    println!("Results saved to: {}", output_path.display());
    println!("{}{RESET}", "=".repeat(60));
}

/// Boxed error report with a suggested remedy
pub fn print_error_report(category: &str, message: &str, suggestion: &str) {
    eprintln!("\n{RED}{BOLD}╔{}╗", "═".repeat(60));
    eprintln!("║{:^60}║", "SCAN FAILED");
    eprintln!("╠{}╣", "═".repeat(60));
    eprintln!("║ Type: {:<53}║", category);
    let mut msg = message.to_string();
    msg.truncate(50);
    eprintln!("║ Message: {:<50}║", msg);
    eprintln!("║ Suggestion:{:<48} ║", "");
    let mut hint = suggestion.to_string();
    hint.truncate(56);
    eprintln!("║   {:<57}║", hint);
    eprintln!("╚{}╝{RESET}", "═".repeat(60));
}
