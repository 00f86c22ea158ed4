use crate::logging::LogContext;
use serde_json::json;

/// Progress and status events emitted by the scanner core.
///
/// The core never writes to the terminal directly; every user-visible
/// message goes through this interface so the scanner can run headless.
pub trait EventSink: Send + Sync {
    fn on_step(&self, category: &str, message: &str);
    fn on_success(&self, category: &str, message: &str);
    fn on_warning(&self, category: &str, message: &str);
    fn on_error(&self, category: &str, message: &str);
    fn on_progress(&self, current: usize, total: usize, label: &str);
}

/// Event sink that routes everything to the structured logger.
/// Used when the scanner runs without an interactive terminal, and in tests.
pub struct LogSink;

impl EventSink for LogSink {
    fn on_step(&self, category: &str, message: &str) {
        LogContext::new("scanner", category).info(message);
    }

    fn on_success(&self, category: &str, message: &str) {
        LogContext::new("scanner", category).info(message);
    }

    fn on_warning(&self, category: &str, message: &str) {
        LogContext::new("scanner", category).warn(message);
    }

    fn on_error(&self, category: &str, message: &str) {
        LogContext::new("scanner", category).error(message);
    }

    fn on_progress(&self, current: usize, total: usize, label: &str) {
        LogContext::new("scanner", "progress")
            .with_metadata("current", json!(current))
            .with_metadata("total", json!(total))
            .debug(label);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingSink;
    use super::*;

    #[test]
    fn test_recording_sink_captures_events() {
        let sink = RecordingSink::default();
        sink.on_step("API", "Fetching token transfers");
        sink.on_warning("PROCESS", "Skipped record 3");
        sink.on_progress(100, 250, "Processing transactions");

        assert_eq!(sink.recorded("step"), vec!["Fetching token transfers"]);
        assert_eq!(sink.recorded("warning"), vec!["Skipped record 3"]);
        assert_eq!(sink.recorded("progress"), vec!["100/250"]);
    }

    #[test]
    fn test_log_sink_does_not_panic() {
        let sink = LogSink;
        sink.on_step("SCAN", "starting");
        sink.on_success("SCAN", "done");
        sink.on_warning("SCAN", "careful");
        sink.on_error("SCAN", "failed");
        sink.on_progress(1, 10, "working");
    }
}
