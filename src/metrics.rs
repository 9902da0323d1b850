//! Outcome counters and the end-of-run summary.
//!
//! Every recitation group ends in exactly one of three outcomes: written, skipped, or errored.
//! [`ImportMetrics`] counts them, times the run, and renders the summary either as the console
//! block printed at the end of an import or as JSON for `--metrics-out`.
//!
//! # Example
//!
//! ```
//! use recitations::metrics::{ImportMetrics, Outcome};
//!
//! let mut metrics = ImportMetrics::new();
//! metrics.record_start();
//! metrics.record(Outcome::Succeeded);
//! metrics.record(Outcome::Skipped);
//! metrics.record_end();
//!
//! let summary = metrics.summary();
//! assert_eq!(summary.total(), 2);
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

/// Terminal state of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Skipped,
    Errored,
}

impl Outcome {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Skipped => "skipped",
            Self::Errored => "errored",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Succeeded => "Documents added to the store",
            Self::Skipped => "Groups skipped (e.g., empty recitation text)",
            Self::Errored => "Groups whose write failed",
        }
    }
}

/// Final counts of an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub succeeded: u64,
    pub skipped: u64,
    pub errored: u64,
}

impl ImportSummary {
    /// Number of groups accounted for, the empty key included.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.succeeded + self.skipped + self.errored
    }
}

/// Counters for one import run.
#[derive(Debug, Clone, Default)]
pub struct ImportMetrics {
    summary: ImportSummary,
    rows_read: u64,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
}

impl ImportMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn record_end(&mut self) {
        self.end_time = Some(Instant::now());
    }

    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Succeeded => &mut self.summary.succeeded,
            Outcome::Skipped => &mut self.summary.skipped,
            Outcome::Errored => &mut self.summary.errored,
        };
        *counter += 1;
    }

    pub fn set_rows_read(&mut self, rows: usize) {
        self.rows_read = rows as u64;
    }

    #[must_use]
    pub const fn rows_read(&self) -> u64 {
        self.rows_read
    }

    #[must_use]
    pub const fn summary(&self) -> ImportSummary {
        self.summary
    }

    /// All metrics as a JSON object keyed by metric name.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut metrics_json = serde_json::Map::new();
        for (outcome, value) in [
            (Outcome::Succeeded, self.summary.succeeded),
            (Outcome::Skipped, self.summary.skipped),
            (Outcome::Errored, self.summary.errored),
        ] {
            metrics_json.insert(
                outcome.name().to_string(),
                json!({ "value": value, "description": outcome.description() }),
            );
        }
        metrics_json.insert(
            "rows_read".to_string(),
            json!({ "value": self.rows_read, "description": "Rows parsed from the input" }),
        );
        if let Some(elapsed) = self.elapsed() {
            metrics_json.insert(
                "execution_time_ms".to_string(),
                json!({
                    "value": elapsed.as_millis(),
                    "description": "Total import time in milliseconds",
                }),
            );
        }
        Value::Object(metrics_json)
    }

    /// The console summary block.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "\n--- Upload Summary ---\n\
             Successfully added: {}\n\
             Skipped (e.g., empty text): {}\n\
             Errors: {}\n\
             ----------------------",
            self.summary.succeeded, self.summary.skipped, self.summary.errored
        )
    }

    /// Print the summary block to stdout.
    pub fn print(&self) {
        println!("{}", self.render());
    }

    /// Save [`to_json`](Self::to_json) to `path`, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let formatted = serde_json::to_string_pretty(&self.to_json())?;
        let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        file.write_all(formatted.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_outcome() {
        let mut m = ImportMetrics::new();
        m.record(Outcome::Succeeded);
        m.record(Outcome::Succeeded);
        m.record(Outcome::Errored);
        assert_eq!(
            m.summary(),
            ImportSummary {
                succeeded: 2,
                skipped: 0,
                errored: 1
            }
        );
        assert_eq!(m.summary().total(), 3);
    }

    #[test]
    fn render_has_three_counts() {
        let mut m = ImportMetrics::new();
        m.record(Outcome::Skipped);
        let out = m.render();
        assert!(out.contains("Successfully added: 0"));
        assert!(out.contains("Skipped (e.g., empty text): 1"));
        assert!(out.contains("Errors: 0"));
    }

    #[test]
    fn json_includes_elapsed_once_finished() {
        let mut m = ImportMetrics::new();
        assert!(m.to_json().get("execution_time_ms").is_none());
        m.record_start();
        m.record_end();
        let v = m.to_json();
        assert!(v.get("execution_time_ms").is_some());
        assert_eq!(v["succeeded"]["value"], json!(0));
    }

    #[test]
    fn save_to_file_writes_json() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("metrics.json");
        let mut m = ImportMetrics::new();
        m.record(Outcome::Succeeded);
        m.save_to_file(&path)?;
        let v: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(v["succeeded"]["value"], json!(1));
        Ok(())
    }
}
