//! Output formatting for the CLI.

use colored::*;
use sustain_ingest::{LoadReport, RunSummary};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format the outcome of one load stage.
    pub fn load_result(&self, what: &str, report: &LoadReport) -> String {
        let message = format!(
            "{} {} into {}",
            report.inserted, what, report.collection
        );
        if report.failed() == 0 {
            self.success(&message)
        } else {
            self.warning(&format!("{} ({} failed)", message, report.failed()))
        }
    }

    /// Format the per-stage lines of a run.
    pub fn stages(&self, summary: &RunSummary) -> Vec<String> {
        let mut lines = vec![self.success(&format!(
            "Schema ready: {}",
            summary.provision.created.join(", ")
        ))];
        lines.push(self.load_result("facts", &summary.facts));
        lines.push(self.load_result("passages", &summary.narrative));

        let stats = &summary.extraction;
        if stats.unreadable > 0 {
            lines.push(self.warning(&format!(
                "{} page(s) could not be read and were skipped",
                stats.unreadable
            )));
        }
        lines
    }

    /// Format a run summary as a table.
    pub fn summary_table(&self, summary: &RunSummary) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Collection", "Attempted", "Inserted", "Failed"]);

        for report in [&summary.facts, &summary.narrative] {
            builder.push_record([
                report.collection.clone(),
                report.attempted.to_string(),
                report.inserted.to_string(),
                report.failed().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let stats = &summary.extraction;
        format!(
            "{}\nPages: {} seen, {} excluded, {} too short, {} unreadable ({} ms)",
            table,
            stats.pages_seen,
            stats.excluded,
            stats.too_short,
            stats.unreadable,
            summary.elapsed_ms
        )
    }

    /// Format the first few failures of a run.
    pub fn failures(&self, summary: &RunSummary, limit: usize) -> Vec<String> {
        [&summary.facts, &summary.narrative]
            .into_iter()
            .flat_map(|report| {
                report.failures.iter().map(move |failure| {
                    self.error(&format!(
                        "{} #{}: {}",
                        report.collection, failure.ordinal, failure.message
                    ))
                })
            })
            .take(limit)
            .collect()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
