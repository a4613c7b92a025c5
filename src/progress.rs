//src/progress.rs

use indicatif::{ProgressBar, ProgressStyle};

/// Default number of records between progress messages.
pub const DEFAULT_INTERVAL: u64 = 10_000;

/// Counts records read from (or written to) one stream and reports every
/// `interval` records, both to the log and to a spinner on stderr.
pub struct ProgressTracker {
    action: &'static str,
    label: String,
    interval: u64,
    count: u64,
    spinner: ProgressBar,
}

impl ProgressTracker {
    /// `label` names the stream, e.g. "forward" gives "Reading forward -- 10000".
    pub fn new(label: impl Into<String>) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&[
                    "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
                ])
                .template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self {
            action: "Reading",
            label: label.into(),
            interval: DEFAULT_INTERVAL,
            count: 0,
            spinner,
        }
    }

    /// Replaces the leading verb, e.g. "Writing" for an output pass.
    pub fn with_action(mut self, action: &'static str) -> Self {
        self.action = action;
        self
    }

    /// A zero interval disables the periodic messages.
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Records one more item; returns true when a progress message was emitted.
    pub fn record(&mut self) -> bool {
        self.count += 1;
        if self.interval == 0 || self.count % self.interval != 0 {
            return false;
        }
        let msg = format!("{} {} -- {}", self.action, self.label, self.count);
        log::info!("{msg}");
        self.spinner.set_message(msg);
        self.spinner.tick();
        true
    }

    pub fn finish(&self) {
        log::info!("{} {} -- {} record(s) in total", self.action, self.label, self.count);
        self.spinner.finish_and_clear();
    }
}
