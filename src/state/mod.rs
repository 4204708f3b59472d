// State module - spec results and run totals

pub mod result;

pub use result::{SpecOutcome, SpecReport};

use serde::Serialize;

/// Running totals over the reported specs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    total: usize,
    passed: usize,
    failed: usize,
    skipped: usize,
    duration_ms: u64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a reported spec
    pub fn add(&mut self, report: &SpecReport) {
        self.total += 1;
        self.duration_ms += report.time;

        match report.status() {
            SpecOutcome::Passed => self.passed += 1,
            SpecOutcome::Failed => self.failed += 1,
            SpecOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Sum of the reported spec times
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Percentage of executed (non-skipped) specs that passed
    pub fn pass_rate(&self) -> f64 {
        let executed = self.passed + self.failed;
        if executed == 0 {
            0.0
        } else {
            (self.passed as f64 / executed as f64) * 100.0
        }
    }
}
