// Result reporter - turns lifecycle hooks into transport messages

use std::collections::HashMap;
use tracing::{debug, warn};

use super::{CoverageSource, LifecycleReporter, Message, RunComplete, RunInfo, Transport};
use crate::host::{SpecResult, SuiteInfo, SuiteTreeNode};
use crate::sanitize::StackSanitizer;
use crate::state::{RunSummary, SpecReport};
use crate::suite::{SpecNameIndex, SuitePathTracker};
use crate::time::{Clock, SystemClock};

/// Reporter bound to a transport.
///
/// Tracks the open suites, times each spec between its started and done
/// hooks, and sends one message per run start, spec done and run done.
pub struct ResultReporter<T: Transport, C: Clock = SystemClock> {
    transport: T,
    clock: C,
    tracker: SuitePathTracker,
    sanitizer: StackSanitizer,
    coverage: CoverageSource,
    start_times: HashMap<String, i64>,
    summary: RunSummary,
}

impl<T: Transport> ResultReporter<T> {
    /// Create a reporter timed by the system clock
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            clock: SystemClock,
            tracker: SuitePathTracker::new(),
            sanitizer: StackSanitizer::default(),
            coverage: CoverageSource::None,
            start_times: HashMap::new(),
            summary: RunSummary::new(),
        }
    }
}

impl<T: Transport, C: Clock> ResultReporter<T, C> {
    /// Replace the clock used for spec timing
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ResultReporter<T, C2> {
        ResultReporter {
            transport: self.transport,
            clock,
            tracker: self.tracker,
            sanitizer: self.sanitizer,
            coverage: self.coverage,
            start_times: self.start_times,
            summary: self.summary,
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: StackSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn with_coverage(mut self, coverage: CoverageSource) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn tracker(&self) -> &SuitePathTracker {
        &self.tracker
    }

    /// Totals of the specs reported so far
    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Build the result record for a finished spec
    fn build_report(&mut self, spec: &SpecResult) -> SpecReport {
        let skipped = spec.status.is_skipped();
        let started = self.start_times.remove(&spec.id);

        let time = match (skipped, started) {
            (true, _) => 0,
            (false, Some(started)) => {
                u64::try_from(self.clock.now_millis() - started).unwrap_or_default()
            }
            (false, None) => {
                warn!("Spec {} finished without a start time", spec.id);
                0
            }
        };

        let success = spec.failed_expectations.is_empty();
        let log = if success {
            Vec::new()
        } else {
            spec.failed_expectations
                .iter()
                .map(|failure| self.sanitizer.format_failure(failure))
                .collect()
        };

        SpecReport {
            description: spec.description.clone(),
            id: spec.id.clone(),
            log,
            skipped,
            success,
            suite: self.tracker.current_path(),
            time,
        }
    }
}

impl<T: Transport, C: Clock> LifecycleReporter for ResultReporter<T, C> {
    fn run_started(&mut self, total_specs_defined: usize, top_suite: &SuiteTreeNode) {
        debug!("Run started with {} specs", total_specs_defined);

        self.transport.send(Message::Info(RunInfo {
            total: total_specs_defined,
            specs: SpecNameIndex::collect(top_suite),
        }));
    }

    fn run_done(&mut self) {
        debug!(
            "Run done: {} passed, {} failed, {} skipped",
            self.summary.passed(),
            self.summary.failed(),
            self.summary.skipped()
        );

        self.transport.send(Message::Complete(RunComplete {
            coverage: self.coverage.load(),
        }));
    }

    fn suite_started(&mut self, suite: &SuiteInfo) {
        if suite.is_top_level() {
            return;
        }

        self.tracker.suite_started(&suite.description);
        debug!("Suite started: {}", self.tracker.current_path().join(" > "));
    }

    fn suite_done(&mut self, suite: &SuiteInfo) {
        if suite.is_top_level() {
            return;
        }

        if !self.tracker.suite_done(&suite.description) {
            warn!(
                "Suite done without matching start, keeping depth {}: {}",
                self.tracker.depth(),
                suite.description
            );
        }
    }

    fn spec_started(&mut self, spec: &SpecResult) {
        let now = self.clock.now_millis();
        if self.start_times.insert(spec.id.clone(), now).is_some() {
            warn!("Spec {} started twice, restarting its timer", spec.id);
        }
    }

    fn spec_done(&mut self, spec: &SpecResult) {
        let report = self.build_report(spec);
        self.summary.add(&report);
        self.transport.send(Message::Result(report));
    }
}
