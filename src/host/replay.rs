// Replay host - feeds a recorded event stream to a reporter

use std::io::BufRead;
use tracing::debug;

use super::events::{read_events, EventStreamError, HostEvent};
use super::{Host, SpecResult, SpecStatus, SuiteTreeNode};
use crate::filter::SpecFilter;
use crate::report::LifecycleReporter;

/// Host that replays previously recorded lifecycle events
#[derive(Debug, Clone, Default)]
pub struct ReplayHost {
    events: Vec<HostEvent>,
    top_suite: SuiteTreeNode,
    spec_filter: Option<SpecFilter>,
}

impl ReplayHost {
    pub fn new(events: Vec<HostEvent>) -> Self {
        // The declared tree travels with the run-started event.
        let top_suite = events
            .iter()
            .find_map(|event| match event {
                HostEvent::RunStarted {
                    top_suite: Some(tree),
                    ..
                } => Some(tree.clone()),
                _ => None,
            })
            .unwrap_or_else(|| SuiteTreeNode::top(Vec::new()));

        Self {
            events,
            top_suite,
            spec_filter: None,
        }
    }

    /// Decode a newline-delimited JSON stream
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, EventStreamError> {
        Ok(Self::new(read_events(reader)?))
    }

    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Apply the installed filter to a spec.
    ///
    /// Specs the filter rejects are reported as disabled, like the framework
    /// does for specs it does not run.
    fn filtered(&self, spec: &SpecResult, open_suites: &[String]) -> Option<SpecResult> {
        let filter = self.spec_filter.as_ref()?;
        let full_name = spec
            .full_name
            .clone()
            .unwrap_or_else(|| full_name(open_suites, &spec.description));

        if filter.matches(&full_name) {
            return None;
        }

        debug!("Spec excluded by filter: {}", full_name);
        Some(SpecResult {
            status: SpecStatus::Disabled,
            failed_expectations: Vec::new(),
            ..spec.clone()
        })
    }
}

/// Open suite descriptions and the spec description joined by spaces
fn full_name(open_suites: &[String], description: &str) -> String {
    open_suites
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(description))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Host for ReplayHost {
    fn top_suite(&self) -> &SuiteTreeNode {
        &self.top_suite
    }

    fn set_spec_filter(&mut self, filter: SpecFilter) {
        self.spec_filter = Some(filter);
    }

    fn execute(&mut self, reporter: &mut dyn LifecycleReporter) {
        // Host-side view of the open suites, used for spec full names only.
        let mut open_suites: Vec<String> = Vec::new();

        for event in &self.events {
            match event {
                HostEvent::RunStarted {
                    total_specs_defined,
                    ..
                } => reporter.run_started(*total_specs_defined, &self.top_suite),
                HostEvent::SuiteStarted(suite) => {
                    if !suite.is_top_level() {
                        open_suites.push(suite.description.clone());
                    }
                    reporter.suite_started(suite);
                }
                HostEvent::SuiteDone(suite) => {
                    if !suite.is_top_level()
                        && open_suites.last() == Some(&suite.description)
                    {
                        open_suites.pop();
                    }
                    reporter.suite_done(suite);
                }
                HostEvent::SpecStarted(spec) => match self.filtered(spec, &open_suites) {
                    Some(excluded) => reporter.spec_started(&excluded),
                    None => reporter.spec_started(spec),
                },
                HostEvent::SpecDone(spec) => match self.filtered(spec, &open_suites) {
                    Some(excluded) => reporter.spec_done(&excluded),
                    None => reporter.spec_done(spec),
                },
                HostEvent::RunDone => reporter.run_done(),
            }
        }
    }
}
