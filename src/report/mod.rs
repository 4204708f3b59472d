// Report module - lifecycle hooks and the messages sent to the transport

pub mod console;
pub mod coverage;
pub mod reporter;
pub mod transport;

use serde::Serialize;
use serde_json::Value;

use crate::host::{SpecResult, SuiteInfo, SuiteTreeNode};
use crate::state::SpecReport;
use crate::suite::SpecNameIndex;

pub use console::ConsoleTransport;
pub use coverage::CoverageSource;
pub use reporter::ResultReporter;
pub use transport::{JsonLinesTransport, RecordingTransport, Transport};

/// Receiver of the host's lifecycle events.
///
/// Hooks are called one at a time, in nesting order, and never fail.
pub trait LifecycleReporter {
    /// Called once before any suite or spec event
    fn run_started(&mut self, total_specs_defined: usize, top_suite: &SuiteTreeNode);

    /// Called once after every spec finished
    fn run_done(&mut self);

    fn suite_started(&mut self, suite: &SuiteInfo);

    fn suite_done(&mut self, suite: &SuiteInfo);

    fn spec_started(&mut self, spec: &SpecResult);

    fn spec_done(&mut self, spec: &SpecResult);
}

/// Announcement sent when the run starts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunInfo {
    pub total: usize,
    pub specs: SpecNameIndex,
}

/// Sent when the run is complete
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunComplete {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Value>,
}

/// Outbound message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Message {
    Info(RunInfo),
    Result(SpecReport),
    Complete(RunComplete),
}
