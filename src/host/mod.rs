// Host module - the test framework environment the reporter is attached to
//
// The host owns the declared suite tree and fires lifecycle events in
// nesting order. Everything here is the host's view of the run; the
// reporter only reads it.

pub mod events;
pub mod replay;

pub use events::{EventStreamError, HostEvent};
pub use replay::ReplayHost;

use serde::{Deserialize, Deserializer, Serialize};

use crate::filter::SpecFilter;
use crate::report::LifecycleReporter;

/// Decode an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Description the framework gives its synthetic top suite
pub const TOP_LEVEL_SUITE_SENTINEL: &str = "Jasmine_TopLevel_Suite";

/// Node of the declared suite tree.
///
/// A node with `children` is a suite, a node without is a spec.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteTreeNode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SuiteTreeNode>>,
}

impl SuiteTreeNode {
    /// Create a suite node
    pub fn suite(description: impl Into<String>, children: Vec<SuiteTreeNode>) -> Self {
        Self {
            description: description.into(),
            children: Some(children),
        }
    }

    /// Create a spec (leaf) node
    pub fn spec(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            children: None,
        }
    }

    /// Synthetic root holding the top-level suites
    pub fn top(children: Vec<SuiteTreeNode>) -> Self {
        Self::suite(TOP_LEVEL_SUITE_SENTINEL, children)
    }

    pub fn is_suite(&self) -> bool {
        self.children.is_some()
    }

    /// Number of specs below this node
    pub fn spec_count(&self) -> usize {
        match &self.children {
            Some(children) => children.iter().map(SuiteTreeNode::spec_count).sum(),
            None => 1,
        }
    }
}

/// Whether a suite event belongs to a user suite or the framework's root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuiteKind {
    #[default]
    User,
    TopLevel,
}

/// Suite payload of suite started/done events
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteInfo {
    pub id: String,
    pub description: String,
    pub kind: SuiteKind,
}

impl SuiteInfo {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind: SuiteKind::User,
        }
    }

    pub fn top_level(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: TOP_LEVEL_SUITE_SENTINEL.to_string(),
            kind: SuiteKind::TopLevel,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.kind == SuiteKind::TopLevel
    }
}

/// Spec outcome as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecStatus {
    Passed,
    Failed,
    Pending,
    Disabled,
    #[default]
    #[serde(other)]
    Other,
}

impl SpecStatus {
    /// Disabled and pending specs did not run
    pub fn is_skipped(self) -> bool {
        matches!(self, SpecStatus::Disabled | SpecStatus::Pending)
    }
}

/// A single failed assertion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailedExpectation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl FailedExpectation {
    pub fn new(message: Option<&str>, stack: Option<&str>) -> Self {
        Self {
            message: message.map(str::to_string),
            stack: stack.map(str::to_string),
        }
    }
}

/// Spec payload of spec started/done events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SpecStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub failed_expectations: Vec<FailedExpectation>,
}

impl SpecResult {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: SpecStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_failure(mut self, failure: FailedExpectation) -> Self {
        self.failed_expectations.push(failure);
        self
    }
}

/// The framework environment a reporter is attached to
pub trait Host {
    /// Declared suite tree, available before any event fires
    fn top_suite(&self) -> &SuiteTreeNode;

    /// Install the predicate deciding which specs run
    fn set_spec_filter(&mut self, filter: SpecFilter);

    /// Run every spec, firing lifecycle hooks on the reporter in nesting order
    fn execute(&mut self, reporter: &mut dyn LifecycleReporter);
}
