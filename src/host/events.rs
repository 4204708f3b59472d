// Recorded host events - newline-delimited JSON

use serde::Deserialize;
use std::io::BufRead;
use thiserror::Error;

use super::{
    null_as_default, SpecResult, SuiteInfo, SuiteKind, SuiteTreeNode, TOP_LEVEL_SUITE_SENTINEL,
};

/// Errors raised while decoding an event stream
#[derive(Debug, Error)]
pub enum EventStreamError {
    #[error("failed to read event stream")]
    Io(#[from] std::io::Error),

    #[error("malformed event on line {line}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One lifecycle event fired by the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    RunStarted {
        total_specs_defined: usize,
        top_suite: Option<SuiteTreeNode>,
    },
    SuiteStarted(SuiteInfo),
    SuiteDone(SuiteInfo),
    SpecStarted(SpecResult),
    SpecDone(SpecResult),
    RunDone,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
enum WireEvent {
    #[serde(rename_all = "camelCase")]
    JasmineStarted {
        #[serde(default, deserialize_with = "null_as_default")]
        total_specs_defined: usize,
        #[serde(default)]
        top_suite: Option<SuiteTreeNode>,
    },
    SuiteStarted(WireSuite),
    SuiteDone(WireSuite),
    SpecStarted(SpecResult),
    SpecDone(SpecResult),
    JasmineDone {},
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSuite {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    top_level: bool,
}

impl From<WireSuite> for SuiteInfo {
    fn from(wire: WireSuite) -> Self {
        // The sentinel description is only honored here, at the decoding boundary.
        let kind = if wire.top_level || wire.description == TOP_LEVEL_SUITE_SENTINEL {
            SuiteKind::TopLevel
        } else {
            SuiteKind::User
        };
        SuiteInfo {
            id: wire.id,
            description: wire.description,
            kind,
        }
    }
}

impl From<WireEvent> for HostEvent {
    fn from(wire: WireEvent) -> Self {
        match wire {
            WireEvent::JasmineStarted {
                total_specs_defined,
                top_suite,
            } => HostEvent::RunStarted {
                total_specs_defined,
                top_suite,
            },
            WireEvent::SuiteStarted(suite) => HostEvent::SuiteStarted(suite.into()),
            WireEvent::SuiteDone(suite) => HostEvent::SuiteDone(suite.into()),
            WireEvent::SpecStarted(spec) => HostEvent::SpecStarted(spec),
            WireEvent::SpecDone(spec) => HostEvent::SpecDone(spec),
            WireEvent::JasmineDone {} => HostEvent::RunDone,
        }
    }
}

impl HostEvent {
    /// Decode a single JSON event
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<WireEvent>(line).map(HostEvent::from)
    }
}

/// Decode every event of a newline-delimited stream, skipping blank lines
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<HostEvent>, EventStreamError> {
    let mut events = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let event = HostEvent::parse(trimmed).map_err(|source| EventStreamError::Malformed {
            line: index + 1,
            source,
        })?;
        events.push(event);
    }

    Ok(events)
}
