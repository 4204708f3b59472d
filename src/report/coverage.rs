// Coverage artifact attached to the completion message

use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Where the completion message gets its coverage artifact from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CoverageSource {
    #[default]
    None,
    /// Artifact already in memory
    Value(Value),
    /// JSON file written by instrumented code, read when the run completes
    File(PathBuf),
}

impl CoverageSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => CoverageSource::File(path),
            None => CoverageSource::None,
        }
    }

    /// Load the artifact. A missing or unparsable file yields `None`.
    pub fn load(&self) -> Option<Value> {
        match self {
            CoverageSource::None => None,
            CoverageSource::Value(value) => Some(value.clone()),
            CoverageSource::File(path) => {
                let content = match std::fs::read_to_string(path) {
                    Ok(content) => content,
                    Err(e) => {
                        warn!("Coverage file {} not readable: {}", path.display(), e);
                        return None;
                    }
                };

                match serde_json::from_str(&content) {
                    Ok(value) => {
                        debug!("Loaded coverage from {}", path.display());
                        Some(value)
                    }
                    Err(e) => {
                        warn!("Coverage file {} is not valid JSON: {}", path.display(), e);
                        None
                    }
                }
            }
        }
    }
}
