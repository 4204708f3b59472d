// Spec result record sent to the transport

use serde::{Deserialize, Serialize};

/// Normalized result of one spec
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecReport {
    pub description: String,
    pub id: String,
    pub log: Vec<String>,
    pub skipped: bool,
    pub success: bool,
    /// Enclosing suite names, outermost first
    pub suite: Vec<String>,
    /// Elapsed milliseconds, 0 when skipped or never started
    pub time: u64,
}

impl SpecReport {
    /// Suite path and description joined for display
    pub fn full_title(&self, separator: &str) -> String {
        self.suite
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.description.as_str()))
            .collect::<Vec<_>>()
            .join(separator)
    }

    pub fn status(&self) -> SpecOutcome {
        if self.skipped {
            SpecOutcome::Skipped
        } else if self.success {
            SpecOutcome::Passed
        } else {
            SpecOutcome::Failed
        }
    }
}

/// Outcome derived from a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpecOutcome {
    Passed,
    Failed,
    Skipped,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SpecReport {
        SpecReport {
            description: "works".to_string(),
            id: "spec0".to_string(),
            suite: vec!["outer".to_string(), "inner".to_string()],
            success: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_full_title() {
        assert_eq!(report().full_title(" > "), "outer > inner > works");
    }

    #[test]
    fn test_full_title_without_suites() {
        let report = SpecReport {
            suite: Vec::new(),
            ..report()
        };
        assert_eq!(report.full_title(" "), "works");
    }

    #[test]
    fn test_status() {
        assert_eq!(report().status(), SpecOutcome::Passed);

        let failed = SpecReport {
            success: false,
            ..report()
        };
        assert_eq!(failed.status(), SpecOutcome::Failed);

        // Skipped specs report success, skip wins
        let skipped = SpecReport {
            skipped: true,
            ..report()
        };
        assert_eq!(skipped.status(), SpecOutcome::Skipped);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(report()).expect("serializable");
        for key in ["description", "id", "log", "skipped", "success", "suite", "time"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }
}
