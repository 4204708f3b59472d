// Stack sanitizer - turns a failed expectation into a single log entry

use once_cell::sync::Lazy;
use regex::Regex;

use crate::host::FailedExpectation;

/// Script name of the framework whose frames are stripped by default
pub const DEFAULT_FRAMEWORK_SCRIPT: &str = "jasmine.js";

static DEFAULT_FRAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    StackSanitizer::frame_regex(DEFAULT_FRAMEWORK_SCRIPT).expect("invalid framework frame regex")
});

/// Strips framework-internal frames from failure traces.
///
/// A framework frame is any line (after the first) that references
/// `<script>?<cache-buster>:<line>:<col>`, where `<script>` is the
/// configured framework script name.
#[derive(Debug, Clone)]
pub struct StackSanitizer {
    framework_frame: Regex,
}

impl Default for StackSanitizer {
    fn default() -> Self {
        Self {
            framework_frame: DEFAULT_FRAME_REGEX.clone(),
        }
    }
}

impl StackSanitizer {
    /// Create a sanitizer for the given framework script name
    pub fn new(framework_script: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            framework_frame: Self::frame_regex(framework_script)?,
        })
    }

    fn frame_regex(framework_script: &str) -> Result<Regex, regex::Error> {
        // `.` never crosses a newline, so the greedy tail stops at the end of the frame line.
        Regex::new(&format!(
            r"\n.+{}\?(?-u:\w)*:.+",
            regex::escape(framework_script)
        ))
    }

    /// Format a failed expectation as one log string
    pub fn format_failure(&self, failure: &FailedExpectation) -> String {
        self.format(failure.message.as_deref(), failure.stack.as_deref())
            .unwrap_or_default()
    }

    /// Merge message and stack, then drop framework frames.
    ///
    /// Returns the message unchanged when there is no stack.
    pub fn format(&self, message: Option<&str>, stack: Option<&str>) -> Option<String> {
        let stack = match stack {
            Some(stack) if !stack.is_empty() => stack,
            _ => return message.map(str::to_string),
        };

        let probe = first_line_probe(stack);
        let merged = match message {
            Some(message) if !message.is_empty() && !message.contains(probe) => {
                format!("{}\n{}", message, stack)
            }
            _ => stack.to_string(),
        };

        Some(self.strip_frames(&merged))
    }

    /// Remove every framework frame line from a trace
    pub fn strip_frames(&self, trace: &str) -> String {
        self.framework_frame.replace_all(trace, "").into_owned()
    }
}

/// First line of the stack minus its final character.
///
/// Browsers usually end the error line with a period the message lacks.
/// A stack with no line break (or an empty first line) yields an empty
/// probe, which every message contains.
fn first_line_probe(stack: &str) -> &str {
    match stack.find('\n') {
        Some(end) if end > 0 => {
            let line = &stack[..end];
            match line.char_indices().next_back() {
                Some((last, _)) => &line[..last],
                None => "",
            }
        }
        _ => "",
    }
}
