// Spec filter - selects specs by full name

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static GREP_OPTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--grep=(.*)").expect("invalid grep option regex"));

static MATCH_ALL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("").expect("invalid empty regex"));

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid spec filter pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Client arguments handed to the adapter, as a token list or one string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientArgs {
    List(Vec<String>),
    Text(String),
}

impl Default for ClientArgs {
    fn default() -> Self {
        ClientArgs::List(Vec::new())
    }
}

impl ClientArgs {
    /// Flatten to the string the grep option is searched in.
    ///
    /// List tokens are joined with `=` so `["--grep", "x"]` reads as `--grep=x`.
    pub fn as_search_text(&self) -> String {
        match self {
            ClientArgs::List(tokens) => tokens.join("="),
            ClientArgs::Text(text) => text.clone(),
        }
    }
}

impl From<Vec<String>> for ClientArgs {
    fn from(tokens: Vec<String>) -> Self {
        ClientArgs::List(tokens)
    }
}

impl From<&[&str]> for ClientArgs {
    fn from(tokens: &[&str]) -> Self {
        ClientArgs::List(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl From<&str> for ClientArgs {
    fn from(text: &str) -> Self {
        ClientArgs::Text(text.to_string())
    }
}

/// Value of `--grep=<value>` in the client arguments, empty when absent.
///
/// The value runs to the end of the line, so tokens after the grep value in
/// a list end up in it as well.
pub fn grep_option(args: &ClientArgs) -> String {
    let text = args.as_search_text();
    GREP_OPTION_REGEX
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Compiled spec name predicate. An empty pattern matches every spec.
#[derive(Debug, Clone)]
pub struct SpecFilter {
    pattern: Regex,
}

impl SpecFilter {
    /// Filter matching `text` as a literal substring
    pub fn literal(text: &str) -> Result<Self, FilterError> {
        Self::from_pattern(&regex::escape(text))
    }

    /// Filter from a regular expression
    pub fn from_pattern(pattern: &str) -> Result<Self, FilterError> {
        let pattern = Regex::new(pattern).map_err(|source| FilterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    /// Filter that lets every spec through
    pub fn match_all() -> Self {
        Self {
            pattern: MATCH_ALL_REGEX.clone(),
        }
    }

    pub fn matches(&self, full_name: &str) -> bool {
        self.pattern.is_match(full_name)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for SpecFilter {
    fn default() -> Self {
        Self::match_all()
    }
}
