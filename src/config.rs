// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::filter::ClientArgs;
use crate::sanitize::DEFAULT_FRAMEWORK_SCRIPT;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub stack: StackConfig,

    #[serde(default)]
    pub coverage: CoverageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output format (json, console)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output file for messages, stdout when unset
    #[serde(default)]
    pub output: Option<String>,

    /// Enable colored console output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            output: None,
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FilterConfig {
    /// Client arguments searched for `--grep=<pattern>`
    #[serde(default)]
    pub args: ClientArgs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackConfig {
    /// Script whose frames are stripped from failure traces
    #[serde(default = "default_framework_script")]
    pub framework_script: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            framework_script: default_framework_script(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoverageConfig {
    /// JSON coverage artifact attached to the completion message
    #[serde(default)]
    pub path: Option<String>,
}

impl CoverageConfig {
    pub fn path_buf(&self) -> Option<PathBuf> {
        self.path.as_ref().map(PathBuf::from)
    }
}

// Default values
pub const ENV_SPECRELAY_CONFIG: &str = "SPECRELAY_CONFIG";

pub fn default_format() -> String {
    String::from("json")
}

fn default_color() -> bool {
    true
}

pub fn default_framework_script() -> String {
    String::from(DEFAULT_FRAMEWORK_SCRIPT)
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 0. $SPECRELAY_CONFIG
        // 1. .specrelayrc (current directory)
        // 2. ~/.specrelayrc (home directory)
        // 3. .specrelayrc.toml (current directory)
        // 4. ~/.specrelayrc.toml (home directory)

        if let Some(path) = std::env::var_os(ENV_SPECRELAY_CONFIG) {
            return Self::load_from_file(Path::new(&path));
        }

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        let paths = [
            cwd.join(".specrelayrc"),
            home.join(".specrelayrc"),
            cwd.join(".specrelayrc.toml"),
            home.join(".specrelayrc.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[general]
format = "console"
output = "results.ndjson"
color = false

[filter]
args = ["--grep", "login"]

[stack]
framework_script = "mocha.js"

[coverage]
path = "coverage/coverage.json"
"#;

        let config = Config::parse(toml).expect("Failed to parse config");
        assert_eq!(config.general.format, "console");
        assert_eq!(config.general.output, Some("results.ndjson".to_string()));
        assert!(!config.general.color);
        assert_eq!(
            config.filter.args,
            ClientArgs::List(vec!["--grep".to_string(), "login".to_string()])
        );
        assert_eq!(config.stack.framework_script, "mocha.js");
        assert_eq!(
            config.coverage.path_buf(),
            Some(PathBuf::from("coverage/coverage.json"))
        );
    }

    #[test]
    fn test_parse_string_filter_args() {
        let config = Config::parse("[filter]\nargs = \"--grep=checkout\"\n").expect("config");
        assert_eq!(config.filter.args, ClientArgs::Text("--grep=checkout".to_string()));
    }

    #[test]
    fn test_to_toml_round_trips_defaults() {
        let rendered = Config::default().to_toml();
        let parsed = Config::parse(&rendered).expect("rendered config parses");
        assert_eq!(parsed.general.format, "json");
        assert_eq!(parsed.stack.framework_script, "jasmine.js");
    }
}
