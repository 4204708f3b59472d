// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::filter::ClientArgs;

/// Output formats for relayed messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Console,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "ndjson" => Ok(Self::Json),
            "console" | "text" => Ok(Self::Console),
            _ => Err(()),
        }
    }
}

/// Relay test-framework lifecycle events as normalized result records
#[derive(Parser, Debug)]
#[command(name = "specrelay")]
#[command(author = "specrelay contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Relay recorded test lifecycle events as result records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Flatten RelayArgs so `specrelay events.ndjson` relays without a subcommand.
    #[command(flatten)]
    pub relay_args: RelayArgs,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(short = 'c', long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Install shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded event stream through the reporter (default)
    Relay(RelayArgs),

    /// Print the value of the --grep option found in client arguments
    Grep(GrepArgs),

    /// Print the spec names a grep pattern selects
    Filter(FilterArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RelayArgs {
    /// Newline-delimited JSON event file, stdin when omitted or "-"
    #[arg(required = false)]
    pub input: Option<PathBuf>,

    /// Output format (json, console)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write messages to a file instead of stdout
    #[arg(short = 'o', long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Only run specs whose full name contains PATTERN
    #[arg(long, value_name = "PATTERN")]
    pub grep: Option<String>,

    /// Raw client arguments searched for --grep=<pattern>
    #[arg(long, value_name = "ARGS", num_args = 1.., allow_hyphen_values = true)]
    pub client_args: Option<Vec<String>>,

    /// JSON coverage artifact attached to the completion message
    #[arg(long, value_name = "COVERAGE_FILE")]
    pub coverage: Option<PathBuf>,

    /// Script name whose frames are stripped from failure traces
    #[arg(long, value_name = "SCRIPT")]
    pub framework_script: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GrepArgs {
    /// Client arguments, as separate tokens or one string
    #[arg(required = false, allow_hyphen_values = true, trailing_var_arg = true)]
    pub args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Literal substring a spec's full name must contain
    #[arg(short = 'p', long)]
    pub pattern: String,

    /// Treat the pattern as a regular expression
    #[arg(long, default_value_t = false)]
    pub regex: bool,

    /// Spec full names, read from stdin lines when omitted
    #[arg(required = false)]
    pub names: Vec<String>,
}

impl Cli {
    /// Helper to get effective RelayArgs
    pub fn get_relay_args(&self) -> &RelayArgs {
        match &self.command {
            Some(Commands::Relay(args)) => args,
            _ => &self.relay_args,
        }
    }
}

impl RelayArgs {
    /// Client arguments from the flags, `--grep` taking precedence
    pub fn client_args(&self) -> Option<ClientArgs> {
        if let Some(grep) = &self.grep {
            return Some(ClientArgs::Text(format!("--grep={}", grep)));
        }
        self.client_args.clone().map(ClientArgs::List)
    }

    /// Whether input comes from stdin
    pub fn reads_stdin(&self) -> bool {
        match &self.input {
            None => true,
            Some(path) => path.as_os_str() == "-",
        }
    }
}

impl GrepArgs {
    /// A single argument is searched as a string, several as a token list
    pub fn client_args(&self) -> ClientArgs {
        match self.args.as_slice() {
            [single] => ClientArgs::Text(single.clone()),
            tokens => ClientArgs::List(tokens.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("Console".parse::<OutputFormat>(), Ok(OutputFormat::Console));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_implicit_relay() {
        let cli = Cli::parse_from(["specrelay", "events.ndjson", "--grep", "login"]);
        let args = cli.get_relay_args();
        assert_eq!(args.input, Some(PathBuf::from("events.ndjson")));
        assert_eq!(
            args.client_args(),
            Some(ClientArgs::Text("--grep=login".to_string()))
        );
        assert!(!args.reads_stdin());
    }

    #[test]
    fn test_relay_subcommand_with_client_args() {
        let cli = Cli::parse_from(["specrelay", "relay", "-", "--client-args=--grep=checkout"]);
        let args = cli.get_relay_args();
        assert!(args.reads_stdin());
        assert_eq!(
            args.client_args(),
            Some(ClientArgs::List(vec!["--grep=checkout".to_string()]))
        );
    }

    #[test]
    fn test_grep_args_shape() {
        let single = GrepArgs {
            args: vec!["--grep=x".to_string()],
        };
        assert_eq!(single.client_args(), ClientArgs::Text("--grep=x".to_string()));

        let many = GrepArgs {
            args: vec!["--grep".to_string(), "x".to_string()],
        };
        assert_eq!(
            many.client_args(),
            ClientArgs::List(vec!["--grep".to_string(), "x".to_string()])
        );
    }
}
