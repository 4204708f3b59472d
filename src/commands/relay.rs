// Relay command - replay a recorded event stream through the reporter

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cli::args::RelayArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::filter::ClientArgs;
use crate::host::ReplayHost;
use crate::report::{ConsoleTransport, CoverageSource, JsonLinesTransport, Transport};
use crate::runner::{self, StartOptions};
use crate::sanitize::StackSanitizer;
use crate::state::RunSummary;

/// Relay settings after merging config file and command line
#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub color: bool,
    pub client_args: ClientArgs,
    pub coverage: Option<PathBuf>,
    pub framework_script: String,
}

impl RelaySettings {
    /// Command-line values win over the config file
    pub fn resolve(args: &RelayArgs, config: Option<&Config>, no_color: bool) -> Result<Self> {
        let defaults = Config::default();
        let config = config.unwrap_or(&defaults);

        let format_name = args
            .format
            .clone()
            .unwrap_or_else(|| config.general.format.clone());
        let format = format_name
            .parse::<OutputFormat>()
            .map_err(|_| anyhow::anyhow!("Unsupported output format: {}", format_name))?;

        let output = args
            .output
            .clone()
            .or_else(|| config.general.output.as_ref().map(PathBuf::from));

        Ok(Self {
            input: if args.reads_stdin() {
                None
            } else {
                args.input.clone()
            },
            format,
            color: config.general.color && !no_color && output.is_none(),
            output,
            client_args: args
                .client_args()
                .unwrap_or_else(|| config.filter.args.clone()),
            coverage: args.coverage.clone().or_else(|| config.coverage.path_buf()),
            framework_script: args
                .framework_script
                .clone()
                .unwrap_or_else(|| config.stack.framework_script.clone()),
        })
    }

    fn open_host(&self) -> Result<ReplayHost> {
        let host = match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open event file: {}", path.display()))?;
                ReplayHost::from_reader(BufReader::new(file))
            }
            None => ReplayHost::from_reader(io::stdin().lock()),
        };
        host.context("Failed to decode event stream")
    }

    fn open_transport(&self) -> Result<Box<dyn Transport>> {
        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };

        Ok(match self.format {
            OutputFormat::Json => Box::new(JsonLinesTransport::new(writer)),
            OutputFormat::Console => Box::new(ConsoleTransport::new(writer, self.color)),
        })
    }
}

pub fn handle_relay(settings: &RelaySettings) -> Result<RunSummary> {
    let mut host = settings.open_host()?;
    debug!("Decoded {} events", host.events().len());

    let sanitizer = StackSanitizer::new(&settings.framework_script).with_context(|| {
        format!("Invalid framework script name: {}", settings.framework_script)
    })?;

    let options = StartOptions {
        client_args: settings.client_args.clone(),
        sanitizer,
        coverage: CoverageSource::from_path(settings.coverage.clone()),
    };

    let transport = settings.open_transport()?;
    let (_transport, summary) =
        runner::start(&mut host, transport, options).context("Failed to build spec filter")?;

    info!(
        "Relayed {} specs: {} passed, {} failed, {} skipped ({:.1}% of executed passed)",
        summary.total(),
        summary.passed(),
        summary.failed(),
        summary.skipped(),
        summary.pass_rate()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let settings = RelaySettings::resolve(&RelayArgs::default(), None, false).expect("settings");
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(settings.input.is_none());
        assert!(settings.output.is_none());
        assert!(settings.color);
        assert_eq!(settings.client_args, ClientArgs::default());
        assert_eq!(settings.framework_script, "jasmine.js");
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config::parse(
            "[general]\nformat = \"console\"\n[filter]\nargs = \"--grep=config\"\n[stack]\nframework_script = \"mocha.js\"\n",
        )
        .expect("config");
        let args = RelayArgs {
            grep: Some("cli".to_string()),
            ..Default::default()
        };

        let settings = RelaySettings::resolve(&args, Some(&config), true).expect("settings");

        assert_eq!(settings.format, OutputFormat::Console);
        assert!(!settings.color);
        assert_eq!(settings.client_args, ClientArgs::Text("--grep=cli".to_string()));
        assert_eq!(settings.framework_script, "mocha.js");
    }

    #[test]
    fn test_output_file_disables_color() {
        let args = RelayArgs {
            output: Some(PathBuf::from("results.txt")),
            ..Default::default()
        };
        let settings = RelaySettings::resolve(&args, None, false).expect("settings");
        assert!(!settings.color);
    }

    #[test]
    fn test_console_relay_to_file_is_plain_text() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let input = dir.path().join("events.ndjson");
        let output = dir.path().join("out.txt");
        std::fs::write(
            &input,
            concat!(
                "{\"event\":\"jasmineStarted\",\"totalSpecsDefined\":1}\n",
                "{\"event\":\"specDone\",\"id\":\"spec0\",\"description\":\"d\",\"status\":\"failed\",\"failedExpectations\":[{\"message\":\"nope\"}]}\n",
                "{\"event\":\"jasmineDone\"}\n",
            ),
        )
        .expect("write events");

        let args = RelayArgs {
            input: Some(input),
            output: Some(output.clone()),
            format: Some("console".to_string()),
            ..Default::default()
        };
        let settings = RelaySettings::resolve(&args, None, false).expect("settings");
        handle_relay(&settings).expect("relay");

        let written = std::fs::read_to_string(&output).expect("read output");
        assert!(written.contains("Running 1 specs"));
        assert!(written.contains("✗ d (0ms)"));
        assert!(written.contains("0 passed, 1 failed"));
        assert!(!written.contains("\x1b["));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let args = RelayArgs {
            format: Some("xml".to_string()),
            ..Default::default()
        };
        let err = RelaySettings::resolve(&args, None, false).expect_err("should fail");
        assert!(err.to_string().contains("Unsupported output format"));
    }

    #[test]
    fn test_relay_file_to_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let input = dir.path().join("events.ndjson");
        let output = dir.path().join("out.ndjson");
        std::fs::write(
            &input,
            concat!(
                "{\"event\":\"jasmineStarted\",\"totalSpecsDefined\":1}\n",
                "{\"event\":\"suiteStarted\",\"id\":\"suite1\",\"description\":\"math\"}\n",
                "{\"event\":\"specDone\",\"id\":\"spec0\",\"description\":\"adds\",\"status\":\"failed\",\"failedExpectations\":[{\"message\":\"Expected 3 to be 4.\"}]}\n",
                "{\"event\":\"suiteDone\",\"id\":\"suite1\",\"description\":\"math\"}\n",
                "{\"event\":\"jasmineDone\"}\n",
            ),
        )
        .expect("write events");

        let args = RelayArgs {
            input: Some(input),
            output: Some(output.clone()),
            ..Default::default()
        };
        let settings = RelaySettings::resolve(&args, None, false).expect("settings");
        let summary = handle_relay(&settings).expect("relay");

        assert_eq!(summary.failed(), 1);
        let written = std::fs::read_to_string(&output).expect("read output");
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("\"suite\":[\"math\"]"));
        assert!(lines[1].contains("Expected 3 to be 4."));
    }
}
