// Console transport - human-readable run output

use console::Style;
use std::io::{self, Write};
use tracing::warn;

use super::{Message, Transport};
use crate::state::{RunSummary, SpecOutcome, SpecReport};

const SUITE_SEPARATOR: &str = " › ";

/// Prints one line per spec and a totals line at the end
pub struct ConsoleTransport<W: Write> {
    writer: W,
    colored: bool,
    summary: RunSummary,
}

impl ConsoleTransport<io::Stdout> {
    pub fn stdout(colored: bool) -> Self {
        Self::new(io::stdout(), colored)
    }
}

impl<W: Write> ConsoleTransport<W> {
    pub fn new(writer: W, colored: bool) -> Self {
        Self {
            writer,
            colored,
            summary: RunSummary::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Colored output still defers to terminal detection, uncolored always wins
    fn style(&self) -> Style {
        if self.colored {
            Style::new()
        } else {
            Style::new().force_styling(false)
        }
    }

    fn write_result(&mut self, report: &SpecReport) -> io::Result<()> {
        let title = report.full_title(SUITE_SEPARATOR);

        match report.status() {
            SpecOutcome::Passed => {
                let mark = self.style().green().apply_to("✓");
                writeln!(self.writer, "  {} {} ({}ms)", mark, title, report.time)?;
            }
            SpecOutcome::Skipped => {
                let line = self.style().yellow().apply_to(format!("- {} (skipped)", title));
                writeln!(self.writer, "  {}", line)?;
            }
            SpecOutcome::Failed => {
                let mark = self.style().red().bold().apply_to("✗");
                writeln!(self.writer, "  {} {} ({}ms)", mark, title, report.time)?;
                let dim = self.style().dim();
                for entry in &report.log {
                    for line in entry.lines() {
                        writeln!(self.writer, "      {}", dim.apply_to(line))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn write_message(&mut self, message: &Message) -> io::Result<()> {
        match message {
            Message::Info(info) => {
                let heading = self.style().bold().apply_to(format!("Running {} specs", info.total));
                writeln!(self.writer, "{}", heading)?;
            }
            Message::Result(report) => {
                self.summary.add(report);
                self.write_result(report)?;
            }
            Message::Complete(complete) => {
                let totals = format!(
                    "{} passed, {} failed, {} skipped ({} total)",
                    self.summary.passed(),
                    self.summary.failed(),
                    self.summary.skipped(),
                    self.summary.total()
                );
                let style = if self.summary.all_passed() {
                    self.style().green()
                } else {
                    self.style().red()
                };
                writeln!(self.writer)?;
                writeln!(self.writer, "{}", style.apply_to(totals))?;
                if complete.coverage.is_some() {
                    writeln!(self.writer, "Coverage collected")?;
                }
            }
        }

        self.writer.flush()
    }
}

impl<W: Write> Transport for ConsoleTransport<W> {
    fn send(&mut self, message: Message) {
        if let Err(e) = self.write_message(&message) {
            warn!("Failed to write console output: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RunComplete;

    fn render(messages: Vec<Message>) -> String {
        let mut transport = ConsoleTransport::new(Vec::new(), false);
        for message in messages {
            transport.send(message);
        }
        String::from_utf8(transport.into_inner()).expect("utf8")
    }

    #[test]
    fn test_passed_spec_line() {
        let output = render(vec![Message::Result(SpecReport {
            description: "works".to_string(),
            suite: vec!["outer".to_string()],
            success: true,
            time: 12,
            ..Default::default()
        })]);

        assert_eq!(output, "  ✓ outer › works (12ms)\n");
    }

    #[test]
    fn test_failed_spec_prints_log() {
        let output = render(vec![Message::Result(SpecReport {
            description: "breaks".to_string(),
            log: vec!["Error: nope\n    at spec.js:1:1".to_string()],
            ..Default::default()
        })]);

        assert!(output.contains("✗ breaks (0ms)"));
        assert!(output.contains("      Error: nope\n"));
        assert!(output.contains("          at spec.js:1:1\n"));
    }

    #[test]
    fn test_totals_on_complete() {
        let output = render(vec![
            Message::Result(SpecReport {
                success: true,
                ..Default::default()
            }),
            Message::Result(SpecReport {
                skipped: true,
                success: true,
                ..Default::default()
            }),
            Message::Complete(RunComplete::default()),
        ]);

        assert!(output.contains("1 passed, 0 failed, 1 skipped (2 total)"));
        assert!(!output.contains("Coverage collected"));
    }
}
