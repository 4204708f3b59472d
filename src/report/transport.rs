// Transports - where reporter messages go

use std::io::{self, Write};
use tracing::warn;

use super::{Message, RunComplete, RunInfo};
use crate::state::SpecReport;

/// Channel to the result-consuming process.
///
/// Sending never fails from the reporter's point of view; a transport
/// that cannot deliver logs the problem and drops the message.
pub trait Transport {
    fn send(&mut self, message: Message);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, message: Message) {
        (**self).send(message);
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, message: Message) {
        (**self).send(message);
    }
}

/// Writes one JSON object per message
pub struct JsonLinesTransport<W: Write> {
    writer: W,
}

impl JsonLinesTransport<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, message: &Message) -> io::Result<()> {
        let line = serde_json::to_string(message)?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}

impl<W: Write> Transport for JsonLinesTransport<W> {
    fn send(&mut self, message: Message) {
        if let Err(e) = self.write_line(&message) {
            warn!("Failed to deliver message: {}", e);
        }
    }
}

/// Keeps every message in memory
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    messages: Vec<Message>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The run announcement, if one was sent
    pub fn info(&self) -> Option<&RunInfo> {
        self.messages.iter().find_map(|message| match message {
            Message::Info(info) => Some(info),
            _ => None,
        })
    }

    /// Spec results in the order they were sent
    pub fn results(&self) -> Vec<&SpecReport> {
        self.messages
            .iter()
            .filter_map(|message| match message {
                Message::Result(report) => Some(report),
                _ => None,
            })
            .collect()
    }

    /// The completion message, if one was sent
    pub fn complete(&self) -> Option<&RunComplete> {
        self.messages.iter().find_map(|message| match message {
            Message::Complete(complete) => Some(complete),
            _ => None,
        })
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, message: Message) {
        self.messages.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_lines_tags_each_message() {
        let mut transport = JsonLinesTransport::new(Vec::new());
        transport.send(Message::Result(SpecReport {
            description: "works".to_string(),
            id: "spec0".to_string(),
            success: true,
            ..Default::default()
        }));
        transport.send(Message::Complete(RunComplete::default()));

        let output = String::from_utf8(transport.into_inner()).expect("utf8");
        let lines: Vec<Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            json!({
                "event": "result",
                "description": "works",
                "id": "spec0",
                "log": [],
                "skipped": false,
                "success": true,
                "suite": [],
                "time": 0
            })
        );
        assert_eq!(lines[1], json!({ "event": "complete" }));
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut transport = JsonLinesTransport::new(BrokenWriter);
        transport.send(Message::Complete(RunComplete::default()));
    }

    #[test]
    fn test_recording_accessors() {
        let mut transport = RecordingTransport::new();
        transport.send(Message::Complete(RunComplete {
            coverage: Some(json!({})),
        }));

        assert!(transport.info().is_none());
        assert!(transport.results().is_empty());
        assert_eq!(
            transport.complete().and_then(|c| c.coverage.clone()),
            Some(json!({}))
        );
        assert_eq!(transport.messages().len(), 1);
    }
}
