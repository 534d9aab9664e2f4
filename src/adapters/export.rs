//! Rendering the sample document and handing it to the user
//!
//! Delivery is fire-and-forget: a failing sink is reported through a
//! [`Notifier`] and never propagates into the session.

use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info};

use super::error::{ExportError, ExportResult};
use super::notifier::{Notification, Notifier};
use crate::config::EXPORT_MEDIA_TYPE;

/// Pretty-print with two-space indentation
pub fn render_pretty(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// A rendered document ready for delivery
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportDocument {
    pub body: String,
    pub file_name: String,
    pub media_type: &'static str,
}

impl ExportDocument {
    pub fn from_value(
        value: &Value,
        file_name: impl Into<String>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            body: render_pretty(value)?,
            file_name: file_name.into(),
            media_type: EXPORT_MEDIA_TYPE,
        })
    }
}

/// Destination for an exported document
pub trait ExportSink {
    fn deliver(&mut self, document: &ExportDocument) -> ExportResult<()>;

    fn success_notice(&self, document: &ExportDocument) -> Notification;

    fn failure_notice(&self, err: &ExportError) -> Notification;
}

/// Writes `<directory>/<file_name>`
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, document: &ExportDocument) -> PathBuf {
        self.directory.join(&document.file_name)
    }
}

impl ExportSink for FileSink {
    fn deliver(&mut self, document: &ExportDocument) -> ExportResult<()> {
        let path = self.path_for(document);
        std::fs::write(&path, &document.body).map_err(|source| ExportError::Write { path, source })
    }

    fn success_notice(&self, document: &ExportDocument) -> Notification {
        Notification::info(
            "Schema exported",
            format!(
                "JSON schema has been saved to {}.",
                self.path_for(document).display()
            ),
        )
    }

    fn failure_notice(&self, err: &ExportError) -> Notification {
        Notification::destructive("Export failed", err.to_string())
    }
}

/// Writes the document to a stream; stdout stands in for the clipboard
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ExportSink for WriterSink<W> {
    fn deliver(&mut self, document: &ExportDocument) -> ExportResult<()> {
        writeln!(self.out, "{}", document.body)?;
        self.out.flush()?;
        Ok(())
    }

    fn success_notice(&self, _document: &ExportDocument) -> Notification {
        Notification::info("Copied to clipboard", "JSON schema written to output.")
    }

    fn failure_notice(&self, err: &ExportError) -> Notification {
        Notification::destructive("Copy failed", err.to_string())
    }
}

/// Deliver `document` and report the outcome; returns whether delivery succeeded
pub fn deliver(
    document: &ExportDocument,
    sink: &mut dyn ExportSink,
    notifier: &mut dyn Notifier,
) -> bool {
    match sink.deliver(document) {
        Ok(()) => {
            info!(
                file_name = %document.file_name,
                bytes = document.body.len(),
                "Schema delivered"
            );
            notifier.notify(sink.success_notice(document));
            true
        }
        Err(e) => {
            error!("Schema delivery failed: {}", e);
            notifier.notify(sink.failure_notice(&e));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notifier::Severity;
    use serde_json::json;
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_render_uses_two_space_indent() {
        let text = render_pretty(&json!({"user": {"age": 42}})).unwrap();
        assert_eq!(text, "{\n  \"user\": {\n    \"age\": 42\n  }\n}");
    }

    #[test]
    fn test_document_metadata() {
        let doc = ExportDocument::from_value(&json!({}), "schema.json").unwrap();
        assert_eq!(doc.media_type, "application/json");
        assert_eq!(doc.body, "{}");
    }

    #[test]
    fn test_writer_sink_delivers() {
        let doc = ExportDocument::from_value(&json!({"a": 1}), "schema.json").unwrap();
        let mut sink = WriterSink::new(Vec::new());
        let mut notices: Vec<Notification> = Vec::new();

        assert!(deliver(&doc, &mut sink, &mut notices));
        assert_eq!(
            String::from_utf8(sink.into_inner()).unwrap(),
            "{\n  \"a\": 1\n}\n"
        );
        assert_eq!(notices[0].title, "Copied to clipboard");
    }

    #[test]
    fn test_failure_becomes_notification() {
        let doc = ExportDocument::from_value(&json!({"a": 1}), "schema.json").unwrap();
        let mut notices: Vec<Notification> = Vec::new();

        assert!(!deliver(&doc, &mut WriterSink::new(BrokenPipe), &mut notices));
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Copy failed");
        assert_eq!(notices[0].severity, Severity::Destructive);
        assert!(notices[0].description.contains("pipe closed"));
    }
}
