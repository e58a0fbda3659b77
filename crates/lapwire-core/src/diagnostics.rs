use std::io::Write;

use serde::Serialize;
use tracing::warn;

/// A non-fatal report: an undecodable buffer or a failure caught at the
/// pipeline boundary.
///
/// Serialized as one JSON object per record, mirroring what a downstream
/// collector expects:
///
/// ```json
/// {"timestamp":"2026-08-29T14:03:07.114","type":"raw","hex":"deadbeef"}
/// {"timestamp":"2026-08-29T14:03:09.021","type":"error","error":"..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Wall-clock timestamp, ISO-8601 with millisecond precision.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// Hex rendering of the offending buffer, for `raw` records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    /// Error description, for `error` records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Transport-supplied hint about where the notification came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// A buffer that did not decode as a telemetry frame.
    Raw,
    /// A failure caught while handling one notification.
    Error,
}

impl Diagnostic {
    /// Record an undecodable buffer with its raw hex payload.
    pub fn raw(timestamp: impl Into<String>, payload: &[u8]) -> Self {
        Self {
            timestamp: timestamp.into(),
            kind: DiagnosticKind::Raw,
            hex: Some(hex::encode(payload)),
            error: None,
            source: None,
        }
    }

    /// Record a caught failure.
    pub fn error(timestamp: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self {
            timestamp: timestamp.into(),
            kind: DiagnosticKind::Error,
            hex: None,
            error: Some(err.to_string()),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Destination for diagnostic records.
pub trait DiagnosticSink {
    fn emit(&mut self, record: Diagnostic);
}

/// Writes newline-delimited JSON records to any writer (stdout, a file).
///
/// A failed write is downgraded to a `tracing` warning: diagnostics must
/// never become a reason to stop the pipeline.
pub struct JsonLineSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> DiagnosticSink for JsonLineSink<W> {
    fn emit(&mut self, record: Diagnostic) {
        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(err) = writeln!(self.writer, "{json}") {
                    warn!(%err, "diagnostic write failed");
                }
            }
            Err(err) => warn!(%err, "diagnostic serialization failed"),
        }
    }
}

/// Buffers records in memory. Used by tests and embedders that want to
/// inspect diagnostics programmatically.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<Diagnostic>,
}

impl DiagnosticSink for MemorySink {
    fn emit(&mut self, record: Diagnostic) {
        self.records.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_serialization() {
        let record = Diagnostic::raw("2026-08-29T14:03:07.114", &[0xDE, 0xAD, 0xBE, 0xEF]);
        let json = serde_json::to_string(&record).expect("record should serialize");

        assert_eq!(
            json,
            r#"{"timestamp":"2026-08-29T14:03:07.114","type":"raw","hex":"deadbeef"}"#
        );
    }

    #[test]
    fn test_error_record_serialization() {
        let record = Diagnostic::error("2026-08-29T14:03:09.021", "disk full").with_source("ble");
        let json = serde_json::to_string(&record).expect("record should serialize");

        assert_eq!(
            json,
            r#"{"timestamp":"2026-08-29T14:03:09.021","type":"error","error":"disk full","source":"ble"}"#
        );
    }

    #[test]
    fn test_json_line_sink_writes_one_line_per_record() {
        let mut buf = Vec::new();
        {
            let mut sink = JsonLineSink::new(&mut buf);
            sink.emit(Diagnostic::raw("t1", &[0x01]));
            sink.emit(Diagnostic::error("t2", "boom"));
        }

        let text = String::from_utf8(buf).expect("sink output should be utf-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""hex":"01""#));
        assert!(lines[1].contains(r#""error":"boom""#));
    }
}
