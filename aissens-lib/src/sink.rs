//! Output boundary: decoded records leave the pipeline through an
//! [`OutputSink`].
//!
//! Sinks are selected by configuration key through [`create`] at process
//! start; an unknown key fails there, before any message handling, instead of
//! at decode time.

use std::io::Write;

use serde_json::{Map, Value, json};

use crate::error::SinkError;

/// A storage backend for decoded records.
///
/// `name` is the record/table name, `fields` the flat column map
/// (`timestamp`, `sensor_name`, `data_type`, `payload`). Implementations own
/// their concurrency discipline; the dispatcher never retries a failed write.
pub trait OutputSink {
    fn write(&mut self, name: &str, fields: &Map<String, Value>) -> Result<(), SinkError>;
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn write(&mut self, name: &str, fields: &Map<String, Value>) -> Result<(), SinkError> {
        (**self).write(name, fields)
    }
}

/// Writes each record as one JSON line to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&mut self, name: &str, fields: &Map<String, Value>) -> Result<(), SinkError> {
        let line = serde_json::to_string(&json!({ "name": name, "fields": fields }))?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        Ok(())
    }
}

/// Discards every record. Useful for bring-up and throughput measurement.
#[derive(Debug, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn write(&mut self, _name: &str, _fields: &Map<String, Value>) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Static sink registry: resolve a configuration key to a sink instance.
pub fn create(key: &str) -> Result<Box<dyn OutputSink + Send>, SinkError> {
    match key {
        "stdout" => Ok(Box::new(StdoutSink)),
        "null" => Ok(Box::new(NullSink)),
        other => Err(SinkError::UnknownSink(other.to_string())),
    }
}
