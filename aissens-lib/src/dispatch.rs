//! Routing of inbound payloads to the packet decoders.

use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::DecodeError;
use crate::fft::FftPacket;
use crate::field;
use crate::oa::OaPacket;
use crate::sink::OutputSink;
use crate::types::DataType;

/// Outcome of routing one inbound payload.
#[derive(Debug, PartialEq)]
pub enum Dispatch {
    /// Payload decoded and handed to the sink.
    Decoded(DataType),
    /// Type code outside the two decodable families. Routine, not an error.
    Unsupported(DataType),
    /// Payload matched a decodable family but failed to decode, or the type
    /// byte itself could not be read.
    Failed(DecodeError),
}

/// Routes payloads by their leading type byte and forwards decoded records to
/// an [`OutputSink`].
///
/// Holds no decode state; safe to drive from concurrent subscriptions when
/// each owns its dispatcher (the sink's own discipline governs sharing one).
pub struct Dispatcher<S> {
    record_name: String,
    sink: S,
}

impl<S: OutputSink> Dispatcher<S> {
    pub fn new(record_name: impl Into<String>, sink: S) -> Self {
        Self {
            record_name: record_name.into(),
            sink,
        }
    }

    /// Handle one inbound message.
    ///
    /// Decode failures and sink failures are logged, never propagated; one
    /// malformed packet must not stall the ingestion path.
    pub fn dispatch(&mut self, topic: &str, payload: Bytes) -> Dispatch {
        // the first byte is always the data-type code
        let code = match field::extract(&payload, 0, 1) {
            Ok(bytes) => bytes[0],
            Err(cause) => {
                let err = DecodeError::new("data_type", cause);
                error!(%topic, %err, "failed to read packet type byte");
                return Dispatch::Failed(err);
            }
        };
        let data_type = DataType::from(code);

        if data_type.is_fft_family() {
            debug!(%topic, code, "received FFT data packet");
            match FftPacket::decode(&payload) {
                Ok(packet) => {
                    self.emit(topic, data_type, packet.timestamp, packet.to_json());
                    Dispatch::Decoded(data_type)
                }
                Err(err) => {
                    error!(%topic, field = err.field, cause = %err.source, "failed to decode FFT packet");
                    Dispatch::Failed(err)
                }
            }
        } else if data_type.is_oa_family() {
            debug!(%topic, code, "received OA data packet");
            match OaPacket::decode(&payload) {
                Ok(packet) => {
                    self.emit(topic, data_type, packet.timestamp, packet.to_json());
                    Dispatch::Decoded(data_type)
                }
                Err(err) => {
                    error!(%topic, field = err.field, cause = %err.source, "failed to decode OA packet");
                    Dispatch::Failed(err)
                }
            }
        } else {
            warn!(%topic, code, "unsupported data type");
            Dispatch::Unsupported(data_type)
        }
    }

    fn emit(
        &mut self,
        topic: &str,
        data_type: DataType,
        timestamp: DateTime<FixedOffset>,
        payload: Value,
    ) {
        let mut fields = Map::new();
        fields.insert("timestamp".into(), Value::from(timestamp.to_rfc3339()));
        fields.insert("sensor_name".into(), Value::from(sensor_name(topic)));
        fields.insert("data_type".into(), Value::from(u8::from(data_type)));
        fields.insert("payload".into(), payload);

        if let Err(err) = self.sink.write(&self.record_name, &fields) {
            error!(record = %self.record_name, %err, "failed to write record to sink");
        }
    }
}

/// The transport layer prefixes topics with the sensor name
/// (`S9IMP6000067BSF/report` -> `S9IMP6000067BSF`).
pub fn sensor_name(topic: &str) -> &str {
    topic.split('/').next().unwrap_or(topic)
}
