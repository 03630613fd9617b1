//! Decoder library for AISSENS vibration-sensor telemetry.
//!
//! Inbound payloads arrive as opaque byte blobs from a pub/sub transport.
//! [`Dispatcher`](dispatch::Dispatcher) reads the leading type byte, routes
//! to the [`fft`] or [`oa`] decoder, and forwards the decoded record to an
//! [`OutputSink`](sink::OutputSink).

pub mod dispatch;
pub mod error;
pub mod fft;
pub mod field;
pub mod oa;
pub mod sink;
pub mod time;
pub mod types;

pub use dispatch::{Dispatch, Dispatcher};
pub use error::{DecodeError, FieldError, SinkError};
pub use fft::FftPacket;
pub use oa::OaPacket;
pub use types::DataType;
