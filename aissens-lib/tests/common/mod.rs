//! Common test utilities: wire-image builders and test sinks.

// Shared across multiple test files; not every item is used in every file.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use aissens_lib::error::SinkError;
use aissens_lib::sink::OutputSink;
use bytes::Bytes;
use serde_json::{Map, Value};

/// Decode hex string to bytes for testing
pub fn hex_to_bytes(hex_data: &str) -> Bytes {
    Bytes::from(hex::decode(hex_data).expect("Failed to decode hex"))
}

/// Field values for a synthetic OA payload, encoded per the 50-byte layout.
pub struct OaPayload {
    pub data_type: u8,
    pub data_length: i32,
    pub timestamp: u64,
    pub status: u8,
    pub battery_level: u8,
    pub adcavg_raw: i16,
    pub adclast_raw: i16,
    pub temperature_raw: i16,
    pub oa: [f32; 3],
    pub reserved: [u8; 17],
}

impl Default for OaPayload {
    fn default() -> Self {
        Self {
            data_type: 9,
            data_length: 45,
            timestamp: 1_700_000_000,
            status: 1,
            battery_level: 80,
            adcavg_raw: 1500,
            adclast_raw: 1520,
            temperature_raw: 23_500,
            oa: [0.1, 0.2, 0.3],
            reserved: [0; 17],
        }
    }
}

impl OaPayload {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(50);
        buf.push(self.data_type);
        buf.extend_from_slice(&self.data_length.to_be_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.push(self.status);
        buf.push(self.battery_level);
        buf.extend_from_slice(&self.adcavg_raw.to_le_bytes());
        buf.extend_from_slice(&self.adclast_raw.to_le_bytes());
        buf.extend_from_slice(&self.temperature_raw.to_le_bytes());
        for value in self.oa {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf.extend_from_slice(&self.reserved);
        buf
    }
}

/// Field values for a synthetic FFT payload: fixed header plus six sample
/// series (acc x, y, z then vec x, y, z), each `report_len` samples.
pub struct FftPayload {
    pub data_type: u8,
    pub data_length: i32,
    pub timestamp: u64,
    pub fft_result: u8,
    pub battery_level: u8,
    pub adcavg_raw: i16,
    pub adclast_raw: i16,
    pub temperature_raw: i16,
    pub oa: [f32; 3],
    pub freq_resolution: f32,
    pub fft_length: i32,
    pub report_len: i32,
    pub reserved: [u8; 5],
    pub series: [Vec<f32>; 6],
}

impl Default for FftPayload {
    fn default() -> Self {
        Self {
            data_type: 1,
            data_length: 98,
            timestamp: 1_700_000_000,
            fft_result: 0,
            battery_level: 90,
            adcavg_raw: 1500,
            adclast_raw: 1480,
            temperature_raw: 24_000,
            oa: [0.5, 0.6, 0.7],
            freq_resolution: 0.25,
            fft_length: 4,
            report_len: 2,
            reserved: [0; 5],
            series: [
                vec![1.0, 2.0],
                vec![3.0, 4.0],
                vec![5.0, 6.0],
                vec![7.0, 8.0],
                vec![9.0, 10.0],
                vec![11.0, 12.0],
            ],
        }
    }
}

impl FftPayload {
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(50 + 6 * self.series[0].len() * 4);
        buf.push(self.data_type);
        buf.extend_from_slice(&self.data_length.to_be_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.push(self.fft_result);
        buf.push(self.battery_level);
        buf.extend_from_slice(&self.adcavg_raw.to_le_bytes());
        buf.extend_from_slice(&self.adclast_raw.to_le_bytes());
        buf.extend_from_slice(&self.temperature_raw.to_le_bytes());
        for value in self.oa {
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf.extend_from_slice(&self.freq_resolution.to_le_bytes());
        buf.extend_from_slice(&self.fft_length.to_be_bytes());
        buf.extend_from_slice(&self.report_len.to_be_bytes());
        buf.extend_from_slice(&self.reserved);
        for series in &self.series {
            for value in series {
                buf.extend_from_slice(&value.to_le_bytes());
            }
        }
        buf
    }
}

/// Records every write for later inspection. Clones share the same store.
#[derive(Default, Clone)]
pub struct RecordingSink {
    pub records: Rc<RefCell<Vec<(String, Map<String, Value>)>>>,
}

impl OutputSink for RecordingSink {
    fn write(&mut self, name: &str, fields: &Map<String, Value>) -> Result<(), SinkError> {
        self.records
            .borrow_mut()
            .push((name.to_string(), fields.clone()));
        Ok(())
    }
}

/// Fails every write, for exercising the log-and-swallow path.
pub struct FailingSink;

impl OutputSink for FailingSink {
    fn write(&mut self, _name: &str, _fields: &Map<String, Value>) -> Result<(), SinkError> {
        Err(SinkError::Backend("sink unavailable".to_string()))
    }
}

/// The host-side UTC offset the decoders correct timestamps by.
pub fn host_offset_secs() -> i64 {
    i64::from(chrono::Local::now().offset().local_minus_utc())
}
