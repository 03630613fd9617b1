//! Decoder for the fixed-length overall-acceleration ("OA only") summary
//! packet.

use chrono::{DateTime, FixedOffset};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::DecodeError;
use crate::field::{self, Endian};
use crate::time;
use crate::types::DataType;

/// A decoded OA summary packet.
///
/// Wire layout, 50 bytes, trailing data ignored:
///
/// ```text
/// type@0 (1B, LE int) | data_length@1 (4B, BE int) | timestamp@5 (8B, LE u64)
/// | status@13 (1B) | battery@14 (1B) | adcavg@15 (2B, LE int, /1000)
/// | adclast@17 (2B, LE int, /1000) | temperature@19 (2B, LE int, /1000)
/// | oa_x@21 | oa_y@25 | oa_z@29 (4B, LE f32 each) | reserved@33 (17B)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OaPacket {
    pub data_type: DataType,
    pub data_length: i64,
    pub timestamp: DateTime<FixedOffset>,
    pub status: u8,
    pub battery_level: u8,
    pub adcavg: f64,
    pub adclast: f64,
    pub temperature: f64,
    pub oa_x: f32,
    pub oa_y: f32,
    pub oa_z: f32,
    /// 17 reserved bytes, kept as their hex encoding.
    pub reserved: String,
}

impl OaPacket {
    /// Decode an OA packet from a raw payload.
    ///
    /// Fails fast: the first unreadable field aborts the decode with that
    /// field's name in the error.
    pub fn decode(payload: &[u8]) -> Result<OaPacket, DecodeError> {
        let data_type_raw = field::int_at(payload, 0, 1, Endian::Little, "data_type")?;
        let data_type = DataType::from(data_type_raw as u8);

        let data_length = field::int_at(payload, 1, 4, Endian::Big, "data_length")?;

        let timestamp = field::bytes_at(payload, 5, 8, "timestamp").and_then(|bytes| {
            time::decode_timestamp(bytes, Endian::Little)
                .map_err(|e| DecodeError::new("timestamp", e))
        })?;

        let status = field::int_at(payload, 13, 1, Endian::Little, "status")? as u8;
        let battery_level = field::int_at(payload, 14, 1, Endian::Little, "battery_level")? as u8;

        let adcavg = field::int_at(payload, 15, 2, Endian::Little, "adcavg")? as f64 / 1000.0;
        let adclast = field::int_at(payload, 17, 2, Endian::Little, "adclast")? as f64 / 1000.0;
        let temperature = field::int_at(payload, 19, 2, Endian::Little, "temperature")? as f64 / 1000.0;

        let oa_x = field::f32_at(payload, 21, Endian::Little, "oa_x")?;
        let oa_y = field::f32_at(payload, 25, Endian::Little, "oa_y")?;
        let oa_z = field::f32_at(payload, 29, Endian::Little, "oa_z")?;

        let reserved = hex::encode(field::bytes_at(payload, 33, 17, "reserved")?);

        debug!(code = u8::from(data_type), %timestamp, "decoded OA packet");

        Ok(OaPacket {
            data_type,
            data_length,
            timestamp,
            status,
            battery_level,
            adcavg,
            adclast,
            temperature,
            oa_x,
            oa_y,
            oa_z,
            reserved,
        })
    }

    /// JSON projection of the record, timestamp as RFC 3339.
    pub fn to_json(&self) -> Value {
        json!({
            "data_type": u8::from(self.data_type),
            "data_type_name": self.data_type.to_string(),
            "data_length": self.data_length,
            "timestamp": self.timestamp.to_rfc3339(),
            "status": self.status,
            "battery_level": self.battery_level,
            "adcavg": self.adcavg,
            "adclast": self.adclast,
            "temperature": self.temperature,
            "oa_x": self.oa_x,
            "oa_y": self.oa_y,
            "oa_z": self.oa_z,
            "reserved": self.reserved,
        })
    }
}
