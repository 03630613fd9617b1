//! Decoder for the variable-length FFT packet.
//!
//! The header is fixed-layout; after the reserved bytes come six sample
//! series of `report_len` little-endian f32 values each, in axis order
//! acc x, y, z then vec x, y, z. Each series is zero-padded on the right to
//! `fft_length` for downstream frequency-domain use.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{DecodeError, FieldError};
use crate::field::{self, Endian};
use crate::time;
use crate::types::DataType;

/// First byte of the sample series region.
const SAMPLES_OFFSET: usize = 50;

/// One value series per axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TriAxis {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

/// A decoded FFT packet.
///
/// Wire layout: `type@0` (1B, LE int) | `data_length@1` (4B, BE int) |
/// `timestamp@5` (8B, LE u64) | `fft_result@13` (1B) | `battery@14` (1B) |
/// `adcavg@15` | `adclast@17` | `temperature@19` (2B, LE int, /1000 each) |
/// `oa_x@21` | `oa_y@25` | `oa_z@29` | `freq_resolution@33` (4B, LE f32 each)
/// | `fft_length@37` (4B, BE int) | `report_len@41` (4B, BE int) |
/// `reserved@45` (5B) | six sample series from byte 50.
#[derive(Debug, Clone, PartialEq)]
pub struct FftPacket {
    pub data_type: DataType,
    pub data_length: i64,
    pub timestamp: DateTime<FixedOffset>,
    pub fft_result: u8,
    pub battery_level: u8,
    pub adcavg: f64,
    pub adclast: f64,
    pub temperature: f64,
    pub oa_x: f32,
    pub oa_y: f32,
    pub oa_z: f32,
    pub freq_resolution: f32,
    pub fft_length: i64,
    pub report_len: i64,
    /// 5 reserved bytes, kept as their hex encoding.
    pub reserved: String,
    /// Raw acceleration series, `report_len` samples per axis.
    pub acceleration: TriAxis,
    /// Raw velocity series, `report_len` samples per axis.
    pub velocity: TriAxis,
    /// Acceleration series zero-padded to `fft_length`.
    pub padded_acceleration: TriAxis,
    /// Velocity series zero-padded to `fft_length`.
    pub padded_velocity: TriAxis,
    /// `freqs[i] = i * freq_resolution` for `i` in `[0, fft_length)`.
    pub freqs: Vec<f32>,
}

impl FftPacket {
    /// Decode an FFT packet from a raw payload.
    ///
    /// Fails fast: the first unreadable field aborts the decode with that
    /// field's name in the error. `fft_length < report_len` fails with
    /// `InvalidPadding` rather than truncating.
    pub fn decode(payload: &[u8]) -> Result<FftPacket, DecodeError> {
        let data_type_raw = field::int_at(payload, 0, 1, Endian::Little, "data_type")?;
        let data_type = DataType::from(data_type_raw as u8);

        let data_length = field::int_at(payload, 1, 4, Endian::Big, "data_length")?;

        let timestamp = field::bytes_at(payload, 5, 8, "timestamp").and_then(|bytes| {
            time::decode_timestamp(bytes, Endian::Little)
                .map_err(|e| DecodeError::new("timestamp", e))
        })?;

        let fft_result = field::int_at(payload, 13, 1, Endian::Little, "fft_result")? as u8;
        let battery_level = field::int_at(payload, 14, 1, Endian::Little, "battery_level")? as u8;

        let adcavg = field::int_at(payload, 15, 2, Endian::Little, "adcavg")? as f64 / 1000.0;
        let adclast = field::int_at(payload, 17, 2, Endian::Little, "adclast")? as f64 / 1000.0;
        let temperature = field::int_at(payload, 19, 2, Endian::Little, "temperature")? as f64 / 1000.0;

        let oa_x = field::f32_at(payload, 21, Endian::Little, "oa_x")?;
        let oa_y = field::f32_at(payload, 25, Endian::Little, "oa_y")?;
        let oa_z = field::f32_at(payload, 29, Endian::Little, "oa_z")?;

        let freq_resolution = field::f32_at(payload, 33, Endian::Little, "freq_resolution")?;
        let fft_length = field::int_at(payload, 37, 4, Endian::Big, "fft_length")?;
        let report_len = field::int_at(payload, 41, 4, Endian::Big, "report_len")?;

        let reserved = hex::encode(field::bytes_at(payload, 45, 5, "reserved_bytes")?);

        let samples = usize::try_from(report_len)
            .map_err(|_| DecodeError::new("report_len", FieldError::NegativeLength(report_len)))?;

        // Series k starts at SAMPLES_OFFSET + k * report_len * 4.
        let acceleration = TriAxis {
            x: read_series(payload, samples, 0, "acc_x_values")?,
            y: read_series(payload, samples, 1, "acc_y_values")?,
            z: read_series(payload, samples, 2, "acc_z_values")?,
        };
        let velocity = TriAxis {
            x: read_series(payload, samples, 3, "vec_x_values")?,
            y: read_series(payload, samples, 4, "vec_y_values")?,
            z: read_series(payload, samples, 5, "vec_z_values")?,
        };

        let target = usize::try_from(fft_length)
            .map_err(|_| DecodeError::new("fft_length", FieldError::NegativeLength(fft_length)))?;
        if target < samples {
            return Err(DecodeError::new(
                "acceleration_padding",
                FieldError::InvalidPadding { fft_length, report_len },
            ));
        }
        let padded_acceleration = zero_pad(&acceleration, target);
        let padded_velocity = zero_pad(&velocity, target);

        let freqs = (0..target).map(|i| i as f32 * freq_resolution).collect();

        debug!(
            code = u8::from(data_type),
            fft_length, report_len, "decoded FFT packet"
        );

        Ok(FftPacket {
            data_type,
            data_length,
            timestamp,
            fft_result,
            battery_level,
            adcavg,
            adclast,
            temperature,
            oa_x,
            oa_y,
            oa_z,
            freq_resolution,
            fft_length,
            report_len,
            reserved,
            acceleration,
            velocity,
            padded_acceleration,
            padded_velocity,
            freqs,
        })
    }

    /// JSON projection: every scalar field plus the six padded series and the
    /// derived frequency axis.
    pub fn to_json(&self) -> Value {
        json!({
            "data_type": u8::from(self.data_type),
            "data_type_name": self.data_type.to_string(),
            "data_length": self.data_length,
            "timestamp": self.timestamp.to_rfc3339(),
            "fft_result": self.fft_result,
            "battery_level": self.battery_level,
            "adcavg": self.adcavg,
            "adclast": self.adclast,
            "temperature": self.temperature,
            "oa_x": self.oa_x,
            "oa_y": self.oa_y,
            "oa_z": self.oa_z,
            "freq_resolution": self.freq_resolution,
            "fft_length": self.fft_length,
            "report_len": self.report_len,
            "reserved_bytes": self.reserved,
            "padded_acceleration_data": self.padded_acceleration,
            "padded_velocity_data": self.padded_velocity,
            "freqs": self.freqs,
        })
    }
}

fn read_series(
    payload: &[u8],
    samples: usize,
    series_index: usize,
    name: &'static str,
) -> Result<Vec<f32>, DecodeError> {
    let base = SAMPLES_OFFSET + series_index * samples * 4;
    let raw = field::bytes_at(payload, base, samples * 4, name)?;
    let mut values = Vec::with_capacity(samples);
    for chunk in raw.chunks_exact(4) {
        values.push(
            field::decode_f32(chunk, Endian::Little).map_err(|e| DecodeError::new(name, e))?,
        );
    }
    Ok(values)
}

fn zero_pad(series: &TriAxis, target: usize) -> TriAxis {
    let pad = |values: &[f32]| {
        let mut out = values.to_vec();
        out.resize(target, 0.0);
        out
    };
    TriAxis {
        x: pad(&series.x),
        y: pad(&series.y),
        z: pad(&series.z),
    }
}
