//! Decoding of the 8-byte packet timestamp.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use chrono::{DateTime, FixedOffset, Local};

use crate::error::FieldError;
use crate::field::Endian;

/// Decode an 8-byte unsigned epoch-seconds value, correcting by the host's
/// local UTC offset.
///
/// The sensor stamps packets with its local wall clock misencoded as epoch
/// seconds; subtracting the UTC offset recovers the instant the sensor meant.
/// Using the *host's* offset is a deployment assumption inherited from the
/// field installations (sensor and ingest host share a timezone).
pub fn decode_timestamp(bytes: &[u8], endian: Endian) -> Result<DateTime<FixedOffset>, FieldError> {
    let offset_secs = Local::now().offset().local_minus_utc();
    decode_timestamp_with_offset(bytes, endian, offset_secs)
}

/// As [`decode_timestamp`], with the UTC offset (in seconds east) supplied by
/// the caller.
pub fn decode_timestamp_with_offset(
    bytes: &[u8],
    endian: Endian,
    utc_offset_secs: i32,
) -> Result<DateTime<FixedOffset>, FieldError> {
    if bytes.len() != 8 {
        return Err(FieldError::InvalidLength(bytes.len()));
    }
    let raw = match endian {
        Endian::Big => BigEndian::read_u64(bytes),
        Endian::Little => LittleEndian::read_u64(bytes),
    };

    let corrected = i64::try_from(raw)
        .ok()
        .and_then(|secs| secs.checked_sub(i64::from(utc_offset_secs)))
        .ok_or(FieldError::TimestampOutOfRange(raw))?;

    let tz = FixedOffset::east_opt(utc_offset_secs).ok_or(FieldError::TimestampOutOfRange(raw))?;
    DateTime::from_timestamp(corrected, 0)
        .map(|dt| dt.with_timezone(&tz))
        .ok_or(FieldError::TimestampOutOfRange(raw))
}
