//! Fixed-width field extraction from packet buffers.
//!
//! All reads are pure functions over the input slice. The AISSENS wire format
//! mixes byte orders field by field, so every numeric decode takes an explicit
//! [`Endian`].

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use crate::error::{DecodeError, FieldError};

/// Byte order of a multi-byte numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// Return exactly `length` bytes starting at `offset`.
pub fn extract(buf: &[u8], offset: usize, length: usize) -> Result<&[u8], FieldError> {
    let end = offset.checked_add(length).ok_or(FieldError::OutOfRange {
        offset,
        end: usize::MAX,
        available: buf.len(),
    })?;
    buf.get(offset..end).ok_or(FieldError::OutOfRange {
        offset,
        end,
        available: buf.len(),
    })
}

/// Interpret `bytes` as a signed integer of the width implied by the byte
/// count (1 byte -> i8, 2 -> i16, up to 4 -> i32, up to 8 -> i64), in the
/// given byte order, sign-extended to `i64`.
pub fn decode_int(bytes: &[u8], endian: Endian) -> Result<i64, FieldError> {
    let width = bytes.len();
    if width == 0 || width > 8 {
        return Err(FieldError::InvalidWidth(width));
    }
    let mut rdr = bytes;
    let value = match endian {
        Endian::Big => rdr.read_int::<BigEndian>(width),
        Endian::Little => rdr.read_int::<LittleEndian>(width),
    };
    value.map_err(|_| FieldError::InvalidWidth(width))
}

/// Interpret exactly 4 bytes as an IEEE-754 single-precision float.
pub fn decode_f32(bytes: &[u8], endian: Endian) -> Result<f32, FieldError> {
    if bytes.len() != 4 {
        return Err(FieldError::InvalidWidth(bytes.len()));
    }
    let value = match endian {
        Endian::Big => BigEndian::read_f32(bytes),
        Endian::Little => LittleEndian::read_f32(bytes),
    };
    Ok(value)
}

/// Extract + wrap, for decoder use: the failing field's name travels with the
/// error.
pub(crate) fn bytes_at<'a>(
    buf: &'a [u8],
    offset: usize,
    length: usize,
    field: &'static str,
) -> Result<&'a [u8], DecodeError> {
    extract(buf, offset, length).map_err(|e| DecodeError::new(field, e))
}

pub(crate) fn int_at(
    buf: &[u8],
    offset: usize,
    length: usize,
    endian: Endian,
    field: &'static str,
) -> Result<i64, DecodeError> {
    extract(buf, offset, length)
        .and_then(|bytes| decode_int(bytes, endian))
        .map_err(|e| DecodeError::new(field, e))
}

pub(crate) fn f32_at(
    buf: &[u8],
    offset: usize,
    endian: Endian,
    field: &'static str,
) -> Result<f32, DecodeError> {
    extract(buf, offset, 4)
        .and_then(|bytes| decode_f32(bytes, endian))
        .map_err(|e| DecodeError::new(field, e))
}
