//! Encoded polyline decoding.
//!
//! Implements the Google polyline algorithm: each coordinate component is a
//! delta from the previous point, zig-zag encoded and split into 5-bit groups
//! offset by 63 into printable ASCII. Bit `0x20` marks a continuation group.

use thiserror::Error;

use crate::model::Coordinate;

/// Precision used by the classic polyline format (five decimal places).
pub const DEFAULT_PRECISION: u32 = 5;

const CHUNK_OFFSET: u8 = 63;
const CONTINUATION_BIT: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
const MAX_SHIFT: u32 = 60;

/// Errors produced while decoding a polyline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The input ended in the middle of a value or between latitude and longitude.
    #[error("polyline truncated at byte {offset}")]
    Truncated { offset: usize },

    /// A byte outside the polyline alphabet (`?`..=`~`).
    #[error("invalid polyline character {byte:#04x} at byte {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    /// A value spanned more groups than fit in 64 bits.
    #[error("polyline value overflows at byte {offset}")]
    Overflow { offset: usize },
}

/// Decode a polyline encoded with precision 1e5.
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, PolylineError> {
    decode_polyline_with_precision(encoded, DEFAULT_PRECISION)
}

/// Decode a polyline whose values were scaled by `10^precision`.
pub fn decode_polyline_with_precision(
    encoded: &str,
    precision: u32,
) -> Result<Vec<Coordinate>, PolylineError> {
    let factor = 10f64.powi(precision as i32);
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut offset = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while offset < bytes.len() {
        lat += next_value(bytes, &mut offset)?;
        if offset >= bytes.len() {
            return Err(PolylineError::Truncated { offset });
        }
        lng += next_value(bytes, &mut offset)?;

        points.push(Coordinate::new(lat as f64 / factor, lng as f64 / factor));
    }

    Ok(points)
}

fn next_value(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes
            .get(*offset)
            .ok_or(PolylineError::Truncated { offset: *offset })?;
        if !(CHUNK_OFFSET..=b'~').contains(&byte) {
            return Err(PolylineError::InvalidCharacter { offset: *offset, byte });
        }
        if shift > MAX_SHIFT {
            return Err(PolylineError::Overflow { offset: *offset });
        }
        *offset += 1;

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk < CONTINUATION_BIT {
            break;
        }
    }

    // zig-zag: the low bit carries the sign
    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
