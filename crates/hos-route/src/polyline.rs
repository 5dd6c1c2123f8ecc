//! Encoded-polyline decoding.
//!
//! Routing services return route geometry in Google's encoded polyline
//! format: each point is a pair of zig-zag, base-64-ish varints holding the
//! latitude/longitude delta from the previous point, scaled by
//! `10^precision`.  Points are encoded latitude first.

use hos_core::Coordinate;

use crate::{RouteError, RouteResult};

/// Precision used by Openrouteservice and Google (1e-5 degrees).
pub const DEFAULT_PRECISION: u32 = 5;

/// Decode `encoded` into coordinates.
///
/// Fails with [`RouteError::Parse`] on characters outside the encoding
/// alphabet, on a truncated final value, or on a value that overflows.
pub fn decode(encoded: &str, precision: u32) -> RouteResult<Vec<Coordinate>> {
    let factor = 10_f64.powi(precision as i32);
    let bytes = encoded.as_bytes();

    let mut points = Vec::new();
    let mut idx = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while idx < bytes.len() {
        lat += next_delta(bytes, &mut idx)?;
        lon += next_delta(bytes, &mut idx)?;
        points.push(Coordinate::new(lon as f64 / factor, lat as f64 / factor));
    }

    Ok(points)
}

fn next_delta(bytes: &[u8], idx: &mut usize) -> RouteResult<i64> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*idx) else {
            return Err(RouteError::Parse("polyline truncated mid-value".to_owned()));
        };
        if !(63..127).contains(&byte) {
            return Err(RouteError::Parse(format!(
                "invalid polyline character {:?} at offset {}",
                byte as char, *idx
            )));
        }
        if shift > 60 {
            return Err(RouteError::Parse("polyline value overflows".to_owned()));
        }
        *idx += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    // Zig-zag: the low bit carries the sign.
    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
