//! CSV gazetteer loader.
//!
//! # CSV format
//!
//! One row per place.  Names may contain commas when quoted.
//!
//! ```csv
//! name,lon,lat
//! "New York, NY",-74.0060,40.7128
//! "Chicago, IL",-87.6298,41.8781
//! ```
//!
//! Rows with coordinates outside WGS-84 bounds are rejected; a repeated
//! name keeps the last row.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hos_core::Coordinate;

use crate::{Gazetteer, RouteError};

#[derive(Deserialize)]
struct PlaceRecord {
    name: String,
    lon:  f64,
    lat:  f64,
}

/// Load a [`Gazetteer`] from a CSV file.
pub fn load_gazetteer_csv(path: &Path) -> Result<Gazetteer, RouteError> {
    let file = std::fs::File::open(path)?;
    load_gazetteer_reader(file)
}

/// Like [`load_gazetteer_csv`] but accepts any `Read` source (a
/// `std::io::Cursor` in tests, an embedded table in the binary).
pub fn load_gazetteer_reader<R: Read>(reader: R) -> Result<Gazetteer, RouteError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut gazetteer = Gazetteer::new();

    for (row_idx, result) in csv_reader.deserialize::<PlaceRecord>().enumerate() {
        let row = result.map_err(|e| RouteError::Parse(e.to_string()))?;
        let at = Coordinate::new(row.lon, row.lat);
        if !at.is_valid() {
            return Err(RouteError::Parse(format!(
                "row {}: {:?} has out-of-range coordinate {at}",
                row_idx + 1,
                row.name
            )));
        }
        gazetteer.insert(&row.name, at);
    }

    Ok(gazetteer)
}
