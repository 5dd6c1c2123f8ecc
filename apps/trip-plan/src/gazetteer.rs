//! Embedded place table for offline planning.
//!
//! A handful of US freight hubs; pass `HOS_GAZETTEER=<path>` to load a
//! larger `name,lon,lat` table instead.

use std::io::Cursor;
use std::path::Path;

use hos_route::{Gazetteer, RouteResult, load_gazetteer_csv, load_gazetteer_reader};

const PLACES_CSV: &str = "\
name,lon,lat\n\
\"New York, NY\",-74.0060,40.7128\n\
\"Philadelphia, PA\",-75.1652,39.9526\n\
\"Pittsburgh, PA\",-79.9959,40.4406\n\
\"Columbus, OH\",-82.9988,39.9612\n\
\"Indianapolis, IN\",-86.1581,39.7684\n\
\"Chicago, IL\",-87.6298,41.8781\n\
\"St. Louis, MO\",-90.1994,38.6270\n\
\"Kansas City, MO\",-94.5786,39.0997\n\
\"Denver, CO\",-104.9903,39.7392\n\
\"Salt Lake City, UT\",-111.8910,40.7608\n\
\"Las Vegas, NV\",-115.1398,36.1699\n\
\"Los Angeles, CA\",-118.2437,34.0522\n\
\"Dallas, TX\",-96.7970,32.7767\n\
\"Houston, TX\",-95.3698,29.7604\n\
\"Atlanta, GA\",-84.3880,33.7490\n\
\"Memphis, TN\",-90.0490,35.1495\n\
\"Nashville, TN\",-86.7816,36.1627\n\
\"Mobile, AL\",-88.0399,30.6954\n\
\"Jacksonville, FL\",-81.6557,30.3322\n\
\"Seattle, WA\",-122.3321,47.6062\n\
";

/// The embedded table, or the CSV at `path` when one is given.
pub fn load(path: Option<&Path>) -> RouteResult<Gazetteer> {
    match path {
        Some(path) => load_gazetteer_csv(path),
        None => load_gazetteer_reader(Cursor::new(PLACES_CSV)),
    }
}
