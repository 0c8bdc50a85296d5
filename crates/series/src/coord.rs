//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// A (longitude, latitude) position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

impl Coord {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Returns `true` if either component is NaN or infinite.
    pub fn is_missing(&self) -> bool {
        !self.lon.is_finite() || !self.lat.is_finite()
    }

    /// Arithmetic midpoint of two positions.
    ///
    /// Adequate for link paths of a few tens of kilometres.
    pub fn midpoint(&self, other: &Coord) -> Coord {
        Coord::new((self.lon + other.lon) / 2.0, (self.lat + other.lat) / 2.0)
    }

    /// Great-circle distance in metres.
    pub fn distance_m(&self, other: &Coord) -> f64 {
        linkrain_stats::haversine_m(self.lon, self.lat, other.lon, other.lat)
    }

    /// Arithmetic mean position, or `None` for an empty iterator.
    pub fn mean<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Option<Coord> {
        let mut lon = 0.0;
        let mut lat = 0.0;
        let mut n = 0usize;
        for c in coords {
            lon += c.lon;
            lat += c.lat;
            n += 1;
        }
        (n > 0).then(|| Coord::new(lon / n as f64, lat / n as f64))
    }
}
