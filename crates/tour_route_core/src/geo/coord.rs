//! Typed coordinates and the latitude/longitude order heuristic.
//!
//! Distance math works on [`LatLng`]. Emitted geometry uses [`LngLat`], the
//! axis order map and GeoJSON consumers expect. The only conversion between
//! the two happens when the route synthesizer emits geometry.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error as ThisError;

use crate::constants::{MAX_LATITUDE, MAX_LONGITUDE};

/// A point in `(latitude, longitude)` order, degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A point in `(longitude, latitude)` order, degrees. Serializes as `[lng, lat]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub const fn to_lng_lat(self) -> LngLat {
        LngLat {
            lng: self.lng,
            lat: self.lat,
        }
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub const fn to_lat_lng(self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

impl From<LatLng> for LngLat {
    fn from(value: LatLng) -> Self {
        value.to_lng_lat()
    }
}

impl From<LngLat> for LatLng {
    fn from(value: LngLat) -> Self {
        value.to_lat_lng()
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "{},{}", b1.format(self.lat), b2.format(self.lng))
    }
}

impl Serialize for LngLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq([self.lng, self.lat])
    }
}

/// Why a raw coordinate pair could not be turned into a [`LatLng`].
#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum CoordinateError {
    #[error("value is not numeric: {value}")]
    NotNumeric { value: String },
    #[error("expected 2 coordinate values, got {found}")]
    WrongArity { found: usize },
    #[error("coordinate values must be finite")]
    NonFinite,
    #[error("no valid latitude/longitude interpretation for ({v1}, {v2})")]
    OutOfRange { v1: f64, v2: f64 },
    #[error("both values ({v1}, {v2}) can only be longitudes")]
    Contradictory { v1: f64, v2: f64 },
}

/// One caller-supplied waypoint before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum RawWaypoint {
    Pair(f64, f64),
    /// Input that never became a numeric pair; kept so its index stays stable.
    Malformed(CoordinateError),
}

impl RawWaypoint {
    /// Builds a waypoint from an arbitrary number of parsed values.
    pub fn from_values(values: &[f64]) -> Self {
        match values {
            [v1, v2] => Self::Pair(*v1, *v2),
            other => Self::Malformed(CoordinateError::WrongArity { found: other.len() }),
        }
    }
}

impl From<(f64, f64)> for RawWaypoint {
    fn from((v1, v2): (f64, f64)) -> Self {
        Self::Pair(v1, v2)
    }
}

impl From<[f64; 2]> for RawWaypoint {
    fn from([v1, v2]: [f64; 2]) -> Self {
        Self::Pair(v1, v2)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AxisOrder {
    AsGiven,
    Swapped,
}

/// Result of [`normalize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalized {
    pub point: LatLng,
    pub order: AxisOrder,
    /// Both orders were plausible and the input order was kept.
    pub ambiguous: bool,
}

fn latitude_compatible(v: f64) -> bool {
    v.abs() <= MAX_LATITUDE
}

fn longitude_only(v: f64) -> bool {
    let a = v.abs();
    a > MAX_LATITUDE && a <= MAX_LONGITUDE
}

/// Decides which of two values is the latitude.
///
/// Pairs where both values fit the latitude range keep the input order and
/// are flagged `ambiguous`: nothing in the numbers tells the two orders
/// apart, so the answer is a guess. A pair whose first value can only be a
/// longitude is swapped. A pair with a latitude first and a longitude-only
/// second value is already in order.
pub fn normalize(v1: f64, v2: f64) -> Result<Normalized, CoordinateError> {
    if !v1.is_finite() || !v2.is_finite() {
        return Err(CoordinateError::NonFinite);
    }
    if v1.abs() > MAX_LONGITUDE || v2.abs() > MAX_LONGITUDE {
        return Err(CoordinateError::OutOfRange { v1, v2 });
    }

    match (latitude_compatible(v1), latitude_compatible(v2)) {
        (false, true) => Ok(Normalized {
            point: LatLng::new(v2, v1),
            order: AxisOrder::Swapped,
            ambiguous: false,
        }),
        (true, true) => Ok(Normalized {
            point: LatLng::new(v1, v2),
            order: AxisOrder::AsGiven,
            ambiguous: v1 != v2,
        }),
        (true, false) => Ok(Normalized {
            point: LatLng::new(v1, v2),
            order: AxisOrder::AsGiven,
            ambiguous: false,
        }),
        (false, false) => {
            debug_assert!(longitude_only(v1) && longitude_only(v2));
            Err(CoordinateError::Contradictory { v1, v2 })
        }
    }
}
