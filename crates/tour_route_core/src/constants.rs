/// Mean Earth radius used by the haversine formula.
pub(crate) const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub(crate) const MAX_LATITUDE: f64 = 90.0;
pub(crate) const MAX_LONGITUDE: f64 = 180.0;

/// Multiplier from straight-line to estimated road distance.
pub(crate) const CORRIDOR_FACTOR: f64 = 1.3;

// meters per second
pub(crate) const FOOT_SPEED_MPS: f64 = 1.4;
pub(crate) const BIKE_SPEED_MPS: f64 = 4.2;
pub(crate) const CAR_SPEED_MPS: f64 = 8.3;

pub(crate) const METERS_PER_ROUTE_POINT: f64 = 1_000.0;
pub(crate) const MIN_ROUTE_POINTS: usize = 2;
pub(crate) const MAX_ROUTE_POINTS: usize = 20;
pub(crate) const DEFAULT_JITTER_DEGREES: f64 = 0.01;

/// Below this many valid waypoints no ordering is attempted.
pub(crate) const MIN_POINTS_TO_OPTIMIZE: usize = 3;

pub(crate) const DEFAULT_MAX_WAYPOINTS: usize = 500;
pub(crate) const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

pub(crate) const TWO_OPT_IMPROVEMENT_EPSILON: f64 = 1e-5;
