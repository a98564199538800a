//! Tour route optimization on geographic waypoints.
//!
//! Normalizes ambiguous coordinate pairs, orders the valid ones with a greedy
//! nearest-neighbor heuristic (optionally refined by 2-opt), and estimates
//! per-segment distance, duration and path geometry without a road network.

mod algo;
mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
mod routing;
mod solver;
mod tour;
mod travel;

pub use algo::budget::CancelToken;
pub use error::{Error, Result};
pub use geo::coord::{AxisOrder, CoordinateError, LatLng, LngLat, Normalized, RawWaypoint, normalize};
pub use geo::distance::haversine_m;
pub use geo::waypoint::{ValidWaypoints, Waypoint};
pub use io::input::{parse_waypoints, read_waypoints};
pub use io::options::{JitterMode, LogFormat, LogLevel, TourOptions};
pub use io::output::write_plan;
pub use routing::mode::TransportMode;
pub use routing::synth::{Jitter, RouteEstimate, RouteGeometry, RouteSynthesizer, SynthesizedRoute};
pub use solver::{TourRequest, optimize_tour};
pub use tour::{RejectedWaypoint, SegmentGeometry, TourMetrics, TourPlan};
pub use travel::{ModeDurations, Segment, aggregate_segments};
