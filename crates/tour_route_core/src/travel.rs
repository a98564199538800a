//! Per-segment distance and duration for every transport mode.

use rayon::prelude::*;
use serde::Serialize;

use crate::{
    geo::coord::LatLng,
    routing::{mode::TransportMode, synth::RouteSynthesizer},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ModeDurations {
    pub foot: f64,
    pub bike: f64,
    pub car: f64,
}

impl ModeDurations {
    pub fn from_distance(distance_m: f64) -> Self {
        Self {
            foot: TransportMode::Foot.duration_s(distance_m),
            bike: TransportMode::Bike.duration_s(distance_m),
            car: TransportMode::Car.duration_s(distance_m),
        }
    }

    pub fn get(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Foot => self.foot,
            TransportMode::Bike => self.bike,
            TransportMode::Car => self.car,
        }
    }
}

/// One leg of the final tour. Indices refer to the caller's original input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub from_index: usize,
    pub to_index: usize,
    pub distance_meters: f64,
    pub duration_seconds: ModeDurations,
}

/// Builds one [`Segment`] per consecutive pair of `path`.
///
/// `path` holds positions into `points`; `indices` maps a position to the
/// caller's original index. Segments are independent and computed on the
/// rayon pool.
#[tour_route_derive::timer("travel.aggregate")]
pub fn aggregate_segments(
    points: &[LatLng],
    indices: &[usize],
    path: &[usize],
    synth: &RouteSynthesizer,
) -> Vec<Segment> {
    path.par_windows(2)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let distance_m = synth.road_distance_m(points[from], points[to]);
            Segment {
                from_index: indices[from],
                to_index: indices[to],
                distance_meters: distance_m,
                duration_seconds: ModeDurations::from_distance(distance_m),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ModeDurations, aggregate_segments};
    use crate::{
        geo::{coord::LatLng, distance::haversine_m},
        routing::{mode::TransportMode, synth::RouteSynthesizer},
    };

    #[test]
    fn durations_follow_mode_speeds() {
        let d = ModeDurations::from_distance(8_300.0);
        assert!((d.car - 1_000.0).abs() < 1e-9);
        assert!((d.foot - 8_300.0 / 1.4).abs() < 1e-9);
        assert_eq!(d.get(TransportMode::Bike), d.bike);
    }

    #[test]
    fn segments_use_original_indices_and_corridor_distance() {
        let points = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 0.01),
            LatLng::new(0.01, 0.01),
        ];
        let indices = vec![3, 5, 9];
        let segments =
            aggregate_segments(&points, &indices, &[0, 2, 1], &RouteSynthesizer::default());

        assert_eq!(segments.len(), 2);
        assert_eq!((segments[0].from_index, segments[0].to_index), (3, 9));
        assert_eq!((segments[1].from_index, segments[1].to_index), (9, 5));
        let expected = haversine_m(points[0], points[2]) * 1.3;
        assert!((segments[0].distance_meters - expected).abs() < 1e-9);
    }

    #[test]
    fn single_stop_has_no_segments() {
        let points = vec![LatLng::new(0.0, 0.0)];
        assert!(aggregate_segments(&points, &[0], &[0], &RouteSynthesizer::default()).is_empty());
    }
}
