use serde::Serialize;

use crate::{routing::mode::TransportMode, routing::synth::RouteGeometry, travel::Segment};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RejectedWaypoint {
    pub index: usize,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentGeometry {
    pub from_index: usize,
    pub to_index: usize,
    pub coordinates: RouteGeometry,
}

/// Everything one optimization call returns.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TourPlan {
    /// Original indices of the valid waypoints in visiting order.
    pub order: Vec<usize>,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    pub mode: TransportMode,
    pub segments: Vec<Segment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub rejected: Vec<RejectedWaypoint>,
    pub ambiguous: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub geometries: Vec<SegmentGeometry>,
}

impl TourPlan {
    pub fn segment(&self, from_index: usize, to_index: usize) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|s| s.from_index == from_index && s.to_index == to_index)
    }

    pub fn geometry(&self, from_index: usize, to_index: usize) -> Option<&RouteGeometry> {
        self.geometries
            .iter()
            .find(|g| g.from_index == from_index && g.to_index == to_index)
            .map(|g| &g.coordinates)
    }

    /// Original indices that did not make it into `order`.
    pub fn skipped(&self, input_len: usize) -> Vec<usize> {
        (0..input_len).filter(|i| !self.order.contains(i)).collect()
    }

    pub fn metrics(&self) -> TourMetrics {
        let n = self.segments.len();
        if n == 0 {
            log::info!("metrics: no segments so there's nothing to report");
            return TourMetrics::default();
        }

        let total: f64 = self.segments.iter().map(|s| s.distance_meters).sum();
        let longest = self
            .segments
            .iter()
            .map(|s| s.distance_meters)
            .fold(0.0_f64, f64::max);
        let average = total / n as f64;

        log::info!(
            "metrics: segments={n} total_m={total:.0} longest_m={longest:.0} avg_m={average:.0}"
        );

        TourMetrics {
            segments: n,
            total,
            longest,
            average,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub segments: usize,
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use super::TourPlan;
    use crate::travel::{ModeDurations, Segment};

    fn segment(from_index: usize, to_index: usize, distance_meters: f64) -> Segment {
        Segment {
            from_index,
            to_index,
            distance_meters,
            duration_seconds: ModeDurations::from_distance(distance_meters),
        }
    }

    #[test]
    fn segment_lookup_is_directional() {
        let plan = TourPlan {
            order: vec![0, 2, 1],
            segments: vec![segment(0, 2, 10.0), segment(2, 1, 20.0)],
            ..TourPlan::default()
        };
        assert_eq!(plan.segment(2, 1).map(|s| s.distance_meters), Some(20.0));
        assert!(plan.segment(1, 2).is_none());
    }

    #[test]
    fn skipped_lists_indices_missing_from_order() {
        let plan = TourPlan {
            order: vec![0, 3],
            ..TourPlan::default()
        };
        assert_eq!(plan.skipped(5), vec![1, 2, 4]);
    }

    #[test]
    fn metrics_summarize_segments() {
        let plan = TourPlan {
            segments: vec![segment(0, 1, 100.0), segment(1, 2, 300.0)],
            ..TourPlan::default()
        };
        let m = plan.metrics();
        assert_eq!(m.segments, 2);
        assert_eq!(m.total, 400.0);
        assert_eq!(m.longest, 300.0);
        assert_eq!(m.average, 200.0);
    }

    #[test]
    fn empty_plan_has_default_metrics() {
        assert_eq!(TourPlan::default().metrics(), Default::default());
    }

    #[test]
    fn message_and_geometries_are_omitted_from_json_when_absent() {
        let json = serde_json::to_value(TourPlan::default()).expect("serialize");
        assert!(json.get("message").is_none());
        assert!(json.get("geometries").is_none());
        assert_eq!(json["mode"], "car");
    }
}
