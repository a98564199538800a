use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use crate::{
    Error, Result,
    algo::{
        budget::{Budget, CancelToken},
        nearest::greedy_order,
        two_opt::two_opt_open,
    },
    constants::{DEFAULT_MAX_WAYPOINTS, DEFAULT_PARALLEL_THRESHOLD, MIN_POINTS_TO_OPTIMIZE},
    geo::{
        coord::{LatLng, RawWaypoint},
        distance::path_length_m,
        waypoint::{ValidWaypoints, Waypoint},
    },
    routing::{
        mode::TransportMode,
        synth::{Jitter, RouteSynthesizer, generate_seeds},
    },
    tour::{RejectedWaypoint, SegmentGeometry, TourPlan},
    travel::aggregate_segments,
};

/// Knobs for one [`optimize_tour`] call.
#[derive(Clone, Debug)]
pub struct TourRequest {
    pub mode: TransportMode,
    /// Inputs longer than this are refused before any work starts.
    pub max_waypoints: usize,
    pub time_limit: Option<Duration>,
    pub cancel: Option<CancelToken>,
    /// Remaining-candidate count at which a greedy step goes parallel.
    pub parallel_threshold: usize,
    /// 0 keeps the plain greedy order.
    pub two_opt_passes: usize,
    pub include_geometry: bool,
    pub jitter: Jitter,
    pub synthesizer: RouteSynthesizer,
}

impl Default for TourRequest {
    fn default() -> Self {
        Self {
            mode: TransportMode::default(),
            max_waypoints: DEFAULT_MAX_WAYPOINTS,
            time_limit: None,
            cancel: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            two_opt_passes: 0,
            include_geometry: false,
            jitter: Jitter::default(),
            synthesizer: RouteSynthesizer::default(),
        }
    }
}

impl TourRequest {
    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_waypoints(mut self, max_waypoints: usize) -> Self {
        self.max_waypoints = max_waypoints;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn with_two_opt_passes(mut self, two_opt_passes: usize) -> Self {
        self.two_opt_passes = two_opt_passes;
        self
    }

    pub fn with_geometry(mut self, include_geometry: bool) -> Self {
        self.include_geometry = include_geometry;
        self
    }

    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: RouteSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }
}

/// Normalizes `waypoints`, orders the valid ones and estimates every leg.
///
/// Invalid waypoints are reported in [`TourPlan::rejected`] rather than
/// failing the call. With fewer than three valid waypoints the input order
/// is returned as is.
#[tour_route_derive::timer("optimize")]
pub fn optimize_tour(waypoints: &[RawWaypoint], request: &TourRequest) -> Result<TourPlan> {
    if waypoints.len() > request.max_waypoints {
        log::warn!(
            "optimizer: refused n={} max={}",
            waypoints.len(),
            request.max_waypoints
        );
        return Err(Error::TooManyWaypoints {
            count: waypoints.len(),
            max: request.max_waypoints,
        });
    }

    let budget = Budget::new(request.time_limit, request.cancel.clone());
    let normalized: Vec<Waypoint> = waypoints
        .iter()
        .cloned()
        .enumerate()
        .map(|(idx, raw)| Waypoint::from_raw(idx, raw))
        .collect();
    let valid = ValidWaypoints::collect(&normalized);

    log::info!(
        "optimizer: start input={} valid={} mode={}",
        waypoints.len(),
        valid.len(),
        request.mode
    );

    let path = order_positions(&valid.points, request, &budget)?;
    let segments = aggregate_segments(&valid.points, &valid.indices, &path, &request.synthesizer);
    let total_distance_meters: f64 = segments.iter().map(|s| s.distance_meters).sum();
    let total_duration_seconds: f64 = segments
        .iter()
        .map(|s| s.duration_seconds.get(request.mode))
        .sum();

    let geometries = if request.include_geometry {
        synthesize_geometries(&valid, &path, request)
    } else {
        Vec::new()
    };

    let plan = TourPlan {
        order: path.iter().map(|&pos| valid.indices[pos]).collect(),
        total_distance_meters,
        total_duration_seconds,
        mode: request.mode,
        segments,
        message: build_message(valid.len(), valid.rejected.len()),
        rejected: valid
            .rejected
            .iter()
            .map(|(index, err)| RejectedWaypoint {
                index: *index,
                reason: err.to_string(),
            })
            .collect(),
        ambiguous: valid.ambiguous.clone(),
        geometries,
    };

    log::info!(
        "optimizer: complete n={} total_m={:.0} total_s={:.0} elapsed={:.3}s",
        plan.order.len(),
        plan.total_distance_meters,
        plan.total_duration_seconds,
        budget.elapsed().as_secs_f64()
    );
    plan.metrics();

    Ok(plan)
}

fn order_positions(
    points: &[LatLng],
    request: &TourRequest,
    budget: &Budget,
) -> Result<Vec<usize>> {
    if points.len() < MIN_POINTS_TO_OPTIMIZE {
        log::info!(
            "optimizer: skip n={} reason=fewer_than_{MIN_POINTS_TO_OPTIMIZE}_valid",
            points.len()
        );
        return Ok((0..points.len()).collect());
    }

    let mut path = greedy_order(points, request.parallel_threshold, budget)?;
    log::debug!(
        "optimizer: greedy n={} length_m={:.0}",
        path.len(),
        path_length_m(points, &path)
    );

    if request.two_opt_passes > 0 {
        two_opt_open(points, &mut path, request.two_opt_passes, budget)?;
        log::debug!(
            "optimizer: refined n={} length_m={:.0}",
            path.len(),
            path_length_m(points, &path)
        );
    }

    Ok(path)
}

fn synthesize_geometries(
    valid: &ValidWaypoints,
    path: &[usize],
    request: &TourRequest,
) -> Vec<SegmentGeometry> {
    let legs = path.len().saturating_sub(1);
    let seeds = generate_seeds(request.jitter.base_seed(), legs);
    let synth = match request.jitter {
        Jitter::Off => request
            .synthesizer
            .with_jitter_degrees(0.0)
            .unwrap_or(request.synthesizer),
        _ => request.synthesizer,
    };

    path.par_windows(2)
        .zip(seeds.par_iter())
        .map(|(pair, &seed)| {
            let (from, to) = (pair[0], pair[1]);
            let mut rng = StdRng::seed_from_u64(seed);
            let route = synth.synthesize(valid.points[from], valid.points[to], request.mode, &mut rng);
            SegmentGeometry {
                from_index: valid.indices[from],
                to_index: valid.indices[to],
                coordinates: route.geometry,
            }
        })
        .collect()
}

fn build_message(valid: usize, rejected: usize) -> Option<String> {
    let mut notes = Vec::new();
    if valid < 2 {
        notes.push(format!(
            "fewer than {MIN_POINTS_TO_OPTIMIZE} valid locations; optimization skipped"
        ));
    }
    match rejected {
        0 => {}
        1 => notes.push(String::from("1 invalid waypoint skipped")),
        n => notes.push(format!("{n} invalid waypoints skipped")),
    }
    (!notes.is_empty()).then(|| notes.join("; "))
}
