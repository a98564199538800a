//! Offline route approximation used in place of a road-routing backend.
//!
//! Distances are straight-line haversine scaled by a corridor factor and
//! durations come from per-mode average speeds. Geometry is a linear
//! interpolation between the endpoints with a small, seedable perturbation
//! on the intermediate points so rendered legs are not perfectly straight.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    Error, Result,
    constants::{
        CORRIDOR_FACTOR, DEFAULT_JITTER_DEGREES, MAX_LATITUDE, MAX_LONGITUDE, MAX_ROUTE_POINTS,
        METERS_PER_ROUTE_POINT, MIN_ROUTE_POINTS,
    },
    geo::{
        coord::{LatLng, LngLat},
        distance::haversine_m,
    },
    routing::mode::TransportMode,
};

/// Source of the geometry perturbation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Jitter {
    /// Reproducible perturbation derived from the given seed.
    Seeded(u64),
    /// Fresh randomness on every call.
    Entropy,
    /// No perturbation; intermediate points lie on the straight line.
    Off,
}

impl Default for Jitter {
    fn default() -> Self {
        Self::Seeded(0)
    }
}

impl Jitter {
    pub(crate) fn base_seed(self) -> u64 {
        match self {
            Self::Seeded(seed) => seed,
            Self::Entropy => rand::rng().random(),
            Self::Off => 0,
        }
    }
}

/// Per-seed RNGs for independent segments, reproducible from one base seed.
pub(crate) fn generate_seeds(base_seed: u64, count: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(base_seed);
    (0..count).map(|_| rng.random::<u64>()).collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub distance_m: f64,
    pub duration_s: f64,
}

/// Path between two stops in `(longitude, latitude)` order.
///
/// Always holds at least two points; the first and last equal the endpoints.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteGeometry(Vec<LngLat>);

impl RouteGeometry {
    pub fn points(&self) -> &[LngLat] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> LngLat {
        self.0[0]
    }

    pub fn last(&self) -> LngLat {
        self.0[self.0.len() - 1]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SynthesizedRoute {
    pub estimate: RouteEstimate,
    pub geometry: RouteGeometry,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteSynthesizer {
    corridor_factor: f64,
    jitter_degrees: f64,
}

impl Default for RouteSynthesizer {
    fn default() -> Self {
        Self {
            corridor_factor: CORRIDOR_FACTOR,
            jitter_degrees: DEFAULT_JITTER_DEGREES,
        }
    }
}

impl RouteSynthesizer {
    pub fn new(corridor_factor: f64, jitter_degrees: f64) -> Result<Self> {
        if !corridor_factor.is_finite() || corridor_factor < 1.0 {
            return Err(Error::invalid_input(format!(
                "corridor factor must be >= 1 (got {corridor_factor})"
            )));
        }
        if !jitter_degrees.is_finite() || jitter_degrees < 0.0 {
            return Err(Error::invalid_input(format!(
                "jitter degrees must be >= 0 (got {jitter_degrees})"
            )));
        }
        Ok(Self {
            corridor_factor,
            jitter_degrees,
        })
    }

    /// Same corridor factor, different perturbation width.
    pub fn with_jitter_degrees(self, jitter_degrees: f64) -> Result<Self> {
        Self::new(self.corridor_factor, jitter_degrees)
    }

    pub fn corridor_factor(&self) -> f64 {
        self.corridor_factor
    }

    pub fn jitter_degrees(&self) -> f64 {
        self.jitter_degrees
    }

    /// Estimated road distance in meters; never shorter than the straight line.
    pub fn road_distance_m(&self, from: LatLng, to: LatLng) -> f64 {
        haversine_m(from, to) * self.corridor_factor
    }

    pub fn estimate(&self, from: LatLng, to: LatLng, mode: TransportMode) -> RouteEstimate {
        let distance_m = self.road_distance_m(from, to);
        RouteEstimate {
            distance_m,
            duration_s: mode.duration_s(distance_m),
        }
    }

    /// Estimate plus a synthetic path, perturbed with draws from `rng`.
    pub fn synthesize<R: Rng>(
        &self,
        from: LatLng,
        to: LatLng,
        mode: TransportMode,
        rng: &mut R,
    ) -> SynthesizedRoute {
        let estimate = self.estimate(from, to, mode);
        let n = route_point_count(estimate.distance_m);

        let mut points = Vec::with_capacity(n);
        points.push(from.to_lng_lat());
        for i in 1..n - 1 {
            let ratio = i as f64 / (n - 1) as f64;
            let lat = from.lat + ratio * (to.lat - from.lat) + self.offset(rng);
            let lng = from.lng + ratio * (to.lng - from.lng) + self.offset(rng);
            points.push(LngLat::new(
                lng.clamp(-MAX_LONGITUDE, MAX_LONGITUDE),
                lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            ));
        }
        points.push(to.to_lng_lat());

        SynthesizedRoute {
            estimate,
            geometry: RouteGeometry(points),
        }
    }

    /// Convenience wrapper building the RNG from a [`Jitter`] setting.
    pub fn synthesize_with(
        &self,
        from: LatLng,
        to: LatLng,
        mode: TransportMode,
        jitter: Jitter,
    ) -> SynthesizedRoute {
        let synth = match jitter {
            Jitter::Off => Self {
                jitter_degrees: 0.0,
                ..*self
            },
            _ => *self,
        };
        let mut rng = StdRng::seed_from_u64(jitter.base_seed());
        synth.synthesize(from, to, mode, &mut rng)
    }

    fn offset<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.jitter_degrees == 0.0 {
            return 0.0;
        }
        (rng.random::<f64>() - 0.5) * self.jitter_degrees
    }
}

/// Total points in a synthesized path, endpoints included.
pub(crate) fn route_point_count(estimated_distance_m: f64) -> usize {
    let by_distance = (estimated_distance_m / METERS_PER_ROUTE_POINT).floor();
    by_distance.clamp(MIN_ROUTE_POINTS as f64, MAX_ROUTE_POINTS as f64) as usize
}
