use crate::{constants::EARTH_RADIUS_M, geo::coord::LatLng};

/// Great-circle distance in meters between two normalized points.
///
/// Callers must pass points that went through the normalizer; a NaN here
/// is a bug upstream.
#[inline]
pub fn haversine_m(a: LatLng, b: LatLng) -> f64 {
    debug_assert!(
        a.is_finite() && b.is_finite(),
        "haversine on non-normalized points a={a:?} b={b:?}"
    );
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlng / 2.0).sin();
    let h = (s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2).min(1.0);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Sum of consecutive distances along an open path of positions into `points`.
pub(crate) fn path_length_m(points: &[LatLng], path: &[usize]) -> f64 {
    path.windows(2)
        .map(|w| haversine_m(points[w[0]], points[w[1]]))
        .sum()
}
