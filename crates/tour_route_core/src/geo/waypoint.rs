use crate::geo::coord::{CoordinateError, LatLng, Normalized, RawWaypoint, normalize};

/// A caller waypoint together with its normalization outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub index: usize,
    pub raw: RawWaypoint,
    pub normalized: Result<Normalized, CoordinateError>,
}

impl Waypoint {
    pub fn from_raw(index: usize, raw: RawWaypoint) -> Self {
        let normalized = match &raw {
            RawWaypoint::Pair(v1, v2) => normalize(*v1, *v2),
            RawWaypoint::Malformed(err) => Err(err.clone()),
        };
        Self {
            index,
            raw,
            normalized,
        }
    }
}

/// The waypoints that survived normalization, in input order.
///
/// `indices[i]` is the caller's original index of `points[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidWaypoints {
    pub indices: Vec<usize>,
    pub points: Vec<LatLng>,
    /// Original indices whose axis order was a guess.
    pub ambiguous: Vec<usize>,
    pub rejected: Vec<(usize, CoordinateError)>,
}

impl ValidWaypoints {
    pub fn collect(waypoints: &[Waypoint]) -> Self {
        let mut set = Self::default();
        for waypoint in waypoints {
            match &waypoint.normalized {
                Ok(normalized) => {
                    set.indices.push(waypoint.index);
                    set.points.push(normalized.point);
                    if normalized.ambiguous {
                        set.ambiguous.push(waypoint.index);
                    }
                }
                Err(err) => {
                    log::warn!(
                        "normalizer: rejected index={} reason={err}",
                        waypoint.index
                    );
                    set.rejected.push((waypoint.index, err.clone()));
                }
            }
        }
        log::debug!(
            "normalizer: valid={} rejected={} ambiguous={}",
            set.len(),
            set.rejected.len(),
            set.ambiguous.len()
        );
        set
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
