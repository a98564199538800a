pub(crate) mod coord;
pub(crate) mod distance;
pub(crate) mod waypoint;
