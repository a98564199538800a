use serde::Serialize;
use tour_route_derive::CliValue;

use crate::constants::{BIKE_SPEED_MPS, CAR_SPEED_MPS, FOOT_SPEED_MPS};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, CliValue)]
#[serde(rename_all = "lowercase")]
#[cli_value(option = "mode")]
pub enum TransportMode {
    #[cli(alias = "walking")]
    Foot,
    #[cli(alias = "cycling")]
    Bike,
    #[default]
    #[cli(alias = "driving")]
    Car,
}

impl TransportMode {
    pub const ALL: [Self; 3] = [Self::Foot, Self::Bike, Self::Car];

    /// Average travel speed in meters per second.
    pub fn speed_mps(self) -> f64 {
        match self {
            Self::Foot => FOOT_SPEED_MPS,
            Self::Bike => BIKE_SPEED_MPS,
            Self::Car => CAR_SPEED_MPS,
        }
    }

    pub fn duration_s(self, distance_m: f64) -> f64 {
        distance_m / self.speed_mps()
    }
}
