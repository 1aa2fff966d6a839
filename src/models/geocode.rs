use serde::{Deserialize, Serialize};

use crate::models::place::Coordinates;

/// How precisely the upstream provider resolved an address.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Rooftop,
    RangeInterpolated,
    GeometricCenter,
    Approximate,
}

impl LocationType {
    /// Maps the upstream vocabulary onto the internal enum. Unrecognized
    /// values degrade to `Approximate` rather than leaking upstream codes.
    pub fn from_upstream(raw: &str) -> Self {
        match raw {
            "ROOFTOP" => LocationType::Rooftop,
            "RANGE_INTERPOLATED" => LocationType::RangeInterpolated,
            "GEOMETRIC_CENTER" => LocationType::GeometricCenter,
            _ => LocationType::Approximate,
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            LocationType::Rooftop => "exact",
            LocationType::RangeInterpolated => "interpolated",
            LocationType::GeometricCenter => "center of area",
            LocationType::Approximate => "approximate",
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub location: Coordinates,
    pub location_type: LocationType,
    pub maps_url: String,
}
