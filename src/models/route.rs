use serde::{Deserialize, Serialize};

use crate::models::place::Coordinates;

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RouteStep {
    pub instruction: String,
    pub distance: String,
    pub duration: String,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct RouteResult {
    pub summary: String,
    pub distance_meters: u64,
    pub distance_text: String,
    pub duration_seconds: u64,
    pub duration_text: String,
    pub start_address: String,
    pub end_address: String,
    pub start_location: Coordinates,
    pub end_location: Coordinates,
    /// All steps in upstream order; display truncation happens in the
    /// response formatter, never here.
    pub steps: Vec<RouteStep>,
    pub maps_url: String,
    /// Encoded overview polyline for map rendering.
    pub polyline: Option<String>,
}

pub fn format_distance(meters: u64) -> String {
    if meters < 1000 {
        format!("{} m", meters)
    } else {
        format!("{:.1} km", meters as f64 / 1000.0)
    }
}

pub fn format_duration(seconds: u64) -> String {
    let minutes = (seconds + 30) / 60;
    if minutes < 60 {
        format!("{} min", minutes.max(1))
    } else {
        format!("{} hr {} min", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_render_in_meters_then_kilometers() {
        assert_eq!(format_distance(950), "950 m");
        assert_eq!(format_distance(1500), "1.5 km");
        assert_eq!(format_distance(26_400), "26.4 km");
    }

    #[test]
    fn durations_render_in_minutes_then_hours() {
        assert_eq!(format_duration(45), "1 min");
        assert_eq!(format_duration(300), "5 min");
        assert_eq!(format_duration(3_900), "1 hr 5 min");
    }
}
