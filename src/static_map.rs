use url::form_urlencoded::Serializer;
use url::Url;

use crate::models::place::{Coordinates, PlaceResult};
use crate::models::route::RouteResult;
use crate::normalize::{clamp_dimension, parse_coordinates};

/// Marker cap imposed by the upstream static-map URL limits. Points past
/// the cap are dropped from the tail, never an error.
pub const MAX_STATIC_MARKERS: usize = 25;

pub const EMBED_BASE_URL: &str = "https://www.google.com/maps/embed/v1";

#[derive(Clone, Debug)]
pub struct Marker {
    pub color: &'static str,
    pub label: String,
    pub location: Coordinates,
}

/// Pure description of a static map; building one never touches the
/// network.
#[derive(Clone, Debug)]
pub struct StaticMapSpec {
    pub center: Option<Coordinates>,
    /// Markers in display rank order; the tail is dropped beyond
    /// `MAX_STATIC_MARKERS`.
    pub markers: Vec<Marker>,
    /// Raw value for the path parameter, either "enc:{polyline}" or a
    /// pipe separated coordinate list.
    pub path: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl StaticMapSpec {
    /// Numbered markers for an ordered coordinate list.
    pub fn for_points(points: &[Coordinates], width: u32, height: u32) -> Self {
        let markers = points
            .iter()
            .enumerate()
            .map(|(i, point)| Marker {
                color: "red",
                label: (i + 1).to_string(),
                location: *point,
            })
            .collect();

        Self {
            center: points.first().copied(),
            markers,
            path: None,
            width,
            height,
        }
    }

    /// Numbered markers for a result list, in upstream relevance order.
    pub fn for_places(places: &[PlaceResult], width: u32, height: u32) -> Self {
        let points: Vec<Coordinates> = places.iter().map(|p| p.location).collect();
        Self::for_points(&points, width, height)
    }

    /// A/B endpoint markers plus the route polyline when present.
    pub fn for_route(route: &RouteResult, width: u32, height: u32) -> Self {
        let path = match &route.polyline {
            Some(polyline) => format!("enc:{}", polyline),
            None => format!(
                "{}|{}",
                route.start_location.to_param(),
                route.end_location.to_param()
            ),
        };

        Self {
            center: None,
            markers: vec![
                Marker {
                    color: "green",
                    label: "A".to_string(),
                    location: route.start_location,
                },
                Marker {
                    color: "red",
                    label: "B".to_string(),
                    location: route.end_location,
                },
            ],
            path: Some(path),
            width,
            height,
        }
    }

    /// Single unlabeled pin, used for geocode results.
    pub fn for_point(location: Coordinates, width: u32, height: u32) -> Self {
        Self {
            center: Some(location),
            markers: vec![Marker {
                color: "red",
                label: "1".to_string(),
                location,
            }],
            path: None,
            width,
            height,
        }
    }

    /// Builds the signed static-image URL. Dimensions are clamped to the
    /// provider-accepted range and markers past the cap are dropped.
    pub fn image_url(&self, base_url: &str, key: &str) -> String {
        let mut query = Serializer::new(String::new());

        query.append_pair(
            "size",
            &format!(
                "{}x{}",
                clamp_dimension(self.width),
                clamp_dimension(self.height)
            ),
        );

        if self.markers.is_empty() {
            if let Some(center) = self.center {
                query.append_pair("center", &center.to_param());
                query.append_pair("zoom", "14");
            }
        }

        for marker in self.markers.iter().take(MAX_STATIC_MARKERS) {
            query.append_pair(
                "markers",
                &format!(
                    "color:{}|label:{}|{}",
                    marker.color,
                    marker.label,
                    marker.location.to_param()
                ),
            );
        }

        if let Some(path) = &self.path {
            query.append_pair("path", &format!("color:0x0000ff|weight:4|{}", path));
        }

        query.append_pair("key", key);

        format!("{}/staticmap?{}", base_url.trim_end_matches('/'), query.finish())
    }
}

/// Recovers the ordered marker coordinates from a built static-image URL.
/// Used by tests and by the static-image endpoint to validate inputs.
pub fn parse_marker_coordinates(url: &str) -> Vec<Coordinates> {
    let Ok(parsed) = Url::parse(url) else {
        return Vec::new();
    };

    parsed
        .query_pairs()
        .filter(|(name, _)| name == "markers")
        .filter_map(|(_, value)| {
            value
                .rsplit('|')
                .next()
                .and_then(parse_coordinates)
        })
        .collect()
}

/// Interactive embed URL for a search-style query.
pub fn embed_search_url(q: &str, key: &str) -> String {
    let query = Serializer::new(String::new())
        .append_pair("key", key)
        .append_pair("q", q)
        .finish();
    format!("{}/search?{}", EMBED_BASE_URL, query)
}

/// Interactive embed URL for a single place.
pub fn embed_place_url(place_id: &str, key: &str) -> String {
    let query = Serializer::new(String::new())
        .append_pair("key", key)
        .append_pair("q", &format!("place_id:{}", place_id))
        .finish();
    format!("{}/place?{}", EMBED_BASE_URL, query)
}

/// Interactive embed URL for a route.
pub fn embed_directions_url(origin: &str, destination: &str, mode: &str, key: &str) -> String {
    let query = Serializer::new(String::new())
        .append_pair("key", key)
        .append_pair("origin", origin)
        .append_pair("destination", destination)
        .append_pair("mode", mode)
        .finish();
    format!("{}/directions?{}", EMBED_BASE_URL, query)
}

/// Credential-free maps link centered on a coordinate.
pub fn search_link(center: Coordinates) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        center.to_param()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::place_maps_url;

    fn place(i: usize, lat: f64, lng: f64) -> PlaceResult {
        PlaceResult {
            place_id: format!("place-{}", i),
            name: format!("Place {}", i),
            rating: None,
            user_ratings_total: None,
            address: "1 Main St".to_string(),
            location: Coordinates { lat, lng },
            types: Vec::new(),
            maps_url: place_maps_url(&format!("place-{}", i)),
        }
    }

    #[test]
    fn marker_round_trip_preserves_order() {
        let places: Vec<PlaceResult> = (0..5)
            .map(|i| place(i, 40.0 + i as f64, -73.0 - i as f64))
            .collect();
        let spec = StaticMapSpec::for_places(&places, 600, 400);
        let url = spec.image_url("https://maps.googleapis.com/maps/api", "test-key");

        let recovered = parse_marker_coordinates(&url);
        let expected: Vec<Coordinates> = places.iter().map(|p| p.location).collect();
        assert_eq!(recovered, expected);
    }

    #[test]
    fn markers_past_the_cap_are_dropped_from_the_tail() {
        let places: Vec<PlaceResult> = (0..40)
            .map(|i| place(i, 40.0 + i as f64 * 0.01, -73.0))
            .collect();
        let spec = StaticMapSpec::for_places(&places, 600, 400);
        let url = spec.image_url("https://maps.googleapis.com/maps/api", "test-key");

        let recovered = parse_marker_coordinates(&url);
        assert_eq!(recovered.len(), MAX_STATIC_MARKERS);
        assert_eq!(recovered[0], places[0].location);
        assert_eq!(
            recovered[MAX_STATIC_MARKERS - 1],
            places[MAX_STATIC_MARKERS - 1].location
        );
    }

    #[test]
    fn dimensions_are_clamped_into_the_url() {
        let spec = StaticMapSpec::for_point(Coordinates { lat: 1.0, lng: 2.0 }, 9_999, 0);
        let url = spec.image_url("https://maps.googleapis.com/maps/api", "k");
        assert!(url.contains("size=640x1"));
    }

    #[test]
    fn route_specs_carry_the_encoded_polyline() {
        let route = crate::models::route::RouteResult {
            summary: "I-678 S".to_string(),
            distance_meters: 1000,
            distance_text: "1.0 km".to_string(),
            duration_seconds: 120,
            duration_text: "2 min".to_string(),
            start_address: "a".to_string(),
            end_address: "b".to_string(),
            start_location: Coordinates { lat: 40.6, lng: -73.8 },
            end_location: Coordinates { lat: 40.7, lng: -73.9 },
            steps: Vec::new(),
            maps_url: String::new(),
            polyline: Some("abc123".to_string()),
        };
        let url = StaticMapSpec::for_route(&route, 600, 400)
            .image_url("https://maps.googleapis.com/maps/api", "k");
        assert!(url.contains("enc%3Aabc123"));
        assert_eq!(parse_marker_coordinates(&url).len(), 2);
    }
}
