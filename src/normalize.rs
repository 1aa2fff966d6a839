use crate::error::GatewayError;
use crate::models::place::Coordinates;
use crate::models::request::{DetailsRequest, DirectionsRequest, GeocodeRequest, SearchRequest};

pub const MIN_RADIUS_METERS: u32 = 1;
pub const MAX_RADIUS_METERS: u32 = 50_000;
pub const DEFAULT_RADIUS_METERS: u32 = 5_000;

/// Provider-accepted static map dimensions.
pub const MIN_MAP_DIMENSION: u32 = 1;
pub const MAX_MAP_DIMENSION: u32 = 640;

/// A caller-supplied location, either free text or an explicit pair.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationRef {
    Text(String),
    Coords(Coordinates),
}

#[derive(Clone, Debug)]
pub struct SearchQuery {
    pub query: String,
    pub location: Option<LocationRef>,
    pub radius: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            other => Err(GatewayError::UnsupportedMode(other.to_string())),
        }
    }

    /// The upstream travel-mode vocabulary happens to match ours.
    pub fn as_param(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

#[derive(Clone, Debug)]
pub struct DirectionsQuery {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
}

#[derive(Clone, Debug)]
pub struct DetailsQuery {
    pub place_id: String,
}

#[derive(Clone, Debug)]
pub struct GeocodeQuery {
    pub address: String,
}

pub fn normalize_search(req: SearchRequest) -> Result<SearchQuery, GatewayError> {
    let query = required("query", &req.query)?;
    let location = req
        .location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| match parse_coordinates(s) {
            Some(coords) => LocationRef::Coords(coords),
            None => LocationRef::Text(s.to_string()),
        });
    let radius = req
        .radius
        .unwrap_or(DEFAULT_RADIUS_METERS)
        .clamp(MIN_RADIUS_METERS, MAX_RADIUS_METERS);

    Ok(SearchQuery {
        query,
        location,
        radius,
    })
}

pub fn normalize_details(req: DetailsRequest) -> Result<DetailsQuery, GatewayError> {
    Ok(DetailsQuery {
        place_id: required("place_id", &req.place_id)?,
    })
}

pub fn normalize_directions(req: DirectionsRequest) -> Result<DirectionsQuery, GatewayError> {
    let origin = required("origin", &req.origin)?;
    let destination = required("destination", &req.destination)?;
    let mode = match req.mode.as_deref() {
        None => TravelMode::Driving,
        Some(raw) => TravelMode::parse(raw)?,
    };

    Ok(DirectionsQuery {
        origin,
        destination,
        mode,
    })
}

pub fn normalize_geocode(req: GeocodeRequest) -> Result<GeocodeQuery, GatewayError> {
    Ok(GeocodeQuery {
        address: required("address", &req.address)?,
    })
}

/// Clamps a static map dimension into the provider-accepted range.
pub fn clamp_dimension(value: u32) -> u32 {
    value.clamp(MIN_MAP_DIMENSION, MAX_MAP_DIMENSION)
}

fn required(field: &'static str, value: &str) -> Result<String, GatewayError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(GatewayError::missing_field(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Recognizes "lat,lng" pairs; anything else is treated as free text.
pub fn parse_coordinates(raw: &str) -> Option<Coordinates> {
    let (lat, lng) = raw.split_once(',')?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lng: f64 = lng.trim().parse().ok()?;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Some(Coordinates { lat, lng })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_request(radius: Option<u32>) -> SearchRequest {
        SearchRequest {
            query: "pizza".to_string(),
            location: Some("Brooklyn, New York".to_string()),
            radius,
        }
    }

    #[test]
    fn radius_is_clamped_never_rejected() {
        assert_eq!(normalize_search(search_request(Some(0))).unwrap().radius, 1);
        assert_eq!(
            normalize_search(search_request(Some(999_999))).unwrap().radius,
            MAX_RADIUS_METERS
        );
        assert_eq!(
            normalize_search(search_request(Some(25_000))).unwrap().radius,
            25_000
        );
        assert_eq!(
            normalize_search(search_request(None)).unwrap().radius,
            DEFAULT_RADIUS_METERS
        );
    }

    #[test]
    fn empty_query_fails_with_the_field_name() {
        let err = normalize_search(SearchRequest {
            query: "   ".to_string(),
            location: None,
            radius: None,
        })
        .unwrap_err();
        assert!(matches!(err, GatewayError::Validation { field: "query", .. }));
    }

    #[test]
    fn coordinate_locations_are_recognized() {
        let query = normalize_search(SearchRequest {
            query: "coffee".to_string(),
            location: Some("40.6782,-73.9442".to_string()),
            radius: None,
        })
        .unwrap();
        assert_eq!(
            query.location,
            Some(LocationRef::Coords(Coordinates {
                lat: 40.6782,
                lng: -73.9442
            }))
        );
    }

    #[test]
    fn textual_locations_stay_text() {
        let query = normalize_search(search_request(None)).unwrap();
        assert_eq!(
            query.location,
            Some(LocationRef::Text("Brooklyn, New York".to_string()))
        );
    }

    #[test]
    fn unknown_travel_mode_is_unsupported() {
        let err = normalize_directions(DirectionsRequest {
            origin: "JFK Airport".to_string(),
            destination: "Times Square".to_string(),
            mode: Some("teleport".to_string()),
        })
        .unwrap_err();
        assert_eq!(err, GatewayError::UnsupportedMode("teleport".to_string()));
    }

    #[test]
    fn mode_defaults_to_driving_and_parses_case_insensitively() {
        let query = normalize_directions(DirectionsRequest {
            origin: "a".to_string(),
            destination: "b".to_string(),
            mode: None,
        })
        .unwrap();
        assert_eq!(query.mode, TravelMode::Driving);
        assert_eq!(TravelMode::parse("Transit").unwrap(), TravelMode::Transit);
    }

    #[test]
    fn missing_origin_or_destination_fails_before_any_network_call() {
        let err = normalize_directions(DirectionsRequest {
            origin: String::new(),
            destination: "b".to_string(),
            mode: None,
        })
        .unwrap_err();
        assert!(matches!(err, GatewayError::Validation { field: "origin", .. }));
    }

    #[test]
    fn dimensions_are_clamped_to_provider_range() {
        assert_eq!(clamp_dimension(0), 1);
        assert_eq!(clamp_dimension(400), 400);
        assert_eq!(clamp_dimension(10_000), MAX_MAP_DIMENSION);
    }

    #[test]
    fn out_of_range_coordinates_are_free_text() {
        assert!(parse_coordinates("91.0,10.0").is_none());
        assert!(parse_coordinates("Brooklyn").is_none());
    }
}
