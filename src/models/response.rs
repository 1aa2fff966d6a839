use serde::{Deserialize, Serialize};

use crate::models::geocode::GeocodeResult;
use crate::models::map_ref::MapRef;
use crate::models::place::{PlaceDetails, PlaceResult};
use crate::models::route::RouteResult;

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<PlaceResult>,
    /// True when the upstream reported no matches; distinct from any
    /// error kind so callers can render "no results" instead of a failure.
    pub zero_results: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapRef>,
}

impl SearchResponse {
    pub fn empty(query: String, text: String) -> Self {
        Self {
            query,
            count: 0,
            results: Vec::new(),
            zero_results: true,
            text,
            map: None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DetailsResponse {
    #[serde(flatten)]
    pub details: PlaceDetails,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapRef>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DirectionsResponse {
    pub origin: String,
    pub destination: String,
    pub mode: String,
    pub route: RouteResult,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapRef>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GeocodeResponse {
    pub address: String,
    pub count: usize,
    pub results: Vec<GeocodeResult>,
    pub zero_results: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapRef>,
}

impl GeocodeResponse {
    pub fn empty(address: String, text: String) -> Self {
        Self {
            address,
            count: 0,
            results: Vec::new(),
            zero_results: true,
            text,
            map: None,
        }
    }
}

#[derive(Clone, Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    pub maps_api_configured: bool,
}
