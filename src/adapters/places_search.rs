use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::get_json;
use crate::credentials::{CredentialScope, CredentialVault};
use crate::error::{translate_status, GatewayError};
use crate::models::place::{place_maps_url, Coordinates, PlaceResult};
use crate::normalize::{LocationRef, SearchQuery};

pub struct PlacesSearchAdapter {
    http: reqwest::Client,
    base_url: String,
    vault: Arc<CredentialVault>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    status: String,
    #[serde(default)]
    results: Vec<RawPlace>,
}

#[derive(Deserialize)]
struct RawPlace {
    place_id: String,
    name: String,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    formatted_address: Option<String>,
    vicinity: Option<String>,
    geometry: RawGeometry,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Deserialize)]
struct RawGeometry {
    location: RawLocation,
}

#[derive(Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}

impl PlacesSearchAdapter {
    pub fn new(http: reqwest::Client, base_url: String, vault: Arc<CredentialVault>) -> Self {
        Self {
            http,
            base_url,
            vault,
        }
    }

    /// One upstream text-search call. A textual location is folded into
    /// the query so the invocation stays a single request; a coordinate
    /// location is passed through as an explicit bias with the radius.
    pub async fn execute(&self, query: &SearchQuery) -> Result<Vec<PlaceResult>, GatewayError> {
        let key = self.vault.get(CredentialScope::Backend)?.to_string();
        let mut params: Vec<(&str, String)> = Vec::new();

        match &query.location {
            Some(LocationRef::Coords(coords)) => {
                params.push(("query", query.query.clone()));
                params.push(("location", coords.to_param()));
                params.push(("radius", query.radius.to_string()));
            }
            Some(LocationRef::Text(text)) => {
                params.push(("query", format!("{} near {}", query.query, text)));
                params.push(("radius", query.radius.to_string()));
            }
            None => params.push(("query", query.query.clone())),
        }
        params.push(("key", key));

        let url = format!("{}/place/textsearch/json", self.base_url.trim_end_matches('/'));
        let envelope: SearchEnvelope = get_json(&self.http, &url, &params).await?;
        parse_response(envelope)
    }
}

/// Status is checked before any result parsing; a non-OK payload is
/// never treated as a valid result set. The full list is returned,
/// display truncation belongs to the formatter.
fn parse_response(envelope: SearchEnvelope) -> Result<Vec<PlaceResult>, GatewayError> {
    if envelope.status != "OK" {
        return Err(translate_status(&envelope.status));
    }

    Ok(envelope.results.into_iter().map(into_place).collect())
}

fn into_place(raw: RawPlace) -> PlaceResult {
    let maps_url = place_maps_url(&raw.place_id);
    PlaceResult {
        maps_url,
        place_id: raw.place_id,
        name: raw.name,
        rating: raw.rating,
        user_ratings_total: raw.user_ratings_total,
        address: raw
            .formatted_address
            .or(raw.vicinity)
            .unwrap_or_else(|| "N/A".to_string()),
        location: Coordinates {
            lat: raw.geometry.location.lat,
            lng: raw.geometry.location.lng,
        },
        types: raw.types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> SearchEnvelope {
        serde_json::from_value(value).unwrap()
    }

    fn place_payload(i: usize) -> serde_json::Value {
        json!({
            "place_id": format!("p{}", i),
            "name": format!("Pizza Spot {}", i),
            "rating": 4.4,
            "user_ratings_total": 210,
            "formatted_address": format!("{} Smith St, Brooklyn, NY", i),
            "geometry": { "location": { "lat": 40.68 + i as f64 * 0.001, "lng": -73.99 } },
            "types": ["restaurant", "food", "point_of_interest"]
        })
    }

    #[test]
    fn a_five_result_payload_parses_in_upstream_order() {
        let payload = json!({
            "status": "OK",
            "results": (1..=5).map(place_payload).collect::<Vec<_>>()
        });

        let places = parse_response(envelope(payload)).unwrap();
        assert_eq!(places.len(), 5);
        for (i, place) in places.iter().enumerate() {
            assert_eq!(place.place_id, format!("p{}", i + 1));
            assert_eq!(
                place.maps_url,
                format!("https://www.google.com/maps/place/?q=place_id:p{}", i + 1)
            );
        }
    }

    #[test]
    fn zero_results_status_maps_to_zero_results() {
        let payload = json!({ "status": "ZERO_RESULTS", "results": [] });
        assert_eq!(
            parse_response(envelope(payload)).unwrap_err(),
            GatewayError::ZeroResults
        );
    }

    #[test]
    fn non_ok_status_wins_over_a_partial_result_list() {
        let payload = json!({
            "status": "OVER_QUERY_LIMIT",
            "results": [place_payload(1)]
        });
        assert_eq!(
            parse_response(envelope(payload)).unwrap_err(),
            GatewayError::QuotaExceeded
        );
    }

    #[test]
    fn vicinity_backfills_a_missing_formatted_address() {
        let payload = json!({
            "status": "OK",
            "results": [{
                "place_id": "p1",
                "name": "Corner Cafe",
                "vicinity": "12 Court St",
                "geometry": { "location": { "lat": 40.69, "lng": -73.99 } }
            }]
        });
        let places = parse_response(envelope(payload)).unwrap();
        assert_eq!(places[0].address, "12 Court St");
        assert!(places[0].types.is_empty());
    }
}
