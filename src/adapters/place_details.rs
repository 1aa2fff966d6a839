use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::get_json;
use crate::credentials::{CredentialScope, CredentialVault};
use crate::error::{translate_status, GatewayError};
use crate::models::place::{
    place_maps_url, Coordinates, OpeningHours, PlaceDetails, PlaceResult, PriceLevel,
};
use crate::normalize::DetailsQuery;

const DETAILS_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,\
international_phone_number,website,rating,user_ratings_total,price_level,opening_hours,\
geometry,types";

pub struct PlaceDetailsAdapter {
    http: reqwest::Client,
    base_url: String,
    vault: Arc<CredentialVault>,
}

#[derive(Deserialize)]
struct DetailsEnvelope {
    status: String,
    result: Option<RawDetails>,
}

#[derive(Deserialize)]
struct RawDetails {
    place_id: Option<String>,
    name: String,
    formatted_address: Option<String>,
    formatted_phone_number: Option<String>,
    international_phone_number: Option<String>,
    website: Option<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u32>,
    price_level: Option<u8>,
    opening_hours: Option<RawOpeningHours>,
    geometry: RawGeometry,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Deserialize)]
struct RawOpeningHours {
    open_now: Option<bool>,
    #[serde(default)]
    weekday_text: Vec<String>,
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

impl PlaceDetailsAdapter {
    pub fn new(http: reqwest::Client, base_url: String, vault: Arc<CredentialVault>) -> Self {
        Self {
            http,
            base_url,
            vault,
        }
    }

    pub async fn execute(&self, query: &DetailsQuery) -> Result<PlaceDetails, GatewayError> {
        let key = self.vault.get(CredentialScope::Backend)?.to_string();
        let params: Vec<(&str, String)> = vec![
            ("place_id", query.place_id.clone()),
            ("fields", DETAILS_FIELDS.to_string()),
            ("key", key),
        ];

        let url = format!("{}/place/details/json", self.base_url.trim_end_matches('/'));
        let envelope: DetailsEnvelope = get_json(&self.http, &url, &params).await?;
        parse_response(envelope, &query.place_id)
    }
}

fn parse_response(
    envelope: DetailsEnvelope,
    requested_id: &str,
) -> Result<PlaceDetails, GatewayError> {
    if envelope.status != "OK" {
        return Err(translate_status(&envelope.status));
    }

    // A success status with no result body is malformed, not a valid
    // empty answer.
    let raw = envelope.result.ok_or(GatewayError::UnknownUpstream)?;

    let place_id = raw.place_id.unwrap_or_else(|| requested_id.to_string());
    let maps_url = place_maps_url(&place_id);

    Ok(PlaceDetails {
        place: PlaceResult {
            maps_url,
            place_id,
            name: raw.name,
            rating: raw.rating,
            user_ratings_total: raw.user_ratings_total,
            address: raw.formatted_address.unwrap_or_else(|| "N/A".to_string()),
            location: Coordinates {
                lat: raw.geometry.location.lat,
                lng: raw.geometry.location.lng,
            },
            types: raw.types,
        },
        phone: raw.formatted_phone_number.or(raw.international_phone_number),
        website: raw.website,
        opening_hours: raw.opening_hours.map(|hours| OpeningHours {
            open_now: hours.open_now,
            weekday_text: hours.weekday_text,
        }),
        price_level: raw.price_level.and_then(PriceLevel::from_level),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> DetailsEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn a_full_details_payload_parses() {
        let payload = json!({
            "status": "OK",
            "result": {
                "place_id": "p1",
                "name": "Juliana's",
                "formatted_address": "19 Old Fulton St, Brooklyn, NY 11201",
                "formatted_phone_number": "(718) 596-6700",
                "website": "https://julianaspizza.com/",
                "rating": 4.6,
                "user_ratings_total": 3500,
                "price_level": 2,
                "opening_hours": {
                    "open_now": true,
                    "weekday_text": ["Monday: 11:30 AM – 9:00 PM"]
                },
                "geometry": { "location": { "lat": 40.7026, "lng": -73.9934 } },
                "types": ["restaurant", "food"]
            }
        });

        let details = parse_response(envelope(payload), "p1").unwrap();
        assert_eq!(details.place.name, "Juliana's");
        assert_eq!(details.price_level, Some(PriceLevel::Moderate));
        assert_eq!(details.phone.as_deref(), Some("(718) 596-6700"));
        let hours = details.opening_hours.unwrap();
        assert_eq!(hours.open_now, Some(true));
        assert_eq!(hours.weekday_text.len(), 1);
    }

    #[test]
    fn not_found_maps_to_zero_results() {
        let payload = json!({ "status": "NOT_FOUND" });
        assert_eq!(
            parse_response(envelope(payload), "missing").unwrap_err(),
            GatewayError::ZeroResults
        );
    }

    #[test]
    fn an_ok_status_without_a_body_is_not_a_valid_result() {
        let payload = json!({ "status": "OK" });
        assert_eq!(
            parse_response(envelope(payload), "p1").unwrap_err(),
            GatewayError::UnknownUpstream
        );
    }

    #[test]
    fn out_of_range_price_levels_are_dropped() {
        let payload = json!({
            "status": "OK",
            "result": {
                "name": "Somewhere",
                "price_level": 9,
                "geometry": { "location": { "lat": 1.0, "lng": 2.0 } }
            }
        });
        let details = parse_response(envelope(payload), "p9").unwrap();
        assert_eq!(details.price_level, None);
        assert_eq!(details.place.place_id, "p9");
    }
}
