use std::sync::Arc;

use serde::Deserialize;

use crate::adapters::get_json;
use crate::credentials::{CredentialScope, CredentialVault};
use crate::error::{translate_status, GatewayError};
use crate::models::geocode::{GeocodeResult, LocationType};
use crate::models::place::Coordinates;
use crate::normalize::GeocodeQuery;

/// Fixed domain cap on geocode answers, independent of the configured
/// display limit.
pub const GEOCODE_MAX_RESULTS: usize = 3;

pub struct GeocodingAdapter {
    http: reqwest::Client,
    base_url: String,
    vault: Arc<CredentialVault>,
}

#[derive(Deserialize)]
struct GeocodeEnvelope {
    status: String,
    #[serde(default)]
    results: Vec<RawGeocode>,
}

#[derive(Deserialize)]
struct RawGeocode {
    formatted_address: String,
    geometry: RawGeometry,
}

#[derive(Deserialize)]
struct RawGeometry {
    location: RawLocation,
    location_type: Option<String>,
}

#[derive(Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}

impl GeocodingAdapter {
    pub fn new(http: reqwest::Client, base_url: String, vault: Arc<CredentialVault>) -> Self {
        Self {
            http,
            base_url,
            vault,
        }
    }

    pub async fn execute(&self, query: &GeocodeQuery) -> Result<Vec<GeocodeResult>, GatewayError> {
        let key = self.vault.get(CredentialScope::Backend)?.to_string();
        let params: Vec<(&str, String)> =
            vec![("address", query.address.clone()), ("key", key)];

        let url = format!("{}/geocode/json", self.base_url.trim_end_matches('/'));
        let envelope: GeocodeEnvelope = get_json(&self.http, &url, &params).await?;
        parse_response(envelope)
    }
}

fn parse_response(envelope: GeocodeEnvelope) -> Result<Vec<GeocodeResult>, GatewayError> {
    if envelope.status != "OK" {
        return Err(translate_status(&envelope.status));
    }

    Ok(envelope
        .results
        .into_iter()
        .take(GEOCODE_MAX_RESULTS)
        .map(|raw| {
            let location = Coordinates {
                lat: raw.geometry.location.lat,
                lng: raw.geometry.location.lng,
            };
            GeocodeResult {
                formatted_address: raw.formatted_address,
                location,
                location_type: LocationType::from_upstream(
                    raw.geometry.location_type.as_deref().unwrap_or(""),
                ),
                maps_url: format!("https://www.google.com/maps?q={}", location.to_param()),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> GeocodeEnvelope {
        serde_json::from_value(value).unwrap()
    }

    fn result(i: usize, location_type: &str) -> serde_json::Value {
        json!({
            "formatted_address": format!("{} Broadway, New York, NY", i),
            "geometry": {
                "location": { "lat": 40.7 + i as f64 * 0.01, "lng": -74.0 },
                "location_type": location_type
            }
        })
    }

    #[test]
    fn results_are_capped_at_three_in_upstream_order() {
        let payload = json!({
            "status": "OK",
            "results": (0..7).map(|i| result(i, "ROOFTOP")).collect::<Vec<_>>()
        });

        let results = parse_response(envelope(payload)).unwrap();
        assert_eq!(results.len(), GEOCODE_MAX_RESULTS);
        assert_eq!(results[0].formatted_address, "0 Broadway, New York, NY");
        assert_eq!(results[2].formatted_address, "2 Broadway, New York, NY");
    }

    #[test]
    fn location_types_map_to_the_internal_enum() {
        let payload = json!({
            "status": "OK",
            "results": [
                result(0, "ROOFTOP"),
                result(1, "GEOMETRIC_CENTER"),
                result(2, "SOMETHING_NEW")
            ]
        });

        let results = parse_response(envelope(payload)).unwrap();
        assert_eq!(results[0].location_type, LocationType::Rooftop);
        assert_eq!(results[1].location_type, LocationType::GeometricCenter);
        assert_eq!(results[2].location_type, LocationType::Approximate);
    }

    #[test]
    fn zero_results_is_surfaced_distinctly() {
        let payload = json!({ "status": "ZERO_RESULTS", "results": [] });
        assert_eq!(
            parse_response(envelope(payload)).unwrap_err(),
            GatewayError::ZeroResults
        );
    }
}
