use std::sync::Arc;

use serde::Deserialize;
use url::form_urlencoded::Serializer;

use crate::adapters::{get_json, strip_html};
use crate::credentials::{CredentialScope, CredentialVault};
use crate::error::{translate_status, GatewayError};
use crate::models::place::Coordinates;
use crate::models::route::{format_distance, format_duration, RouteResult, RouteStep};
use crate::normalize::DirectionsQuery;

pub struct DirectionsAdapter {
    http: reqwest::Client,
    base_url: String,
    vault: Arc<CredentialVault>,
}

#[derive(Deserialize)]
struct DirectionsEnvelope {
    status: String,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Deserialize)]
struct RawRoute {
    summary: Option<String>,
    #[serde(default)]
    legs: Vec<RawLeg>,
    overview_polyline: Option<RawPolyline>,
}

#[derive(Deserialize)]
struct RawPolyline {
    points: String,
}

#[derive(Deserialize)]
struct RawLeg {
    distance: RawValueText,
    duration: RawValueText,
    start_address: String,
    end_address: String,
    start_location: RawLocation,
    end_location: RawLocation,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Deserialize)]
struct RawStep {
    html_instructions: Option<String>,
    distance: Option<RawValueText>,
    duration: Option<RawValueText>,
}

#[derive(Deserialize)]
struct RawValueText {
    value: u64,
    text: String,
}

#[derive(Deserialize)]
struct RawLocation {
    lat: f64,
    lng: f64,
}

impl DirectionsAdapter {
    pub fn new(http: reqwest::Client, base_url: String, vault: Arc<CredentialVault>) -> Self {
        Self {
            http,
            base_url,
            vault,
        }
    }

    pub async fn execute(&self, query: &DirectionsQuery) -> Result<RouteResult, GatewayError> {
        let key = self.vault.get(CredentialScope::Backend)?.to_string();
        let params: Vec<(&str, String)> = vec![
            ("origin", query.origin.clone()),
            ("destination", query.destination.clone()),
            ("mode", query.mode.as_param().to_string()),
            ("key", key),
        ];

        let url = format!("{}/directions/json", self.base_url.trim_end_matches('/'));
        let envelope: DirectionsEnvelope = get_json(&self.http, &url, &params).await?;
        parse_response(envelope, query)
    }
}

fn parse_response(
    envelope: DirectionsEnvelope,
    query: &DirectionsQuery,
) -> Result<RouteResult, GatewayError> {
    if envelope.status != "OK" {
        return Err(translate_status(&envelope.status));
    }

    // An OK payload without routes is a no-match answer.
    let route = envelope.routes.into_iter().next().ok_or(GatewayError::ZeroResults)?;
    if route.legs.is_empty() {
        return Err(GatewayError::UnknownUpstream);
    }

    let distance_meters: u64 = route.legs.iter().map(|leg| leg.distance.value).sum();
    let duration_seconds: u64 = route.legs.iter().map(|leg| leg.duration.value).sum();

    // Single-leg routes keep the upstream display strings verbatim.
    let (distance_text, duration_text) = if route.legs.len() == 1 {
        (
            route.legs[0].distance.text.clone(),
            route.legs[0].duration.text.clone(),
        )
    } else {
        (format_distance(distance_meters), format_duration(duration_seconds))
    };

    let first = &route.legs[0];
    let last = &route.legs[route.legs.len() - 1];
    let start_location = Coordinates {
        lat: first.start_location.lat,
        lng: first.start_location.lng,
    };
    let end_location = Coordinates {
        lat: last.end_location.lat,
        lng: last.end_location.lng,
    };
    let start_address = first.start_address.clone();
    let end_address = last.end_address.clone();

    let steps: Vec<RouteStep> = route
        .legs
        .iter()
        .flat_map(|leg| &leg.steps)
        .map(|step| RouteStep {
            instruction: strip_html(step.html_instructions.as_deref().unwrap_or("Continue")),
            distance: step
                .distance
                .as_ref()
                .map(|d| d.text.clone())
                .unwrap_or_default(),
            duration: step
                .duration
                .as_ref()
                .map(|d| d.text.clone())
                .unwrap_or_default(),
        })
        .collect();

    Ok(RouteResult {
        summary: route.summary.unwrap_or_else(|| "Route".to_string()),
        distance_meters,
        distance_text,
        duration_seconds,
        duration_text,
        start_address,
        end_address,
        start_location,
        end_location,
        steps,
        maps_url: directions_maps_url(query),
        polyline: route.overview_polyline.map(|p| p.points),
    })
}

/// Credential-free deep link to the route.
fn directions_maps_url(query: &DirectionsQuery) -> String {
    let params = Serializer::new(String::new())
        .append_pair("api", "1")
        .append_pair("origin", &query.origin)
        .append_pair("destination", &query.destination)
        .append_pair("travelmode", query.mode.as_param())
        .finish();
    format!("https://www.google.com/maps/dir/?{}", params)
}
