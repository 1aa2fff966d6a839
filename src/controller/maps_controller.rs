use std::sync::Arc;

use axum::extract::Query;
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use reqwest::StatusCode;
use serde_json::json;
use tracing::{info, warn};

use crate::adapters::directions::DirectionsAdapter;
use crate::adapters::geocoding::GeocodingAdapter;
use crate::adapters::place_details::PlaceDetailsAdapter;
use crate::adapters::places_search::PlacesSearchAdapter;
use crate::config::Config;
use crate::controller::AppState;
use crate::credentials::{CredentialScope, CredentialVault};
use crate::error::GatewayError;
use crate::format;
use crate::models::place::Coordinates;
use crate::models::request::{
    DetailsRequest, DirectionsRequest, GeocodeRequest, SearchRequest, StaticImageParams,
};
use crate::models::response::{
    DetailsResponse, DirectionsResponse, GeocodeResponse, SearchResponse,
};
use crate::normalize::{
    normalize_details, normalize_directions, normalize_geocode, normalize_search,
    parse_coordinates, DetailsQuery, DirectionsQuery, GeocodeQuery, LocationRef, SearchQuery,
};
use crate::static_map::StaticMapSpec;

pub fn router(app_state: AppState) -> Router {
    let gateway = Arc::new(MapsGateway::new(&app_state));

    Router::new()
        .route("/search", post(search_places))
        .route("/details", post(place_details))
        .route("/directions", post(get_directions))
        .route("/geocode", post(geocode_address))
        .route("/static-image", get(static_image))
        .route_layer(Extension(gateway))
}

/// One concrete handler per operation; all four upstream adapters share
/// the process-wide HTTP client and credential vault.
pub struct MapsGateway {
    config: Config,
    vault: Arc<CredentialVault>,
    places_search: PlacesSearchAdapter,
    place_details: PlaceDetailsAdapter,
    directions: DirectionsAdapter,
    geocoding: GeocodingAdapter,
}

impl MapsGateway {
    pub fn new(app_state: &AppState) -> Self {
        let base_url = app_state.config.backend_api_url.clone();
        Self {
            config: app_state.config.clone(),
            vault: app_state.vault.clone(),
            places_search: PlacesSearchAdapter::new(
                app_state.http.clone(),
                base_url.clone(),
                app_state.vault.clone(),
            ),
            place_details: PlaceDetailsAdapter::new(
                app_state.http.clone(),
                base_url.clone(),
                app_state.vault.clone(),
            ),
            directions: DirectionsAdapter::new(
                app_state.http.clone(),
                base_url.clone(),
                app_state.vault.clone(),
            ),
            geocoding: GeocodingAdapter::new(
                app_state.http.clone(),
                base_url,
                app_state.vault.clone(),
            ),
        }
    }

    /// Zero results from the upstream become an empty 200 response with
    /// the `zero_results` flag set, never an error.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, GatewayError> {
        let location_text = query.location.as_ref().map(|loc| match loc {
            LocationRef::Text(text) => text.clone(),
            LocationRef::Coords(coords) => coords.to_param(),
        });

        let places = match self.places_search.execute(query).await {
            Ok(places) => places,
            Err(GatewayError::ZeroResults) => {
                let text = format::format_search(
                    &query.query,
                    location_text.as_deref(),
                    &[],
                    &self.config,
                );
                return Ok(SearchResponse::empty(query.query.clone(), text));
            }
            Err(err) => return Err(err),
        };

        let total = places.len();
        let text =
            format::format_search(&query.query, location_text.as_deref(), &places, &self.config);

        // Display payload carries at most the configured number of
        // entries, in upstream relevance order.
        let shown: Vec<_> = places
            .into_iter()
            .take(self.config.max_results_display)
            .collect();
        let embed_key = self.vault.get(CredentialScope::Embed)?;
        let map = format::map_ref_for_places(&shown, &self.config, embed_key);

        Ok(SearchResponse {
            query: query.query.clone(),
            count: total,
            results: shown,
            zero_results: false,
            text,
            map,
        })
    }

    async fn details(&self, query: &DetailsQuery) -> Result<DetailsResponse, GatewayError> {
        let details = self.place_details.execute(query).await?;
        let embed_key = self.vault.get(CredentialScope::Embed)?;
        let map = format::map_ref_for_place(&details, &self.config, embed_key);
        let text = format::format_details(&details, &self.config);

        Ok(DetailsResponse { details, text, map })
    }

    async fn directions(
        &self,
        query: &DirectionsQuery,
    ) -> Result<DirectionsResponse, GatewayError> {
        let route = self.directions.execute(query).await?;
        let embed_key = self.vault.get(CredentialScope::Embed)?;
        let map = format::map_ref_for_route(
            &route,
            &query.origin,
            &query.destination,
            query.mode,
            &self.config,
            embed_key,
        );
        let text = format::format_directions(
            &query.origin,
            &query.destination,
            query.mode,
            &route,
            &self.config,
        );

        Ok(DirectionsResponse {
            origin: query.origin.clone(),
            destination: query.destination.clone(),
            mode: query.mode.as_param().to_string(),
            route,
            text,
            map,
        })
    }

    async fn geocode(&self, query: &GeocodeQuery) -> Result<GeocodeResponse, GatewayError> {
        let results = match self.geocoding.execute(query).await {
            Ok(results) => results,
            Err(GatewayError::ZeroResults) => {
                let text = format::format_geocode(&query.address, &[], &self.config);
                return Ok(GeocodeResponse::empty(query.address.clone(), text));
            }
            Err(err) => return Err(err),
        };

        let embed_key = self.vault.get(CredentialScope::Embed)?;
        let map = format::map_ref_for_geocode(&results, &self.config, embed_key);
        let text = format::format_geocode(&query.address, &results, &self.config);

        Ok(GeocodeResponse {
            address: query.address.clone(),
            count: results.len(),
            results,
            zero_results: false,
            text,
            map,
        })
    }

    /// Builds the signed provider URL for the static-image redirect. The
    /// backend key is attached here, server-side only.
    fn static_image_url(&self, params: &StaticImageParams) -> Result<String, GatewayError> {
        let points: Vec<Coordinates> = params
            .points
            .as_deref()
            .map(|raw| raw.split('|').filter_map(parse_coordinates).collect())
            .unwrap_or_default();
        let center = params.center.as_deref().and_then(parse_coordinates);

        if points.is_empty() && center.is_none() {
            return Err(GatewayError::Validation {
                field: "points",
                message: "either points or center must hold a valid lat,lng pair".to_string(),
            });
        }

        let width = params.width.unwrap_or(self.config.map_width);
        let height = params.height.unwrap_or(self.config.map_height);

        let mut spec = StaticMapSpec::for_points(&points, width, height);
        if spec.center.is_none() {
            spec.center = center;
        }
        spec.path = params.path.clone();

        let key = self.vault.get(CredentialScope::Backend)?;
        Ok(spec.image_url(&self.config.backend_api_url, key))
    }
}

pub async fn search_places(
    Extension(gateway): Extension<Arc<MapsGateway>>,
    Json(body): Json<SearchRequest>,
) -> impl IntoResponse {
    let query = match normalize_search(body) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };
    info!("Searching places for query: {}", query.query);

    match gateway.search(&query).await {
        Ok(response) => (StatusCode::OK, json!(response).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong searching places due to: {}", e);
            e.into_response()
        }
    }
}

pub async fn place_details(
    Extension(gateway): Extension<Arc<MapsGateway>>,
    Json(body): Json<DetailsRequest>,
) -> impl IntoResponse {
    let query = match normalize_details(body) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };
    info!("Fetching details for place: {}", query.place_id);

    match gateway.details(&query).await {
        Ok(response) => (StatusCode::OK, json!(response).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong fetching place details due to: {}", e);
            e.into_response()
        }
    }
}

pub async fn get_directions(
    Extension(gateway): Extension<Arc<MapsGateway>>,
    Json(body): Json<DirectionsRequest>,
) -> impl IntoResponse {
    let query = match normalize_directions(body) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };
    info!(
        "Getting {} directions: {} -> {}",
        query.mode.as_param(),
        query.origin,
        query.destination
    );

    match gateway.directions(&query).await {
        Ok(response) => (StatusCode::OK, json!(response).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong getting directions due to: {}", e);
            e.into_response()
        }
    }
}

pub async fn geocode_address(
    Extension(gateway): Extension<Arc<MapsGateway>>,
    Json(body): Json<GeocodeRequest>,
) -> impl IntoResponse {
    let query = match normalize_geocode(body) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };
    info!("Geocoding address: {}", query.address);

    match gateway.geocode(&query).await {
        Ok(response) => (StatusCode::OK, json!(response).to_string()).into_response(),
        Err(e) => {
            warn!("Something went wrong geocoding address due to: {}", e);
            e.into_response()
        }
    }
}

/// Redirects to the provider-rendered image so the caller never sees the
/// backend credential in a JSON payload.
pub async fn static_image(
    Extension(gateway): Extension<Arc<MapsGateway>>,
    Query(params): Query<StaticImageParams>,
) -> impl IntoResponse {
    match gateway.static_image_url(&params) {
        Ok(url) => Redirect::temporary(&url).into_response(),
        Err(e) => {
            warn!("Something went wrong building the static map due to: {}", e);
            e.into_response()
        }
    }
}
