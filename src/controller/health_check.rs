use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use serde_json::json;

use crate::controller::AppState;
use crate::credentials::CredentialScope;
use crate::models::response::HealthResponse;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(get_health_check))
        .route_layer(Extension(Arc::new(app_state)))
}

/// Liveness probe, no upstream dependency.
async fn get_health_check(
    Extension(app_state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    let health = HealthResponse {
        status: "ok",
        maps_api_configured: app_state.vault.get(CredentialScope::Backend).is_ok(),
    };
    (StatusCode::OK, json!(health).to_string())
}
