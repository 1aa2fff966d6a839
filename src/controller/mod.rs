use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;
use crate::config::Config;
use crate::credentials::CredentialVault;
use crate::helpers::handler_404::page_not_found_handler;

pub mod health_check;
pub mod maps_controller;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub vault: Arc<CredentialVault>,
    pub http: reqwest::Client,
}

pub async fn serve(config: Config, vault: CredentialVault) -> anyhow::Result<()> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout))
        .build()
        .context("Error building the upstream HTTP client")?;

    let app_state = AppState {
        vault: Arc::new(vault),
        http,
        config,
    };

    let origins: Vec<HeaderValue> = app_state
        .config
        .origin_urls
        .split(',')
        .map(|s| s.parse().unwrap())
        .collect::<Vec<HeaderValue>>();

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::OPTIONS
                        ])
                        .allow_origin(origins)
                        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                )
        )
        .fallback(page_not_found_handler);

    let port = SocketAddr::from(([0, 0, 0, 0], 8000));
    info!("Maps gateway listening on port: {}", port);
    axum::Server::bind(&port)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    health_check::router(app_state.clone())
        .merge(maps_controller::router(app_state))
}
