use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use crate::config::Config;
use crate::credentials::CredentialVault;

pub mod adapters;
pub mod config;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod format;
pub mod helpers;
pub mod models;
pub mod normalize;
pub mod static_map;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    // Missing backend credential is startup-fatal; per-request failures
    // never are.
    let vault = CredentialVault::load(&config)?;
    info!("Upstream credential loaded, map embedding enabled: {}", config.embed_maps);

    controller::serve(config, vault).await
}
