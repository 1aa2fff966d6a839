use clap::{ArgAction, Parser};

#[derive(Parser, Clone)]
pub struct Config {
    /// Base URL of the upstream map provider API.
    #[clap(env = "BACKEND_API_URL", long, default_value = "https://maps.googleapis.com/maps/api")]
    pub backend_api_url: String,

    /// Maximum number of result entries rendered to the caller.
    #[clap(env = "MAX_RESULTS_DISPLAY", long, default_value_t = 5)]
    pub max_results_display: usize,

    /// Upstream request timeout in seconds.
    #[clap(env = "REQUEST_TIMEOUT", long, default_value_t = 15)]
    pub request_timeout: u64,

    /// Include clickable map links in formatted responses.
    #[clap(env = "INCLUDE_MAP_LINKS", long, default_value_t = true, action = ArgAction::Set)]
    pub include_map_links: bool,

    /// Attach static-image/embed map references to responses.
    #[clap(env = "EMBED_MAPS", long, default_value_t = true, action = ArgAction::Set)]
    pub embed_maps: bool,

    #[clap(env = "MAP_WIDTH", long, default_value_t = 600)]
    pub map_width: u32,

    #[clap(env = "MAP_HEIGHT", long, default_value_t = 400)]
    pub map_height: u32,

    /// Comma separated list of allowed CORS origins.
    #[clap(env = "ORIGIN_URLS", long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    /// Upstream API key for the backend scope.
    #[clap(env = "MAPS_API_KEY", long, default_value = "")]
    pub maps_api_key: String,

    /// Path to a secret file holding the backend API key; takes
    /// precedence over MAPS_API_KEY when set (container secrets).
    #[clap(env = "MAPS_API_KEY_FILE", long, default_value = "")]
    pub maps_api_key_file: String,

    /// Optional separate key for the embed scope; falls back to the
    /// backend key when unset.
    #[clap(env = "MAPS_EMBED_KEY", long, default_value = "")]
    pub maps_embed_key: String,
}
