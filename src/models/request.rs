use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct SearchRequest {
    pub query: String,
    pub location: Option<String>,
    pub radius: Option<u32>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DetailsRequest {
    pub place_id: String,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub mode: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GeocodeRequest {
    pub address: String,
}

/// Query parameters for GET /static-image.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct StaticImageParams {
    /// "lat,lng" center, used when no points are given.
    pub center: Option<String>,
    /// Pipe separated "lat,lng|lat,lng" marker points.
    pub points: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Optional encoded route polyline.
    pub path: Option<String>,
}
