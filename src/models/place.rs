use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Renders the pair the way the provider expects it in query params.
    pub fn to_param(self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub address: String,
    pub location: Coordinates,
    pub types: Vec<String>,
    pub maps_url: String,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlaceDetails {
    #[serde(flatten)]
    pub place: PlaceResult,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub price_level: Option<PriceLevel>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct OpeningHours {
    pub open_now: Option<bool>,
    /// One entry per weekday, in upstream order.
    pub weekday_text: Vec<String>,
}

/// Relative expensiveness of a place, levels 0 through 4.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriceLevel {
    Free,
    Inexpensive,
    Moderate,
    Expensive,
    VeryExpensive,
}

impl PriceLevel {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(PriceLevel::Free),
            1 => Some(PriceLevel::Inexpensive),
            2 => Some(PriceLevel::Moderate),
            3 => Some(PriceLevel::Expensive),
            4 => Some(PriceLevel::VeryExpensive),
            _ => None,
        }
    }

    /// "$" repeated by level, "free" for level 0.
    pub fn display(self) -> String {
        match self {
            PriceLevel::Free => "free".to_string(),
            PriceLevel::Inexpensive => "$".to_string(),
            PriceLevel::Moderate => "$$".to_string(),
            PriceLevel::Expensive => "$$$".to_string(),
            PriceLevel::VeryExpensive => "$$$$".to_string(),
        }
    }
}

/// Canonical maps link for a place id.
pub fn place_maps_url(place_id: &str) -> String {
    format!("https://www.google.com/maps/place/?q=place_id:{}", place_id)
}
