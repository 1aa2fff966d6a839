use url::form_urlencoded::Serializer;

use crate::config::Config;
use crate::models::geocode::GeocodeResult;
use crate::models::map_ref::MapRef;
use crate::models::place::{Coordinates, PlaceDetails, PlaceResult};
use crate::models::route::RouteResult;
use crate::normalize::TravelMode;
use crate::static_map;

/// Fixed display cap for turn-by-turn steps, independent of
/// `MAX_RESULTS_DISPLAY`.
pub const MAX_STEPS_DISPLAY: usize = 20;

fn stars(rating: f64) -> String {
    "⭐".repeat(rating.round().clamp(0.0, 5.0) as usize)
}

/// Relative gateway URL for the static-image proxy; the upstream key is
/// attached server-side when the redirect is issued, never here.
fn static_image_url(points: &[Coordinates], path: Option<&str>, config: &Config) -> String {
    let joined = points
        .iter()
        .map(|p| p.to_param())
        .collect::<Vec<_>>()
        .join("|");

    let mut query = Serializer::new(String::new());
    query.append_pair("points", &joined);
    if let Some(path) = path {
        query.append_pair("path", path);
    }
    query.append_pair("width", &config.map_width.to_string());
    query.append_pair("height", &config.map_height.to_string());
    format!("/static-image?{}", query.finish())
}

/// Map reference for a place list; `None` whenever embedding is disabled.
pub fn map_ref_for_places(
    places: &[PlaceResult],
    config: &Config,
    embed_key: &str,
) -> Option<MapRef> {
    if !config.embed_maps || places.is_empty() {
        return None;
    }
    let center = places[0].location;
    let points: Vec<Coordinates> = places.iter().map(|p| p.location).collect();

    Some(MapRef {
        image_url: static_image_url(&points, None, config),
        embed_url: Some(static_map::embed_search_url(&center.to_param(), embed_key)),
        link: static_map::search_link(center),
    })
}

pub fn map_ref_for_place(details: &PlaceDetails, config: &Config, embed_key: &str) -> Option<MapRef> {
    if !config.embed_maps {
        return None;
    }
    Some(MapRef {
        image_url: static_image_url(&[details.place.location], None, config),
        embed_url: Some(static_map::embed_place_url(&details.place.place_id, embed_key)),
        link: details.place.maps_url.clone(),
    })
}

pub fn map_ref_for_route(
    route: &RouteResult,
    origin: &str,
    destination: &str,
    mode: TravelMode,
    config: &Config,
    embed_key: &str,
) -> Option<MapRef> {
    if !config.embed_maps {
        return None;
    }
    let path = route.polyline.as_ref().map(|p| format!("enc:{}", p));

    Some(MapRef {
        image_url: static_image_url(
            &[route.start_location, route.end_location],
            path.as_deref(),
            config,
        ),
        embed_url: Some(static_map::embed_directions_url(
            origin,
            destination,
            mode.as_param(),
            embed_key,
        )),
        link: route.maps_url.clone(),
    })
}

pub fn map_ref_for_geocode(
    results: &[GeocodeResult],
    config: &Config,
    embed_key: &str,
) -> Option<MapRef> {
    if !config.embed_maps || results.is_empty() {
        return None;
    }
    let center = results[0].location;
    let points: Vec<Coordinates> = results.iter().map(|r| r.location).collect();

    Some(MapRef {
        image_url: static_image_url(&points, None, config),
        embed_url: Some(static_map::embed_search_url(&center.to_param(), embed_key)),
        link: static_map::search_link(center),
    })
}

/// Renders a search result list, preserving upstream relevance order and
/// showing at most `MAX_RESULTS_DISPLAY` entries.
pub fn format_search(
    query: &str,
    location: Option<&str>,
    places: &[PlaceResult],
    config: &Config,
) -> String {
    let location_text = location
        .map(|l| format!(" near {}", l))
        .unwrap_or_default();

    if places.is_empty() {
        return format!(
            "🔍 No results found for '{}'{}. Try a different search term or location.",
            query, location_text
        );
    }

    let display_count = places.len().min(config.max_results_display);
    let mut out = format!(
        "📍 Found {} places for '{}'{}:\n",
        places.len(),
        query,
        location_text
    );

    for (i, place) in places.iter().take(display_count).enumerate() {
        let mut rating_text = String::new();
        if let Some(rating) = place.rating {
            rating_text = format!(" {} {}/5", stars(rating), rating);
            if let Some(total) = place.user_ratings_total {
                rating_text.push_str(&format!(" ({} reviews)", total));
            }
        }

        out.push_str(&format!("\n{}. {}{}\n", i + 1, place.name, rating_text));
        out.push_str(&format!("   📍 {}\n", place.address));
        out.push_str(&format!(
            "   🗺️ Coordinates: {:.6}, {:.6}\n",
            place.location.lat, place.location.lng
        ));
        if config.include_map_links {
            out.push_str(&format!("   🔗 [View on Google Maps]({})\n", place.maps_url));
        }
        if !place.types.is_empty() {
            let shown: Vec<&str> = place.types.iter().take(3).map(String::as_str).collect();
            out.push_str(&format!("   🏷️ Types: {}\n", shown.join(", ")));
        }
    }

    if places.len() > display_count {
        out.push_str(&format!(
            "\n({} more results available)\n",
            places.len() - display_count
        ));
    }

    out
}

pub fn format_details(details: &PlaceDetails, config: &Config) -> String {
    let place = &details.place;
    let mut out = format!("📍 {}\n\nAddress: {}\n", place.name, place.address);

    if let Some(rating) = place.rating {
        out.push_str(&format!("Rating: {} {}/5", stars(rating), rating));
        if let Some(total) = place.user_ratings_total {
            out.push_str(&format!(" ({} reviews)", total));
        }
        out.push('\n');
    }
    if let Some(price) = details.price_level {
        out.push_str(&format!("Price level: {}\n", price.display()));
    }
    if let Some(phone) = &details.phone {
        out.push_str(&format!("Phone: {}\n", phone));
    }
    if let Some(website) = &details.website {
        out.push_str(&format!("Website: {}\n", website));
    }
    if let Some(hours) = &details.opening_hours {
        if let Some(open_now) = hours.open_now {
            out.push_str(if open_now {
                "Status: 🟢 Open now\n"
            } else {
                "Status: 🔴 Closed now\n"
            });
        }
        if !hours.weekday_text.is_empty() {
            out.push_str("Hours:\n");
            for day in &hours.weekday_text {
                out.push_str(&format!("  {}\n", day));
            }
        }
    }
    out.push_str(&format!(
        "Coordinates: {:.6}, {:.6}\n",
        place.location.lat, place.location.lng
    ));
    if !place.types.is_empty() {
        let shown: Vec<&str> = place.types.iter().take(5).map(String::as_str).collect();
        out.push_str(&format!("Categories: {}\n", shown.join(", ")));
    }
    if config.include_map_links {
        out.push_str(&format!("🔗 [View on Google Maps]({})\n", place.maps_url));
    }

    out
}

/// Renders a route with at most `MAX_STEPS_DISPLAY` steps, first steps
/// first in upstream order.
pub fn format_directions(
    origin: &str,
    destination: &str,
    mode: TravelMode,
    route: &RouteResult,
    config: &Config,
) -> String {
    let mode_emoji = match mode {
        TravelMode::Driving => "🚗",
        TravelMode::Walking => "🚶",
        TravelMode::Bicycling => "🚴",
        TravelMode::Transit => "🚇",
    };

    let mut out = format!(
        "{} Directions: {} → {}\nMode: {}\n\nRoute summary:\n  📏 Distance: {}\n  ⏱️ Duration: {}\n  🏁 Start: {}\n  🎯 End: {}\n",
        mode_emoji,
        origin,
        destination,
        mode.as_param(),
        route.distance_text,
        route.duration_text,
        route.start_address,
        route.end_address,
    );

    out.push_str(&format!(
        "\nTurn-by-turn directions ({} steps):\n",
        route.steps.len()
    ));
    for (i, step) in route.steps.iter().take(MAX_STEPS_DISPLAY).enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step.instruction));
        out.push_str(&format!("   📏 {} • ⏱️ {}\n", step.distance, step.duration));
    }
    if route.steps.len() > MAX_STEPS_DISPLAY {
        out.push_str(&format!(
            "({} more steps...)\n",
            route.steps.len() - MAX_STEPS_DISPLAY
        ));
    }

    if config.include_map_links {
        out.push_str(&format!(
            "🗺️ [View full route on Google Maps]({})\n",
            route.maps_url
        ));
    }

    out
}

pub fn format_geocode(address: &str, results: &[GeocodeResult], config: &Config) -> String {
    if results.is_empty() {
        return format!("🔍 No results found for: {}", address);
    }

    let mut out = format!("📍 Geocoding results for '{}':\n", address);
    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, result.formatted_address));
        out.push_str(&format!("   🌐 Latitude: {:.6}\n", result.location.lat));
        out.push_str(&format!("   🌐 Longitude: {:.6}\n", result.location.lng));
        out.push_str(&format!("   🎯 Precision: {}\n", result.location_type.display()));
        if config.include_map_links {
            out.push_str(&format!("   🔗 [View on Map]({})\n", result.maps_url));
        }
    }

    out
}
