use serde::de::DeserializeOwned;

use crate::error::{translate_transport, GatewayError};

pub mod directions;
pub mod geocoding;
pub mod place_details;
pub mod places_search;

/// Issues the single upstream GET call for one adapter invocation and
/// decodes the JSON envelope. The shared client carries the configured
/// timeout, so a slow upstream surfaces as `Timeout` rather than hanging.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    params: &[(&str, String)],
) -> Result<T, GatewayError> {
    let response = http
        .get(url)
        .query(params)
        .send()
        .await
        .map_err(translate_transport)?;

    response.json::<T>().await.map_err(|err| {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport("upstream response body could not be decoded".to_string())
        }
    })
}

/// Strips markup tags from upstream instruction text.
pub(crate) fn strip_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_stripped_from_instructions() {
        assert_eq!(
            strip_html("Turn <b>left</b> onto <div style=\"x\">Main St</div>"),
            "Turn left onto Main St"
        );
        assert_eq!(strip_html("no tags"), "no tags");
    }
}
