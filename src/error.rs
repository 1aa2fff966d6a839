use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Closed error vocabulary for the gateway. Every upstream status and
/// transport failure maps to exactly one of these; the raw upstream
/// status strings never reach callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("invalid value for field '{field}': {message}")]
    Validation { field: &'static str, message: String },

    #[error("unsupported travel mode '{0}', expected driving, walking, bicycling or transit")]
    UnsupportedMode(String),

    #[error("the upstream provider returned no matches")]
    ZeroResults,

    #[error("upstream request quota exhausted, try again later")]
    QuotaExceeded,

    #[error("the upstream provider denied the request")]
    RequestDenied,

    #[error("the upstream request timed out")]
    Timeout,

    #[error("network error reaching the upstream provider: {0}")]
    Transport(String),

    #[error("the upstream provider failed with an unrecognized status")]
    UnknownUpstream,

    #[error("no credential configured for scope '{0}'")]
    MissingCredential(&'static str),
}

impl GatewayError {
    pub fn missing_field(field: &'static str) -> Self {
        GatewayError::Validation {
            field,
            message: "must not be empty".to_string(),
        }
    }

    /// Stable kind tag included in every error response body.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation { .. } => "validation_error",
            GatewayError::UnsupportedMode(_) => "unsupported_mode",
            GatewayError::ZeroResults => "zero_results",
            GatewayError::QuotaExceeded => "quota_exceeded",
            GatewayError::RequestDenied => "request_denied",
            GatewayError::Timeout => "timeout",
            GatewayError::Transport(_) => "transport_error",
            GatewayError::UnknownUpstream => "unknown_upstream_error",
            GatewayError::MissingCredential(_) => "missing_credential",
        }
    }
}

/// Translates a non-OK upstream status string into the internal taxonomy.
/// Total over all inputs: unrecognized codes fall back to `UnknownUpstream`.
pub fn translate_status(status: &str) -> GatewayError {
    match status {
        "ZERO_RESULTS" | "NOT_FOUND" => GatewayError::ZeroResults,
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => GatewayError::QuotaExceeded,
        "REQUEST_DENIED" => GatewayError::RequestDenied,
        "INVALID_REQUEST" | "MAX_WAYPOINTS_EXCEEDED" => GatewayError::Validation {
            field: "request",
            message: "the upstream provider rejected the request parameters".to_string(),
        },
        _ => GatewayError::UnknownUpstream,
    }
}

/// Translates a transport-level failure from the HTTP client.
pub fn translate_transport(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self {
            GatewayError::Validation { .. } | GatewayError::UnsupportedMode(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::ZeroResults => StatusCode::NOT_FOUND,
            GatewayError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::RequestDenied
            | GatewayError::Transport(_)
            | GatewayError::UnknownUpstream => StatusCode::BAD_GATEWAY,
            GatewayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            GatewayError::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            json!({ "error": self.kind(), "message": self.to_string() }).to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_internal_kinds() {
        assert_eq!(translate_status("ZERO_RESULTS"), GatewayError::ZeroResults);
        assert_eq!(translate_status("NOT_FOUND"), GatewayError::ZeroResults);
        assert_eq!(translate_status("OVER_QUERY_LIMIT"), GatewayError::QuotaExceeded);
        assert_eq!(translate_status("OVER_DAILY_LIMIT"), GatewayError::QuotaExceeded);
        assert_eq!(translate_status("REQUEST_DENIED"), GatewayError::RequestDenied);
        assert!(matches!(
            translate_status("INVALID_REQUEST"),
            GatewayError::Validation { .. }
        ));
    }

    #[test]
    fn unrecognized_statuses_never_leak_upstream_vocabulary() {
        for status in ["UNKNOWN_ERROR", "SOMETHING_NEW", "", "ok"] {
            let err = translate_status(status);
            assert_eq!(err, GatewayError::UnknownUpstream);
            assert!(!err.to_string().contains(status) || status.is_empty());
        }
    }

    #[test]
    fn zero_results_is_distinguishable_from_transport_failures() {
        assert_ne!(
            translate_status("ZERO_RESULTS").kind(),
            GatewayError::Timeout.kind()
        );
        assert_ne!(
            translate_status("ZERO_RESULTS").kind(),
            GatewayError::Transport("connection refused".to_string()).kind()
        );
    }
}
