use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`ApiClient`](super::ApiClient) operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (DNS failure, refused connection, timeout).
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// The HTTP client itself could not be built.
    #[error("failed to set up HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    ///
    /// Displays the response body, or `HTTP error! status: <code>` when the
    /// body is empty.
    #[error("{}", http_text(.status, .body))]
    Http { status: StatusCode, body: String },

    #[error("invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A 2xx body did not match the expected record.
    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

fn http_text(status: &StatusCode, body: &str) -> String {
    if body.trim().is_empty() {
        format!("HTTP error! status: {}", status.as_u16())
    } else {
        body.to_string()
    }
}

impl ApiError {
    pub(crate) const fn http(status: StatusCode, body: String) -> Self {
        Self::Http { status, body }
    }

    /// The server's own rejection text, when it sent a non-blank body.
    pub fn server_text(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } if !body.trim().is_empty() => Some(body),
            _ => None,
        }
    }

    /// Returns `true` for transport-level failures.
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status for server rejections.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_uses_body_text() {
        let err = ApiError::http(StatusCode::FORBIDDEN, "forbidden".to_string());
        assert_eq!(err.to_string(), "forbidden");
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert!(!err.is_connection());
    }

    #[test]
    fn test_http_empty_body_falls_back_to_status() {
        let err = ApiError::http(StatusCode::INTERNAL_SERVER_ERROR, "  ".to_string());
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert!(err.server_text().is_none());
    }

    #[test]
    fn test_server_text_only_for_http_bodies() {
        let err = ApiError::http(StatusCode::CONFLICT, "Username already taken".to_string());
        assert_eq!(err.server_text(), Some("Username already taken"));

        let err = ApiError::InvalidUrl {
            url: "x".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(err.server_text().is_none());
    }

    #[test]
    fn test_client_setup_is_not_a_connection_error() {
        let cause = reqwest::Client::new().get("not a url").build().unwrap_err();
        let err = ApiError::ClientSetup(cause);

        assert!(!err.is_connection());
        assert!(err.to_string().starts_with("failed to set up HTTP client"));
    }

    #[test]
    fn test_malformed_message() {
        let err = ApiError::MalformedResponse {
            endpoint: "/auth/login".to_string(),
            reason: "missing field `token`".to_string(),
        };
        assert!(err.to_string().contains("/auth/login"));
        assert!(err.status().is_none());
    }
}
