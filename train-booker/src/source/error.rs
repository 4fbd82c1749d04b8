//! Offer source error types.

/// Errors from fetching offers.
///
/// The search service never lets these escape to its callers; they are
/// reported alongside an empty result instead.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Invalid API key or unauthorized
    #[error("unauthorized (check TRANSIT_API_KEY)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by routing API")]
    RateLimited,

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}

/// Errors from building an offer source at start-up.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// HTTP client could not be built
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Recorded fixture could not be loaded
    #[error("fixture error: {0}")]
    Fixture(String),

    /// Fixture source selected without a path
    #[error("fixture source needs a fixture path")]
    MissingFixturePath,
}

impl SourceError {
    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Status { status, .. } => Some(*status),
            SourceError::Unauthorized => Some(401),
            SourceError::RateLimited => Some(429),
            SourceError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SourceError::Status {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
        assert_eq!(err.status(), Some(500));

        let err = SourceError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected value"));
        assert_eq!(err.status(), None);

        assert_eq!(SourceError::RateLimited.status(), Some(429));
    }

    #[test]
    fn setup_error_display() {
        assert_eq!(
            SetupError::MissingFixturePath.to_string(),
            "fixture source needs a fixture path"
        );
        assert_eq!(
            SetupError::Fixture("routes.json has no routes array".into()).to_string(),
            "fixture error: routes.json has no routes array"
        );
    }
}
