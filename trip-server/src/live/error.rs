//! Live pricing error types.

use std::fmt;

/// Errors from the live price HTTP client.
#[derive(Debug)]
pub enum LiveQuoteError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code or an unsuccessful payload
    Api { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Missing or rejected API token
    Unauthorized,

    /// No API token configured
    NotConfigured,
}

impl fmt::Display for LiveQuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiveQuoteError::Http(e) => write!(f, "HTTP error: {e}"),
            LiveQuoteError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            LiveQuoteError::Api { status, message } => write!(f, "API error {status}: {message}"),
            LiveQuoteError::RateLimited => write!(f, "rate limited by price API"),
            LiveQuoteError::Unauthorized => write!(f, "unauthorized (invalid API token)"),
            LiveQuoteError::NotConfigured => write!(f, "no API token configured"),
        }
    }
}

impl std::error::Error for LiveQuoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LiveQuoteError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LiveQuoteError {
    fn from(err: reqwest::Error) -> Self {
        LiveQuoteError::Http(err)
    }
}
