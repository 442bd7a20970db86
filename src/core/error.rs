use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum PulseError {
    /// An endpoint URL could not be constructed. This is a configuration bug, raised
    /// before any network call is made.
    #[error("Invalid request URL: {0}")]
    InvalidRequest(#[from] url::ParseError),

    /// The API key needed for an endpoint was not configured.
    #[error("Missing API key for {0}")]
    MissingApiKey(&'static str),

    /// The request failed at the transport level (DNS, connect, timeout, body read).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned an unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with API keys redacted.
        url: String,
    },

    /// The call succeeded but the body (or the payload object inside it) was empty.
    #[error("Empty response from {url}")]
    EmptyResponse {
        /// The URL that returned the empty body, with API keys redacted.
        url: String,
    },

    /// The body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was JSON but did not match the expected structure.
    #[error("Data format unexpected or missing field: {0}")]
    Decode(String),

    /// The upstream API answered with an error message of its own (rate limit notes,
    /// invalid keys, unknown functions).
    #[error("API error: {0}")]
    Api(String),

    /// Reading or writing the local key-value store failed.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl PulseError {
    /// Whether retrying the same request later could plausibly succeed.
    ///
    /// Transport failures and 408/429/5xx statuses are transient. Schema mismatches,
    /// bad URLs and upstream error messages are not.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => matches!(*status, 408 | 429 | 500..=599),
            _ => false,
        }
    }

    /// Whether the failure happened while decoding an otherwise successful response.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Json(_) | Self::Decode(_))
    }
}
