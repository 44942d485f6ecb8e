use thiserror::Error;

/// Failures talking to a chat completion endpoint.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Failed to connect to API endpoint: {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("API request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Stream error")]
    Stream(#[source] reqwest::Error),
    #[error("Invalid response from API endpoint")]
    Decode(#[from] serde_json::Error),
    #[error("API response contained no choices")]
    EmptyResponse,
}
