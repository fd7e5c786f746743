use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JumpCloudError {
    #[error("failed to build HTTP client: {0}")]
    Http(#[source] reqwest::Error),
    #[error("failed to format start time as RFC 3339: {0}")]
    StartTime(#[from] time::error::Format),
    #[error("events request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("failed to read events response body: {0}")]
    ReadBody(#[source] reqwest::Error),
    #[error("JumpCloud returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("events response is not a JSON array: {0}")]
    ResponseShape(#[source] serde_json::Error),
    #[error("malformed `{service}` event: {source}")]
    EventShape {
        service: &'static str,
        source: serde_json::Error,
    },
}
