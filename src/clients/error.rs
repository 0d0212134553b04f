use thiserror::Error;

use crate::intake::ImageError;

/// Failures at the remote collaborator boundary.
///
/// These never reach the user directly: the resolver and scanner log them
/// and degrade to "not found" / "classification unavailable".
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no API key configured for the vision classifier")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not parse service response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not prepare image: {0}")]
    Image(#[from] ImageError),
}
