use thiserror::Error;

/// Errors surfaced by the request executor and every accessor built on it.
///
/// Upstream-reported failures (unknown city, bad key) are *not* errors here:
/// they arrive as a decoded record whose `cod` is not a success code.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection could not be established, timed out, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body is not valid JSON or does not match the target record.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL cannot be parsed.
    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
