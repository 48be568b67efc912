//! Transfer client error types.

/// Errors produced by the portal transfer client.
///
/// Transport-library errors never escape as-is: they are rendered into
/// [`Error::Network`] so callers only match on this enum.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("remote request failed with status {status}")]
    RemoteRequestFailed { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid upload slot URL: {0}")]
    InvalidSlot(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("failed to save file: {0}")]
    Save(#[from] std::io::Error),

    #[error("API key is not a valid header value")]
    InvalidCredential,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::RemoteRequestFailed {
                status: status.as_u16(),
            },
            None => Error::Network(err.to_string()),
        }
    }
}

impl Error {
    /// Returns the HTTP status carried by a remote failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteRequestFailed { status } => Some(*status),
            _ => None,
        }
    }
}
