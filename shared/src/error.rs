//! Error types for the station lookup service.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a station lookup.
///
/// Malformed model output is deliberately absent here: it is reported as a
/// [`crate::parser::ParseFailure`] and absorbed into the response.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing credential, bad setting)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend call failed
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status, when the backend answered at all
        status: Option<u16>,
        /// Failure description
        message: String,
    },

    /// Caller sent an unusable request
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }
}
