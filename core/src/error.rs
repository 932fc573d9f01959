//! Error types for the OneSignal client.
//!
//! # Design
//! Only received HTTP responses get domain meaning (`Http`). Transport and
//! JSON failures are carried through untouched so callers can inspect the
//! underlying crate's error. `HttpError` is boxed to keep `Result` small.

use thiserror::Error;

use crate::response::HttpError;

/// Errors returned by request building, dispatch and classification.
#[derive(Debug, Error)]
pub enum Error {
    /// A credential or path value the operation needs was not provided.
    #[error("{0} must be defined")]
    MissingParameter(String),

    /// A notification field outside the allow-list was set without the `!` escape.
    #[error("`{0}` is not an allowed notification field")]
    InvalidField(String),

    /// The service answered with a status code of 300 or above.
    #[error(transparent)]
    Http(Box<HttpError>),

    /// The blocking transport failed before a response was received.
    #[error(transparent)]
    Ureq(#[from] ureq::Error),

    /// The async transport failed before a response was received.
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// A body could not be encoded, or a success body was not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The classified HTTP failure, if this is one.
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            Error::Http(err) => Some(err),
            _ => None,
        }
    }

    /// Status code of a classified HTTP failure.
    pub fn status_code(&self) -> Option<u16> {
        self.as_http().map(|err| err.status_code)
    }
}

impl From<HttpError> for Error {
    fn from(err: HttpError) -> Self {
        Error::Http(Box::new(err))
    }
}
