use std::fmt;
use thiserror::Error;

/// The error type for signing and client operations.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (missing fields, empty credentials)
    ConfigInvalid,

    /// Credentials exist but cannot be used for this call
    CredentialInvalid,

    /// Request cannot be signed or sent (malformed URL, bad arguments)
    RequestInvalid,

    /// The API answered with an error payload or a non-success status
    Api,

    /// Unexpected errors (network, I/O, decoding, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message without the kind prefix
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub fn credential_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialInvalid, message)
    }

    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::CredentialInvalid => write!(f, "invalid credentials"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Api => write!(f, "api error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected("failed to decode json response").with_source(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::request_invalid(format!("malformed url: {err}")).with_source(err)
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::unexpected(format!("http transport failed: {err}")).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_kind() {
        let err = Error::config_invalid("consumer key is empty");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.message(), "consumer key is empty");
        assert_eq!(
            err.to_string(),
            "invalid configuration: consumer key is empty"
        );
    }

    #[test]
    fn test_url_error_is_request_invalid() {
        let err: Error = url::Url::parse("no-scheme").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(std::error::Error::source(&err).is_some());
    }
}
