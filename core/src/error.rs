//! Error types for the Riot API client.
//!
//! # Design
//! Every pipeline invocation ends in exactly one of these variants. The first
//! three are raised while building the request, so nothing reaches the
//! network. The rest describe what happened after the transport was invoked.
//! `RemoteApi` keeps the status line and the trimmed raw body because the
//! Riot error payload is not guaranteed to be well-formed JSON.

use std::fmt;

/// Boxed error used at the transport seam, where the concrete error type
/// belongs to whichever HTTP stack is plugged in.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by every request made through a [`Client`](crate::Client).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[source] url::ParseError),

    /// The configured HTTP method is not a legal method token.
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] ::http::method::InvalidMethod),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The transport failed, or the caller's context was cancelled or timed out.
    #[error("transport failed: {0}")]
    Transport(#[source] TransportError),

    /// The response arrived but its body could not be read.
    #[error("reading response body failed: {0}")]
    BodyRead(#[source] BoxError),

    /// The server answered with a status the caller does not accept as success.
    #[error("{}", remote_api_message(.status_code, .status, .body))]
    RemoteApi {
        status_code: u16,
        status: String,
        body: String,
    },

    /// The server reported success but the body did not match the expected shape.
    #[error("decoding response body failed: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Coarse classification of an [`Error`], used for logging and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidUrl,
    InvalidRequest,
    Serialization,
    Transport,
    BodyRead,
    RemoteApi,
    Decode,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::Serialization(_) => ErrorKind::Serialization,
            Error::Transport(_) => ErrorKind::Transport,
            Error::BodyRead(_) => ErrorKind::BodyRead,
            Error::RemoteApi { .. } => ErrorKind::RemoteApi,
            Error::Decode(_) => ErrorKind::Decode,
        }
    }

    /// HTTP status code reported by the server, if the request got that far.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::RemoteApi { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// True when the caller's context ended the request.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Transport(TransportError::Cancelled | TransportError::DeadlineExceeded)
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidUrl => "invalid_url",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Transport => "transport",
            ErrorKind::BodyRead => "body_read",
            ErrorKind::RemoteApi => "remote_api",
            ErrorKind::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// Failures raised by a [`Transport`](crate::Transport) or by the caller's
/// [`Context`](crate::Context) while a request is in flight.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("connection failed: {0}")]
    Connection(#[source] BoxError),
}

impl TransportError {
    pub fn connection<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        TransportError::Connection(err.into())
    }
}

fn remote_api_message(status_code: &u16, status: &str, body: &str) -> String {
    let mut message = if status.is_empty() {
        format!("riot api error: {status_code}")
    } else {
        format!("riot api error: {status_code} {status}")
    };
    if !body.is_empty() {
        message.push_str(&format!(" (body: {body})"));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_includes_body_when_present() {
        let err = Error::RemoteApi {
            status_code: 400,
            status: "Bad Request".to_string(),
            body: "payload".to_string(),
        };
        let message = err.to_string();
        assert_eq!(message, "riot api error: 400 Bad Request (body: payload)");
    }

    #[test]
    fn remote_error_omits_empty_body() {
        let err = Error::RemoteApi {
            status_code: 500,
            status: "Internal Server Error".to_string(),
            body: String::new(),
        };
        assert!(!err.to_string().contains("body:"));
    }

    #[test]
    fn remote_error_reports_status_code() {
        let err = Error::RemoteApi {
            status_code: 404,
            status: String::new(),
            body: String::new(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.kind(), ErrorKind::RemoteApi);
        assert_eq!(err.to_string(), "riot api error: 404");
    }

    #[test]
    fn cancellation_is_a_transport_failure() {
        let err = Error::Transport(TransportError::Cancelled);
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.is_cancelled());

        let err = Error::Transport(TransportError::connection("connection refused"));
        assert!(!err.is_cancelled());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn kind_displays_as_snake_case() {
        assert_eq!(ErrorKind::BodyRead.to_string(), "body_read");
        assert_eq!(ErrorKind::RemoteApi.to_string(), "remote_api");
    }
}
