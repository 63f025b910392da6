//! HTTP request and response types exchanged with a [`Transport`](crate::Transport).
//!
//! # Design
//! Requests are plain data: the pipeline builds a fully resolved
//! `HttpRequest` and hands it to whichever transport the client was configured
//! with. Responses carry their body as a fallible stream so a broken body can
//! be told apart from a failed connection.

use std::fmt;

use bytes::Bytes;
use futures_util::stream::{self, BoxStream, StreamExt};
use futures_util::Stream;
use ::http::Method;
use url::Url;

use crate::error::BoxError;

/// Header used by the Riot API to authenticate requests.
pub const API_TOKEN_HEADER: &str = "X-Riot-Token";

pub const CONTENT_TYPE_JSON: (&str, &str) = ("content-type", "application/json");

/// An HTTP request described as plain data.
///
/// Produced by [`build_request`](crate::request::build_request). The transport
/// is responsible for putting it on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first header matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Value of the first query parameter matching `key`.
    pub fn query(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// An HTTP response as returned by a transport.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    /// Reason phrase of the status line, e.g. `Not Found`.
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Builds a response with the canonical reason phrase for `status`.
    pub fn new(status: u16, body: impl Into<ResponseBody>) -> Self {
        let reason = ::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();
        Self {
            status,
            reason,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Streaming response body. Reading it may fail independently of the
/// connection that produced the response.
pub struct ResponseBody {
    chunks: BoxStream<'static, Result<Bytes, BoxError>>,
}

impl ResponseBody {
    pub fn empty() -> Self {
        Self {
            chunks: stream::empty().boxed(),
        }
    }

    pub fn from_stream<S>(chunks: S) -> Self
    where
        S: Stream<Item = Result<Bytes, BoxError>> + Send + 'static,
    {
        Self {
            chunks: chunks.boxed(),
        }
    }

    /// A body whose first read fails with `err`.
    pub fn failing<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        let err: BoxError = err.into();
        Self::from_stream(stream::once(async move { Err(err) }))
    }

    /// Reads every chunk into one buffer.
    pub async fn read_all(mut self) -> Result<Vec<u8>, BoxError> {
        let mut buf = Vec::new();
        while let Some(chunk) = self.chunks.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf)
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseBody").finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for ResponseBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from(Bytes::from(bytes))
    }
}

impl From<Bytes> for ResponseBody {
    fn from(bytes: Bytes) -> Self {
        Self::from_stream(stream::iter([Ok(bytes)]))
    }
}

impl From<String> for ResponseBody {
    fn from(body: String) -> Self {
        Self::from(Bytes::from(body))
    }
}

impl From<&'static str> for ResponseBody {
    fn from(body: &'static str) -> Self {
        Self::from(Bytes::from_static(body.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn body_concatenates_chunks() {
        let body = ResponseBody::from_stream(stream::iter([
            Ok(Bytes::from_static(b"{\"name\":")),
            Ok(Bytes::from_static(b"\"ok\"}")),
        ]));
        let bytes = body.read_all().await.unwrap();
        assert_eq!(bytes, br#"{"name":"ok"}"#);
    }

    #[tokio::test]
    async fn failing_body_surfaces_error() {
        let err = ResponseBody::failing("forced read error")
            .read_all()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "forced read error");
    }

    #[tokio::test]
    async fn empty_body_reads_nothing() {
        assert!(ResponseBody::empty().read_all().await.unwrap().is_empty());
    }

    #[test]
    fn response_uses_canonical_reason() {
        let response = HttpResponse::new(404, "");
        assert_eq!(response.reason, "Not Found");
        let response = HttpResponse::new(599, "");
        assert_eq!(response.reason, "");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = HttpRequest {
            method: Method::GET,
            url: Url::parse("https://na1.api.riotgames.com/x?count=3").unwrap(),
            headers: vec![(API_TOKEN_HEADER.to_string(), "key".to_string())],
            body: None,
        };
        assert_eq!(request.header("x-riot-token"), Some("key"));
        assert_eq!(request.query("count").as_deref(), Some("3"));
        assert_eq!(request.query("missing"), None);
    }
}
