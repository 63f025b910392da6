//! The authenticated request pipeline shared by every endpoint wrapper.
//!
//! # Design
//! `Client` holds immutable configuration only: the route prefix (region or
//! platform), the API key, a logger and the transport. It is cheap to clone
//! and safe to use from many tasks at once, as long as the transport is.
//!
//! Each call issues exactly one HTTP request: options are folded into a
//! [`RequestConfig`], the request is built, executed under the caller's
//! [`Context`], classified and decoded. One log event is emitted per call on
//! the client's own dispatcher, which discards everything unless a logger was
//! configured.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::Dispatch;

use crate::context::Context;
use crate::error::Error;
use crate::http::HttpRequest;
use crate::options::{RequestConfig, RequestOption};
use crate::request::{build_request, RawResponse};
use crate::transport::{ReqwestTransport, Transport};

/// Environment variable read by [`ClientConfig::from_env`].
pub const API_KEY_ENV: &str = "RIOT_API_KEY";

/// Settings shared by every client created from them.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    transport: Arc<dyn Transport>,
    logger: Dispatch,
    base_url: Option<String>,
}

impl ClientConfig {
    /// Uses the default reqwest transport and discards logs.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            transport: Arc::new(ReqwestTransport::default()),
            logger: Dispatch::none(),
            base_url: None,
        }
    }

    /// Reads the API key from `RIOT_API_KEY`.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        std::env::var(API_KEY_ENV).map(Self::new)
    }

    /// Replaces the HTTP transport.
    pub fn with_transport<T>(mut self, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        self.transport = Arc::new(transport);
        self
    }

    /// Sends one event per request to `logger`.
    pub fn with_logger(mut self, logger: Dispatch) -> Self {
        self.logger = logger;
        self
    }

    /// Sends requests to `base_url` instead of `https://{route}.api.riotgames.com`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    /// A client bound to one region or platform route.
    pub fn client(&self, route: impl fmt::Display) -> Client {
        Client {
            inner: Arc::new(Inner {
                route: route.to_string(),
                config: self.clone(),
            }),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    route: String,
    config: ClientConfig,
}

impl Client {
    pub fn route(&self) -> &str {
        &self.inner.route
    }

    /// Full URL for an endpoint path such as `/lol/platform/v3/champion-rotations`.
    pub fn url(&self, endpoint: &str) -> String {
        match &self.inner.config.base_url {
            Some(base) => format!("{base}{endpoint}"),
            None => format!("https://{}.api.riotgames.com{endpoint}", self.inner.route),
        }
    }

    /// Sends an authenticated request and decodes a `200 OK` JSON body into `T`.
    pub async fn request<T>(
        &self,
        ctx: &Context,
        uri: &str,
        options: Vec<RequestOption>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let config = self.resolve(options);
        let (url, raw) = self.round_trip(ctx, uri, &config).await;
        let result = raw.and_then(RawResponse::into_json);
        self.trace(&config, &url, result.as_ref().err());
        result
    }

    /// Sends an authenticated request that succeeds on any 2xx, ignoring the body.
    pub async fn execute(
        &self,
        ctx: &Context,
        uri: &str,
        options: Vec<RequestOption>,
    ) -> Result<(), Error> {
        let config = self.resolve(options);
        let (url, raw) = self.round_trip(ctx, uri, &config).await;
        let result = raw.and_then(RawResponse::into_unit);
        self.trace(&config, &url, result.as_ref().err());
        result
    }

    fn resolve(&self, options: Vec<RequestOption>) -> RequestConfig {
        let api_key = RequestOption::api_key(self.inner.config.api_key.clone());
        RequestConfig::from_options(std::iter::once(api_key).chain(options))
    }

    /// Builds, sends and reads one request. Returns the final URL alongside
    /// the outcome so it can be logged either way.
    async fn round_trip(
        &self,
        ctx: &Context,
        uri: &str,
        config: &RequestConfig,
    ) -> (String, Result<RawResponse, Error>) {
        let request = match build_request(uri, config) {
            Ok(request) => request,
            Err(err) => return (uri.to_string(), Err(err)),
        };
        let url = request.url.to_string();
        (url, self.send(ctx, request).await)
    }

    async fn send(&self, ctx: &Context, request: HttpRequest) -> Result<RawResponse, Error> {
        let transport = &self.inner.config.transport;
        let response = ctx
            .run(transport.execute(request))
            .await
            .and_then(|sent| sent)
            .map_err(Error::Transport)?;
        let body = ctx
            .run(response.body.read_all())
            .await
            .map_err(Error::Transport)?
            .map_err(Error::BodyRead)?;
        Ok(RawResponse {
            status: response.status,
            reason: response.reason,
            body,
        })
    }

    fn trace(&self, config: &RequestConfig, url: &str, error: Option<&Error>) {
        let api_method = config.api_method.as_deref().unwrap_or_default();
        let http_method = config.http_method.as_str();
        let route = self.inner.route.as_str();
        tracing::dispatcher::with_default(&self.inner.config.logger, || match error {
            None => tracing::info!(api_method, http_method, url, route, "riot api request"),
            Some(err) => tracing::warn!(
                api_method,
                http_method,
                url,
                route,
                error_kind = %err.kind(),
                error = %err,
                "riot api request failed"
            ),
        });
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("route", &self.inner.route)
            .field("config", &self.inner.config)
            .finish()
    }
}
