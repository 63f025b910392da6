//! Request options and their composition into a [`RequestConfig`].
//!
//! # Design
//! Each option is a small tagged mutation. A list of options is folded left
//! to right over the defaults, so later options win for scalar fields.
//! `Param` merges one key into the existing parameters while `Params`
//! replaces the whole mapping.
//!
//! Endpoint wrappers put their own defaults (the diagnostic tag, endpoint
//! specific parameters) first and append what the caller passed through
//! [`merge_options`]. Callers only get [`PublicOption`], which cannot change
//! the HTTP method or body of an endpoint.

use std::collections::HashMap;

use serde::Serialize;

/// A JSON payload serialized when the option is created.
///
/// Serialization failures are kept and reported when the request is built,
/// before anything is sent.
#[derive(Debug)]
pub struct JsonBody(Result<String, serde_json::Error>);

impl JsonBody {
    pub fn new<B>(body: &B) -> Self
    where
        B: Serialize + ?Sized,
    {
        Self(serde_json::to_string(body))
    }

    pub(crate) fn encoded(&self) -> Result<&str, &serde_json::Error> {
        self.0.as_deref()
    }
}

/// A single mutation of a [`RequestConfig`].
#[derive(Debug)]
pub enum RequestOption {
    /// HTTP method token. Validated when the request is built.
    HttpMethod(String),
    Body(JsonBody),
    /// Replaces every query parameter set so far.
    Params(HashMap<String, String>),
    /// Sets one query parameter, keeping the others.
    Param(String, String),
    /// Credential sent in the `X-Riot-Token` header.
    ApiKey(String),
    /// Diagnostic tag identifying the endpoint in logs.
    ApiMethod(String),
}

impl RequestOption {
    pub fn http_method(method: impl Into<String>) -> Self {
        RequestOption::HttpMethod(method.into())
    }

    pub fn body<B>(body: &B) -> Self
    where
        B: Serialize + ?Sized,
    {
        RequestOption::Body(JsonBody::new(body))
    }

    pub fn params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        RequestOption::Params(
            params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn param(key: impl Into<String>, value: impl ToString) -> Self {
        RequestOption::Param(key.into(), value.to_string())
    }

    pub fn api_key(key: impl Into<String>) -> Self {
        RequestOption::ApiKey(key.into())
    }

    pub fn api_method(method: impl Into<String>) -> Self {
        RequestOption::ApiMethod(method.into())
    }
}

/// Resolved configuration for one request.
#[derive(Debug)]
pub struct RequestConfig {
    pub http_method: String,
    pub body: Option<JsonBody>,
    pub params: HashMap<String, String>,
    pub api_key: Option<String>,
    pub api_method: Option<String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            http_method: "GET".to_string(),
            body: None,
            params: HashMap::new(),
            api_key: None,
            api_method: None,
        }
    }
}

impl RequestConfig {
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = RequestOption>,
    {
        options
            .into_iter()
            .fold(Self::default(), |mut config, option| {
                config.apply(option);
                config
            })
    }

    pub fn apply(&mut self, option: RequestOption) {
        match option {
            RequestOption::HttpMethod(method) => self.http_method = method,
            RequestOption::Body(body) => self.body = Some(body),
            RequestOption::Params(params) => self.params = params,
            RequestOption::Param(key, value) => {
                self.params.insert(key, value);
            }
            RequestOption::ApiKey(key) => self.api_key = Some(key),
            RequestOption::ApiMethod(method) => self.api_method = Some(method),
        }
    }
}

/// The subset of options callers may pass to an endpoint wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicOption(PublicKind);

#[derive(Debug, Clone, PartialEq, Eq)]
enum PublicKind {
    ApiMethod(String),
}

impl PublicOption {
    /// Overrides the endpoint's diagnostic tag, e.g. to group calls in logs.
    pub fn api_method(method: impl Into<String>) -> Self {
        PublicOption(PublicKind::ApiMethod(method.into()))
    }

    fn into_request_option(self) -> RequestOption {
        match self.0 {
            PublicKind::ApiMethod(method) => RequestOption::ApiMethod(method),
        }
    }
}

/// Appends the caller's options after the endpoint defaults, so they win.
pub fn merge_options(
    mut defaults: Vec<RequestOption>,
    public: &[PublicOption],
) -> Vec<RequestOption> {
    defaults.extend(public.iter().cloned().map(PublicOption::into_request_option));
    defaults
}
