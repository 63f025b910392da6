//! Request construction and response classification.
//!
//! # Design
//! `build_request` turns a resolved [`RequestConfig`] into an
//! [`HttpRequest`] without any I/O; every failure here happens before the
//! transport is touched. `RawResponse` holds a fully read response and
//! decides whether it counts as success.
//!
//! Success policy: the decoding path accepts only `200 OK`. Endpoints that
//! answer without a payload go through [`RawResponse::into_unit`], which
//! accepts any 2xx.

use ::http::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Error;
use crate::http::{HttpRequest, API_TOKEN_HEADER, CONTENT_TYPE_JSON};
use crate::options::RequestConfig;

/// Builds the request for `uri` from a resolved configuration.
///
/// Steps run in a fixed order: URL, query merge, body, method, headers.
pub fn build_request(uri: &str, config: &RequestConfig) -> Result<HttpRequest, Error> {
    let mut url = Url::parse(uri).map_err(Error::InvalidUrl)?;
    merge_query(&mut url, config);

    let body = match &config.body {
        Some(body) => Some(
            body.encoded()
                .map_err(|err| Error::Serialization(clone_json_error(err)))?
                .to_string(),
        ),
        None => None,
    };

    let method =
        Method::from_bytes(config.http_method.as_bytes()).map_err(Error::InvalidRequest)?;

    let mut headers = Vec::new();
    if body.is_some() {
        let (name, value) = CONTENT_TYPE_JSON;
        headers.push((name.to_string(), value.to_string()));
    }
    if let Some(key) = &config.api_key {
        headers.push((API_TOKEN_HEADER.to_string(), key.clone()));
    }

    Ok(HttpRequest {
        method,
        url,
        headers,
        body,
    })
}

/// Adds the configured params to the URL's query. Keys already present in the
/// URL are kept unless a param replaces them.
fn merge_query(url: &mut Url, config: &RequestConfig) {
    if config.params.is_empty() {
        return;
    }
    let existing: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| !config.params.contains_key(key))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(existing)
        .extend_pairs(&config.params);
}

// serde_json errors are not Clone; rebuild one carrying the same message.
fn clone_json_error(err: &serde_json::Error) -> serde_json::Error {
    <serde_json::Error as serde::ser::Error>::custom(err.to_string())
}

/// A response whose body has been read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Decodes a `200 OK` body into `T`.
    pub fn into_json<T>(self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        if self.status != 200 {
            return Err(self.into_remote_error());
        }
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }

    /// Accepts any 2xx and discards the body.
    pub fn into_unit(self) -> Result<(), Error> {
        if !(200..300).contains(&self.status) {
            return Err(self.into_remote_error());
        }
        Ok(())
    }

    fn into_remote_error(self) -> Error {
        Error::RemoteApi {
            status_code: self.status,
            status: self.reason,
            body: String::from_utf8_lossy(&self.body).trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;
    use crate::error::ErrorKind;
    use crate::options::RequestOption;

    fn config(options: Vec<RequestOption>) -> RequestConfig {
        RequestConfig::from_options(options)
    }

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            reason: String::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn plain_get_has_no_body_and_no_headers() {
        let req = build_request("https://na1.api.riotgames.com/lol/status", &config(vec![])).unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.as_str(), "https://na1.api.riotgames.com/lol/status");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = build_request("http://[::1", &config(vec![])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    }

    #[test]
    fn illegal_method_token_is_rejected() {
        let err = build_request(
            "http://testexample.com",
            &config(vec![RequestOption::http_method("invalid::{}")]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn unserializable_body_is_rejected() {
        // JSON object keys must be strings.
        let mut payload = BTreeMap::new();
        payload.insert((1, 2), "value");
        let err = build_request(
            "http://testexample.com",
            &config(vec![
                RequestOption::http_method("POST"),
                RequestOption::body(&payload),
            ]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn body_sets_json_content_type() {
        let req = build_request(
            "http://testexample.com",
            &config(vec![
                RequestOption::http_method("POST"),
                RequestOption::body(&serde_json::json!({ "name": "posttest" })),
            ]),
        )
        .unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "posttest");
    }

    #[test]
    fn empty_string_body_is_still_a_body() {
        let req = build_request(
            "http://testexample.com",
            &config(vec![RequestOption::body("")]),
        )
        .unwrap();
        assert_eq!(req.body.as_deref(), Some(r#""""#));
    }

    #[test]
    fn api_key_goes_in_token_header() {
        let req = build_request(
            "http://testexample.com",
            &config(vec![RequestOption::api_key("secret")]),
        )
        .unwrap();
        assert_eq!(req.header(API_TOKEN_HEADER), Some("secret"));
        assert_eq!(req.query(API_TOKEN_HEADER), None);
    }

    #[test]
    fn api_key_can_also_travel_as_query_param() {
        let req = build_request(
            "http://testexample.com",
            &config(vec![RequestOption::params([(API_TOKEN_HEADER, "validKey")])]),
        )
        .unwrap();
        assert_eq!(req.query(API_TOKEN_HEADER).as_deref(), Some("validKey"));
        assert_eq!(req.header(API_TOKEN_HEADER), None);
    }

    #[test]
    fn existing_query_survives_merge() {
        let req = build_request(
            "https://kr.api.riotgames.com/entries?queue=RANKED_SOLO_5x5&page=1",
            &config(vec![
                RequestOption::param("page", 2),
                RequestOption::param("count", 10),
            ]),
        )
        .unwrap();
        assert_eq!(req.query("queue").as_deref(), Some("RANKED_SOLO_5x5"));
        assert_eq!(req.query("page").as_deref(), Some("2"));
        assert_eq!(req.query("count").as_deref(), Some("10"));
        assert_eq!(req.url.query_pairs().count(), 3);
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let req = build_request(
            "http://testexample.com/",
            &config(vec![RequestOption::param("name", "Ana Bell&co")]),
        )
        .unwrap();
        assert_eq!(req.url.query(), Some("name=Ana+Bell%26co"));
        assert_eq!(req.query("name").as_deref(), Some("Ana Bell&co"));
    }

    #[test]
    fn ok_response_decodes() {
        let named: Named = raw(200, r#"{"name":"valid name"}"#).into_json().unwrap();
        assert_eq!(named.name, "valid name");
    }

    #[test]
    fn non_ok_status_is_a_remote_error_regardless_of_body() {
        let err = raw(404, r#"{"status":{"status_code":404}}"#)
            .into_json::<Named>()
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));

        let err = raw(500, "  not json at all \n").into_json::<Named>().unwrap_err();
        match err {
            Error::RemoteApi { status_code, body, .. } => {
                assert_eq!(status_code, 500);
                assert_eq!(body, "not json at all");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decoding_path_rejects_other_2xx() {
        let err = raw(204, "").into_json::<Named>().unwrap_err();
        assert_eq!(err.status_code(), Some(204));
    }

    #[test]
    fn invalid_json_with_ok_status_is_a_decode_failure() {
        let err = raw(200, r#"{"invalid json,,,,::"shouldbevalid"}"#)
            .into_json::<Named>()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn unit_path_accepts_any_2xx() {
        assert!(raw(200, "").into_unit().is_ok());
        assert!(raw(201, r#"{"puuid":"p1"}"#).into_unit().is_ok());
        assert!(raw(204, "").into_unit().is_ok());
        let err = raw(403, "Forbidden").into_unit().unwrap_err();
        assert_eq!(err.status_code(), Some(403));
    }
}
