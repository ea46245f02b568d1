/*
[INPUT]:  Method, resource path, content type and parameter map
[OUTPUT]: Status code with decoded JSON body, or a classified error
[POS]:    HTTP layer - request engine shared by every endpoint operation
[UPDATE]: When changing headers, payload encodings or response decoding
*/

use std::io::Read;

use flate2::read::GzDecoder;
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_ENCODING, CONTENT_TYPE,
    HeaderMap, HeaderValue,
};
use reqwest::{Client, Method};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::http::{ApiResponse, Result, UpholdClient, UpholdError};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Request parameters: string keys to arbitrary JSON values
pub type Params = Map<String, Value>;

const BODY_PREVIEW_BYTES: usize = 256;

impl UpholdClient {
    /// Send one request and decode the response body as JSON.
    ///
    /// GET carries the string-valued parameters in the query string; POST and
    /// PUT encode the parameters as the body according to `content_type`; any
    /// other method sends neither. The status code is not interpreted here.
    pub async fn invoke(
        &self,
        method: Method,
        uri: &str,
        content_type: &str,
        params: Option<&Params>,
    ) -> Result<ApiResponse> {
        let url_string = self.build_url(uri);
        let mut url = Url::parse(&url_string).map_err(|err| {
            warn!(method = %method, url = %url_string, error = %err, "failed to parse uphold API request url");
            UpholdError::Configuration(format!("invalid request URL {url_string}: {err}"))
        })?;

        let mut headers = self.default_headers()?;
        let mut body = None;

        if method == Method::GET {
            if let Some(params) = params {
                append_query(&mut url, params);
            }
        } else if method == Method::POST || method == Method::PUT {
            body = Some(encode_body(content_type, params)?);
            let value = HeaderValue::from_str(content_type).map_err(|err| {
                UpholdError::Configuration(format!("invalid content type {content_type}: {err}"))
            })?;
            headers.insert(CONTENT_TYPE, value);
        }

        let http_client = Client::builder()
            .timeout(self.client_config().timeout)
            .connect_timeout(self.client_config().connect_timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|err| UpholdError::Configuration(format!("failed to build HTTP client: {err}")))?;

        debug!(method = %method, url = %url, "invoking uphold API");

        let mut builder = http_client.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(method = %method, url = %url, error = %err, "failed to invoke uphold API");
            UpholdError::Transport(err)
        })?;

        let status = response.status().as_u16();
        debug!(method = %method, url = %url, status, "received uphold API response");

        let gzipped = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("gzip"));

        let bytes = response.bytes().await.map_err(|err| {
            warn!(method = %method, url = %url, status, error = %err, "failed to read uphold API response body");
            UpholdError::Transport(err)
        })?;

        let raw = if gzipped {
            gunzip(&bytes).map_err(|err| {
                warn!(method = %method, url = %url, status, error = %err, "failed to decompress uphold API response");
                UpholdError::decoding(status, bytes.to_vec(), err)
            })?
        } else {
            bytes.to_vec()
        };

        let body = decode_json(&raw).map_err(|err| {
            warn!(
                method = %method,
                url = %url,
                status,
                error = %err,
                body = %preview(&raw),
                "failed to decode uphold API response"
            );
            UpholdError::decoding(status, raw.clone(), err)
        })?;

        debug!(method = %method, url = %url, status, bytes = raw.len(), "uphold API invocation succeeded");
        Ok(ApiResponse { status, body, raw })
    }

    /// GET with query parameters
    pub async fn get(&self, uri: &str, params: Option<&Params>) -> Result<ApiResponse> {
        self.invoke(Method::GET, uri, CONTENT_TYPE_JSON, params).await
    }

    /// POST with a JSON body
    pub async fn post(&self, uri: &str, params: Option<&Params>) -> Result<ApiResponse> {
        self.invoke(Method::POST, uri, CONTENT_TYPE_JSON, params).await
    }

    /// POST with a form-encoded body
    pub async fn post_form(&self, uri: &str, params: Option<&Params>) -> Result<ApiResponse> {
        self.invoke(Method::POST, uri, CONTENT_TYPE_FORM, params).await
    }

    /// PUT with a JSON body
    pub async fn put(&self, uri: &str, params: Option<&Params>) -> Result<ApiResponse> {
        self.invoke(Method::PUT, uri, CONTENT_TYPE_JSON, params).await
    }

    pub async fn delete(&self, uri: &str) -> Result<ApiResponse> {
        self.invoke(Method::DELETE, uri, CONTENT_TYPE_JSON, None).await
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-us"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));

        if let Some(credentials) = self.credentials() {
            let mut value = HeaderValue::from_str(&credentials.authorization_header())
                .map_err(|err| {
                    UpholdError::Configuration(format!("invalid authorization header: {err}"))
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}

fn append_query(url: &mut Url, params: &Params) {
    let pairs: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(name, value)| value.as_str().map(|value| (name.as_str(), value)))
        .collect();
    if pairs.is_empty() {
        return;
    }

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !pairs.iter().any(|(key, _)| key == name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    let mut query = url.query_pairs_mut();
    query.clear();
    query.extend_pairs(retained);
    query.extend_pairs(pairs);
}

fn encode_body(content_type: &str, params: Option<&Params>) -> Result<Vec<u8>> {
    match content_type {
        CONTENT_TYPE_JSON => match params {
            Some(params) => serde_json::to_vec(params).map_err(|err| {
                warn!(error = %err, "failed to marshal JSON payload for uphold API");
                UpholdError::Encoding(err.to_string())
            }),
            None => Ok(Vec::new()),
        },
        CONTENT_TYPE_FORM => {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            for (name, value) in params.into_iter().flatten() {
                match value.as_str() {
                    Some(value) => {
                        form.append_pair(name, value);
                    }
                    None => {
                        warn!(parameter = %name, "skipping non-string form parameter");
                    }
                }
            }
            Ok(form.finish().into_bytes())
        }
        other => Err(UpholdError::Encoding(format!("unsupported content type {other}"))),
    }
}

fn gunzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

fn decode_json(raw: &[u8]) -> serde_json::Result<Value> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(raw)
}

fn preview(raw: &[u8]) -> String {
    let end = raw.len().min(BODY_PREVIEW_BYTES);
    let mut out = String::from_utf8_lossy(&raw[..end]).into_owned();
    if raw.len() > BODY_PREVIEW_BYTES {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_append_query_keeps_only_strings() {
        let mut url = Url::parse("https://api.example.com/v0/me").unwrap();
        append_query(
            &mut url,
            &params(serde_json::json!({"a": "1", "b": 2, "c": "x y", "d": null})),
        );

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("c".to_string(), "x y".to_string()),
            ]
        );
    }

    #[test]
    fn test_append_query_replaces_existing_keys() {
        let mut url = Url::parse("https://api.example.com/cards?limit=5&page=1").unwrap();
        append_query(&mut url, &params(serde_json::json!({"page": "2"})));
        assert_eq!(url.query(), Some("limit=5&page=2"));
    }

    #[test]
    fn test_append_query_without_strings_leaves_url_alone() {
        let mut url = Url::parse("https://api.example.com/cards").unwrap();
        append_query(&mut url, &params(serde_json::json!({"n": 1})));
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_encode_json_body_round_trips() {
        let input = params(serde_json::json!({
            "destination": "foo@example.com",
            "denomination": {"amount": "1.5", "currency": "USD"},
            "flags": [true, false],
        }));
        let body = encode_body(CONTENT_TYPE_JSON, Some(&input)).unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed, Value::Object(input));
    }

    #[test]
    fn test_encode_json_body_without_params_is_empty() {
        assert!(encode_body(CONTENT_TYPE_JSON, None).unwrap().is_empty());
    }

    #[test]
    fn test_encode_form_skips_non_strings() {
        let input = params(serde_json::json!({
            "code": "abc 123",
            "grant_type": "authorization_code",
            "ttl": 30,
        }));
        let body = encode_body(CONTENT_TYPE_FORM, Some(&input)).unwrap();
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "code=abc+123&grant_type=authorization_code"
        );
    }

    #[test]
    fn test_encode_unknown_content_type_fails() {
        let err = encode_body("text/plain", None).unwrap_err();
        assert!(matches!(err, UpholdError::Encoding(_)));
    }

    #[test]
    fn test_gunzip_restores_payload() {
        let payload = br#"{"id":"tx"}"#;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(gunzip(&compressed).unwrap(), payload.to_vec());
        assert!(gunzip(b"not gzip").is_err());
    }

    #[test]
    fn test_decode_json_empty_body_is_null() {
        assert_eq!(decode_json(b"").unwrap(), Value::Null);
        assert_eq!(decode_json(b"  \n").unwrap(), Value::Null);
        assert!(decode_json(b"<html>").is_err());
    }

    #[test]
    fn test_preview_truncates() {
        let long = vec![b'a'; BODY_PREVIEW_BYTES + 10];
        let out = preview(&long);
        assert_eq!(out.len(), BODY_PREVIEW_BYTES + 3);
        assert!(out.ends_with("..."));
    }
}
