/*
[INPUT]:  Process-wide configuration, optional bearer token, optional base path
[OUTPUT]: Client context with resolved scheme/host/base path and one credential mode
[POS]:    HTTP layer - credential resolution
[UPDATE]: When adding credential modes or changing URL composition
*/

use std::fmt;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use tracing::warn;
use url::Url;

use crate::config::UpholdConfig;
use crate::http::{Result, UpholdError};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials attached to every request made by a client
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// End-user access token
    Bearer(String),
    /// Application client id and secret
    Basic { username: String, password: String },
}

impl Credentials {
    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::Basic { username, password } => {
                let pair = format!("{username}:{password}");
                format!("Basic {}", BASE64.encode(pair))
            }
            Credentials::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Client context for one or more calls against the Uphold API
#[derive(Debug, Clone)]
pub struct UpholdClient {
    scheme: String,
    host: String,
    base_path: String,
    credentials: Option<Credentials>,
    client_config: ClientConfig,
}

impl UpholdClient {
    /// Resolve a client for authenticated calls.
    ///
    /// A non-empty bearer token wins; otherwise the configured client id and
    /// secret are used as basic credentials. When neither is available the
    /// client carries no credentials at all.
    pub fn new(config: &UpholdConfig, token: Option<&str>, base_path: Option<&str>) -> Result<Self> {
        let credentials = match token.filter(|token| !token.is_empty()) {
            Some(token) => Some(Credentials::Bearer(token.to_string())),
            None => config
                .basic_credentials()
                .map(|(username, password)| Credentials::Basic {
                    username: username.to_string(),
                    password: password.to_string(),
                }),
        };
        Self::with_credentials(config, credentials, base_path)
    }

    /// Resolve a client for public endpoints; no credentials are attached
    pub fn unauthorized(config: &UpholdConfig, base_path: Option<&str>) -> Result<Self> {
        Self::with_credentials(config, None, base_path)
    }

    fn with_credentials(
        config: &UpholdConfig,
        credentials: Option<Credentials>,
        base_path: Option<&str>,
    ) -> Result<Self> {
        let (scheme, host) = resolve_api_origin(&config.api_base_url)?;
        Ok(Self {
            scheme,
            host,
            base_path: base_path.unwrap_or_default().to_string(),
            credentials,
            client_config: ClientConfig::default(),
        })
    }

    /// Replace the transport configuration
    pub fn with_client_config(mut self, client_config: ClientConfig) -> Self {
        self.client_config = client_config;
        self
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host including a port when the base URL names one
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn client_config(&self) -> &ClientConfig {
        &self.client_config
    }

    /// Build the absolute URL for a resource below the base path
    pub fn build_url(&self, uri: &str) -> String {
        format!(
            "{}://{}{}/{}",
            self.scheme,
            self.host,
            normalize_base_path(&self.base_path),
            uri
        )
    }
}

fn resolve_api_origin(api_base_url: &str) -> Result<(String, String)> {
    let url = Url::parse(api_base_url).map_err(|err| {
        warn!(api_base_url, error = %err, "failed to parse uphold API base url");
        UpholdError::Configuration(format!("invalid API base URL {api_base_url}: {err}"))
    })?;

    let host = url.host_str().ok_or_else(|| {
        UpholdError::Configuration(format!("API base URL {api_base_url} has no host"))
    })?;
    let host = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    Ok((url.scheme().to_string(), host))
}

fn normalize_base_path(path: &str) -> String {
    if path == "/" {
        String::new()
    } else if !path.is_empty() && !path.starts_with('/') {
        format!("/{path}")
    } else {
        path.to_string()
    }
}
