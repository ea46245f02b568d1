/*
[INPUT]:  Environment variables or explicit values
[OUTPUT]: Immutable process-wide Uphold configuration
[POS]:    Configuration layer - constructed once at application entry
[UPDATE]: When adding configuration options or changing sandbox defaults
*/

use std::fmt;

/// Sandbox web application base URL
pub const SANDBOX_BASE_URL: &str = "https://sandbox.uphold.com";
/// Sandbox REST API base URL
pub const SANDBOX_API_BASE_URL: &str = "https://api-sandbox.uphold.com";
/// Every scope the web authorization flow can request
pub const SUPPORTED_SCOPES: &str = "accounts:read cards:read cards:write transactions:deposit transactions:transfer:application transactions:transfer:others transactions:transfer:self transactions:withdraw transactions:read user:read contacts:read contacts:write phones:read phones:write";

const DEFAULT_LOG_LEVEL: &str = "debug";

/// Process-wide configuration shared by every client
#[derive(Clone, PartialEq, Eq)]
pub struct UpholdConfig {
    /// Web application base URL, used for authorization links
    pub base_url: String,
    /// REST API base URL; only scheme and host are used
    pub api_base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub log_level: String,
}

impl Default for UpholdConfig {
    fn default() -> Self {
        Self {
            base_url: SANDBOX_BASE_URL.to_string(),
            api_base_url: SANDBOX_API_BASE_URL.to_string(),
            client_id: None,
            client_secret: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl UpholdConfig {
    /// Load configuration from the process environment.
    ///
    /// Reads `UPHOLD_BASE_URL`, `UPHOLD_API_BASE_URL`, `UPHOLD_CLIENT_ID`,
    /// `UPHOLD_CLIENT_SECRET` and `UPHOLD_LOG_LEVEL`; unset or empty
    /// variables fall back to the sandbox defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let defaults = Self::default();

        Self {
            base_url: var("UPHOLD_BASE_URL").unwrap_or(defaults.base_url),
            api_base_url: var("UPHOLD_API_BASE_URL").unwrap_or(defaults.api_base_url),
            client_id: var("UPHOLD_CLIENT_ID"),
            client_secret: var("UPHOLD_CLIENT_SECRET"),
            log_level: var("UPHOLD_LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    /// Client id and secret, when both are configured
    pub fn basic_credentials(&self) -> Option<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Some((id, secret)),
            _ => None,
        }
    }

    /// Web authorization URL for the given space-separated scope
    pub fn web_authorization_url(&self, scope: &str) -> String {
        let scope: String = url::form_urlencoded::byte_serialize(scope.as_bytes()).collect();
        format!(
            "{}/authorize/{}?scope={}",
            self.base_url,
            self.client_id.as_deref().unwrap_or_default(),
            scope
        )
    }

    /// Web authorization URL requesting every supported scope
    pub fn web_authorization_all_scopes_url(&self) -> String {
        self.web_authorization_url(SUPPORTED_SCOPES)
    }
}

impl fmt::Debug for UpholdConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpholdConfig")
            .field("base_url", &self.base_url)
            .field("api_base_url", &self.api_base_url)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}
