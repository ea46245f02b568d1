/*
[INPUT]:  Shared configuration and per-call arguments
[OUTPUT]: Typed results of Uphold domain actions
[POS]:    Endpoint layer - one method per remote action
[UPDATE]: When adding endpoints or changing status interpretation
*/

pub mod oauth;
pub mod policy;
pub mod transaction;
pub mod user;

use std::sync::Arc;

use crate::config::UpholdConfig;
use crate::http::{ClientConfig, Result, UpholdClient};

pub use policy::OperationPolicy;

/// Entry point for every endpoint operation.
///
/// Holds only read-only state; each call resolves its own client and issues
/// exactly one request, so a shared `Uphold` can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Uphold {
    config: Arc<UpholdConfig>,
    client_config: ClientConfig,
    policy: OperationPolicy,
}

impl Uphold {
    pub fn new(config: Arc<UpholdConfig>) -> Self {
        Self {
            config,
            client_config: ClientConfig::default(),
            policy: OperationPolicy::default(),
        }
    }

    pub fn with_client_config(mut self, client_config: ClientConfig) -> Self {
        self.client_config = client_config;
        self
    }

    pub fn with_policy(mut self, policy: OperationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &UpholdConfig {
        &self.config
    }

    pub fn policy(&self) -> &OperationPolicy {
        &self.policy
    }

    /// Client authenticated by `token`, or by the application credentials when absent
    pub fn client(&self, token: Option<&str>, base_path: Option<&str>) -> Result<UpholdClient> {
        Ok(UpholdClient::new(&self.config, token, base_path)?
            .with_client_config(self.client_config.clone()))
    }

    pub fn unauthorized_client(&self, base_path: Option<&str>) -> Result<UpholdClient> {
        Ok(UpholdClient::unauthorized(&self.config, base_path)?
            .with_client_config(self.client_config.clone()))
    }

    fn client_id(&self) -> &str {
        self.config.client_id.as_deref().unwrap_or_default()
    }
}
