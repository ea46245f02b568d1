/*
[INPUT]:  Authorization code or requested scope, application credentials
[OUTPUT]: OAuth token response or access token
[POS]:    Endpoint layer - token endpoint (basic auth with client id/secret)
[UPDATE]: When grant types or token response handling change
*/

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::Uphold;
use crate::http::{Params, Result};
use crate::types::OAuthResponse;

const TOKEN_PATH: &str = "oauth2/token";

impl Uphold {
    /// Exchange an authorization code for an access token
    ///
    /// POST /oauth2/token (form-encoded, `grant_type=authorization_code`)
    ///
    /// The caller must verify the `state` parameter returned alongside the
    /// code before calling this; no CSRF check happens here.
    pub async fn authorize_by_code(&self, code: &str) -> Result<OAuthResponse> {
        let client = self.client(None, None)?;

        let mut params = Params::new();
        params.insert("code".to_string(), Value::from(code));
        params.insert("grant_type".to_string(), Value::from("authorization_code"));

        let response = client
            .post_form(TOKEN_PATH, Some(&params))
            .await
            .inspect_err(|err| {
                warn!(client_id = %self.client_id(), error = %err, "failed to authorize code");
            })?;
        debug!(
            client_id = %self.client_id(),
            status = response.status,
            "received authorization code response"
        );

        let token: OAuthResponse = response
            .expect_status("authorize_by_code", self.policy().authorize_by_code)?
            .into_model()?;
        debug!(
            token_type = %token.token_type,
            scope = token.scope.as_deref().unwrap_or_default(),
            "resolved uphold access token"
        );
        Ok(token)
    }

    /// Obtain an application access token with the client-credentials grant
    ///
    /// POST /oauth2/token (form-encoded, `grant_type=client_credentials`)
    ///
    /// `scope` is only transmitted when
    /// [`OperationPolicy::send_client_credentials_scope`](crate::api::OperationPolicy) is set.
    pub async fn authorize_client_credentials(&self, scope: &str) -> Result<String> {
        let client = self.client(None, None)?;

        let mut params = Params::new();
        params.insert("grant_type".to_string(), Value::from("client_credentials"));
        if self.policy().send_client_credentials_scope {
            params.insert("scope".to_string(), Value::from(scope));
        }

        let response = client
            .post_form(TOKEN_PATH, Some(&params))
            .await
            .inspect_err(|err| {
                warn!(client_id = %self.client_id(), error = %err, "failed to authorize client credentials");
            })?;
        debug!(
            client_id = %self.client_id(),
            status = response.status,
            "received client credentials response"
        );

        let token: OAuthResponse = response
            .expect_status(
                "authorize_client_credentials",
                self.policy().authorize_client_credentials,
            )?
            .into_model()?;
        Ok(token.access_token)
    }
}
