/*
[INPUT]:  Sign-up details or a user's bearer token
[OUTPUT]: User records and contact sub-resources
[POS]:    Endpoint layer - user endpoints
[UPDATE]: When adding user endpoints or changing payloads
*/

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::Uphold;
use crate::http::Result;
use crate::types::{AddPhoneRequest, CreateDocumentRequest, CreateUserRequest, Phone, User, to_params};

const API_VERSION_PATH: &str = "/v0";
const CURRENT_USER_PATH: &str = "/v0/me";

impl Uphold {
    /// Create a user; no credentials are sent
    ///
    /// POST /v0/users
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User> {
        let client = self.unauthorized_client(Some(API_VERSION_PATH))?;
        let params = request.to_params()?;

        let response = client
            .post("users", Some(&params))
            .await
            .inspect_err(|err| warn!(error = %err, "failed to create uphold user"))?;
        debug!(status = response.status, "received create user response");

        response
            .expect_status("create_user", self.policy().create_user)?
            .into_model()
    }

    /// Fetch the user owning `token`
    ///
    /// GET /v0/me
    pub async fn get_user(&self, token: &str) -> Result<User> {
        let client = self.client(Some(token), Some(API_VERSION_PATH))?;

        let response = client.get("me", None).await.inspect_err(|err| {
            warn!(client_id = %self.client_id(), error = %err, "failed to fetch user");
        })?;
        debug!(
            client_id = %self.client_id(),
            status = response.status,
            "received fetch user response"
        );

        response
            .expect_status("get_user", self.policy().get_user)?
            .into_model()
    }

    /// Attach a phone number to the user owning `token`
    ///
    /// POST /v0/me/phones
    pub async fn add_phone(&self, token: &str, phone: &str) -> Result<Phone> {
        let client = self.client(Some(token), Some(CURRENT_USER_PATH))?;
        let params = to_params(&AddPhoneRequest {
            phone: phone.to_string(),
        })?;

        let response = client
            .post("phones", Some(&params))
            .await
            .inspect_err(|err| warn!(error = %err, "failed to add phone"))?;
        debug!(status = response.status, "received add phone response");

        response
            .expect_status("add_phone", self.policy().add_phone)?
            .into_model()
    }

    /// Upload an identity document for the user owning `token`.
    ///
    /// POST /v0/me/documents
    ///
    /// The document schema is not modeled; the decoded JSON is returned as is.
    pub async fn create_document(
        &self,
        token: &str,
        document_type: &str,
        value: &str,
    ) -> Result<Value> {
        let client = self.client(Some(token), Some(CURRENT_USER_PATH))?;
        let params = to_params(&CreateDocumentRequest {
            document_type: document_type.to_string(),
            value: value.to_string(),
        })?;

        let response = client
            .post("documents", Some(&params))
            .await
            .inspect_err(|err| warn!(document_type, error = %err, "failed to create document"))?;
        debug!(document_type, status = response.status, "received create document response");

        Ok(response
            .expect_status("create_document", self.policy().create_document)?
            .body)
    }
}
