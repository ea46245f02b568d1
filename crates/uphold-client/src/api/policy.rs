/*
[INPUT]:  API contract version of the calling application
[OUTPUT]: Per-operation success status codes and optional request fields
[POS]:    Endpoint layer - status interpretation settings
[UPDATE]: When the remote API changes its status conventions
*/

/// Success status code of every endpoint operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPolicy {
    pub authorize_by_code: u16,
    pub authorize_client_credentials: u16,
    pub create_user: u16,
    pub get_user: u16,
    pub create_transaction: u16,
    pub commit_transaction: u16,
    pub add_phone: u16,
    pub create_document: u16,
    /// Transmit `scope` on the client-credentials grant
    pub send_client_credentials_scope: bool,
}

impl Default for OperationPolicy {
    fn default() -> Self {
        Self {
            authorize_by_code: 200,
            authorize_client_credentials: 200,
            create_user: 201,
            get_user: 200,
            create_transaction: 200,
            commit_transaction: 200,
            add_phone: 200,
            create_document: 200,
            send_client_credentials_scope: false,
        }
    }
}
