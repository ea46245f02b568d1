/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Uphold client crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod config;
pub mod http;
pub mod logging;
pub mod types;

pub use api::{OperationPolicy, Uphold};

pub use config::{SANDBOX_API_BASE_URL, SANDBOX_BASE_URL, SUPPORTED_SCOPES, UpholdConfig};

// Re-export commonly used types from http
pub use http::{
    ApiResponse,
    ClientConfig,
    Credentials,
    Params,
    Result,
    UpholdClient,
    UpholdError,
};

// Re-export all types
pub use types::*;
