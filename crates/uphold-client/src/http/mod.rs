/*
[INPUT]:  Client configuration, credentials and API resource paths
[OUTPUT]: Decoded HTTP responses and classified errors
[POS]:    HTTP layer - credential resolution and the request engine
[UPDATE]: When changing client behavior or the response envelope
*/

pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use error::{Result, UpholdError};
pub use request::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, Params};
pub use response::ApiResponse;

pub use client::{ClientConfig, Credentials, UpholdClient};
