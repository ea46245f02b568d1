/*
[INPUT]:  Status code and decoded JSON body from the request engine
[OUTPUT]: Response envelope, status checks and typed model narrowing
[POS]:    HTTP layer - response envelope owned by the calling operation
[UPDATE]: When changing status interpretation or model decoding
*/

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::http::{Result, UpholdError};

/// Decoded response of a single API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Generic JSON body; `Null` for an empty response
    pub body: Value,
    /// Body bytes after decompression
    pub raw: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with a domain error unless the status equals `expected`
    pub fn expect_status(self, operation: &'static str, expected: u16) -> Result<Self> {
        if self.status == expected {
            return Ok(self);
        }

        warn!(
            operation,
            status = self.status,
            expected,
            "uphold API returned unexpected status code"
        );
        Err(UpholdError::Domain {
            operation,
            status: self.status,
            body: self.body,
        })
    }

    /// Narrow the generic body into a typed model without consuming the envelope
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone())
            .map_err(|err| UpholdError::decoding(self.status, self.raw.clone(), err))
    }

    /// Narrow the generic body into a typed model
    pub fn into_model<T: DeserializeOwned>(self) -> Result<T> {
        let Self { status, body, raw } = self;
        serde_json::from_value(body).map_err(|err| {
            warn!(status, error = %err, "uphold API response does not match model");
            UpholdError::decoding(status, raw, err)
        })
    }
}
