/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use super::enums::AccountType;
use super::models::Intl;
use crate::http::{Params, Result, UpholdError};

pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_LOCALE: &str = "en-US";

/// Serialize a payload into the engine's parameter map
pub fn to_params<T: Serialize>(payload: &T) -> Result<Params> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(UpholdError::Encoding(format!(
            "payload must serialize to a JSON object, got {other}"
        ))),
        Err(err) => Err(UpholdError::Encoding(err.to_string())),
    }
}

/// Sign-up request; unset options fall back to US / en-US / business
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub country: Option<String>,
    pub locale: Option<String>,
    pub account_type: Option<AccountType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewUserSettings {
    has_marketing_consent: bool,
}

#[derive(Debug, Serialize)]
struct NewUserPayload<'a> {
    country: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(rename = "type")]
    account_type: AccountType,
    settings: NewUserSettings,
    intl: Intl,
}

impl CreateUserRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            country: None,
            locale: None,
            account_type: None,
        }
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    /// Wire payload with defaults applied
    pub fn to_params(&self) -> Result<Params> {
        let locale = self.locale.as_deref().unwrap_or(DEFAULT_LOCALE);
        to_params(&NewUserPayload {
            country: self.country.as_deref().unwrap_or(DEFAULT_COUNTRY),
            email: &self.email,
            password: &self.password,
            account_type: self.account_type.unwrap_or_default(),
            settings: NewUserSettings {
                has_marketing_consent: false,
            },
            intl: Intl::uniform(locale),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenominationRequest {
    pub amount: Decimal,
    pub currency: String,
}

/// Quote a transfer from a card; the transaction stays pending until committed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTransactionRequest {
    pub denomination: DenominationRequest,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddPhoneRequest {
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateDocumentRequest {
    #[serde(rename = "type")]
    pub document_type: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_defaults() {
        let params = CreateUserRequest::new("jane@example.com", "s3cret")
            .to_params()
            .unwrap();
        let payload = Value::Object(params);

        assert_eq!(payload["country"], "US");
        assert_eq!(payload["type"], "business");
        assert_eq!(payload["email"], "jane@example.com");
        assert_eq!(payload["password"], "s3cret");
        assert_eq!(payload["settings"]["hasMarketingConsent"], false);
        assert_eq!(payload["intl"]["language"]["locale"], "en-US");
        assert_eq!(payload["intl"]["dateTimeFormat"]["locale"], "en-US");
        assert_eq!(payload["intl"]["numberFormat"]["locale"], "en-US");
    }

    #[test]
    fn test_create_user_overrides() {
        let params = CreateUserRequest::new("jean@example.com", "s3cret")
            .country("PT")
            .locale("pt-PT")
            .account_type(AccountType::Individual)
            .to_params()
            .unwrap();
        let payload = Value::Object(params);

        assert_eq!(payload["country"], "PT");
        assert_eq!(payload["type"], "individual");
        assert_eq!(payload["intl"]["language"]["locale"], "pt-PT");
    }

    #[test]
    fn test_transaction_payload_shape() {
        let params = to_params(&CreateTransactionRequest {
            denomination: DenominationRequest {
                amount: "12.50".parse().unwrap(),
                currency: "USD".to_string(),
            },
            destination: "foo@example.com".to_string(),
        })
        .unwrap();

        assert_eq!(
            Value::Object(params),
            serde_json::json!({
                "denomination": {"amount": "12.50", "currency": "USD"},
                "destination": "foo@example.com",
            })
        );
    }

    #[test]
    fn test_to_params_rejects_non_objects() {
        let err = to_params(&"just a string").unwrap_err();
        assert!(matches!(err, UpholdError::Encoding(_)));
    }
}
