//! Transport layer: wire-format details (JSON bodies and the response envelope).

mod account;
mod envelope;
mod login;
mod orders;

use serde::Serialize;
use serde_json::{Map, Value};

pub use account::{
    encode_check_balance, encode_check_phone, encode_get_services_list, encode_revoke_token,
};
pub use envelope::decode_envelope;
pub use login::{decode_login_payload, encode_login};
pub use orders::{
    encode_add_order, encode_change_status, encode_check_status, encode_order_details,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("envelope with success=false has no error code")]
    MissingErrorCode,

    #[error("error code is not an integer: {raw}")]
    InvalidErrorCode { raw: String },

    #[error("login response carries an empty token")]
    EmptyToken,

    #[error("request body must serialize to a JSON object")]
    BodyNotAnObject,
}

/// One remote operation: the path appended to the base URL and its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub path: &'static str,
    pub body: Map<String, Value>,
}

impl ApiCall {
    fn empty(path: &'static str) -> Self {
        Self {
            path,
            body: Map::new(),
        }
    }

    fn with_field(path: &'static str, field: &str, value: Value) -> Self {
        let mut body = Map::new();
        body.insert(field.to_owned(), value);
        Self { path, body }
    }

    fn serialized<T: Serialize>(path: &'static str, body: &T) -> Result<Self, TransportError> {
        match serde_json::to_value(body)? {
            Value::Object(body) => Ok(Self { path, body }),
            _ => Err(TransportError::BodyNotAnObject),
        }
    }
}
