use serde::Deserialize;
use serde_json::{Value, json};

use super::{ApiCall, TransportError};
use crate::domain::{Login, Password, Token};

const LOGIN_PATH: &str = "login";

#[derive(Debug, Clone, Deserialize)]
struct LoginPayload {
    token: String,
}

pub fn encode_login(login: &Login, password: &Password) -> ApiCall {
    let mut call = ApiCall::with_field(LOGIN_PATH, Login::FIELD, json!(login.as_str()));
    call.body
        .insert(Password::FIELD.to_owned(), json!(password.as_str()));
    call
}

pub fn decode_login_payload(payload: Value) -> Result<Token, TransportError> {
    let parsed: LoginPayload = serde_json::from_value(payload)?;
    Token::new(parsed.token).map_err(|_| TransportError::EmptyToken)
}
