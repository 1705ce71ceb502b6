use serde_json::{Value, json};

use super::ApiCall;
use crate::domain::{CheckPhone, OneOrMany, RawPhoneNumber};

const GET_SERVICES_LIST_PATH: &str = "getServicesList";
const CHECK_BALANCE_PATH: &str = "checkBalance";
const CHECK_PHONE_PATH: &str = "checkPhone";
const REVOKE_TOKEN_PATH: &str = "revokeToken";

pub fn encode_get_services_list() -> ApiCall {
    ApiCall::empty(GET_SERVICES_LIST_PATH)
}

pub fn encode_check_balance() -> ApiCall {
    ApiCall::empty(CHECK_BALANCE_PATH)
}

pub fn encode_revoke_token() -> ApiCall {
    ApiCall::empty(REVOKE_TOKEN_PATH)
}

pub fn encode_check_phone(request: &CheckPhone) -> ApiCall {
    let phones = match request.phones() {
        OneOrMany::One(phone) => json!(phone.raw()),
        OneOrMany::Many(phones) => phones.iter().map(|it| json!(it.raw())).collect(),
    };
    ApiCall::with_field(CHECK_PHONE_PATH, RawPhoneNumber::FIELD, phones)
}
