use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Peshkariki account login.
///
/// Invariant: not blank. The value is sent exactly as given.
pub struct Login(String);

impl Login {
    /// Body field name used by the `login` call.
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the login as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Peshkariki account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Body field name used by the `login` call.
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bearer token returned by `login`.
///
/// The value is opaque; it is forwarded as the `token` body field and never inspected.
pub struct Token(String);

impl Token {
    /// Body field name carrying the token on authenticated calls.
    pub const FIELD: &'static str = "token";

    /// Create a validated [`Token`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as issued by the service.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Peshkariki order id (`order_id`).
pub struct OrderId(u64);

impl OrderId {
    /// Body field name used by Peshkariki (`order_id`).
    pub const FIELD: &'static str = "order_id";

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Order number in the caller's own system (`inner_id`).
///
/// Invariant: non-empty after trimming.
pub struct InnerId(String);

impl InnerId {
    /// Body field name used by Peshkariki (`inner_id`).
    pub const FIELD: &'static str = "inner_id";

    /// Create a validated [`InnerId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Additional service id as listed by `getServicesList`.
pub struct ServiceId(u32);

impl ServiceId {
    /// Body field name used by Peshkariki (`service_id`).
    pub const FIELD: &'static str = "service_id";

    /// Buyout service: the courier pays for the goods and collects cash from the recipient.
    pub const BUYOUT: Self = Self(25);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to Peshkariki (`phone`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Body field name used by Peshkariki (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Peshkariki.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Phone number normalized to E.164 with the `phonenumber` crate.
///
/// Two numbers are equal when their E.164 forms match.
pub struct PhoneNumber {
    raw: String,
    e164: String,
}

impl PhoneNumber {
    /// Body field name used by Peshkariki (`phone`).
    pub const FIELD: &'static str = "phone";

    /// Parse `input`, falling back to `default_region` when it has no country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let raw = input.into().trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164 })
    }

    /// Input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn e164(&self) -> &str {
        &self.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Unix timestamp in seconds, used for route point delivery windows.
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Peshkariki error code from a `success: false` envelope.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ErrorCode(i32);

impl ErrorCode {
    /// Code the service returns when the token is missing, invalid, or expired.
    pub const INVALID_TOKEN: Self = Self(12);

    /// Placeholder message for codes absent from [`KnownErrorCode`].
    pub const UNKNOWN_MESSAGE: &'static str = "unknown error code";

    /// Construct an error code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Peshkariki.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known error code variant, if one exists.
    pub fn known(self) -> Option<KnownErrorCode> {
        KnownErrorCode::from_code(self.0)
    }

    /// Human-readable description, or [`ErrorCode::UNKNOWN_MESSAGE`].
    pub fn message(self) -> &'static str {
        self.known()
            .map_or(Self::UNKNOWN_MESSAGE, KnownErrorCode::message)
    }

    /// Returns `true` if the service rejected the token and a fresh login may help.
    pub fn is_invalid_token(self) -> bool {
        self == Self::INVALID_TOKEN
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Peshkariki error codes the client acts on.
///
/// Every other code is preserved as [`ErrorCode`] and reports
/// [`ErrorCode::UNKNOWN_MESSAGE`].
pub enum KnownErrorCode {
    /// The token is missing, invalid or expired; a fresh login is expected to help.
    InvalidToken,
}

impl KnownErrorCode {
    /// Convert a raw Peshkariki integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            12 => Some(Self::InvalidToken),
            _ => None,
        }
    }

    /// Integer code as sent by Peshkariki.
    pub fn code(self) -> ErrorCode {
        match self {
            Self::InvalidToken => ErrorCode::INVALID_TOKEN,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidToken => "invalid or expired token",
        }
    }
}
