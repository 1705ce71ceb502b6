use crate::domain::value::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "Peshkariki error with code #{code}: {message}; {}",
    .additional.as_deref().unwrap_or_default()
)]
/// Application-level failure reported through a `success: false` envelope.
pub struct ServiceError {
    code: ErrorCode,
    message: &'static str,
    additional: Option<String>,
}

impl ServiceError {
    /// Build an error from the envelope fields; the message is resolved from the code table.
    pub fn new(code: ErrorCode, additional: Option<String>) -> Self {
        Self {
            code,
            message: code.message(),
            additional,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Description from the static code table, or a placeholder for unknown codes.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Free-text context supplied by the service, if any.
    pub fn additional(&self) -> Option<&str> {
        self.additional.as_deref()
    }

    pub fn is_invalid_token(&self) -> bool {
        self.code.is_invalid_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_message_and_context() {
        let err = ServiceError::new(ErrorCode::new(12), Some("expired".to_owned()));
        assert_eq!(
            err.to_string(),
            "Peshkariki error with code #12: invalid or expired token; expired"
        );

        let err = ServiceError::new(ErrorCode::new(7), None);
        assert_eq!(
            err.to_string(),
            "Peshkariki error with code #7: unknown error code; "
        );
    }

    #[test]
    fn unknown_codes_keep_code_and_context() {
        let err = ServiceError::new(ErrorCode::new(99), Some("boom".to_owned()));
        assert_eq!(err.code().as_i32(), 99);
        assert_eq!(err.message(), ErrorCode::UNKNOWN_MESSAGE);
        assert_eq!(err.additional(), Some("boom"));
        assert!(!err.is_invalid_token());
    }
}
