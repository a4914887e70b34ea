//! Base64 text validation
//!
//! Stored text is opaque to the service; the only requirement is that it is
//! syntactically valid standard (padded) base64.

use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};

/// Standard alphabet with canonical padding. Non-zero bits left over in the
/// last symbol are accepted, so `YR==` decodes like `YQ==`.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextValidationError {
    Empty,
    InvalidCharset,
    Undecodable(String),
}

impl std::fmt::Display for TextValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "text is empty"),
            Self::InvalidCharset => write!(f, "text contains non-base64 characters"),
            Self::Undecodable(msg) => write!(f, "text does not decode as base64: {}", msg),
        }
    }
}

impl std::error::Error for TextValidationError {}

/// Validate an update payload.
///
/// 1. the text is non-empty
/// 2. it only uses `A-Z a-z 0-9 + /`, followed by optional `=` padding
/// 3. it actually decodes with the standard alphabet
pub fn validate_base64_text(text: &str) -> Result<(), TextValidationError> {
    if text.is_empty() {
        return Err(TextValidationError::Empty);
    }

    if !has_base64_charset(text) {
        return Err(TextValidationError::InvalidCharset);
    }

    LENIENT_STANDARD
        .decode(text)
        .map(|_| ())
        .map_err(|e| TextValidationError::Undecodable(e.to_string()))
}

fn has_base64_charset(text: &str) -> bool {
    let body = text.trim_end_matches('=');
    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Message returned to API clients
pub fn validation_error_message(error: &TextValidationError) -> &'static str {
    match error {
        TextValidationError::Empty => "text is required",
        TextValidationError::InvalidCharset | TextValidationError::Undecodable(_) => {
            "text must be valid base64"
        }
    }
}

impl From<TextValidationError> for crate::errors::TextCopyError {
    fn from(err: TextValidationError) -> Self {
        crate::errors::TextCopyError::invalid_input(validation_error_message(&err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_base64() {
        assert!(validate_base64_text("aGVsbG8=").is_ok());
        assert!(validate_base64_text("aGVsbG8gd29ybGQ=").is_ok());
        assert!(validate_base64_text("YQ==").is_ok());
        assert!(validate_base64_text("YWJj").is_ok());
        assert!(validate_base64_text("+/+/").is_ok());
    }

    #[test]
    fn test_trailing_bits_are_tolerated() {
        assert!(validate_base64_text("YR==").is_ok());
        assert!(validate_base64_text("YWJjZB==").is_ok());
        assert!(validate_base64_text("YWJjZA==").is_ok());
        // padding is still required
        assert!(matches!(
            validate_base64_text("YR"),
            Err(TextValidationError::Undecodable(_))
        ));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(validate_base64_text(""), Err(TextValidationError::Empty));
    }

    #[test]
    fn test_invalid_charset() {
        assert_eq!(
            validate_base64_text("hello world"),
            Err(TextValidationError::InvalidCharset)
        );
        assert_eq!(
            validate_base64_text("aGVs-bG8="),
            Err(TextValidationError::InvalidCharset)
        );
        assert_eq!(
            validate_base64_text("aGVs_bG8"),
            Err(TextValidationError::InvalidCharset)
        );
        // padding is only allowed at the end
        assert_eq!(
            validate_base64_text("YQ==YQ=="),
            Err(TextValidationError::InvalidCharset)
        );
    }

    #[test]
    fn test_charset_ok_but_undecodable() {
        assert!(matches!(
            validate_base64_text("abc"),
            Err(TextValidationError::Undecodable(_))
        ));
        assert!(matches!(
            validate_base64_text("a"),
            Err(TextValidationError::Undecodable(_))
        ));
        assert!(matches!(
            validate_base64_text("===="),
            Err(TextValidationError::Undecodable(_))
        ));
        assert!(matches!(
            validate_base64_text("YQ"),
            Err(TextValidationError::Undecodable(_))
        ));
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            validation_error_message(&TextValidationError::Empty),
            "text is required"
        );
        assert_eq!(
            validation_error_message(&TextValidationError::InvalidCharset),
            "text must be valid base64"
        );
        assert_eq!(
            validation_error_message(&TextValidationError::Undecodable("x".into())),
            "text must be valid base64"
        );
    }

    #[test]
    fn test_into_invalid_input() {
        let err: crate::errors::TextCopyError = TextValidationError::Empty.into();
        assert_eq!(err, crate::errors::TextCopyError::invalid_input("text is required"));
    }
}
