use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCopyError {
    InvalidCode(String),
    NotFound(String),
    InvalidInput(String),
    Config(String),
    FileOperation(String),
    Serialization(String),
}

impl TextCopyError {
    /// Stable error code, used in logs
    pub fn code(&self) -> &'static str {
        match self {
            TextCopyError::InvalidCode(_) => "E001",
            TextCopyError::NotFound(_) => "E002",
            TextCopyError::InvalidInput(_) => "E003",
            TextCopyError::Config(_) => "E004",
            TextCopyError::FileOperation(_) => "E005",
            TextCopyError::Serialization(_) => "E006",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            TextCopyError::InvalidCode(_) => "Invalid Code",
            TextCopyError::NotFound(_) => "Not Found",
            TextCopyError::InvalidInput(_) => "Invalid Input",
            TextCopyError::Config(_) => "Configuration Error",
            TextCopyError::FileOperation(_) => "File Operation Error",
            TextCopyError::Serialization(_) => "Serialization Error",
        }
    }

    /// Human readable detail, safe to hand back to API clients
    pub fn message(&self) -> &str {
        match self {
            TextCopyError::InvalidCode(msg) => msg,
            TextCopyError::NotFound(msg) => msg,
            TextCopyError::InvalidInput(msg) => msg,
            TextCopyError::Config(msg) => msg,
            TextCopyError::FileOperation(msg) => msg,
            TextCopyError::Serialization(msg) => msg,
        }
    }

    /// HTTP status the API answers with for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            TextCopyError::InvalidCode(_) | TextCopyError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            TextCopyError::NotFound(_) => StatusCode::NOT_FOUND,
            TextCopyError::Config(_)
            | TextCopyError::FileOperation(_)
            | TextCopyError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Colored output for startup failures printed to the terminal
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TextCopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TextCopyError {}

impl TextCopyError {
    pub fn invalid_code<T: Into<String>>(msg: T) -> Self {
        TextCopyError::InvalidCode(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TextCopyError::NotFound(msg.into())
    }

    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        TextCopyError::InvalidInput(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        TextCopyError::Config(msg.into())
    }
}

impl From<std::io::Error> for TextCopyError {
    fn from(err: std::io::Error) -> Self {
        TextCopyError::FileOperation(err.to_string())
    }
}

impl From<toml::ser::Error> for TextCopyError {
    fn from(err: toml::ser::Error) -> Self {
        TextCopyError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for TextCopyError {
    fn from(err: config::ConfigError) -> Self {
        TextCopyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TextCopyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            TextCopyError::invalid_code("invalid code").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TextCopyError::invalid_input("text is required").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TextCopyError::not_found("not found").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TextCopyError::config("bad port").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            TextCopyError::invalid_code(""),
            TextCopyError::not_found(""),
            TextCopyError::invalid_input(""),
            TextCopyError::config(""),
            TextCopyError::FileOperation(String::new()),
            TextCopyError::Serialization(String::new()),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = TextCopyError::not_found("not found");
        assert_eq!(err.to_string(), "Not Found: not found");
        assert_eq!(err.message(), "not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TextCopyError = io.into();
        assert!(matches!(err, TextCopyError::FileOperation(_)));
        assert_eq!(err.code(), "E005");
    }
}
