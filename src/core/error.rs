use std::fmt;

/// Comprehensive error types for toolaudit operations
#[derive(Debug)]
pub enum ToolAuditError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// JSON encoding or decoding error (reports, data file array)
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Regex compilation error
    Regex(regex::Error),

    /// File not found error
    FileNotFound(String),

    /// The tool data file does not contain a usable array literal
    DataFile(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for ToolAuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolAuditError::Io(err) => write!(f, "IO error: {err}"),
            ToolAuditError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ToolAuditError::Http(err) => write!(f, "HTTP error: {err}"),
            ToolAuditError::Json(err) => write!(f, "JSON error: {err}"),
            ToolAuditError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            ToolAuditError::Regex(err) => write!(f, "Regex error: {err}"),
            ToolAuditError::FileNotFound(path) => write!(f, "File not found: {path}"),
            ToolAuditError::DataFile(msg) => write!(f, "Tool data error: {msg}"),
            ToolAuditError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ToolAuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolAuditError::Io(err) => Some(err),
            ToolAuditError::Http(err) => Some(err),
            ToolAuditError::Json(err) => Some(err),
            ToolAuditError::TomlParsing(err) => Some(err),
            ToolAuditError::Regex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ToolAuditError {
    fn from(err: std::io::Error) -> Self {
        ToolAuditError::Io(err)
    }
}

impl From<reqwest::Error> for ToolAuditError {
    fn from(err: reqwest::Error) -> Self {
        ToolAuditError::Http(err)
    }
}

impl From<serde_json::Error> for ToolAuditError {
    fn from(err: serde_json::Error) -> Self {
        ToolAuditError::Json(err)
    }
}

impl From<toml::de::Error> for ToolAuditError {
    fn from(err: toml::de::Error) -> Self {
        ToolAuditError::TomlParsing(err)
    }
}

impl From<regex::Error> for ToolAuditError {
    fn from(err: regex::Error) -> Self {
        ToolAuditError::Regex(err)
    }
}

/// Type alias for Results using ToolAuditError
pub type Result<T> = std::result::Result<T, ToolAuditError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = ToolAuditError::Config("Invalid timeout".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid timeout"
        );

        let file_error = ToolAuditError::FileNotFound("/path/to/toolData.js".to_string());
        assert_eq!(
            format!("{file_error}"),
            "File not found: /path/to/toolData.js"
        );

        let data_error = ToolAuditError::DataFile("no array literal".to_string());
        assert_eq!(format!("{data_error}"), "Tool data error: no array literal");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let error = ToolAuditError::from(io_error);

        match error {
            ToolAuditError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("[1, 2").unwrap_err();
        let error = ToolAuditError::from(json_error);

        match error {
            ToolAuditError::Json(_) => {} // Expected
            _ => panic!("Expected Json variant"),
        }
    }

    #[test]
    #[allow(clippy::invalid_regex)]
    fn test_error_from_regex() {
        let regex_error = regex::Regex::new("[invalid").unwrap_err();
        let error = ToolAuditError::from(regex_error);

        match error {
            ToolAuditError::Regex(_) => {} // Expected
            _ => panic!("Expected Regex variant"),
        }
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let error = ToolAuditError::from(toml_error);

        match error {
            ToolAuditError::TomlParsing(_) => {} // Expected
            _ => panic!("Expected TomlParsing variant"),
        }
    }

    #[test]
    fn test_string_error_variants_display() {
        let errors = vec![
            ToolAuditError::Config("Bad config".to_string()),
            ToolAuditError::FileNotFound("/missing".to_string()),
            ToolAuditError::DataFile("Bad data".to_string()),
            ToolAuditError::InvalidArgument("Bad arg".to_string()),
        ];

        for error in errors {
            let display_str = format!("{error}");
            assert!(!display_str.is_empty());
            assert!(display_str.contains(':'));
        }
    }

    #[test]
    fn test_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        assert!(ToolAuditError::Io(io_error).source().is_some());
        assert!(ToolAuditError::Config("test".to_string()).source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ToolAuditError>();
    }
}
