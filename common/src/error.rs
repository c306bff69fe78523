//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rule table error: {0}")]
    RuleTable(#[from] toml::de::Error),

    #[error("Invalid {set} pattern `{pattern}`: {source}")]
    InvalidPattern {
        set: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unsupported rule table version: {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_rule_table() {
        let toml_error = toml::from_str::<toml::Value>("version = ").unwrap_err();
        let error = Error::RuleTable(toml_error);
        assert!(format!("{}", error).contains("Rule table error"));
    }

    #[test]
    fn test_error_display_invalid_pattern() {
        let regex_error = regex::Regex::new("(unclosed").unwrap_err();
        let error = Error::InvalidPattern {
            set: "model",
            pattern: "(unclosed".to_string(),
            source: regex_error,
        };
        let display = format!("{}", error);
        assert!(display.contains("model"));
        assert!(display.contains("(unclosed"));
    }

    #[test]
    fn test_error_display_version() {
        let error = Error::UnsupportedVersion { found: 9, supported: 1 };
        assert_eq!(
            format!("{}", error),
            "Unsupported rule table version: 9 (supported: 1)"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }
}
