//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid format: {0}. Use JPG or PNG")]
    InvalidFormat(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_selection, OutputFormat};

    #[test]
    fn test_invalid_format_keeps_user_input() {
        let error = " gif ".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(&error, Error::InvalidFormat(s) if s == "gif"));
        assert_eq!(format!("{}", error), "Invalid format: gif. Use JPG or PNG");
    }

    #[test]
    fn test_invalid_selection_names_bad_part() {
        let error = parse_selection("1, 7", 3).unwrap_err();
        assert!(matches!(&error, Error::InvalidSelection(s) if s == "7"));
        assert_eq!(format!("{}", error), "Invalid selection: 7");
    }

    #[test]
    fn test_invalid_selection_empty_input() {
        let error = parse_selection("   ", 3).unwrap_err();
        assert!(matches!(&error, Error::InvalidSelection(s) if s.is_empty()));
        assert_eq!(format!("{}", error), "Invalid selection: ");
    }

    #[test]
    fn test_invalid_selection_zero_and_text() {
        for input in ["0", "a", "2,x"] {
            assert!(
                matches!(parse_selection(input, 3), Err(Error::InvalidSelection(_))),
                "{}",
                input
            );
        }
    }
}
