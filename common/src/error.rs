//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column length mismatch: {column} (expected {expected}, got {actual})")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Date parse error: {value:?} (format {format})")]
    DateParse { value: String, format: String },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_length_mismatch() {
        let error = Error::LengthMismatch {
            column: "color_cat".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            format!("{}", error),
            "Column length mismatch: color_cat (expected 3, got 2)"
        );
    }

    #[test]
    fn test_error_display_date_parse() {
        let error = Error::DateParse {
            value: "2023-06".to_string(),
            format: "%Y%m%d".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("\"2023-06\""));
        assert!(display.contains("%Y%m%d"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::ColumnNotFound("care_addr".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("ColumnNotFound"));
        assert!(debug.contains("care_addr"));
    }
}
