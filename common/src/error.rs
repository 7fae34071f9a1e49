//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid date format '{0}'. Expected DD/MM or DD/MM/YYYY")]
    InvalidDate(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_date() {
        let error = Error::InvalidDate("32/13".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid date format '32/13'. Expected DD/MM or DD/MM/YYYY"
        );
    }
}
