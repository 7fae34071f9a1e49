//! 対象日の解析
//!
//! CLIで受け付ける "DD/MM" / "DD/MM/YYYY" 形式を扱う。
//! タブには年が含まれないため、"DD/MM" の年は呼び出し側が明示的に渡す。

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// 日付文字列をパース
///
/// # Arguments
/// * `input` - "DD/MM" または "DD/MM/YYYY"
/// * `year` - "DD/MM" の場合に使う年
///
/// # Examples
/// ```
/// use menu_sheets_common::parse_target_date;
///
/// let date = parse_target_date("17/07", 2025).unwrap();
/// assert_eq!(date.to_string(), "2025-07-17");
/// ```
pub fn parse_target_date(input: &str, year: i32) -> Result<NaiveDate> {
    let invalid = || Error::InvalidDate(input.to_string());

    let parts: Vec<&str> = input.trim().split('/').collect();
    let (day, month, year) = match parts.as_slice() {
        [d, m] => (parse_part::<u32>(d), parse_part::<u32>(m), Some(year)),
        [d, m, y] => (parse_part::<u32>(d), parse_part::<u32>(m), parse_part::<i32>(y)),
        _ => return Err(invalid()),
    };

    match (day, month, year) {
        (Some(d), Some(m), Some(y)) => NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn parse_part<T: std::str::FromStr>(part: &str) -> Option<T> {
    let part = part.trim();
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// 対象日と翌日
pub fn today_and_tomorrow(today: NaiveDate) -> [NaiveDate; 2] {
    let tomorrow = today.succ_opt().unwrap_or(today);
    [today, tomorrow]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_month_uses_given_year() {
        let date = parse_target_date("30/06", 2025).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    }

    #[test]
    fn test_parse_full_date() {
        let date = parse_target_date("17/07/2024", 2025).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 7, 17).unwrap());
    }

    #[test]
    fn test_parse_single_digit_parts() {
        let date = parse_target_date("1/7", 2025).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "30", "30-06", "32/01", "29/02/2025", "aa/bb", "1/2/3/4", "-1/06"] {
            let err = parse_target_date(input, 2025).unwrap_err();
            assert!(matches!(err, Error::InvalidDate(_)), "{input}");
        }
    }

    #[test]
    fn test_parse_leap_day() {
        assert!(parse_target_date("29/02", 2024).is_ok());
        assert!(parse_target_date("29/02", 2025).is_err());
    }

    #[test]
    fn test_today_and_tomorrow_crosses_month() {
        let [today, tomorrow] = today_and_tomorrow(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        assert_eq!(today.to_string(), "2025-06-30");
        assert_eq!(tomorrow.to_string(), "2025-07-01");
    }
}
