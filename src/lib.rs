pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod source;

pub use resolver::{MenuBatch, MenuResolver, TabOutcome, TabStatus};
pub use source::{SheetSource, open_source};

use chrono::{Datelike, NaiveDate};
use error::Result;
use menu_sheets_common::{MenuReport, parse_target_date, today_and_tomorrow};

/// 対象日（指定がなければ今日）
pub fn target_date(date: Option<&str>, year: Option<i32>, today: NaiveDate) -> Result<NaiveDate> {
    match date {
        Some(input) => Ok(parse_target_date(input, year.unwrap_or(today.year()))?),
        None => Ok(today),
    }
}

/// 対象日と翌日の献立を取得
///
/// 接続・認証の失敗のみエラー。日付が見つからない場合は空文字のレコードになる。
pub fn fetch_report(source: &mut dyn SheetSource, date: NaiveDate) -> Result<MenuReport> {
    let [today, tomorrow] = today_and_tomorrow(date);

    let batch = MenuResolver::connect(source)?.resolve_all(&[today, tomorrow]);
    for failed in batch.failed_tabs() {
        tracing::warn!("tab '{}' could not be read: {:?}", failed.tab, failed.status);
    }
    tracing::debug!("resolved {}/2 dates", batch.len());

    Ok(batch.report(today, tomorrow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_target_date_defaults_to_today() {
        let today = date(2025, 10, 17);
        assert_eq!(target_date(None, None, today).unwrap(), today);
    }

    #[test]
    fn test_target_date_uses_current_year() {
        let today = date(2025, 10, 17);
        assert_eq!(target_date(Some("30/06"), None, today).unwrap(), date(2025, 6, 30));
        assert_eq!(target_date(Some("30/06"), Some(2024), today).unwrap(), date(2024, 6, 30));
        assert_eq!(
            target_date(Some("30/06/2023"), Some(2024), today).unwrap(),
            date(2023, 6, 30)
        );
    }

    #[test]
    fn test_target_date_invalid() {
        let err = target_date(Some("31/06"), None, date(2025, 1, 1)).unwrap_err();
        assert!(matches!(err, MenuError::Common(_)));
        assert!(err.to_string().contains("Expected DD/MM or DD/MM/YYYY"));
    }
}
