//! 月タブの選択
//!
//! スプレッドシートは1ヶ月1タブ（年なし、アクセントなしのフランス語月名）。
//! 月初・月末の日付は隣の月のタブに載っていることがあるため、
//! 対象日ごとに探索するタブ候補を順序付きで返す。

use chrono::{Datelike, NaiveDate};

/// 月番号 → タブ名（1月始まり）
pub const MONTH_TABS: [&str; 12] = [
    "Janvier",
    "Fevrier",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Aout",
    "Septembre",
    "Octobre",
    "Novembre",
    "Decembre",
];

/// 月初・月末とみなす日数
const EDGE_DAYS: u32 = 7;

/// 月番号（1-12）からタブ名を取得
pub fn month_tab(month: u32) -> Option<&'static str> {
    match month {
        1..=12 => Some(MONTH_TABS[(month - 1) as usize]),
        _ => None,
    }
}

/// タブ名から月番号を逆引き（大文字小文字・前後空白は無視）
pub fn month_for_tab(tab: &str) -> Option<u32> {
    let tab = tab.trim();
    MONTH_TABS
        .iter()
        .position(|name| name.eq_ignore_ascii_case(tab))
        .map(|idx| idx as u32 + 1)
}

fn previous_month(month: u32) -> u32 {
    if month > 1 { month - 1 } else { 12 }
}

fn next_month(month: u32) -> u32 {
    if month < 12 { month + 1 } else { 1 }
}

/// 月の日数
///
/// 12月は31日固定。それ以外は翌月1日の前日から求める。
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        return 31;
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// 対象日に対して探索するタブ候補
///
/// 順序: [前月（1-7日のみ）, 当月, 翌月（月末7日以内のみ）]
///
/// 呼び出し側はこの順に探索し、日付が見つかった最初のタブを採用する。
/// 月初の日付は前月タブが先に試される点に注意。
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use menu_sheets_common::tab_candidates;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
/// assert_eq!(tab_candidates(date), vec!["Fevrier", "Mars"]);
/// ```
pub fn tab_candidates(date: NaiveDate) -> Vec<&'static str> {
    let month = date.month();
    let day = date.day();

    let mut months = vec![month];

    if day <= EDGE_DAYS {
        months.insert(0, previous_month(month));
    }

    let last_day = days_in_month(date.year(), month);
    if day + EDGE_DAYS >= last_day {
        months.push(next_month(month));
    }

    months.into_iter().filter_map(month_tab).collect()
}
