//! Menu Sheets Common Library
//!
//! 月別タブの献立表から日付ごとの昼・夜メニューを取り出すコア処理。
//! I/Oを含まない純粋な関数のみ。

pub mod date;
pub mod error;
pub mod grid;
pub mod tabs;
pub mod types;

pub use date::{parse_target_date, today_and_tomorrow};
pub use error::{Error, Result};
pub use grid::{Grid, Meal, RowKind, classify_row, date_key, date_token, extract};
pub use tabs::{MONTH_TABS, days_in_month, month_for_tab, month_tab, tab_candidates};
pub use types::{DayMenu, ErrorReport, Meals, MenuEntry, MenuReport};
