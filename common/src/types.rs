//! 献立データの型定義
//!
//! - Meals: 1日分の昼・夜テキスト
//! - MenuEntry: 日付付きの抽出結果
//! - DayMenu / MenuReport: CLIが標準出力に書くJSON
//! - ErrorReport: 失敗時に標準エラーに書くJSON

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 表示用日付フォーマット（例: "Monday 30/06/2025"）
pub const DISPLAY_DATE_FORMAT: &str = "%A %d/%m/%Y";

/// 1日分の献立（見つからない場合は空文字）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meals {
    pub lunch: String,
    pub dinner: String,
}

/// 抽出結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub date: NaiveDate,
    pub lunch: String,
    pub dinner: String,
}

impl MenuEntry {
    pub fn new(date: NaiveDate, meals: Meals) -> Self {
        Self {
            date,
            lunch: meals.lunch,
            dinner: meals.dinner,
        }
    }
}

/// 出力JSONの1日分
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMenu {
    /// "Weekday DD/MM/YYYY"
    pub date: String,
    pub midi: String,
    pub soir: String,
}

impl DayMenu {
    /// 抽出結果から作成（未取得の日は空文字）
    pub fn from_entry(date: NaiveDate, entry: Option<&MenuEntry>) -> Self {
        Self {
            date: date.format(DISPLAY_DATE_FORMAT).to_string(),
            midi: entry.map(|e| e.lunch.clone()).unwrap_or_default(),
            soir: entry.map(|e| e.dinner.clone()).unwrap_or_default(),
        }
    }
}

/// 標準出力に書くレコード
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuReport {
    pub today: DayMenu,
    pub tomorrow: DayMenu,
}

/// 標準エラーに書くレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
    pub success: bool,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            success: false,
        }
    }
}
