//! グリッド走査・献立抽出
//!
//! タブの内容はスキーマのない2次元セル配列。想定レイアウト:
//!
//! ```text
//! |      | lundi 30/06 | mardi 01/07 |
//! | Midi | Pates       | Riz         |
//! | Soir | Soupe       | Salade      |
//! ```
//!
//! 行の分類（ヘッダ候補 / ラベル行 / その他）と列の照合は分けて行う。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Meals;

/// 食事区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meal {
    /// 昼（"Midi"）
    Lunch,
    /// 夜（"Soir"）
    Dinner,
}

impl Meal {
    /// 行ラベル（小文字）
    pub fn label(&self) -> &'static str {
        match self {
            Meal::Lunch => "midi",
            Meal::Dinner => "soir",
        }
    }

    /// 日付行からの行オフセット
    pub fn row_offset(&self) -> usize {
        match self {
            Meal::Lunch => 1,
            Meal::Dinner => 2,
        }
    }
}

/// 行の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// 1列目が空で2列以上ある行（日付ヘッダの可能性あり）
    HeaderCandidate,
    /// 1列目が "Midi" / "Soir" の行
    Label(Meal),
    /// それ以外
    Other,
}

/// 行を分類する
pub fn classify_row(row: &[String]) -> RowKind {
    let first = match row.first() {
        Some(cell) => cell.trim(),
        None => return RowKind::Other,
    };

    if first.is_empty() {
        return if row.len() > 1 { RowKind::HeaderCandidate } else { RowKind::Other };
    }

    let label = first.to_lowercase();
    [Meal::Lunch, Meal::Dinner]
        .into_iter()
        .find(|meal| meal.label() == label)
        .map_or(RowKind::Other, RowKind::Label)
}

/// 日付の照合キー（"DD/MM"、ゼロ埋め）
pub fn date_key(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// セルから "DD/MM" 候補トークンを取り出す
///
/// "lundi 30/06" → Some("30/06")。空白を含まないセルは対象外。
pub fn date_token(cell: &str) -> Option<&str> {
    let cell = cell.trim();
    if cell.is_empty() || !cell.contains(' ') {
        return None;
    }
    cell.split_whitespace().last()
}

/// タブ1枚分のセル配列
///
/// 行ごとに長さが異なってよい。範囲外のセルは空文字として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// セル参照（範囲外は空文字）
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// 全セルを走査して日付が存在するか確認する（タブ判定用の軽量チェック）
    pub fn contains_date(&self, key: &str) -> bool {
        self.rows
            .iter()
            .flatten()
            .any(|cell| date_token(cell) == Some(key))
    }

    /// ヘッダ候補行から日付の位置 (行, 列) を探す
    ///
    /// 上から順に走査し、最初に一致した位置を返す。
    pub fn locate_date(&self, key: &str) -> Option<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| classify_row(row) == RowKind::HeaderCandidate)
            .find_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .skip(1)
                    .find(|(_, cell)| date_token(cell) == Some(key))
                    .map(|(c, _)| (i, c))
            })
    }

    /// 日付列の下のラベル行から1食分のテキストを読む
    fn meal_below(&self, header_row: usize, col: usize, meal: Meal) -> String {
        let row = match self.rows.get(header_row + meal.row_offset()) {
            Some(row) => row,
            None => return String::new(),
        };

        if row.len() <= col || classify_row(row) != RowKind::Label(meal) {
            return String::new();
        }

        row[col].trim().to_string()
    }

    /// 対象日の献立を抽出する
    ///
    /// 見つからない場合は空文字を返す（エラーにはならない）。
    pub fn extract(&self, date: NaiveDate) -> Meals {
        let key = date_key(date);
        match self.locate_date(&key) {
            Some((row, col)) => Meals {
                lunch: self.meal_below(row, col, Meal::Lunch),
                dinner: self.meal_below(row, col, Meal::Dinner),
            },
            None => Meals::default(),
        }
    }
}

impl From<Vec<Vec<String>>> for Grid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

/// `Grid::extract` の関数版
pub fn extract(grid: &Grid, date: NaiveDate) -> Meals {
    grid.extract(date)
}
