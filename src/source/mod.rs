//! 献立データの取得元
//!
//! - Google Sheets API（スプレッドシートID / URL）
//! - ローカルのブック（.xlsx / .xlsm / .xls / .ods）
//! - JSONフィクスチャ（タブ名 → 行配列）
//!
//! どの取得元も読み取り専用。

mod fixture;
mod google;
mod workbook;

pub use fixture::FixtureSource;
pub use google::{Credentials, GoogleSheets};
pub use workbook::WorkbookSource;

use crate::config::Config;
use crate::error::{MenuError, Result};
use menu_sheets_common::Grid;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Duration;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// タブ単位でグリッドを返す取得元
pub trait SheetSource {
    /// ログ用の表示名
    fn name(&self) -> String;

    /// タブ名一覧
    fn list_tabs(&mut self) -> Result<Vec<String>>;

    /// タブ全体のセル値を取得
    ///
    /// タブが存在しない場合は `MenuError::TabNotFound`。
    fn fetch_grid(&mut self, tab: &str) -> Result<Grid>;
}

/// 取得元の種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    GoogleSheets(String),
    Workbook(PathBuf),
    Fixture(PathBuf),
}

impl SourceKind {
    /// 引数から取得元を判定
    ///
    /// 既存ファイルなら拡張子で判定し、それ以外はスプレッドシートID（またはURL）とみなす。
    pub fn detect(source: &str) -> Self {
        let path = Path::new(source);
        if path.is_file() {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
                return SourceKind::Workbook(path.to_path_buf());
            }
            if ext == "json" {
                return SourceKind::Fixture(path.to_path_buf());
            }
        }
        SourceKind::GoogleSheets(spreadsheet_id_from(source))
    }
}

/// URLが渡された場合はIDを取り出す
///
/// `https://docs.google.com/spreadsheets/d/<ID>/edit#gid=0` → `<ID>`
pub fn spreadsheet_id_from(source: &str) -> String {
    lazy_static::lazy_static! {
        static ref SHEET_URL_RE: Regex = Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").unwrap();
    }
    match SHEET_URL_RE.captures(source) {
        Some(caps) => caps[1].to_string(),
        None => source.trim().to_string(),
    }
}

/// 設定から取得元を開く
///
/// Google Sheetsの場合はここで認証まで行う（失敗は致命的エラー）。
pub fn open_source(config: &Config) -> Result<Box<dyn SheetSource>> {
    let source = config.get_spreadsheet_id()?;

    match SourceKind::detect(source) {
        SourceKind::Workbook(path) => Ok(Box::new(WorkbookSource::open(&path)?)),
        SourceKind::Fixture(path) => Ok(Box::new(FixtureSource::from_file(&path)?)),
        SourceKind::GoogleSheets(id) => {
            if !config.credentials.is_file() {
                return Err(MenuError::CredentialsNotFound(
                    config.credentials.display().to_string(),
                ));
            }
            let credentials = Credentials::from_file(&config.credentials)?;
            let timeout = Duration::from_secs(config.timeout_seconds);
            Ok(Box::new(GoogleSheets::connect(id, &credentials, timeout)?))
        }
    }
}

/// 使用範囲の開始位置まで空行・空セルで埋め、A1起点のグリッドにする
///
/// 1列目（ラベル列）の位置を保つために必要。
pub(crate) fn pad_to_origin(rows: Vec<Vec<String>>, start_row: usize, start_col: usize) -> Grid {
    let mut padded = vec![Vec::new(); start_row];
    padded.extend(rows.into_iter().map(|row| {
        if start_col == 0 || row.is_empty() {
            return row;
        }
        let mut cells = vec![String::new(); start_col];
        cells.extend(row);
        cells
    }));
    Grid::new(padded)
}
