//! 日付 → タブの解決と一括取得
//!
//! 1. 日付ごとにタブ候補を順に探索し、日付を含む最初のタブを採用
//! 2. 採用タブごとに日付をまとめる
//! 3. タブ1枚につき1回だけ取得したグリッドから各日付の献立を抽出
//!
//! 取得したグリッドは `resolve_all` の呼び出し中だけ保持する。

use crate::error::{MenuError, Result};
use crate::source::SheetSource;
use chrono::NaiveDate;
use menu_sheets_common::{
    DayMenu, Grid, MenuEntry, MenuReport, date_key, month_for_tab, tab_candidates,
};
use std::collections::{BTreeMap, HashMap};

/// タブ取得の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabStatus {
    Fetched,
    NotFound,
    FetchError(String),
}

/// タブごとの取得結果（部分的な失敗の確認用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabOutcome {
    pub tab: String,
    pub status: TabStatus,
}

/// 一括取得の結果
#[derive(Debug, Clone, Default)]
pub struct MenuBatch {
    /// 解決できた日付のみ（未解決の日付はキーなし）
    pub entries: BTreeMap<NaiveDate, MenuEntry>,
    pub outcomes: Vec<TabOutcome>,
}

impl MenuBatch {
    pub fn get(&self, date: NaiveDate) -> Option<&MenuEntry> {
        self.entries.get(&date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 取得に失敗したタブ
    pub fn failed_tabs(&self) -> impl Iterator<Item = &TabOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TabStatus::FetchError(_)))
    }

    /// 今日・明日のレコードを作成（未取得の日は空文字）
    pub fn report(&self, today: NaiveDate, tomorrow: NaiveDate) -> MenuReport {
        MenuReport {
            today: DayMenu::from_entry(today, self.get(today)),
            tomorrow: DayMenu::from_entry(tomorrow, self.get(tomorrow)),
        }
    }
}

pub struct MenuResolver<'a> {
    source: &'a mut dyn SheetSource,
    /// 取得元のタブ一覧（`connect` 時のみ）
    tabs: Option<Vec<String>>,
    /// タブ名 → グリッド（取得失敗は None）
    grids: HashMap<String, Option<Grid>>,
    outcomes: Vec<TabOutcome>,
}

impl<'a> MenuResolver<'a> {
    /// タブ一覧を使わずに作成（候補タブを直接取得する）
    pub fn new(source: &'a mut dyn SheetSource) -> Self {
        Self {
            source,
            tabs: None,
            grids: HashMap::new(),
            outcomes: Vec::new(),
        }
    }

    /// タブ一覧を取得して作成
    ///
    /// 接続確認を兼ねるため、ここでの失敗は一括処理全体の失敗として返す。
    pub fn connect(source: &'a mut dyn SheetSource) -> Result<Self> {
        let tabs = source.list_tabs()?;
        tracing::debug!("{}: {} tabs {:?}", source.name(), tabs.len(), tabs);
        let mut resolver = Self::new(source);
        resolver.tabs = Some(tabs);
        Ok(resolver)
    }

    /// 候補の月名を実際のタブ名に対応付ける
    ///
    /// 一覧がある場合は完全一致を優先し、なければ前後空白・大文字小文字の違いを許す。
    /// 一覧にない月は None（取得しない）。
    fn tab_title(&self, candidate: &str) -> Option<String> {
        let tabs = match &self.tabs {
            Some(tabs) => tabs,
            None => return Some(candidate.to_string()),
        };

        if let Some(exact) = tabs.iter().find(|t| t.as_str() == candidate) {
            return Some(exact.clone());
        }
        let month = month_for_tab(candidate)?;
        tabs.iter().find(|t| month_for_tab(t) == Some(month)).cloned()
    }

    fn record(&mut self, tab: &str, status: TabStatus) {
        self.outcomes.push(TabOutcome {
            tab: tab.to_string(),
            status,
        });
    }

    /// グリッドを取得（同じタブは2回取得しない）
    fn grid(&mut self, tab: &str) -> Option<&Grid> {
        if !self.grids.contains_key(tab) {
            let fetched = match self.source.fetch_grid(tab) {
                Ok(grid) => {
                    tracing::debug!("fetched tab '{}' ({} rows)", tab, grid.row_count());
                    self.record(tab, TabStatus::Fetched);
                    Some(grid)
                }
                Err(MenuError::TabNotFound(_)) => {
                    tracing::debug!("tab '{}' not found", tab);
                    self.record(tab, TabStatus::NotFound);
                    None
                }
                Err(e) if e.is_probe_miss() => {
                    tracing::warn!("skipping tab '{}': {}", tab, e);
                    self.record(tab, TabStatus::FetchError(e.to_string()));
                    None
                }
                Err(e) => {
                    // 接続確認後の通信・認証エラーもこのタブだけの失敗として扱う
                    tracing::error!("tab '{}' failed: {}", tab, e);
                    self.record(tab, TabStatus::FetchError(e.to_string()));
                    None
                }
            };
            self.grids.insert(tab.to_string(), fetched);
        }
        self.grids.get(tab).and_then(Option::as_ref)
    }

    /// タブ一覧にない月（取得せずに NotFound として1回だけ記録）
    fn missing_tab(&mut self, candidate: &str) {
        if self.grids.contains_key(candidate) {
            return;
        }
        tracing::debug!("tab '{}' not in spreadsheet", candidate);
        self.record(candidate, TabStatus::NotFound);
        self.grids.insert(candidate.to_string(), None);
    }

    /// 対象日を含むタブを探す
    ///
    /// 見つからない場合は None（エラーではない）。
    pub fn resolve(&mut self, date: NaiveDate) -> Option<String> {
        let key = date_key(date);

        for candidate in tab_candidates(date) {
            let title = match self.tab_title(candidate) {
                Some(title) => title,
                None => {
                    self.missing_tab(candidate);
                    continue;
                }
            };

            let found = self
                .grid(&title)
                .map(|grid| grid.contains_date(&key))
                .unwrap_or(false);
            if found {
                tracing::debug!("{} -> tab '{}'", key, title);
                return Some(title);
            }
        }

        tracing::info!("{} not found in any candidate tab", key);
        None
    }

    /// 複数日付の献立を一括取得
    ///
    /// 一部のタブの失敗では中断せず、該当する日付が結果から欠けるだけ。
    pub fn resolve_all(mut self, dates: &[NaiveDate]) -> MenuBatch {
        let mut groups: BTreeMap<String, Vec<NaiveDate>> = BTreeMap::new();
        for &date in dates {
            if let Some(tab) = self.resolve(date) {
                groups.entry(tab).or_default().push(date);
            }
        }

        let mut entries = BTreeMap::new();
        for (tab, dates) in &groups {
            let grid = match self.grid(tab) {
                Some(grid) => grid,
                None => continue,
            };
            for &date in dates {
                entries.insert(date, MenuEntry::new(date, grid.extract(date)));
            }
        }

        MenuBatch {
            entries,
            outcomes: self.outcomes,
        }
    }
}
