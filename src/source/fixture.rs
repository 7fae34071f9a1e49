//! JSONフィクスチャ（オフライン確認・テスト用）
//!
//! 形式: `{"Juin": [["", "lundi 30/06"], ["Midi", "Pates"]], ...}`

use super::SheetSource;
use crate::error::{MenuError, Result};
use menu_sheets_common::Grid;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    name: String,
    tabs: BTreeMap<String, Grid>,
    /// タブ名 → 取得回数
    fetches: HashMap<String, usize>,
}

impl FixtureSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut source = Self::from_json(&content)?;
        source.name = path.display().to_string();
        Ok(source)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let tabs: BTreeMap<String, Grid> = serde_json::from_str(json)?;
        Ok(Self {
            name: "fixture".into(),
            tabs,
            fetches: HashMap::new(),
        })
    }

    /// タブを追加
    pub fn with_tab(mut self, tab: impl Into<String>, grid: Grid) -> Self {
        self.tabs.insert(tab.into(), grid);
        self
    }

    /// タブの取得回数
    pub fn fetch_count(&self, tab: &str) -> usize {
        self.fetches.get(tab).copied().unwrap_or(0)
    }

    /// 全タブの取得回数合計
    pub fn total_fetches(&self) -> usize {
        self.fetches.values().sum()
    }
}

impl SheetSource for FixtureSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn list_tabs(&mut self) -> Result<Vec<String>> {
        Ok(self.tabs.keys().cloned().collect())
    }

    fn fetch_grid(&mut self, tab: &str) -> Result<Grid> {
        *self.fetches.entry(tab.to_string()).or_insert(0) += 1;
        self.tabs
            .get(tab)
            .cloned()
            .ok_or_else(|| MenuError::TabNotFound(tab.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let mut source = FixtureSource::from_json(
            r#"{"Juin": [["", "lundi 30/06"], ["Midi", "Pates"]], "Juillet": []}"#,
        )
        .unwrap();

        assert_eq!(source.list_tabs().unwrap(), vec!["Juillet", "Juin"]);
        let grid = source.fetch_grid("Juin").unwrap();
        assert_eq!(grid.cell(1, 1), "Pates");
        assert_eq!(source.fetch_count("Juin"), 1);
    }

    #[test]
    fn test_missing_tab_counts_fetch() {
        let mut source = FixtureSource::new("empty");
        let err = source.fetch_grid("Mai").unwrap_err();
        assert!(matches!(err, MenuError::TabNotFound(_)));
        assert_eq!(source.fetch_count("Mai"), 1);
        assert_eq!(source.total_fetches(), 1);
    }

    #[test]
    fn test_invalid_json() {
        let err = FixtureSource::from_json(r#"{"Juin": "pas une grille"}"#).unwrap_err();
        assert!(matches!(err, MenuError::Json(_)));
    }
}
