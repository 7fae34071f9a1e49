//! ローカルのブック（Googleスプレッドシートのエクスポート等）を読む

use super::{SheetSource, pad_to_origin};
use crate::error::{MenuError, Result};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use menu_sheets_common::Grid;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub struct WorkbookSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl WorkbookSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MenuError::Workbook(format!("file not found: {}", path.display())));
        }
        let workbook = open_workbook_auto(path)
            .map_err(|e| MenuError::Workbook(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            path: path.to_path_buf(),
            workbook,
        })
    }
}

/// セル範囲を文字列グリッドに変換（A1起点に揃える）
fn range_to_grid(range: &Range<Data>) -> Grid {
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    pad_to_origin(rows, start_row, start_col)
}

impl SheetSource for WorkbookSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn list_tabs(&mut self) -> Result<Vec<String>> {
        Ok(self.workbook.sheet_names())
    }

    fn fetch_grid(&mut self, tab: &str) -> Result<Grid> {
        if !self.workbook.sheet_names().iter().any(|name| name == tab) {
            return Err(MenuError::TabNotFound(tab.to_string()));
        }

        let range = self.workbook.worksheet_range(tab).map_err(|e| MenuError::Fetch {
            tab: tab.to_string(),
            message: e.to_string(),
        })?;

        Ok(range_to_grid(&range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let result = WorkbookSource::open(Path::new("/nonexistent/menus.xlsx"));
        assert!(matches!(result, Err(MenuError::Workbook(_))));
    }

    #[test]
    fn test_open_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip").unwrap();
        assert!(matches!(WorkbookSource::open(&path), Err(MenuError::Workbook(_))));
    }

    #[test]
    fn test_range_to_grid_pads_offset() {
        let mut range = Range::new((1, 1), (2, 2));
        range.set_value((1, 2), Data::String("lundi 30/06".into()));
        range.set_value((2, 1), Data::String("Midi".into()));
        range.set_value((2, 2), Data::String("Pates".into()));

        let grid = range_to_grid(&range);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.cell(1, 0), "");
        assert_eq!(grid.cell(1, 1), "");
        assert_eq!(grid.cell(1, 2), "lundi 30/06");
        assert_eq!(grid.cell(2, 1), "Midi");
        assert_eq!(grid.cell(2, 2), "Pates");
    }

    #[test]
    fn test_range_to_grid_empty() {
        let range: Range<Data> = Range::empty();
        assert!(range_to_grid(&range).is_empty());
    }
}
