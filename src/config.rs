use crate::error::{MenuError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_CREDENTIALS: &str = "./credentials.json";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// スプレッドシートID（またはローカルのブック/JSONファイル）
    pub spreadsheet_id: Option<String>,
    /// Google認証情報ファイル
    pub credentials: PathBuf,
    /// HTTPタイムアウト（秒）
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spreadsheet_id: None,
            credentials: PathBuf::from(DEFAULT_CREDENTIALS),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl Config {
    /// 設定ファイル → 環境変数の順に読み込む
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };
        Ok(config.with_env())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MenuError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("menu-sheets").join("config.json"))
    }

    /// 環境変数を優先
    fn with_env(mut self) -> Self {
        if let Ok(id) = std::env::var("MENU_SPREADSHEET_ID") {
            if !id.trim().is_empty() {
                self.spreadsheet_id = Some(id);
            }
        }
        if let Ok(path) = std::env::var("MENU_CREDENTIALS") {
            if !path.trim().is_empty() {
                self.credentials = PathBuf::from(path);
            }
        }
        self
    }

    /// CLI引数で上書き
    pub fn merge_cli(mut self, spreadsheet_id: Option<String>, credentials: Option<PathBuf>) -> Self {
        if spreadsheet_id.is_some() {
            self.spreadsheet_id = spreadsheet_id;
        }
        if let Some(path) = credentials {
            self.credentials = path;
        }
        self
    }

    pub fn get_spreadsheet_id(&self) -> Result<&str> {
        self.spreadsheet_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                MenuError::Config(
                    "no spreadsheet id. Pass --spreadsheet-id or set MENU_SPREADSHEET_ID".into(),
                )
            })
    }
}
