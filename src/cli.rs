use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "menu-sheets")]
#[command(about = "Fetch today's and tomorrow's lunch/dinner menu from a monthly-tab spreadsheet", long_about = None)]
#[command(after_help = "Examples:\n  menu-sheets --spreadsheet-id \"1y-6rNDrafR7s...\" --credentials ./credentials.json\n  menu-sheets --spreadsheet-id \"1y-6rNDrafR7s...\" --date 17/07/2025\n  menu-sheets --spreadsheet-id ./menus.xlsx --date 30/06")]
pub struct Cli {
    /// スプレッドシートID（URL、ローカルの .xlsx/.ods/.json も可）
    #[arg(long)]
    pub spreadsheet_id: Option<String>,

    /// Google認証情報ファイル（デフォルト: ./credentials.json）
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// 対象日 (DD/MM または DD/MM/YYYY)。省略時は今日・明日
    #[arg(short, long)]
    pub date: Option<String>,

    /// DD/MM 形式の日付に使う年（省略時は今年）
    #[arg(long)]
    pub year: Option<i32>,

    /// JSONを整形して出力
    #[arg(long)]
    pub pretty: bool,

    /// 詳細ログを出力（標準エラー）
    #[arg(short, long)]
    pub verbose: bool,
}
