//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use menu_sheets::config::Config;
use menu_sheets::error::MenuError;
use menu_sheets::{SheetSource, open_source};
use menu_sheets::source::FixtureSource;
use std::path::PathBuf;
use tempfile::tempdir;

/// 認証情報ファイルがない場合
#[test]
fn test_missing_credentials_file() {
    let config = Config {
        spreadsheet_id: Some("1y-6rNDrafR7s".into()),
        credentials: PathBuf::from("/nonexistent/credentials.json"),
        ..Config::default()
    };
    let err = open_source(&config).err().expect("エラーになるべき");

    assert!(matches!(err, MenuError::CredentialsNotFound(_)));
    assert_eq!(
        err.to_string(),
        "Credentials file not found: /nonexistent/credentials.json"
    );
}

/// 認証情報ファイルの形式が不正な場合
#[test]
fn test_invalid_credentials_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let credentials = dir.path().join("credentials.json");
    std::fs::write(&credentials, r#"{"type": "unknown"}"#).unwrap();

    let config = Config {
        spreadsheet_id: Some("1y-6rNDrafR7s".into()),
        credentials,
        ..Config::default()
    };
    let err = open_source(&config).err().expect("エラーになるべき");
    assert!(matches!(err, MenuError::InvalidCredentials(_)));
}

/// スプレッドシートIDが未設定の場合
#[test]
fn test_missing_spreadsheet_id() {
    let err = open_source(&Config::default()).err().expect("エラーになるべき");
    assert!(matches!(err, MenuError::Config(_)));
}

/// 壊れたフィクスチャ
#[test]
fn test_broken_fixture_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("menus.json");
    std::fs::write(&path, "{ invalid }").unwrap();

    let result = FixtureSource::from_file(&path);
    assert!(matches!(result, Err(MenuError::Json(_))));
}

/// フィクスチャファイルを設定から開く
#[test]
fn test_fixture_from_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("menus.json");
    std::fs::write(
        &path,
        r#"{"Juin": [["", "lundi 30/06"], ["Midi", "Pates"], ["Soir", "Soupe"]]}"#,
    )
    .unwrap();

    let config = Config {
        spreadsheet_id: Some(path.to_string_lossy().to_string()),
        ..Config::default()
    };
    let mut source = open_source(&config).expect("フィクスチャを開けない");
    assert_eq!(source.list_tabs().unwrap(), vec!["Juin"]);
}

/// MenuErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MenuError::Config("設定".to_string()),
        MenuError::CredentialsNotFound("credentials.json".to_string()),
        MenuError::InvalidCredentials("missing field".to_string()),
        MenuError::Auth("invalid_grant".to_string()),
        MenuError::Transport("timeout".to_string()),
        MenuError::TabNotFound("Aout".to_string()),
        MenuError::Fetch {
            tab: "Juin".to_string(),
            message: "HTTP 500".to_string(),
        },
        MenuError::Workbook("broken".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// タブ探索の失敗と致命的エラーの区別
#[test]
fn test_probe_miss_classification() {
    assert!(MenuError::TabNotFound("Aout".into()).is_probe_miss());
    assert!(MenuError::Fetch {
        tab: "Aout".into(),
        message: "timeout".into()
    }
    .is_probe_miss());
    assert!(!MenuError::Auth("invalid_grant".into()).is_probe_miss());
    assert!(!MenuError::Transport("refused".into()).is_probe_miss());
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = menu_sheets_common::Error::InvalidDate("32/01".to_string());
    let err: MenuError = common_err.into();

    assert!(matches!(err, MenuError::Common(_)));
    assert_eq!(
        err.to_string(),
        "Invalid date format '32/01'. Expected DD/MM or DD/MM/YYYY"
    );
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MenuError = io_err.into();
    assert!(matches!(err, MenuError::Io(_)));
}
