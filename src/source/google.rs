//! Google Sheets API v4 クライアント（読み取り専用・同期）
//!
//! 認証情報ファイルは2種類に対応:
//! - `service_account`: RS256署名のJWTをアクセストークンに交換
//! - `authorized_user`: リフレッシュトークンでアクセストークンを取得

use super::{SheetSource, pad_to_origin};
use crate::error::{MenuError, Result};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use menu_sheets_common::Grid;
use regex::Regex;
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_API_URL: &str = "https://sheets.googleapis.com";
const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Google認証情報ファイル
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    ServiceAccount {
        client_email: String,
        private_key: String,
        #[serde(default)]
        token_uri: Option<String>,
    },
    AuthorizedUser {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
}

impl Credentials {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MenuError::InvalidCredentials(e.to_string()))
    }

    fn token_uri(&self) -> &str {
        match self {
            Credentials::ServiceAccount { token_uri: Some(uri), .. } => uri,
            _ => GOOGLE_TOKEN_URL,
        }
    }
}

/// サービスアカウントのJWTクレーム
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// サービスアカウント用のJWTアサーションを作成
fn build_assertion(client_email: &str, private_key: &str, aud: &str, now: i64) -> Result<String> {
    let key = EncodingKey::from_rsa_pem(private_key.as_bytes())
        .map_err(|e| MenuError::InvalidCredentials(format!("private_key: {}", e)))?;
    let claims = AssertionClaims {
        iss: client_email,
        scope: SHEETS_READONLY_SCOPE,
        aud,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| MenuError::InvalidCredentials(format!("JWT signing failed: {}", e)))
}

/// トークンエンドポイントへのリクエスト
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum TokenRequest<'a> {
    JwtBearer {
        grant_type: &'a str,
        assertion: String,
    },
    Refresh {
        grant_type: &'a str,
        client_id: &'a str,
        client_secret: &'a str,
        refresh_token: &'a str,
    },
}

impl<'a> TokenRequest<'a> {
    fn for_credentials(credentials: &'a Credentials, now: i64) -> Result<Self> {
        match credentials {
            Credentials::ServiceAccount { client_email, private_key, .. } => {
                Ok(TokenRequest::JwtBearer {
                    grant_type: JWT_BEARER_GRANT,
                    assertion: build_assertion(
                        client_email,
                        private_key,
                        credentials.token_uri(),
                        now,
                    )?,
                })
            }
            Credentials::AuthorizedUser { client_id, client_secret, refresh_token } => {
                Ok(TokenRequest::Refresh {
                    grant_type: "refresh_token",
                    client_id,
                    client_secret,
                    refresh_token,
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// OAuthエラーレスポンス
#[derive(Debug, Deserialize)]
struct OAuthError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// APIエラーレスポンス（`{"error": {"code": 400, "message": "..."}}`）
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// values.get のレスポンス（空のタブでは `values` が省略される）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    range: String,
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// 認証済みセッション
pub struct GoogleSheets {
    client: Client,
    spreadsheet_id: String,
    access_token: String,
    api_url: String,
}

impl GoogleSheets {
    /// 認証してセッションを作成
    pub fn connect(spreadsheet_id: String, credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MenuError::Transport(format!("failed to create HTTP client: {}", e)))?;

        let access_token = authenticate(&client, credentials)?;
        tracing::debug!("authenticated to Google Sheets");

        Ok(Self {
            client,
            spreadsheet_id,
            access_token,
            api_url: SHEETS_API_URL.to_string(),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| MenuError::Config(format!("invalid API url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| MenuError::Config(format!("invalid API url: {}", self.api_url)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn get(&self, url: Url, query: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
    }
}

/// アクセストークンを取得
fn authenticate(client: &Client, credentials: &Credentials) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let request = TokenRequest::for_credentials(credentials, now)?;

    let response = client
        .post(credentials.token_uri())
        .form(&request)
        .send()
        .map_err(|e| MenuError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().unwrap_or_default();
        return Err(match serde_json::from_str::<OAuthError>(&body) {
            Ok(err) => MenuError::Auth(format!(
                "{}: {}",
                err.error,
                err.error_description.unwrap_or_default()
            )),
            Err(_) => MenuError::Auth(format!("HTTP {}: {}", status, body)),
        });
    }

    let token: TokenResponse = response
        .json()
        .map_err(|e| MenuError::Auth(format!("invalid token response: {}", e)))?;
    Ok(token.access_token)
}

/// タブ名をA1表記の範囲として引用（`'` は二重化）
fn quote_tab(tab: &str) -> String {
    format!("'{}'", tab.replace('\'', "''"))
}

/// レスポンスの範囲（例: `'Juin'!B2:H40`）から開始位置 (行, 列) を求める
fn range_origin(range: &str) -> (usize, usize) {
    lazy_static::lazy_static! {
        static ref A1_START_RE: Regex = Regex::new(r"!\$?([A-Za-z]+)\$?(\d+)").unwrap();
    }
    let caps = match A1_START_RE.captures(range) {
        Some(caps) => caps,
        None => return (0, 0),
    };

    let col = caps[1].chars().try_fold(0usize, |acc, c| {
        acc.checked_mul(26)?
            .checked_add(c.to_ascii_uppercase() as usize - 'A' as usize + 1)
    });
    let row = caps[2].parse::<usize>().ok();
    match (row, col) {
        (Some(row), Some(col)) => (row.saturating_sub(1), col.saturating_sub(1)),
        _ => (0, 0),
    }
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// values.get の失敗を分類
///
/// 存在しないタブは 400 "Unable to parse range" になる。
fn classify_fetch_failure(tab: &str, status: StatusCode, body: &str) -> MenuError {
    let message = api_message(body);
    if status == StatusCode::NOT_FOUND
        || (status == StatusCode::BAD_REQUEST && message.contains("Unable to parse range"))
    {
        return MenuError::TabNotFound(tab.to_string());
    }
    MenuError::Fetch {
        tab: tab.to_string(),
        message: format!("HTTP {}: {}", status, message),
    }
}

/// タブ一覧取得の失敗を分類（接続確認を兼ねるため致命的エラー）
fn classify_list_failure(status: StatusCode, body: &str) -> MenuError {
    let message = api_message(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            MenuError::Auth(format!("HTTP {}: {}", status, message))
        }
        StatusCode::NOT_FOUND => MenuError::Config(format!("spreadsheet not found: {}", message)),
        _ => MenuError::Transport(format!("HTTP {}: {}", status, message)),
    }
}

impl SheetSource for GoogleSheets {
    fn name(&self) -> String {
        format!("Google Sheets {}", self.spreadsheet_id)
    }

    fn list_tabs(&mut self) -> Result<Vec<String>> {
        let url = self.url(&[])?;
        let response = self
            .get(url, &[("fields", "sheets.properties.title")])
            .map_err(|e| MenuError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(classify_list_failure(status, &body));
        }

        let meta: SpreadsheetMeta = response
            .json()
            .map_err(|e| MenuError::Transport(format!("invalid spreadsheet metadata: {}", e)))?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn fetch_grid(&mut self, tab: &str) -> Result<Grid> {
        let range = quote_tab(tab);
        let url = self.url(&["values", range.as_str()])?;
        let fetch_error = |message: String| MenuError::Fetch {
            tab: tab.to_string(),
            message,
        };

        let response = self
            .get(url, &[("majorDimension", "ROWS"), ("valueRenderOption", "FORMATTED_VALUE")])
            .map_err(|e| fetch_error(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(classify_fetch_failure(tab, status, &body));
        }

        let values: ValueRange = response.json().map_err(|e| fetch_error(e.to_string()))?;
        let (start_row, start_col) = range_origin(&values.range);
        let rows = values
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect();

        Ok(pad_to_origin(rows, start_row, start_col))
    }
}
