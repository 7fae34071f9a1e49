use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Credentials file not found: {0}")]
    CredentialsNotFound(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Cannot reach spreadsheet service: {0}")]
    Transport(String),

    #[error("Tab not found: {0}")]
    TabNotFound(String),

    #[error("Failed to fetch tab '{tab}': {message}")]
    Fetch { tab: String, message: String },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] menu_sheets_common::Error),
}

impl MenuError {
    /// タブ探索の失敗（次の候補に進めばよい）かどうか
    pub fn is_probe_miss(&self) -> bool {
        matches!(self, MenuError::TabNotFound(_) | MenuError::Fetch { .. })
    }
}

pub type Result<T> = std::result::Result<T, MenuError>;
