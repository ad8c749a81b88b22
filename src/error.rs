use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarcodeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("カタログ '{path}' を読み込めません: {reason}")]
    Catalog { path: String, reason: String },

    #[error("バーコード取得エラー: {0}")]
    Fetch(String),

    #[error("バーコード取得エラー: HTTP {status} ({url})")]
    HttpStatus { status: u16, url: String },

    #[error("バーコード生成エラー: {0}")]
    Encode(String),

    #[error("画像デコードエラー: {0}")]
    Decode(String),

    #[error("画像保存エラー: {0}")]
    ImageSave(String),

    #[error("プロンプトエラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] plu_barcode_common::Error),
}

impl From<reqwest::Error> for BarcodeError {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => BarcodeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => BarcodeError::Fetch(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BarcodeError>;
