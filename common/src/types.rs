//! カタログ・出力形式の型定義
//!
//! CLIとテストで共有される型:
//! - CatalogEntry: カタログJSONの1要素（PLU → Barcode）
//! - OutputFormat: 保存する画像形式（JPG/PNG）

use crate::error::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// カタログの1エントリ
///
/// `PLU` / `Barcode` キーが欠けている、または文字列でない場合は `None` として扱う。
/// それ以外のキーは無視される。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(
        rename = "PLU",
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub plu: Option<String>,

    #[serde(
        rename = "Barcode",
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub barcode: Option<String>,
}

impl CatalogEntry {
    pub fn new(plu: impl Into<String>, barcode: impl Into<String>) -> Self {
        Self {
            plu: Some(plu.into()),
            barcode: Some(barcode.into()),
        }
    }

    /// 空でないPLUのみ返す
    pub fn code(&self) -> Option<&str> {
        self.plu.as_deref().filter(|s| !s.is_empty())
    }
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// 出力画像形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Jpeg,
    #[default]
    Png,
}

impl OutputFormat {
    /// ファイル拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// エンコーダ名（JPGはJPEGとして扱う）
    pub fn encoder_name(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Png => "PNG",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "JPG" | "JPEG" => Ok(OutputFormat::Jpeg),
            "PNG" => Ok(OutputFormat::Png),
            _ => Err(Error::InvalidFormat(s.trim().to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Jpeg => write!(f, "JPG"),
            OutputFormat::Png => write!(f, "PNG"),
        }
    }
}
