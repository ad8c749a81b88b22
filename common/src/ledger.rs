//! 未登録PLU台帳
//!
//! どのカタログにも見つからなかったPLUを入力順に記録する。
//! 同じコードは1回だけ記録される。

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

/// 台帳JSONのインデント（既存の台帳ファイルと同じ4スペース）
const LEDGER_INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotFoundLedger {
    codes: Vec<String>,
}

impl NotFoundLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加。既に記録済みなら `false`
    pub fn record(&mut self, code: impl Into<String>) -> bool {
        let code = code.into();
        if self.codes.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// 4スペースでインデントしたJSON配列
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(LEDGER_INDENT));
        self.serialize(&mut ser)?;
        String::from_utf8(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
