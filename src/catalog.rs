//! カタログ読み込みとバーコード検索
//!
//! カタログが存在しない・JSONとして不正な場合は空として扱い、
//! 呼び出し側にはエラーを返さない（メッセージのみ表示）。

use crate::error::{BarcodeError, Result};
use console::style;
use plu_barcode_common::CatalogEntry;
use std::path::{Path, PathBuf};

/// カタログを読み込む（失敗時はエラー）
pub fn try_load_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    if !path.exists() {
        return Err(BarcodeError::Catalog {
            path: path.display().to_string(),
            reason: "ファイルが見つかりません".into(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| BarcodeError::Catalog {
        path: path.display().to_string(),
        reason: format!("JSON形式ではありません ({})", e),
    })
}

/// カタログを読み込む
///
/// 読めなかった場合は診断メッセージを出して空のVecを返す。
pub fn load_catalog(path: &Path) -> Vec<CatalogEntry> {
    match try_load_catalog(path) {
        Ok(entries) => {
            tracing::debug!(path = %path.display(), entries = entries.len(), "catalog loaded");
            entries
        }
        Err(e) => {
            eprintln!("{}", style(format!("✘ {}", e)).red().bold());
            Vec::new()
        }
    }
}

/// 優先順に並んだカタログからバーコードを引く
///
/// 最初にPLUが一致したエントリで検索を打ち切る（以降のカタログは見ない）。
#[derive(Debug, Clone, Default)]
pub struct BarcodeResolver {
    catalogs: Vec<(PathBuf, Vec<CatalogEntry>)>,
}

impl BarcodeResolver {
    /// 優先順にすべてのカタログを読み込む
    pub fn load(priority: &[PathBuf]) -> Self {
        let catalogs = priority
            .iter()
            .map(|path| (path.clone(), load_catalog(path)))
            .collect();
        Self { catalogs }
    }

    pub fn from_catalogs(catalogs: Vec<(PathBuf, Vec<CatalogEntry>)>) -> Self {
        Self { catalogs }
    }

    /// PLU → バーコード文字列（完全一致・大文字小文字区別）
    ///
    /// 一致したエントリのBarcodeが空・欠落なら `None`。
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.catalogs
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .find(|entry| entry.plu.as_deref() == Some(code))
            .and_then(|entry| entry.barcode.as_deref())
            .filter(|barcode| !barcode.is_empty())
    }

    pub fn catalog_paths(&self) -> impl Iterator<Item = &Path> {
        self.catalogs.iter().map(|(path, _)| path.as_path())
    }

    pub fn entry_count(&self) -> usize {
        self.catalogs.iter().map(|(_, entries)| entries.len()).sum()
    }
}

/// ディスク上のカタログを毎回読み直して検索する
pub fn resolve(code: &str, priority: &[PathBuf]) -> Option<String> {
    BarcodeResolver::load(priority).resolve(code).map(String::from)
}
