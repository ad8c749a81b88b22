//! 出力ファイルの書き込み
//!
//! - `barcode_<N>.<ext>` の連番で既存ファイルを上書きしない
//! - 未登録PLUは `<folder>/not_found/not_found_plu.json` に保存

use crate::error::{BarcodeError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, ImageFormat, RgbImage};
use plu_barcode_common::{NotFoundLedger, OutputFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const FILE_BASE_NAME: &str = "barcode";
pub const NOT_FOUND_DIR: &str = "not_found";
pub const NOT_FOUND_FILE: &str = "not_found_plu.json";

/// 出力フォルダと not_found サブフォルダを作成
pub fn prepare_folder(folder: &Path) -> Result<()> {
    std::fs::create_dir_all(folder.join(NOT_FOUND_DIR))?;
    Ok(())
}

/// `folder` 内で未使用の `<base>_<N>.<ext>`（N は1から）
pub fn next_available_path(folder: &Path, base_name: &str, extension: &str) -> PathBuf {
    let mut i: u64 = 1;
    loop {
        let path = folder.join(format!("{}_{}.{}", base_name, i, extension));
        if !path.exists() {
            return path;
        }
        i += 1;
    }
}

/// 画像を保存して書き込み先を返す
///
/// エンコードが成功してからファイルを作るので、失敗時に途中のファイルは残らない。
pub fn save_image(
    image: &RgbImage,
    format: OutputFormat,
    folder: &Path,
    jpeg_quality: u8,
) -> Result<PathBuf> {
    let path = next_available_path(folder, FILE_BASE_NAME, format.extension());

    let bytes = encode_image(image, format, jpeg_quality)
        .map_err(|e| BarcodeError::ImageSave(format!("{}: {}", path.display(), e)))?;
    std::fs::write(&path, bytes)?;

    tracing::debug!(path = %path.display(), encoder = format.encoder_name(), "image saved");
    Ok(path)
}

/// メモリ上でJPEG/PNGにエンコード
pub fn encode_image(
    image: &RgbImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> std::result::Result<Vec<u8>, ImageError> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut buf, jpeg_quality).encode_image(image)?;
        }
        OutputFormat::Png => {
            image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        }
    }
    Ok(buf)
}

/// Code128直接生成の保存先 `<folder>/<code>_code128.png`
///
/// パス区切りなどファイル名に使えない文字は `_` に置き換える。
pub fn code128_path(folder: &Path, code: &str) -> PathBuf {
    let stem: String = code
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect();
    folder.join(format!("{}_code128.png", stem))
}

pub fn ledger_path(folder: &Path) -> PathBuf {
    folder.join(NOT_FOUND_DIR).join(NOT_FOUND_FILE)
}

/// 未登録PLUを保存（空なら何もしない）
///
/// 既存の台帳は上書きされる。
pub fn write_ledger(folder: &Path, ledger: &NotFoundLedger) -> Result<Option<PathBuf>> {
    if ledger.is_empty() {
        return Ok(None);
    }

    let path = ledger_path(folder);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, ledger.to_json_pretty()?)?;
    Ok(Some(path))
}

pub fn read_ledger(folder: &Path) -> Result<NotFoundLedger> {
    let content = std::fs::read_to_string(ledger_path(folder))?;
    Ok(NotFoundLedger::from_json(&content)?)
}
