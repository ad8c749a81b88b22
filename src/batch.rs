//! バッチ処理
//!
//! 3つのモード（カタログファイル・手入力・モニタリング）で共通の
//! 「検索 → 取得/加工 → 保存」を1コードずつ実行する。
//! 1コードの失敗ではバッチを止めない。

use crate::catalog::{self, BarcodeResolver};
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::render::{BarcodeFetcher, LocalCode128Fetcher, Renderer};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use plu_barcode_common::{parse_code_list, NotFoundLedger, OutputFormat};
use std::path::{Path, PathBuf};

pub const MANUAL_FOLDER: &str = "manual";
pub const MONITORING_FOLDER: &str = "monitoring";
pub const CODE128_FOLDER: &str = "code128";

/// 1コードの処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeOutcome {
    Saved(PathBuf),
    NotFound,
    /// 取得・デコード・保存の失敗（メッセージ付き）
    Failed(String),
}

/// 1フォルダ分の処理結果
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub folder: PathBuf,
    pub saved: Vec<(String, PathBuf)>,
    pub not_found: NotFoundLedger,
    pub failed: Vec<(String, String)>,
    pub ledger_path: Option<PathBuf>,
}

impl BatchReport {
    fn new(folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
            ..Default::default()
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: 保存 {}件 / 未登録 {}件 / 失敗 {}件",
            self.folder.display(),
            self.saved.len(),
            self.not_found.len(),
            self.failed.len()
        )
    }
}

pub struct BatchRunner<'a> {
    config: &'a Config,
    renderer: &'a Renderer,
    show_progress: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(config: &'a Config, renderer: &'a Renderer) -> Self {
        Self {
            config,
            renderer,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn resolver(&self) -> BarcodeResolver {
        let resolver = BarcodeResolver::load(&self.config.catalog_priority());
        tracing::debug!(
            catalogs = ?resolver.catalog_paths().collect::<Vec<_>>(),
            entries = resolver.entry_count(),
            "resolver ready"
        );
        resolver
    }

    /// カタログファイルモード: ファイルごとに `<output_dir>/<ファイル名>` へ出力
    pub fn run_catalog_files(&self, files: &[PathBuf], format: OutputFormat) -> Result<Vec<BatchReport>> {
        let resolver = self.resolver();
        let mut reports = Vec::new();

        for file in files {
            let entries = catalog::load_catalog(file);
            if entries.is_empty() {
                eprintln!(
                    "{}",
                    style(format!("✘ '{}' に処理できるPLUデータがありません", file.display())).red().bold()
                );
                continue;
            }

            let name = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "catalog".to_string());
            let folder = self.config.output_folder(&name);

            let codes: Vec<String> = entries
                .iter()
                .filter_map(|e| e.code().map(String::from))
                .collect();

            println!("📂 {} ({}件) → {}", file.display(), codes.len(), folder.display());
            reports.push(self.run_codes(&codes, &folder, format, &resolver)?);
        }

        Ok(reports)
    }

    /// 手入力モード: カンマ区切りのPLUを `manual` フォルダへ
    pub fn run_manual(&self, input: &str, format: OutputFormat) -> Result<BatchReport> {
        let codes = parse_code_list(input);
        let folder = self.config.output_folder(MANUAL_FOLDER);
        self.run_codes(&codes, &folder, format, &self.resolver())
    }

    /// モニタリングモード: 固定のモニタリングファイルを `monitoring` フォルダへ
    ///
    /// ファイルにデータがなければ `None`。
    pub fn run_monitoring(&self, format: OutputFormat) -> Result<Option<BatchReport>> {
        let file = self.config.monitoring_path();
        let entries = catalog::load_catalog(&file);
        if entries.is_empty() {
            eprintln!(
                "{}",
                style(format!("✘ '{}' にPLUデータがありません", file.display())).red().bold()
            );
            return Ok(None);
        }

        let codes: Vec<String> = entries
            .iter()
            .filter_map(|e| e.code().map(String::from))
            .collect();
        let folder = self.config.output_folder(MONITORING_FOLDER);
        self.run_codes(&codes, &folder, format, &self.resolver()).map(Some)
    }

    /// コード列を処理して1フォルダ分のレポートを返す
    ///
    /// 未登録があれば最後に台帳を書き出す。
    pub fn run_codes(
        &self,
        codes: &[String],
        folder: &Path,
        format: OutputFormat,
        resolver: &BarcodeResolver,
    ) -> Result<BatchReport> {
        output::prepare_folder(folder)?;

        let pb = self.progress_bar(codes.len() as u64);
        let mut report = BatchReport::new(folder);

        for code in codes {
            let code = code.trim();
            if code.is_empty() {
                pb.inc(1);
                continue;
            }
            pb.set_message(code.to_string());

            match self.process_code(code, format, folder, resolver) {
                CodeOutcome::Saved(path) => {
                    emit(&pb, style(format!("✔ '{}' → {}", code, path.display())).green().to_string());
                    report.saved.push((code.to_string(), path));
                }
                CodeOutcome::NotFound => {
                    emit(
                        &pb,
                        style(format!("⚠ '{}' はどのカタログにも見つかりません", code)).yellow().to_string(),
                    );
                    report.not_found.record(code);
                }
                CodeOutcome::Failed(message) => {
                    emit(&pb, style(format!("✘ '{}': {}", code, message)).red().bold().to_string());
                    report.failed.push((code.to_string(), message));
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        report.ledger_path = output::write_ledger(folder, &report.not_found)?;
        if let Some(path) = &report.ledger_path {
            println!("{}", style(format!("⚠ 未登録PLUを保存: {}", path.display())).yellow());
        }

        Ok(report)
    }

    /// 1コード: 検索 → 取得/加工 → 保存
    pub fn process_code(
        &self,
        code: &str,
        format: OutputFormat,
        folder: &Path,
        resolver: &BarcodeResolver,
    ) -> CodeOutcome {
        let Some(barcode) = resolver.resolve(code) else {
            return CodeOutcome::NotFound;
        };

        let saved = self.renderer.render(barcode).and_then(|image| {
            output::save_image(&image, format, folder, self.config.render.jpeg_quality)
        });

        match saved {
            Ok(path) => CodeOutcome::Saved(path),
            Err(e) => CodeOutcome::Failed(e.to_string()),
        }
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        pb
    }
}

/// PLUそのものをCode128にして `code128/<PLU>_code128.png` へ保存
///
/// カタログ検索も描画サービスも使わない。同じPLUは上書きされる。
pub fn run_code128(config: &Config, input: &str) -> Result<BatchReport> {
    let folder = config.output_folder(CODE128_FOLDER);
    std::fs::create_dir_all(&folder)?;

    let fetcher = LocalCode128Fetcher::new(config.render.local_height);
    let mut report = BatchReport::new(&folder);

    for code in parse_code_list(input) {
        let path = output::code128_path(&folder, &code);
        let saved = fetcher
            .fetch(&code)
            .and_then(|png| std::fs::write(&path, png).map_err(Into::into));

        match saved {
            Ok(()) => {
                println!("{}", style(format!("✔ '{}' → {}", code, path.display())).green());
                report.saved.push((code, path));
            }
            Err(e) => {
                eprintln!("{}", style(format!("✘ '{}': {}", code, e)).red().bold());
                report.failed.push((code, e.to_string()));
            }
        }
    }

    Ok(report)
}

/// バーが非表示（端末でない等）のときは直接出力する
fn emit(pb: &ProgressBar, line: String) {
    if pb.is_hidden() {
        println!("{}", line);
    } else {
        pb.println(line);
    }
}
