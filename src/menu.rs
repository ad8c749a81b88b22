//! 対話式メニュー
//!
//! カテゴリ → カタログファイル（複数選択可）→ 出力形式 の順に入力を受け、
//! バッチ処理を呼び出す。モニタリングと手入力はカテゴリ一覧の末尾に並ぶ。

use crate::batch::{BatchReport, BatchRunner};
use crate::config::{Category, Config};
use crate::error::{BarcodeError, Result};
use console::{style, Term};
use dialoguer::Input;
use plu_barcode_common::{parse_menu_choice, parse_selection, MenuChoice, OutputFormat};
use std::io::{BufRead, IsTerminal, Write};

pub const MONITORING_LABEL: &str = "MONITORING PRICETAG";
pub const MANUAL_LABEL: &str = "CETAK BARCODE MANUAL";

const RULE_WIDTH: usize = 38;

/// トップメニューの項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry<'a> {
    Category(&'a Category),
    Monitoring,
    Manual,
}

impl MenuEntry<'_> {
    pub fn label(&self) -> &str {
        match self {
            MenuEntry::Category(c) => &c.name,
            MenuEntry::Monitoring => MONITORING_LABEL,
            MenuEntry::Manual => MANUAL_LABEL,
        }
    }
}

/// 設定のカテゴリ順 + モニタリング + 手入力
pub fn menu_entries(config: &Config) -> Vec<MenuEntry<'_>> {
    config
        .categories
        .iter()
        .map(MenuEntry::Category)
        .chain([MenuEntry::Monitoring, MenuEntry::Manual])
        .collect()
}

pub fn print_banner() {
    println!("{}", style("_".repeat(RULE_WIDTH)).red().bold());
    println!("{}", style("-".repeat(RULE_WIDTH)).red().bold());
    println!("{}", style(">>---    PLU Barcode Generator     ---<<").blue().bold());
    println!("{}", style(">--Cetak Barcode, Monitoring & ITT --<").green().bold());
    println!("{}", style("-".repeat(RULE_WIDTH)).red().bold());
}

/// メニューの入力元
pub trait Prompter {
    /// 1行読み込む。入力が尽きたら `BarcodeError::Prompt`
    fn prompt(&mut self, text: &str) -> Result<String>;
}

/// 端末では dialoguer、パイプ等では標準入力から1行ずつ読む
pub struct TermPrompter {
    interactive: bool,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal() && Term::stderr().is_term(),
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn prompt(&mut self, text: &str) -> Result<String> {
        if self.interactive {
            return Input::<String>::new()
                .with_prompt(text)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| BarcodeError::Prompt(e.to_string()));
        }

        print!("{}: ", text);
        std::io::stdout().flush()?;

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| BarcodeError::Prompt(e.to_string()))?;
        if read == 0 {
            return Err(BarcodeError::Prompt("入力が終了しました".into()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// "0" が入力されるまでメニューを繰り返す
pub fn run_menu(
    config: &Config,
    runner: &BatchRunner,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let entries = menu_entries(config);

    loop {
        print_banner();
        println!("{}", style("[0] 終了").cyan());
        for (i, entry) in entries.iter().enumerate() {
            println!("{} {}", style(format!("[{}]", i + 1)).yellow(), style(entry.label()).cyan());
        }

        let input = prompter.prompt("番号を入力")?;
        match parse_menu_choice(&input, entries.len()) {
            MenuChoice::Exit => {
                println!("{}", style("終了します").blue());
                break;
            }
            MenuChoice::Entry(idx) => {
                if let Err(e) = run_entry(&entries[idx], config, runner, prompter) {
                    if matches!(e, BarcodeError::Prompt(_)) {
                        return Err(e);
                    }
                    eprintln!("{}", style(format!("✘ {}", e)).red().bold());
                }
            }
            MenuChoice::Invalid => invalid_choice(),
        }

        println!("{}", style("_".repeat(RULE_WIDTH)).red().bold());
    }

    Ok(())
}

fn run_entry(
    entry: &MenuEntry,
    config: &Config,
    runner: &BatchRunner,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    match entry {
        MenuEntry::Monitoring => {
            let Some(format) = prompt_format(prompter)? else {
                return Ok(());
            };
            if let Some(report) = runner.run_monitoring(format)? {
                print_report(&report);
            }
        }
        MenuEntry::Manual => {
            let codes = prompter.prompt("PLU (カンマ区切り)")?;
            let Some(format) = prompt_format(prompter)? else {
                return Ok(());
            };
            let report = runner.run_manual(&codes, format)?;
            print_report(&report);
        }
        MenuEntry::Category(category) => {
            println!("{}", style("[0] 戻る").cyan());
            for (i, file) in category.files.iter().enumerate() {
                println!("{} {}", style(format!("[{}]", i + 1)).yellow(), style(file).cyan());
            }

            let input = prompter.prompt("番号を入力 (複数はカンマ区切り)")?;
            if input.trim() == "0" {
                return Ok(());
            }
            let indices = match parse_selection(&input, category.files.len()) {
                Ok(indices) => indices,
                Err(_) => {
                    invalid_choice();
                    return Ok(());
                }
            };

            let Some(format) = prompt_format(prompter)? else {
                return Ok(());
            };
            let files: Vec<_> = indices
                .iter()
                .map(|&i| config.resolve_path(&category.files[i]))
                .collect();
            for report in runner.run_catalog_files(&files, format)? {
                print_report(&report);
            }
        }
    }
    Ok(())
}

/// 不正な形式ならメッセージを出して `None`
fn prompt_format(prompter: &mut dyn Prompter) -> Result<Option<OutputFormat>> {
    let input = prompter.prompt("ファイル形式 (JPG/PNG)")?;
    match input.parse::<OutputFormat>() {
        Ok(format) => Ok(Some(format)),
        Err(e) => {
            eprintln!("{}", style(format!("✘ {}", e)).red().bold());
            Ok(None)
        }
    }
}

fn invalid_choice() {
    eprintln!("{}", style("✘ 無効な選択です").red().bold());
}

pub fn print_report(report: &BatchReport) {
    println!("{}", style(report.summary()).bold());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_entries_specials_last() {
        let config = Config::default();
        let entries = menu_entries(&config);
        assert_eq!(entries.len(), config.categories.len() + 2);
        assert_eq!(entries[0].label(), "PPT");
        assert_eq!(entries[entries.len() - 2], MenuEntry::Monitoring);
        assert_eq!(entries[entries.len() - 1], MenuEntry::Manual);
    }

    #[test]
    fn test_menu_entries_without_categories() {
        let config = Config {
            categories: Vec::new(),
            ..Config::default()
        };
        let labels: Vec<_> = menu_entries(&config).iter().map(|e| e.label().to_string()).collect();
        assert_eq!(labels, vec![MONITORING_LABEL, MANUAL_LABEL]);
    }
}
