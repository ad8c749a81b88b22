use clap::{Parser, Subcommand};
use plu_barcode_common::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plu-barcode")]
#[command(about = "PLUカタログからバーコード画像を生成するツール", long_about = None)]
pub struct Cli {
    /// 省略時は対話メニューを起動
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 設定ファイル（デフォルト: ~/.config/plu-barcode/config.json）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 対話メニュー
    Menu,

    /// PLUを直接指定して生成（manual フォルダへ出力）
    Manual {
        /// カンマ区切りのPLU
        #[arg(required = true)]
        codes: String,

        /// 出力形式 (jpg/png)
        #[arg(short, long, default_value = "png")]
        format: OutputFormat,
    },

    /// モニタリングファイルを処理（monitoring フォルダへ出力）
    Monitoring {
        /// 出力形式 (jpg/png)
        #[arg(short, long, default_value = "png")]
        format: OutputFormat,
    },

    /// カタログファイルを処理（ファイル名ごとのフォルダへ出力）
    Files {
        /// カタログJSON（相対パスは plu_dir 基準）
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// 出力形式 (jpg/png)
        #[arg(short, long, default_value = "png")]
        format: OutputFormat,
    },

    /// PLUをそのままCode128にする（カタログ検索なし・オフライン）
    Code128 {
        /// カンマ区切りのPLU
        #[arg(required = true)]
        codes: String,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定を書き出す
        #[arg(long)]
        init: bool,
    },
}
