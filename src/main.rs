use anyhow::Context;
use clap::Parser;
use plu_barcode::{batch, cli, config, logging, menu, render};
use batch::BatchRunner;
use cli::{Cli, Commands};
use config::Config;
use render::Renderer;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_override = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Config { show, init } => {
            config_command(config_override, show, init)?;
        }

        Commands::Menu => {
            let config = load_config(config_override)?;
            let mut prompter = menu::TermPrompter::new();
            with_runner(&config, |runner| menu::run_menu(&config, runner, &mut prompter))?;
        }

        Commands::Manual { codes, format } => {
            let config = load_config(config_override)?;
            println!("🏷  PLU手入力 ({})\n", format);
            let report = with_runner(&config, |runner| runner.run_manual(&codes, format))?;
            menu::print_report(&report);
        }

        Commands::Monitoring { format } => {
            let config = load_config(config_override)?;
            println!("🏷  モニタリング ({})\n", format);
            if let Some(report) = with_runner(&config, |runner| runner.run_monitoring(format))? {
                menu::print_report(&report);
            }
        }

        Commands::Code128 { codes } => {
            let config = load_config(config_override)?;
            println!("🏷  Code128生成\n");
            let report = batch::run_code128(&config, &codes)?;
            menu::print_report(&report);
        }

        Commands::Files { files, format } => {
            let config = load_config(config_override)?;
            println!("🏷  カタログ処理 ({})\n", format);
            let files: Vec<_> = files.iter().map(|f| config.resolve_path(f)).collect();
            let reports = with_runner(&config, |runner| runner.run_catalog_files(&files, format))?;
            for report in &reports {
                menu::print_report(report);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    Config::load(path).context("設定の読み込みに失敗しました")
}

/// 描画サービスに接続するバッチ実行器を組み立てて `f` を実行
fn with_runner<T>(
    config: &Config,
    f: impl FnOnce(&BatchRunner) -> plu_barcode::error::Result<T>,
) -> anyhow::Result<T> {
    let fetcher = render::fetcher_for(&config.render)?;
    let renderer = Renderer::new(fetcher, config.render.layout());
    let runner = BatchRunner::new(config, &renderer);
    Ok(f(&runner)?)
}

fn config_command(path: Option<&Path>, show: bool, init: bool) -> anyhow::Result<()> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => Config::config_path()?,
    };

    if init {
        if config_path.exists() {
            println!("設定ファイルは既に存在します: {}", config_path.display());
        } else {
            Config::default().save(&config_path)?;
            println!("✔ 設定ファイルを作成しました: {}", config_path.display());
        }
    }

    if show || !init {
        let config = load_config(path)?;
        println!("設定: {}", config_path.display());
        println!("  カタログ: {}", config.plu_dir.display());
        println!("  出力先: {}", config.output_dir.display());
        println!("  検索順:");
        for (i, catalog) in config.catalog_priority().iter().enumerate() {
            println!("    {}. {}", i + 1, catalog.display());
        }
        println!("  モニタリング: {}", config.monitoring_path().display());
        println!("  カテゴリ: {}件", config.categories.len());
        match config.render.backend {
            config::RenderBackend::Remote => {
                println!("  描画サービス: {} ({})", config.render.endpoint, config.render.symbology)
            }
            config::RenderBackend::Local => {
                println!("  描画: ローカルCode128 (高さ {}px)", config.render.local_height)
            }
        }
        println!("  縮小率: {} / 余白: {}px", config.render.scale, config.render.padding);
    }

    Ok(())
}
