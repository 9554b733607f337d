use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use shelter_intake::cli::{Cli, Commands};
use shelter_intake::config::{Config, DateErrorPolicy, OutputFormat};
use shelter_intake::pipeline::{PipelineOptions, PipelineReport, Preprocessor, StageOutcome};
use shelter_intake::{export, loader, selector};
use shelter_intake_common::{classify_color, classify_location, decompose_address};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Process { input, output, format, parallel, coerce_dates } => {
            println!("🐾 shelter-intake - 前処理\n");

            let mut config = config;
            config.parallel |= parallel;
            if coerce_dates {
                config.date_errors = DateErrorPolicy::Coerce;
            }
            let format = format.unwrap_or(config.default_format);

            let input = match input {
                Some(path) => path,
                None => {
                    let selected = selector::resolve_default_input(
                        &config.default_input(),
                        &config.data_dir,
                    )?;
                    match selected {
                        Some(path) => path,
                        None => {
                            println!("キャンセルしました");
                            return Ok(());
                        }
                    }
                }
            };

            let preprocessor = Preprocessor::new(&PipelineOptions::from(&config));

            if input.is_dir() {
                process_folder(&preprocessor, &input, output.as_deref(), format)?;
            } else {
                let output = output.unwrap_or_else(|| default_output_dir(&input));
                process_file(&preprocessor, &input, &output, format)?;
            }

            println!("\n✅ 前処理完了");
        }

        Commands::Color { text } => {
            let result = classify_color(Some(&text));
            println!("入力: {}", text);
            println!("  ノイズ除去後: {}", result.filtered.as_deref().unwrap_or(""));
            println!("  color_cat:  {}", result.category);
            println!("  color_list: {}", result.color_list());
            println!("  color_type: {}", result.color_type);
        }

        Commands::Place { text } => {
            let result = classify_location(Some(&text));
            println!("入力: {}", text);
            println!("  place_type:     {}", result.place_type);
            println!("  facility_types: {}", result.facility_label());
        }

        Commands::Address { text } => {
            let result = decompose_address(Some(&text));
            println!("入力: {}", text);
            println!("  sido:    {}", result.sido);
            println!("  sigungu: {}", result.sigungu);
            println!("  region:  {}", result.region);
        }

        Commands::Config { show, init } => {
            if init {
                config.save().context("設定ファイルの保存に失敗しました")?;
                println!("✔ 設定ファイルを作成しました: {}", Config::config_path()?.display());
            }

            if show || !init {
                println!("設定:");
                println!("  削除する列: {}", config.drop_columns.join(", "));
                println!("  日付列マーカー: {}", config.date_marker);
                println!("  日付形式: {}", config.date_format);
                println!("  日付変換エラー: {:?}", config.date_errors);
                println!("  並列実行: {}", if config.parallel { "有効" } else { "無効" });
                println!("  出力形式: {}", config.default_format);
                println!("  既定の入力: {}", config.default_input().display());
            }
        }
    }

    Ok(())
}

/// 入力ファイルと同じ場所の output/
fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("output")
}

fn output_stem(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "data".to_string());
    format!("{}_processed", stem)
}

fn process_file(
    preprocessor: &Preprocessor,
    input: &Path,
    output: &Path,
    format: OutputFormat,
) -> Result<bool> {
    println!("[1/3] 読み込み中: {}", input.display());
    let Some(table) = loader::load_from_path(input)
        .with_context(|| format!("読み込みに失敗しました: {}", input.display()))?
    else {
        println!("⚠ 未対応のファイル形式のためスキップ: {}", input.display());
        return Ok(false);
    };
    println!("✔ {}行 × {}列\n", table.row_count(), table.column_count());

    println!("[2/3] 前処理中...");
    let result = preprocessor.preprocess(&table);
    print_report(&result.report);
    println!(
        "✔ {}行 × {}列\n",
        result.table.row_count(),
        result.table.column_count()
    );

    println!("[3/3] 出力中...");
    export::export_table(&result.table, format, output, &output_stem(input))
        .with_context(|| format!("出力に失敗しました: {}", output.display()))?;

    Ok(true)
}

fn process_folder(
    preprocessor: &Preprocessor,
    folder: &Path,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let files = loader::scan_folder(folder)?;
    if files.is_empty() {
        anyhow::bail!("データファイルが見つかりません: {}", folder.display());
    }
    println!("✔ {}件のデータファイルを検出\n", files.len());

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| folder.join("output"));

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut processed = 0usize;
    for file in &files {
        pb.set_message(file.file_name.clone());
        let done = pb.suspend(|| process_file(preprocessor, &file.path, &output, format))?;
        if done {
            processed += 1;
        }
        pb.inc(1);
    }
    pb.finish_with_message("完了");

    println!("✔ {}/{}件を処理", processed, files.len());
    Ok(())
}

fn print_report(report: &PipelineReport) {
    for stage in &report.stages {
        match &stage.outcome {
            StageOutcome::Applied { .. } => println!("  ✔ {}", stage.stage),
            StageOutcome::Skipped { missing } => {
                println!("  - {} (列なし: {})", stage.stage, missing.join(", "))
            }
            StageOutcome::Failed { error } => println!("  ✖ {}: {}", stage.stage, error),
        }
    }
}
