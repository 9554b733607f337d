pub mod delimited;
pub mod excel;
pub mod json;

use crate::config::OutputFormat;
use crate::error::{IntakeError, Result};
use shelter_intake_common::Table;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, stem: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", stem, extension))
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_all(output: &Path, stem: &str) -> Vec<(OutputFormat, PathBuf)> {
    let (dir, stem) = if output.is_dir() || output.extension().is_none() {
        (output, stem)
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or(stem);
        (parent, stem)
    };

    [OutputFormat::Csv, OutputFormat::Excel, OutputFormat::Json]
        .into_iter()
        .map(|f| (f, dir.join(format!("{}.{}", stem, f.extension()))))
        .collect()
}

/// テーブルをファイルに出力し、書き出したパスを返す
///
/// `output` がフォルダまたは拡張子なしの場合は `<stem>.<拡張子>` をその中に作る。
pub fn export_table(
    table: &Table,
    format: OutputFormat,
    output: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let targets = match format {
        OutputFormat::All => output_paths_for_all(output, stem),
        single => vec![(single, output_path_for_format(output, stem, single.extension()))],
    };

    let mut written = Vec::with_capacity(targets.len());
    for (format, path) in targets {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        println!("- {}を生成中...", format);
        let bytes = export_to_bytes(table, format)?;
        std::fs::write(&path, bytes)?;
        println!("✔ 出力: {}", path.display());

        written.push(path);
    }

    Ok(written)
}

/// テーブルをバイト列に変換（`All` は不可）
pub fn export_to_bytes(table: &Table, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => delimited::write_csv(table, Vec::new()),
        OutputFormat::Excel => excel::generate_excel_buffer(table),
        OutputFormat::Json => json::write_json(table, Vec::new()),
        OutputFormat::All => Err(IntakeError::UnsupportedFormat(
            "all はファイル出力でのみ使用できます".into(),
        )),
    }
}
