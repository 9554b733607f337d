//! 入力ファイル対話式選択モジュール

use crate::error::{IntakeError, Result};
use crate::loader::{scan_folder, DataFile};
use dialoguer::Select;
use std::path::{Path, PathBuf};

/// 表示用ラベル（ファイル名とサイズ）
fn item_label(file: &DataFile) -> String {
    let size = std::fs::metadata(&file.path).map(|m| m.len()).unwrap_or(0);
    format!("{} ({:.1} KB)", file.file_name, size as f64 / 1024.0)
}

/// データフォルダから入力ファイルを対話式で選択
///
/// キャンセル時は `None`。
pub fn select_data_file(data_dir: &Path) -> Result<Option<PathBuf>> {
    let files = scan_folder(data_dir)?;

    if files.is_empty() {
        return Err(IntakeError::NoDataFiles(data_dir.display().to_string()));
    }

    let items: Vec<String> = files.iter().map(item_label).collect();

    println!("\n📋 {} のデータファイル: {}件", data_dir.display(), files.len());
    let selection = Select::new()
        .with_prompt("処理するファイルを選択してください (Escでキャンセル)")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|e| IntakeError::Prompt(e.to_string()))?;

    Ok(selection.map(|i| {
        println!("→ {} を使用", files[i].file_name);
        files[i].path.clone()
    }))
}

/// 入力ファイルを決定する
///
/// 1. 既定ファイルが存在すればそれを使う
/// 2. なければデータフォルダから選択
pub fn resolve_default_input(default: &Path, data_dir: &Path) -> Result<Option<PathBuf>> {
    if default.exists() {
        println!("→ 既定ファイル {} を使用", default.display());
        return Ok(Some(default.to_path_buf()));
    }

    println!("⚠ 既定ファイル {} が見つかりません", default.display());
    select_data_file(data_dir)
}
