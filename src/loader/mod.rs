//! 入力データ読み込み
//!
//! 拡張子で形式を判定し、CSV / Excel をテーブルに変換する。
//! 未対応の拡張子はエラーにせず「データなし」（`None`）を返す。

mod delimited;
mod spreadsheet;

pub use delimited::read_csv;
pub use spreadsheet::{read_spreadsheet, read_spreadsheet_bytes};

use crate::error::{IntakeError, Result};
use shelter_intake_common::Table;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

/// 入力ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// ファイル名の拡張子から判定
    pub fn detect(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()?
            .to_string_lossy()
            .to_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "xls" | "xlsx" => Some(SourceFormat::Spreadsheet),
            _ => None,
        }
    }
}

/// フォルダ内のデータファイル
#[derive(Debug, Clone)]
pub struct DataFile {
    pub path: PathBuf,
    pub file_name: String,
    pub format: SourceFormat,
}

/// ファイルパスから読み込み
pub fn load_from_path(path: &Path) -> Result<Option<Table>> {
    if !path.exists() {
        return Err(IntakeError::FileNotFound(path.display().to_string()));
    }

    let file_name = path.to_string_lossy();
    let Some(format) = SourceFormat::detect(&file_name) else {
        error!("未対応のファイル形式: {}", path.display());
        return Ok(None);
    };

    let result = match format {
        SourceFormat::Csv => std::fs::File::open(path)
            .map_err(IntakeError::from)
            .and_then(read_csv),
        SourceFormat::Spreadsheet => read_spreadsheet(path),
    };

    log_result(&file_name, result).map(Some)
}

/// アップロードされたバイト列から読み込み
pub fn load_from_bytes(file_name: &str, bytes: &[u8]) -> Result<Option<Table>> {
    let Some(format) = SourceFormat::detect(file_name) else {
        error!("未対応のファイル形式: {}", file_name);
        return Ok(None);
    };

    let result = match format {
        SourceFormat::Csv => read_csv(bytes),
        SourceFormat::Spreadsheet => read_spreadsheet_bytes(bytes),
    };

    log_result(file_name, result).map(Some)
}

fn log_result(source: &str, result: Result<Table>) -> Result<Table> {
    match &result {
        Ok(table) => info!(
            source,
            rows = table.row_count(),
            columns = table.column_count(),
            "データ読み込み完了"
        ),
        Err(e) => error!(source, "データ読み込みエラー: {}", e),
    }
    result
}

/// フォルダ直下のデータファイルを列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<DataFile>> {
    if !folder.is_dir() {
        return Err(IntakeError::FolderNotFound(folder.display().to_string()));
    }

    let mut files: Vec<DataFile> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| {
            let file_name = e.file_name().to_string_lossy().to_string();
            SourceFormat::detect(&file_name).map(|format| DataFile {
                path: e.path().to_path_buf(),
                file_name,
                format,
            })
        })
        .collect();

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}
