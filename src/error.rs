use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("未対応のファイル形式: {0}")]
    UnsupportedFormat(String),

    #[error("CSV読み込みエラー: {0}")]
    CsvRead(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    SpreadsheetRead(String),

    #[error("CSV出力エラー: {0}")]
    CsvWrite(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力選択エラー: {0}")]
    Prompt(String),

    #[error("データファイルが見つかりません: {0}")]
    NoDataFiles(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] shelter_intake_common::Error),
}

pub type Result<T> = std::result::Result<T, IntakeError>;
