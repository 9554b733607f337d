use crate::error::{IntakeError, Result};
use serde::{Deserialize, Serialize};
use shelter_intake_common::DEFAULT_DATE_FORMAT;
use std::path::PathBuf;

/// 日付変換に失敗した値の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateErrorPolicy {
    /// 1件でも失敗した列は変換しない
    #[default]
    Strict,
    /// 失敗した値のみ欠損値にする
    Coerce,
}

/// 出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Excel,
    Json,
    All,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Excel => "xlsx",
            OutputFormat::Json => "json",
            OutputFormat::All => "",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            "json" => Ok(OutputFormat::Json),
            "all" => Ok(OutputFormat::All),
            _ => Err(format!("Unknown format: {}. Use csv, excel, json, or all", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Excel => write!(f, "excel"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 前処理で削除する列
    pub drop_columns: Vec<String>,
    /// 日付列とみなす列名の部分文字列（小文字で比較）
    pub date_marker: String,
    /// 派生列名を作る際に取り除く接尾辞
    pub date_suffix: String,
    pub date_format: String,
    pub date_errors: DateErrorPolicy,
    /// 色・場所の分類を並列実行する
    pub parallel: bool,
    pub default_format: OutputFormat,
    /// 入力省略時に探すフォルダ
    pub data_dir: PathBuf,
    pub default_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drop_columns: [
                "notice_no",
                "desertion_no",
                "filename",
                "popfile",
                "charge_nm",
                "officetel",
                "care_tel",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            date_marker: "dt".into(),
            date_suffix: "_dt".into(),
            date_format: DEFAULT_DATE_FORMAT.into(),
            date_errors: DateErrorPolicy::Strict,
            parallel: false,
            default_format: OutputFormat::Csv,
            data_dir: PathBuf::from("data"),
            default_file: "abandonment_public.csv".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| IntakeError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("shelter-intake").join("config.json"))
    }

    /// 既定の入力ファイル
    pub fn default_input(&self) -> PathBuf {
        self.data_dir.join(&self.default_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.drop_columns.len(), 7);
        assert!(config.drop_columns.contains(&"care_tel".to_string()));
        assert_eq!(config.date_marker, "dt");
        assert_eq!(config.date_format, "%Y%m%d");
        assert_eq!(config.date_errors, DateErrorPolicy::Strict);
        assert_eq!(config.default_input(), PathBuf::from("data/abandonment_public.csv"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"parallel": true, "date_errors": "coerce"}"#)
            .expect("設定の読み込み失敗");
        assert!(config.parallel);
        assert_eq!(config.date_errors, DateErrorPolicy::Coerce);
        assert_eq!(config.date_suffix, "_dt");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("xlsx".parse::<OutputFormat>(), Ok(OutputFormat::Excel));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
