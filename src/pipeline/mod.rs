//! 前処理パイプライン
//!
//! 入力テーブルの複製に対して各段階を順に適用する。
//!
//! ## 処理フロー
//! 1. 不要列の削除
//! 2. 日付列の変換
//! 3. 時間要素（年・月・日・曜日・季節）の抽出
//! 4. 動物種別・処理状態・性別/中性化
//! 5. 毛色分類
//! 6. 保護所住所の分解
//! 7. 発見場所の分類
//! 8. 体重・品種の抽出
//!
//! 各段階は必要な列がなければスキップし、失敗しても次の段階へ進む。
//! 失敗した段階の変更はテーブルに反映されない。

pub mod stages;

use crate::config::{Config, DateErrorPolicy};
use crate::error::Result;
use shelter_intake_common::{Column, Error, Table, DEFAULT_DATE_FORMAT};
use tracing::{debug, error, info};

/// 段階がテーブルに加える変更
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// 列の追加・置換
    Set(Column),
    /// 列の削除
    Drop(String),
}

/// パイプラインの1段階
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    /// 必要な入力列（1つでも欠けていればスキップ）
    fn required_columns(&self) -> &[&'static str] {
        &[]
    }

    /// テーブルを読み、加える変更を返す
    fn apply(&self, table: &Table) -> Result<Vec<Edit>>;
}

/// 段階の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// 変更を反映した（変更された列名）
    Applied { columns: Vec<String> },
    /// 必要列がないためスキップ
    Skipped { missing: Vec<String> },
    /// 失敗（テーブルは変更なし）
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: &'static str,
    pub outcome: StageOutcome,
}

/// パイプライン全体の実行結果
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub stages: Vec<StageReport>,
}

impl PipelineReport {
    pub fn outcome(&self, stage: &str) -> Option<&StageOutcome> {
        self.stages.iter().find(|s| s.stage == stage).map(|s| &s.outcome)
    }

    pub fn applied_count(&self) -> usize {
        self.count(|o| matches!(o, StageOutcome::Applied { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, StageOutcome::Skipped { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, StageOutcome::Failed { .. }))
    }

    fn count(&self, f: impl Fn(&StageOutcome) -> bool) -> usize {
        self.stages.iter().filter(|s| f(&s.outcome)).count()
    }
}

/// 前処理済みテーブルと実行結果
#[derive(Debug, Clone)]
pub struct Preprocessed {
    pub table: Table,
    pub report: PipelineReport,
}

/// パイプラインのオプション
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub drop_columns: Vec<String>,
    pub date_marker: String,
    pub date_suffix: String,
    pub date_format: String,
    pub date_errors: DateErrorPolicy,
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        Self {
            drop_columns: config.drop_columns.clone(),
            date_marker: config.date_marker.clone(),
            date_suffix: config.date_suffix.clone(),
            date_format: if config.date_format.is_empty() {
                DEFAULT_DATE_FORMAT.to_string()
            } else {
                config.date_format.clone()
            },
            date_errors: config.date_errors,
            parallel: config.parallel,
        }
    }
}

/// 前処理器
pub struct Preprocessor {
    stages: Vec<Box<dyn Stage>>,
}

impl Preprocessor {
    /// 標準の段階構成で作成
    pub fn new(options: &PipelineOptions) -> Self {
        Self {
            stages: stages::standard_stages(options),
        }
    }

    /// 任意の段階構成で作成
    pub fn with_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// 前処理を実行する（入力テーブルは変更しない）
    pub fn preprocess(&self, input: &Table) -> Preprocessed {
        info!(
            rows = input.row_count(),
            columns = input.column_count(),
            "前処理開始"
        );

        let mut table = input.clone();
        let mut report = PipelineReport::default();

        for stage in &self.stages {
            let outcome = run_stage(&mut table, stage.as_ref());
            report.stages.push(StageReport {
                stage: stage.name(),
                outcome,
            });
        }

        info!(
            applied = report.applied_count(),
            skipped = report.skipped_count(),
            failed = report.failed_count(),
            "前処理完了"
        );

        Preprocessed { table, report }
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(&PipelineOptions::default())
    }
}

/// 既定のオプションで前処理する
pub fn preprocess(input: &Table) -> Preprocessed {
    Preprocessor::default().preprocess(input)
}

/// 1段階を実行する
///
/// 必要列の確認・実行・反映・ログ出力をまとめて行う。
/// 失敗時はテーブルを変更しない。
pub fn run_stage(table: &mut Table, stage: &dyn Stage) -> StageOutcome {
    let missing: Vec<String> = stage
        .required_columns()
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        debug!(stage = stage.name(), ?missing, "必要な列がないためスキップ");
        return StageOutcome::Skipped { missing };
    }

    let result = stage.apply(table).and_then(|edits| commit(table, edits));

    match result {
        Ok(columns) => {
            info!(stage = stage.name(), changed = columns.len(), "処理完了");
            StageOutcome::Applied { columns }
        }
        Err(e) => {
            error!(stage = stage.name(), "処理中にエラー発生: {}", e);
            StageOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

/// 変更をまとめて反映する
///
/// 列長を先に検証するため、エラー時はテーブルに何も反映しない。
fn commit(table: &mut Table, edits: Vec<Edit>) -> Result<Vec<String>> {
    if table.column_count() > 0 {
        let expected = table.row_count();
        let mismatch = edits.iter().find_map(|edit| match edit {
            Edit::Set(column) if column.len() != expected => Some(column),
            _ => None,
        });
        if let Some(column) = mismatch {
            return Err(Error::LengthMismatch {
                column: column.name.clone(),
                expected,
                actual: column.len(),
            }
            .into());
        }
    }

    let mut changed = Vec::with_capacity(edits.len());
    for edit in edits {
        match edit {
            Edit::Set(column) => {
                changed.push(column.name.clone());
                table.set_column(column)?;
            }
            Edit::Drop(name) => {
                if table.drop_column(&name) {
                    changed.push(name);
                }
            }
        }
    }
    Ok(changed)
}
