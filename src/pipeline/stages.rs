//! 前処理の各段階

use super::{Edit, PipelineOptions, Stage};
use crate::config::DateErrorPolicy;
use crate::error::Result;
use rayon::prelude::*;
use shelter_intake_common::dates::{component_base_name, component_columns};
use shelter_intake_common::{
    animal_status, animal_type, classify_color, classify_location, decompose_address,
    extract_breed, extract_weight, neuter_label, normalize_process_state, parse_date,
    process_category, sex_label, Column, Table, Value,
};
use tracing::{info, warn};

/// 標準の段階構成
pub fn standard_stages(options: &PipelineOptions) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(DropColumns {
            columns: options.drop_columns.clone(),
        }),
        Box::new(ConvertDates {
            marker: options.date_marker.to_lowercase(),
            format: options.date_format.clone(),
            policy: options.date_errors,
        }),
        Box::new(ExtractTimeComponents {
            suffix: options.date_suffix.clone(),
        }),
        Box::new(AnimalType),
        Box::new(ProcessState),
        Box::new(SexNeuter),
        Box::new(ColorStage {
            parallel: options.parallel,
        }),
        Box::new(AddressStage),
        Box::new(LocationStage {
            parallel: options.parallel,
        }),
        Box::new(WeightStage),
        Box::new(BreedStage),
    ]
}

/// 行ごとの変換（`parallel` なら rayon で並列実行、順序は保持）
fn map_values<T, F>(values: &[Value], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Value) -> T + Sync + Send,
{
    if parallel {
        values.par_iter().map(f).collect()
    } else {
        values.iter().map(f).collect()
    }
}

/// 値があるのに変換できなかった行番号（0始まり）
fn unparsed_rows<T>(inputs: &[Value], outputs: &[Option<T>]) -> Vec<usize> {
    inputs
        .iter()
        .zip(outputs)
        .enumerate()
        .filter(|(_, (input, output))| !input.is_null() && output.is_none())
        .map(|(row, _)| row)
        .collect()
}

fn text_column<'a>(name: &str, values: impl Iterator<Item = &'a str>) -> Column {
    Column::new(name, values.map(Value::text).collect())
}

/// 不要列の削除（存在しない列は無視）
pub struct DropColumns {
    pub columns: Vec<String>,
}

impl Stage for DropColumns {
    fn name(&self) -> &'static str {
        "drop_columns"
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let edits: Vec<Edit> = self
            .columns
            .iter()
            .filter(|c| table.has_column(c))
            .map(|c| Edit::Drop(c.clone()))
            .collect();
        info!("削除対象の列: {}件", edits.len());
        Ok(edits)
    }
}

/// 日付列の変換
pub struct ConvertDates {
    /// 小文字化済みのマーカー
    pub marker: String,
    pub format: String,
    pub policy: DateErrorPolicy,
}

impl ConvertDates {
    fn convert(&self, column: &Column) -> Option<Vec<Value>> {
        let mut values = Vec::with_capacity(column.len());
        for (row, value) in column.values.iter().enumerate() {
            match parse_date(value, &self.format) {
                Ok(date) => values.push(date.map(Value::Date).unwrap_or_default()),
                Err(e) => match self.policy {
                    DateErrorPolicy::Strict => {
                        warn!(column = %column.name, row, "日付変換失敗のため列を変換しません: {}", e);
                        return None;
                    }
                    DateErrorPolicy::Coerce => {
                        warn!(column = %column.name, row, "日付変換失敗、欠損値にします: {}", e);
                        values.push(Value::Null);
                    }
                },
            }
        }
        Some(values)
    }
}

impl Stage for ConvertDates {
    fn name(&self) -> &'static str {
        "convert_dates"
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let edits: Vec<Edit> = table
            .columns()
            .iter()
            .filter(|c| !c.is_date() && c.name.to_lowercase().contains(&self.marker))
            .filter_map(|c| {
                self.convert(c)
                    .map(|values| Edit::Set(Column::date(c.name.clone(), values)))
            })
            .collect();
        info!("日付列の変換: {}列", edits.len());
        Ok(edits)
    }
}

/// 日付列から年・月・日・曜日・季節を抽出
pub struct ExtractTimeComponents {
    pub suffix: String,
}

impl Stage for ExtractTimeComponents {
    fn name(&self) -> &'static str {
        "extract_time_components"
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        Ok(table
            .columns()
            .iter()
            .filter(|c| c.is_date())
            .flat_map(|c| {
                let base = component_base_name(&c.name, &self.suffix);
                component_columns(&base, &c.values)
            })
            .map(|(name, values)| Edit::Set(Column::new(name, values)))
            .collect())
    }
}

/// 動物種別（개 / 고양이 / 기타）
pub struct AnimalType;

impl Stage for AnimalType {
    fn name(&self) -> &'static str {
        "animal_type"
    }

    fn required_columns(&self) -> &[&'static str] {
        &["kind_cd"]
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let kinds = table.require("kind_cd")?;
        let column = text_column(
            "animal_type",
            kinds.values.iter().map(|v| animal_type(v.as_text().as_deref())),
        );
        Ok(vec![Edit::Set(column)])
    }
}

/// 処理状態の正規化と区分
pub struct ProcessState;

impl Stage for ProcessState {
    fn name(&self) -> &'static str {
        "process_state"
    }

    fn required_columns(&self) -> &[&'static str] {
        &["process_state"]
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let states = table.require("process_state")?;

        let normalized: Vec<Value> = states
            .values
            .iter()
            .map(|v| match v.as_text() {
                Some(s) => Value::text(normalize_process_state(&s)),
                None => Value::Null,
            })
            .collect();
        let categories = text_column(
            "process_cat",
            normalized.iter().map(|v| process_category(v.as_str())),
        );

        Ok(vec![
            Edit::Set(Column::new("process_state", normalized)),
            Edit::Set(categories),
        ])
    }
}

/// 性別×中性化の状態と、コードのラベル化
pub struct SexNeuter;

impl Stage for SexNeuter {
    fn name(&self) -> &'static str {
        "sex_neuter"
    }

    fn required_columns(&self) -> &[&'static str] {
        &["sex_cd", "neuter_yn"]
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let sex = table.require("sex_cd")?;
        let neuter = table.require("neuter_yn")?;

        let status = text_column(
            "animal_status",
            sex.values
                .iter()
                .zip(&neuter.values)
                .map(|(s, n)| animal_status(s.as_str(), n.as_str())),
        );
        let relabel = |values: &[Value], label: fn(&str) -> Option<&'static str>| -> Vec<Value> {
            values
                .iter()
                .map(|v| v.as_str().and_then(label).into())
                .collect()
        };

        Ok(vec![
            Edit::Set(status),
            Edit::Set(Column::new("sex_cd", relabel(&sex.values, sex_label))),
            Edit::Set(Column::new("neuter_yn", relabel(&neuter.values, neuter_label))),
        ])
    }
}

/// 毛色の分類
pub struct ColorStage {
    pub parallel: bool,
}

impl Stage for ColorStage {
    fn name(&self) -> &'static str {
        "color"
    }

    fn required_columns(&self) -> &[&'static str] {
        &["color_cd"]
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let colors = table.require("color_cd")?;
        let results = map_values(&colors.values, self.parallel, |v| {
            classify_color(v.as_text().as_deref())
        });

        // ノイズ除去は文字列の値のみ書き戻す
        let filtered: Vec<Value> = colors
            .values
            .iter()
            .zip(&results)
            .map(|(original, result)| match (original, &result.filtered) {
                (Value::Text(_), Some(text)) => Value::text(text.as_str()),
                _ => original.clone(),
            })
            .collect();

        Ok(vec![
            Edit::Set(Column::new("color_cd", filtered)),
            Edit::Set(text_column("color_cat", results.iter().map(|r| r.category.as_str()))),
            Edit::Set(Column::new(
                "color_list",
                results.iter().map(|r| Value::text(r.color_list())).collect(),
            )),
            Edit::Set(text_column("color_type", results.iter().map(|r| r.color_type.as_str()))),
        ])
    }
}

/// 保護所住所の分解
pub struct AddressStage;

impl Stage for AddressStage {
    fn name(&self) -> &'static str {
        "address"
    }

    fn required_columns(&self) -> &[&'static str] {
        &["care_addr"]
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let addresses = table.require("care_addr")?;
        let regions: Vec<_> = addresses
            .values
            .iter()
            .map(|v| decompose_address(v.as_text().as_deref()))
            .collect();

        Ok(vec![
            Edit::Set(text_column("sido", regions.iter().map(|r| r.sido.as_str()))),
            Edit::Set(text_column("sigungu", regions.iter().map(|r| r.sigungu.as_str()))),
            Edit::Set(text_column("region", regions.iter().map(|r| r.region.as_str()))),
        ])
    }
}

/// 発見場所の分類
pub struct LocationStage {
    pub parallel: bool,
}

impl Stage for LocationStage {
    fn name(&self) -> &'static str {
        "location"
    }

    fn required_columns(&self) -> &[&'static str] {
        &["happen_place"]
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let places = table.require("happen_place")?;
        let results = map_values(&places.values, self.parallel, |v| {
            classify_location(v.as_text().as_deref())
        });

        Ok(vec![
            Edit::Set(text_column("place_type", results.iter().map(|r| r.place_type))),
            Edit::Set(Column::new(
                "facility_types",
                results.iter().map(|r| Value::text(r.facility_label())).collect(),
            )),
        ])
    }
}

/// 体重を数値に変換
pub struct WeightStage;

impl Stage for WeightStage {
    fn name(&self) -> &'static str {
        "weight"
    }

    fn required_columns(&self) -> &[&'static str] {
        &["weight"]
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let weights = table.require("weight")?;
        let parsed: Vec<Option<f64>> = weights.values.iter().map(extract_weight).collect();

        let rows = unparsed_rows(&weights.values, &parsed);
        if !rows.is_empty() {
            warn!(column = "weight", rows = ?rows, "体重を数値にできない値: {}件", rows.len());
        }

        let values = parsed.into_iter().map(Value::from).collect();
        Ok(vec![Edit::Set(Column::new("weight", values))])
    }
}

/// 品種の抽出
pub struct BreedStage;

impl Stage for BreedStage {
    fn name(&self) -> &'static str {
        "breed"
    }

    fn required_columns(&self) -> &[&'static str] {
        &["kind_cd"]
    }

    fn apply(&self, table: &Table) -> Result<Vec<Edit>> {
        let kinds = table.require("kind_cd")?;
        let breeds: Vec<Option<String>> = kinds.values.iter().map(extract_breed).collect();

        let rows = unparsed_rows(&kinds.values, &breeds);
        if !rows.is_empty() {
            warn!(column = "kind_cd", rows = ?rows, "品種を抽出できない値: {}件", rows.len());
        }

        let values = breeds.into_iter().map(Value::from).collect();
        Ok(vec![Edit::Set(Column::new("breed", values))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shelter_intake_common::ColumnKind;
    use tracing_test::traced_test;

    fn table(headers: &[&str], rows: Vec<Vec<Value>>) -> Table {
        Table::from_rows(headers.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn set_columns(edits: Vec<Edit>) -> Vec<Column> {
        edits
            .into_iter()
            .filter_map(|e| match e {
                Edit::Set(c) => Some(c),
                Edit::Drop(_) => None,
            })
            .collect()
    }

    fn convert_dates(policy: DateErrorPolicy) -> ConvertDates {
        ConvertDates {
            marker: "dt".into(),
            format: "%Y%m%d".into(),
            policy,
        }
    }

    #[test]
    fn test_drop_columns_ignores_missing() {
        let t = table(&["care_tel", "kind_cd"], vec![vec![Value::text("010"), Value::text("[개]")]]);
        let stage = DropColumns {
            columns: vec!["care_tel".into(), "popfile".into()],
        };
        assert_eq!(stage.apply(&t).unwrap(), vec![Edit::Drop("care_tel".into())]);
    }

    #[test]
    fn test_convert_dates_strict_keeps_raw() {
        let t = table(
            &["happen_dt"],
            vec![vec![Value::text("20230615")], vec![Value::text("unknown")]],
        );
        let edits = convert_dates(DateErrorPolicy::Strict).apply(&t).unwrap();
        assert!(edits.is_empty());
    }

    #[test]
    fn test_convert_dates_coerce() {
        let t = table(
            &["happen_dt"],
            vec![vec![Value::text("20230615")], vec![Value::text("unknown")]],
        );
        let columns = set_columns(convert_dates(DateErrorPolicy::Coerce).apply(&t).unwrap());
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].kind, ColumnKind::Date);
        assert_eq!(
            columns[0].values,
            vec![Value::Date(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()), Value::Null]
        );
    }

    #[test]
    fn test_convert_dates_marker_is_case_insensitive() {
        let t = table(
            &["noticeSdt", "kind_cd"],
            vec![vec![Value::Int(20231225), Value::text("[개]")]],
        );
        let columns = set_columns(convert_dates(DateErrorPolicy::Strict).apply(&t).unwrap());
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "noticeSdt");
    }

    #[test]
    fn test_time_components_from_date_column() {
        let mut t = Table::new();
        t.set_column(Column::date(
            "happen_dt",
            vec![Value::Date(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap())],
        ))
        .unwrap();
        let stage = ExtractTimeComponents { suffix: "_dt".into() };
        let columns = set_columns(stage.apply(&t).unwrap());
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "happen_year",
                "happen_month",
                "happen_day",
                "happen_weekday",
                "happen_dayofweek",
                "happen_season",
            ]
        );
        assert_eq!(columns[4].values[0], Value::text("Thursday"));
        assert_eq!(columns[5].values[0], Value::text("여름"));
    }

    #[test]
    fn test_process_state_null_is_closed() {
        let t = table(
            &["process_state"],
            vec![
                vec![Value::text("종료(입양)")],
                vec![Value::text("보호중")],
                vec![Value::Null],
            ],
        );
        let columns = set_columns(ProcessState.apply(&t).unwrap());
        assert_eq!(
            columns[0].values,
            vec![Value::text("입양"), Value::text("보호중"), Value::Null]
        );
        assert_eq!(
            columns[1].values,
            vec![Value::text("종료"), Value::text("보호중"), Value::text("종료")]
        );
    }

    #[test]
    fn test_sex_neuter_relabels_codes() {
        let t = table(
            &["sex_cd", "neuter_yn"],
            vec![
                vec![Value::text("M"), Value::text("Y")],
                vec![Value::text("Q"), Value::text("N")],
                vec![Value::text("X"), Value::Null],
            ],
        );
        let columns = set_columns(SexNeuter.apply(&t).unwrap());
        assert_eq!(
            columns[0].values,
            vec![
                Value::text("중성화된 수컷"),
                Value::text("미상"),
                Value::text("정보없음"),
            ]
        );
        assert_eq!(
            columns[1].values,
            vec![Value::text("수컷"), Value::text("미상"), Value::Null]
        );
        assert_eq!(
            columns[2].values,
            vec![Value::text("중성화O"), Value::text("중성화X"), Value::Null]
        );
    }

    #[test]
    fn test_color_parallel_matches_sequential() {
        let rows: Vec<Vec<Value>> = ["흰색/갈색", "검정 고등어", "삼색", "", "흰"]
            .iter()
            .map(|s| vec![Value::text(*s)])
            .collect();
        let t = table(&["color_cd"], rows);
        let sequential = ColorStage { parallel: false }.apply(&t).unwrap();
        let parallel = ColorStage { parallel: true }.apply(&t).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_color_writes_back_filtered_text() {
        let t = table(
            &["color_cd"],
            vec![
                vec![Value::text("흰색 역삼동")],
                vec![Value::text("흰색/갈색")],
                vec![Value::Null],
            ],
        );
        let columns = set_columns(ColorStage { parallel: false }.apply(&t).unwrap());
        assert_eq!(
            columns[0].values,
            vec![Value::text("확인필요"), Value::text("흰색/갈색"), Value::Null]
        );
        assert_eq!(columns[1].values[0], Value::text("확인필요"));
        assert_eq!(columns[1].values[2], Value::text("확인필요"));
        assert_eq!(columns[2].values[1], Value::text("흰색/갈색"));
        assert_eq!(columns[3].values[1], Value::text("이색"));
    }

    #[test]
    fn test_weight_unparsed_is_null() {
        let t = table(
            &["weight"],
            vec![
                vec![Value::text("3.5(Kg)")],
                vec![Value::text("미상")],
                vec![Value::Int(4)],
            ],
        );
        let columns = set_columns(WeightStage.apply(&t).unwrap());
        assert_eq!(
            columns[0].values,
            vec![Value::Float(3.5), Value::Null, Value::Float(4.0)]
        );
    }

    #[test]
    fn test_unparsed_rows_ignore_nulls() {
        let inputs = vec![Value::text("3kg"), Value::Null, Value::text("미상")];
        let outputs = vec![Some(3.0), None, None];
        assert_eq!(unparsed_rows(&inputs, &outputs), vec![2]);
    }

    #[traced_test]
    #[test]
    fn test_weight_logs_unparsed_rows() {
        let t = table(
            &["weight"],
            vec![
                vec![Value::text("3.5(Kg)")],
                vec![Value::text("정보없음")],
                vec![Value::Null],
            ],
        );
        WeightStage.apply(&t).unwrap();
        assert!(logs_contain("column=\"weight\""));
        assert!(logs_contain("rows=[1]"));
        assert!(logs_contain("体重を数値にできない値: 1件"));
    }

    #[traced_test]
    #[test]
    fn test_breed_logs_unparsed_rows() {
        let t = table(
            &["kind_cd"],
            vec![
                vec![Value::text("[개] 진도견")],
                vec![Value::text("믹스견")],
                vec![Value::Null],
            ],
        );
        let breeds = set_columns(BreedStage.apply(&t).unwrap());
        assert_eq!(breeds[0].values[1], Value::Null);
        assert!(logs_contain("column=\"kind_cd\""));
        assert!(logs_contain("rows=[1]"));
        assert!(logs_contain("品種を抽出できない値: 1件"));
    }

    #[traced_test]
    #[test]
    fn test_breed_all_parsed_does_not_warn() {
        let t = table(&["kind_cd"], vec![vec![Value::text("[고양이] 코리안 숏헤어")]]);
        BreedStage.apply(&t).unwrap();
        assert!(!logs_contain("品種を抽出できない値"));
    }

    #[test]
    fn test_breed_and_animal_type() {
        let t = table(
            &["kind_cd"],
            vec![vec![Value::text("[개] 진도견")], vec![Value::text("[기타축종] ")]],
        );
        let breeds = set_columns(BreedStage.apply(&t).unwrap());
        assert_eq!(breeds[0].values, vec![Value::text("진도견"), Value::Null]);

        let types = set_columns(AnimalType.apply(&t).unwrap());
        assert_eq!(types[0].values, vec![Value::text("개"), Value::text("기타")]);
    }
}
