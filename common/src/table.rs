//! 列指向テーブル
//!
//! 入力ファイル1つ分のデータを保持する。前処理の各段階は
//! 列単位で値を読み、列単位で追加・置換・削除する。

use crate::error::{Error, Result};
use crate::types::{ColumnKind, Value};
use std::collections::HashMap;

/// 1列分のデータ
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Raw,
            values,
        }
    }

    /// 日付型の列を作成
    pub fn date(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Date,
            values,
        }
    }

    pub fn is_date(&self) -> bool {
        self.kind == ColumnKind::Date
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// テーブル全体
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// ヘッダー行とデータ行から作成
    ///
    /// 短い行は欠損値で埋め、余分なセルは捨てる。
    /// 重複したヘッダーは `name.1`, `name.2` のように連番を付ける。
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let names: Vec<String> = headers
            .into_iter()
            .map(|h| {
                let count = seen.entry(h.clone()).or_insert(0);
                let name = if *count == 0 {
                    h.clone()
                } else {
                    format!("{}.{}", h, count)
                };
                *count += 1;
                name
            })
            .collect();

        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(rows.len())))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.values.push(cells.next().unwrap_or_default());
            }
        }

        Self { columns }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// 列を取得（存在しなければエラー）
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// 列を追加する。同名の列があれば同じ位置で置き換える。
    pub fn set_column(&mut self, column: Column) -> Result<()> {
        if !self.columns.is_empty() {
            let expected = self.row_count();
            if column.len() != expected {
                return Err(Error::LengthMismatch {
                    column: column.name,
                    expected,
                    actual: column.values.len(),
                });
            }
        }

        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// 列を削除する。削除した場合 true
    pub fn drop_column(&mut self, name: &str) -> bool {
        let before = self.columns.len();
        self.columns.retain(|c| c.name != name);
        self.columns.len() != before
    }

    /// 1行分の値を取得
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// 全行を走査
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.row_count()).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }

    /// 指定列の指定行の値
    pub fn get(&self, column: &str, index: usize) -> Option<&Value> {
        self.column(column).and_then(|c| c.values.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec!["kind_cd".into(), "color_cd".into()],
            vec![
                vec![Value::text("[개] 믹스견"), Value::text("흰색")],
                vec![Value::text("[고양이] 코리안숏헤어")],
            ],
        )
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.get("color_cd", 1), Some(&Value::Null));
    }

    #[test]
    fn test_from_rows_duplicate_headers() {
        let table = Table::from_rows(
            vec!["a".into(), "a".into(), "a".into()],
            vec![vec![Value::Int(1), Value::Int(2), Value::Int(3)]],
        );
        assert_eq!(table.column_names(), vec!["a", "a.1", "a.2"]);
    }

    #[test]
    fn test_set_column_replace_keeps_position() {
        let mut table = sample();
        table
            .set_column(Column::new("kind_cd", vec![Value::text("개"), Value::text("고양이")]))
            .unwrap();
        assert_eq!(table.column_names(), vec!["kind_cd", "color_cd"]);
        assert_eq!(table.get("kind_cd", 0), Some(&Value::text("개")));
    }

    #[test]
    fn test_set_column_append() {
        let mut table = sample();
        table
            .set_column(Column::new("animal_type", vec![Value::text("개"), Value::text("고양이")]))
            .unwrap();
        assert_eq!(table.column_names(), vec!["kind_cd", "color_cd", "animal_type"]);
    }

    #[test]
    fn test_set_column_length_mismatch() {
        let mut table = sample();
        let result = table.set_column(Column::new("x", vec![Value::Null]));
        assert!(matches!(
            result,
            Err(Error::LengthMismatch { expected: 2, actual: 1, .. })
        ));
        assert!(!table.has_column("x"));
    }

    #[test]
    fn test_drop_column() {
        let mut table = sample();
        assert!(table.drop_column("color_cd"));
        assert!(!table.drop_column("color_cd"));
        assert_eq!(table.column_names(), vec!["kind_cd"]);
    }

    #[test]
    fn test_rows() {
        let table = sample();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], &Value::text("흰색"));
        assert!(table.row(2).is_none());
    }

    #[test]
    fn test_require_missing() {
        let table = sample();
        assert!(matches!(table.require("care_addr"), Err(Error::ColumnNotFound(_))));
    }
}
