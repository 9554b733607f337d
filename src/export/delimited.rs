//! CSV出力

use crate::error::{IntakeError, Result};
use shelter_intake_common::Table;
use std::io::Write;

/// テーブルをCSVとして書き出し、ライターを返す
///
/// 欠損値は空欄、日付は `YYYY-MM-DD`。
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<W> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(table.column_names())
        .map_err(|e| IntakeError::CsvWrite(e.to_string()))?;

    for row in table.rows() {
        csv_writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| IntakeError::CsvWrite(e.to_string()))?;
    }

    csv_writer
        .into_inner()
        .map_err(|e| IntakeError::CsvWrite(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shelter_intake_common::Value;

    #[test]
    fn test_write_csv_formats_values() {
        let table = Table::from_rows(
            vec!["happen_dt".into(), "weight".into(), "breed".into()],
            vec![vec![
                Value::Date(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()),
                Value::Float(3.5),
                Value::Null,
            ]],
        );
        let bytes = write_csv(&table, Vec::new()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "happen_dt,weight,breed\n2023-06-15,3.5,\n");
    }

    #[test]
    fn test_write_csv_quotes_commas() {
        let table = Table::from_rows(
            vec!["facility_types".into()],
            vec![vec![Value::text("공공기관, 상업시설")]],
        );
        let text = String::from_utf8(write_csv(&table, Vec::new()).unwrap()).unwrap();
        assert_eq!(text, "facility_types\n\"공공기관, 상업시설\"\n");
    }
}
