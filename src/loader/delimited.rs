//! CSV読み込み

use crate::error::{IntakeError, Result};
use shelter_intake_common::{Table, Value};
use std::io::Read;

/// CSVを読み込んでテーブルにする（1行目はヘッダー）
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| IntakeError::CsvRead(e.to_string()))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            // 先頭列のBOMを除去
            let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            h.trim().to_string()
        })
        .collect();

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record
            .map_err(|e| IntakeError::CsvRead(format!("{}行目: {}", line + 2, e)))?;
        rows.push(record.iter().map(cell_value).collect());
    }

    Ok(Table::from_rows(headers, rows))
}

/// 空セルは欠損値
fn cell_value(raw: &str) -> Value {
    if raw.trim().is_empty() {
        Value::Null
    } else {
        Value::text(raw)
    }
}
