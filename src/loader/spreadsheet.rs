//! Excel（xls / xlsx）読み込み
//!
//! 先頭シートの1行目をヘッダーとして扱う。

use crate::error::{IntakeError, Result};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use shelter_intake_common::{Table, Value};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// ファイルから読み込み
pub fn read_spreadsheet(path: &Path) -> Result<Table> {
    let workbook = open_workbook_auto(path)
        .map_err(|e| IntakeError::SpreadsheetRead(format!("{}: {}", path.display(), e)))?;
    read_first_sheet(workbook)
}

/// バイト列（アップロードファイル）から読み込み
pub fn read_spreadsheet_bytes(bytes: &[u8]) -> Result<Table> {
    let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| IntakeError::SpreadsheetRead(e.to_string()))?;
    read_first_sheet(workbook)
}

fn read_first_sheet<RS: Read + Seek>(mut workbook: Sheets<RS>) -> Result<Table> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IntakeError::SpreadsheetRead("シートがありません".into()))?
        .map_err(|e| IntakeError::SpreadsheetRead(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => return Ok(Table::new()),
    };

    let body: Vec<Vec<Value>> = rows.map(|row| row.iter().map(cell_value).collect()).collect();

    Ok(Table::from_rows(headers, body))
}

/// セルを値に変換
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => Value::text(s.as_str()),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| Value::Date(d.date()))
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::text(s.as_str()),
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value() {
        assert_eq!(cell_value(&Data::Empty), Value::Null);
        assert_eq!(cell_value(&Data::String("  ".into())), Value::Null);
        assert_eq!(cell_value(&Data::String("흰색".into())), Value::text("흰색"));
        assert_eq!(cell_value(&Data::Float(20230615.0)), Value::Float(20230615.0));
        assert_eq!(cell_value(&Data::Int(3)), Value::Int(3));
    }

    #[test]
    fn test_read_spreadsheet_bytes_invalid() {
        let result = read_spreadsheet_bytes(b"not a workbook");
        assert!(matches!(result, Err(IntakeError::SpreadsheetRead(_))));
    }
}
