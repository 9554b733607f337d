//! Excel出力
//!
//! 1シートに見出し行（太字・固定）と全行を書き出す。

use crate::error::{IntakeError, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use shelter_intake_common::{Table, Value};

const SHEET_NAME: &str = "data";

fn excel_error(e: XlsxError) -> IntakeError {
    IntakeError::ExcelGeneration(e.to_string())
}

/// Excelをバッファに生成
pub fn generate_excel_buffer(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(excel_error)?;

    write_sheet(worksheet, table)?;

    workbook.save_to_buffer().map_err(excel_error)
}

fn write_sheet(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
    let header_format = Format::new().set_bold();

    for (index, column) in table.columns().iter().enumerate() {
        let col = u16::try_from(index)
            .map_err(|_| IntakeError::ExcelGeneration(format!("列数が多すぎます: {}", index)))?;

        worksheet
            .write_string_with_format(0, col, &column.name, &header_format)
            .map_err(excel_error)?;

        for (row_index, value) in column.values.iter().enumerate() {
            let row = u32::try_from(row_index + 1)
                .map_err(|_| IntakeError::ExcelGeneration(format!("行数が多すぎます: {}", row_index)))?;
            write_cell(worksheet, row, col, value)?;
        }
    }

    if table.column_count() > 0 {
        worksheet.set_freeze_panes(1, 0).map_err(excel_error)?;
    }
    Ok(())
}

fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Int(i) => {
            worksheet.write_number(row, col, *i as f64).map_err(excel_error)?;
        }
        Value::Float(f) if f.is_finite() => {
            worksheet.write_number(row, col, *f).map_err(excel_error)?;
        }
        Value::Float(_) => {}
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b).map_err(excel_error)?;
        }
        Value::Text(_) | Value::Date(_) => {
            worksheet
                .write_string(row, col, value.to_string())
                .map_err(excel_error)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_excel_buffer_is_zip() {
        let table = Table::from_rows(
            vec!["animal_type".into(), "weight".into()],
            vec![
                vec![Value::text("개"), Value::Float(3.5)],
                vec![Value::text("고양이"), Value::Null],
            ],
        );
        let bytes = generate_excel_buffer(&table).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_generate_excel_buffer_empty_table() {
        let bytes = generate_excel_buffer(&Table::new()).unwrap();
        assert!(!bytes.is_empty());
    }
}
