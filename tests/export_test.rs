//! CSV/Excel/JSON出力の統合テスト

use shelter_intake::config::OutputFormat;
use shelter_intake::export::{export_table, export_to_bytes};
use shelter_intake::loader::{load_from_path, read_csv, read_spreadsheet_bytes};
use shelter_intake::pipeline::preprocess;
use shelter_intake_common::{Table, Value};
use tempfile::tempdir;

fn processed_table() -> Table {
    let csv = "happen_dt,kind_cd,color_cd,care_addr,weight\n\
               20230615,[개] 믹스견,검정/고등어무늬,\"서울특별시 강남구 역삼동\",3.5(Kg)\n\
               20231225,[고양이] 코리안 숏헤어,흰색,세종특별자치시 어진동,정보없음\n";
    let table = read_csv(csv.as_bytes()).expect("サンプルCSVの読み込み失敗");
    preprocess(&table).table
}

#[test]
fn test_csv_roundtrip_keeps_columns_and_text() {
    let dir = tempdir().expect("Failed to create temp dir");
    let table = processed_table();

    let written = export_table(&table, OutputFormat::Csv, dir.path(), "intake").unwrap();
    assert_eq!(written, vec![dir.path().join("intake.csv")]);

    let reloaded = load_from_path(&written[0]).unwrap().expect("データなし");
    assert_eq!(reloaded.column_names(), table.column_names());
    assert_eq!(reloaded.row_count(), table.row_count());
    assert_eq!(reloaded.get("color_cat", 0), Some(&Value::text("무늬(고등어무늬)+조합")));
    assert_eq!(reloaded.get("happen_dt", 1), Some(&Value::text("2023-12-25")));
    assert_eq!(reloaded.get("weight", 0), Some(&Value::text("3.5")));
    assert_eq!(reloaded.get("weight", 1), Some(&Value::Null));
}

#[test]
fn test_excel_output_is_readable() {
    let table = processed_table();
    let bytes = export_to_bytes(&table, OutputFormat::Excel).unwrap();
    assert!(!bytes.is_empty());

    let reloaded = read_spreadsheet_bytes(&bytes).unwrap();
    assert_eq!(reloaded.column_names(), table.column_names());
    assert_eq!(reloaded.get("weight", 0).and_then(Value::as_f64), Some(3.5));
    assert_eq!(reloaded.get("sido", 1), Some(&Value::text("세종특별자치시")));
}

#[test]
fn test_json_output_records() {
    let table = processed_table();
    let bytes = export_to_bytes(&table, OutputFormat::Json).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["happen_dt"], "2023-06-15");
    assert_eq!(records[0]["weight"], 3.5);
    assert_eq!(records[1]["weight"], serde_json::Value::Null);
    assert_eq!(records[1]["region"], "충청권");
}

#[test]
fn test_export_all_writes_three_files() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out").join("result.csv");

    let written = export_table(&processed_table(), OutputFormat::All, &output, "ignored").unwrap();

    assert_eq!(written.len(), 3);
    for ext in ["csv", "xlsx", "json"] {
        let path = dir.path().join("out").join(format!("result.{}", ext));
        assert!(path.exists(), "{} が作成されていない", path.display());
        let metadata = std::fs::metadata(&path).expect("ファイルメタデータ取得失敗");
        assert!(metadata.len() > 0, "{} が空", path.display());
    }
}
