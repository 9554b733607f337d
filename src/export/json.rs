//! JSON出力（レコードの配列）

use crate::error::Result;
use serde::ser::{Serialize, SerializeMap, Serializer};
use shelter_intake_common::{Table, Value};
use std::io::Write;

/// 1行分（列順を保持する）
struct Record<'a> {
    names: &'a [&'a str],
    values: Vec<&'a Value>,
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (name, value) in self.names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// テーブルをJSONとして書き出し、ライターを返す
pub fn write_json<W: Write>(table: &Table, mut writer: W) -> Result<W> {
    let names = table.column_names();
    let records: Vec<Record> = table
        .rows()
        .map(|values| Record {
            names: &names,
            values,
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &records)?;
    Ok(writer)
}
