//! 日付の解析と時間要素の抽出
//!
//! `YYYYMMDD` 形式の整数・文字列を日付に変換し、
//! 年・月・日・曜日・季節を派生させる。

use crate::error::{Error, Result};
use crate::types::Value;
use chrono::{Datelike, NaiveDate, Weekday};

/// 既定の日付書式
pub const DEFAULT_DATE_FORMAT: &str = "%Y%m%d";

/// 季節
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// 月（1-12）から季節を求める
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Fall),
            _ => None,
        }
    }

    /// 出力列に書き込むラベル
    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "봄",
            Season::Summer => "여름",
            Season::Fall => "가을",
            Season::Winter => "겨울",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 日付から派生する時間要素
#[derive(Debug, Clone, PartialEq)]
pub struct TimeComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 月曜=0 〜 日曜=6
    pub weekday: u32,
    pub weekday_name: &'static str,
    pub season: Season,
}

impl TimeComponents {
    pub fn from_date(date: NaiveDate) -> Self {
        let weekday = date.weekday();
        let month = date.month();
        Self {
            year: date.year(),
            month,
            day: date.day(),
            weekday: weekday.num_days_from_monday(),
            weekday_name: weekday_name(weekday),
            // month は常に 1-12
            season: Season::from_month(month).unwrap_or(Season::Winter),
        }
    }
}

/// 曜日名（英語フルネーム）
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// セル値を日付に変換
///
/// - 欠損値・空文字は `Ok(None)`
/// - 整数・整数値の浮動小数（Excelのセル）は数字列として解釈
/// - 既に日付ならそのまま返す
pub fn parse_date(value: &Value, format: &str) -> Result<Option<NaiveDate>> {
    let text = match value {
        Value::Null => return Ok(None),
        Value::Date(d) => return Ok(Some(*d)),
        Value::Int(i) => i.to_string(),
        Value::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        Value::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.to_string()
        }
        other => {
            return Err(Error::DateParse {
                value: other.to_string(),
                format: format.to_string(),
            })
        }
    };

    NaiveDate::parse_from_str(&text, format)
        .map(Some)
        .map_err(|_| Error::DateParse {
            value: text,
            format: format.to_string(),
        })
}

/// 日付列名から派生列のベース名を得る
///
/// `happen_dt` → `happen`
pub fn component_base_name(column: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        column.to_string()
    } else {
        column.replace(suffix, "")
    }
}

/// 日付列から派生列を作る
///
/// 戻り値は (列名, 値) のリストで、順序は
/// `_year`, `_month`, `_day`, `_weekday`, `_dayofweek`, `_season`。
pub fn component_columns(base: &str, dates: &[Value]) -> Vec<(String, Vec<Value>)> {
    let components: Vec<Option<TimeComponents>> = dates
        .iter()
        .map(|v| match v {
            Value::Date(d) => Some(TimeComponents::from_date(*d)),
            _ => None,
        })
        .collect();

    vec![
        (format!("{}_year", base), build(&components, |c| Value::Int(c.year as i64))),
        (format!("{}_month", base), build(&components, |c| Value::Int(c.month as i64))),
        (format!("{}_day", base), build(&components, |c| Value::Int(c.day as i64))),
        (format!("{}_weekday", base), build(&components, |c| Value::Int(c.weekday as i64))),
        (format!("{}_dayofweek", base), build(&components, |c| Value::text(c.weekday_name))),
        (format!("{}_season", base), build(&components, |c| Value::text(c.season.label()))),
    ]
}

fn build(components: &[Option<TimeComponents>], f: impl Fn(&TimeComponents) -> Value) -> Vec<Value> {
    components
        .iter()
        .map(|c| c.as_ref().map(&f).unwrap_or(Value::Null))
        .collect()
}
