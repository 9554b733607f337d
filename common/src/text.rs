//! 体重・品種の抽出
//!
//! 表記の揺れた文字列から数値・部分文字列を取り出す。
//! どちらも失敗時は None を返し、エラーにはしない。

use crate::types::Value;
use regex::Regex;

/// 体重を抽出（kg）
///
/// 最初に現れる数値（`3.5(Kg)` の `3.5` など）を採用する。
/// 範囲表記 `2~3kg` でも先頭の数値のみ。
pub fn extract_weight(value: &Value) -> Option<f64> {
    if let Some(v) = value.as_f64() {
        return if v.is_finite() { Some(v) } else { None };
    }

    lazy_static::lazy_static! {
        static ref NUMBER_RE: Regex = Regex::new(r"[0-9０-９]+(?:\.[0-9０-９]+)?").unwrap();
    }

    let text = value.as_text()?;
    NUMBER_RE
        .find(&text)
        .and_then(|m| to_ascii_digits(m.as_str()).parse::<f64>().ok())
}

/// 全角数字を半角に変換
fn to_ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            _ => c,
        })
        .collect()
}

/// 品種を抽出
///
/// 1. `[개] 믹스견` のような角括弧の後ろ（次の丸括弧まで）
/// 2. 角括弧がなければ `개` / `고양이` / `축종` の後ろ
pub fn extract_breed(value: &Value) -> Option<String> {
    lazy_static::lazy_static! {
        static ref BRACKET_RE: Regex = Regex::new(r"\](.*?)($|\s*\()").unwrap();
        static ref SPECIES_RE: Regex = Regex::new(r"(개|고양이|축종)\s+(.*?)($|\s*\()").unwrap();
    }

    let text = value.as_text()?;

    let captured = if let Some(caps) = BRACKET_RE.captures(&text) {
        caps.get(1).map(|m| m.as_str().trim().to_string())
    } else {
        SPECIES_RE
            .captures(&text)
            .and_then(|caps| caps.get(2).map(|m| m.as_str().trim().to_string()))
    };

    captured.filter(|breed| !breed.is_empty())
}
