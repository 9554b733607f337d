//! 住所分解モジュール
//!
//! 보호소 주소を 시도 / 시군구 に分け、시도から권역を求める。

use regex::Regex;
use serde::Serialize;

/// 不明時のラベル
pub const UNKNOWN: &str = "미상";

/// 권역が決まらない場合のラベル
pub const OTHER_REGION: &str = "기타";

/// 세종특별자치시（시군구を持たない）
pub const SEJONG: &str = "세종특별자치시";

/// 시도の一覧（前方一致で先頭から照合）
pub const SIDO_NAMES: [&str; 17] = [
    "서울특별시",
    "부산광역시",
    "대구광역시",
    "인천광역시",
    "광주광역시",
    "대전광역시",
    "울산광역시",
    "세종특별자치시",
    "경기도",
    "강원도",
    "충청북도",
    "충청남도",
    "전라북도",
    "전라남도",
    "경상북도",
    "경상남도",
    "제주특별자치도",
];

/// 권역テーブル（시도 → 권역）
pub const REGION_TABLE: &[(&str, &[&str])] = &[
    ("수도권", &["서울특별시", "인천광역시", "경기도"]),
    (
        "영남권",
        &["부산광역시", "대구광역시", "울산광역시", "경상북도", "경상남도"],
    ),
    ("호남권", &["광주광역시", "전라북도", "전라남도"]),
    (
        "충청권",
        &["대전광역시", "세종특별자치시", "충청북도", "충청남도"],
    ),
    ("강원/제주", &["강원도", "제주특별자치도"]),
];

/// 住所の分解結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdministrativeRegion {
    pub sido: String,
    pub sigungu: String,
    pub region: String,
}

impl AdministrativeRegion {
    fn unknown() -> Self {
        Self {
            sido: UNKNOWN.to_string(),
            sigungu: UNKNOWN.to_string(),
            region: OTHER_REGION.to_string(),
        }
    }
}

/// 住所を分解する
pub fn decompose_address(address: Option<&str>) -> AdministrativeRegion {
    lazy_static::lazy_static! {
        static ref PAREN_RE: Regex = Regex::new(r"\([^)]*\)").unwrap();
    }

    let Some(address) = address else {
        return AdministrativeRegion::unknown();
    };

    let cleaned = PAREN_RE.replace_all(address, "");
    let cleaned = cleaned.trim();

    let Some(sido) = SIDO_NAMES.iter().find(|name| cleaned.starts_with(*name)) else {
        return AdministrativeRegion::unknown();
    };

    let sigungu = if *sido == SEJONG {
        String::new()
    } else {
        let remaining = cleaned[sido.len()..].trim();
        if remaining.contains(' ') {
            remaining
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string()
        } else {
            remaining.to_string()
        }
    };

    AdministrativeRegion {
        sido: sido.to_string(),
        sigungu,
        region: categorize_region(sido).to_string(),
    }
}

/// 시도を권역に分類
pub fn categorize_region(sido: &str) -> &'static str {
    REGION_TABLE
        .iter()
        .find(|(_, members)| members.contains(&sido))
        .map(|(region, _)| *region)
        .unwrap_or(OTHER_REGION)
}
