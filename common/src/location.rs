//! 発見場所分類モジュール
//!
//! 発見場所（`happen_place`）の自由記述を2つの辞書で分類する。
//!
//! - 장소 유형: 一致した全カテゴリから優先順位表で1つに絞る
//! - 시설 특성: 一致した全カテゴリを返す（複数ラベル）
//!
//! 2つの辞書はキーワードが重複する（`공원` など）が、別々に保守されている
//! ためそのまま保持する。

use serde::Serialize;

/// 該当なしのラベル
pub const OTHER: &str = "기타";

/// 장소 유형 辞書
pub const PLACE_TYPE_DICTIONARY: &[(&str, &[&str])] = &[
    (
        "공공기관",
        &[
            "소방서", "구청", "시청", "경찰서", "주민센터", "학교", "대학", "도서관", "우체국",
            "공공기관", "사무소", "청사", "센터",
        ],
    ),
    (
        "상업시설",
        &[
            "마트", "시장", "상가", "쇼핑", "편의점", "백화점", "매장", "가게", "식당", "카페",
            "음식점", "마을회관", "슈퍼",
        ],
    ),
    (
        "주거지역",
        &["아파트", "주택", "빌라", "마을", "차", "단지", "동네", "오피스텔", "다세대"],
    ),
    (
        "도로변",
        &[
            "로", "길", "도로", "거리", "대로", "번길", "버스", "버스정류장", "교차로", "사거리",
            "고가", "다리", "철길", "지하도",
        ],
    ),
    (
        "공원",
        &[
            "공원", "산책로", "광장", "정원", "산", "숲", "강", "하천", "계곡", "저수지", "호수",
            "유원지", "놀이터",
        ],
    ),
    (
        "농촌지역",
        &["농장", "논", "밭", "과수원", "농지", "축사", "목장", "양식장", "비닐하우스", "창고"],
    ),
    (
        "공사장",
        &["공사장", "건설", "공사", "폐가", "폐건물", "공터", "빈터", "유휴지"],
    ),
    (
        "교통시설",
        &[
            "역", "지하철", "기차", "고속도로", "휴게소", "주차장", "정류소", "환승센터", "공항",
            "철도",
        ],
    ),
    ("종교시설", &["교회", "성당", "사찰", "절", "묘지", "납골당", "종교"]),
];

/// 시설 특성 辞書（`기타` はキーワードなし）
pub const FACILITY_TYPE_DICTIONARY: &[(&str, &[&str])] = &[
    ("소방서", &["소방서", "119", "구조대", "안전센터"]),
    (
        "병원",
        &["병원", "의원", "보건소", "진료소", "의료", "약국", "동물병원", "의료원"],
    ),
    (
        "관공서",
        &[
            "시청", "구청", "동사무소", "주민센터", "관공서", "군청", "행정", "관리사무소", "공단",
            "공사",
        ],
    ),
    ("버스정류장", &["버스", "정류장", "버스정류장", "터미널", "승강장"]),
    (
        "교육시설",
        &[
            "학교", "유치원", "어린이집", "대학교", "학원", "도서관", "연구소", "교육", "훈련원",
            "대학",
        ],
    ),
    (
        "복지시설",
        &["복지관", "경로당", "양로원", "보육원", "쉼터", "보호소", "재활원"],
    ),
    (
        "체육시설",
        &[
            "체육관", "운동장", "구장", "경기장", "스포츠센터", "수영장", "헬스장", "골프장",
        ],
    ),
    (
        "공원및녹지",
        &["공원", "놀이터", "광장", "정원", "산책로", "녹지", "휴식공간"],
    ),
    (
        "상업시설",
        &["상가", "시장", "마트", "슈퍼", "편의점", "매장", "백화점", "쇼핑", "상점"],
    ),
    (
        "식음료",
        &["식당", "카페", "음식점", "레스토랑", "주점", "호프", "분식"],
    ),
    (
        "주거시설",
        &["아파트", "주택", "빌라", "오피스텔", "다세대", "기숙사", "생활관"],
    ),
    ("산업시설", &["공장", "창고", "물류", "산업", "연구소", "단지"]),
    (
        "철도시설",
        &[
            "역", "기차역", "지하철역", "철도", "전철", "지하철", "KTX", "SRT", "광역철도",
        ],
    ),
    ("터미널", &["터미널", "고속버스", "시외버스", "환승센터", "공항"]),
    (OTHER, &[]),
];

/// 장소 유형 の優先順位（先頭が最優先）
///
/// 辞書にないカテゴリ（교육시설・병원・복지시설）も含むが、順位表として保持する。
pub const PRIORITY_ORDER: [&str; 12] = [
    "공공기관", "상업시설", "교육시설", "병원", "종교시설", "복지시설", "공원", "주거지역",
    "농촌지역", "도로변", "교통시설", "공사장",
];

/// 辞書のうちキーワードが部分一致したカテゴリ（辞書順）
fn matched_categories(
    dictionary: &'static [(&'static str, &'static [&'static str])],
    text: &str,
) -> Vec<&'static str> {
    dictionary
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
        .collect()
}

/// 一致した 장소 유형 を全て取得（優先順位適用前）
pub fn matched_place_types(text: &str) -> Vec<&'static str> {
    matched_categories(PLACE_TYPE_DICTIONARY, text)
}

/// 장소 유형 を1つ決定
pub fn place_type(text: &str) -> &'static str {
    let matched = matched_place_types(text);
    PRIORITY_ORDER
        .iter()
        .copied()
        .find(|p| matched.contains(p))
        .unwrap_or(OTHER)
}

/// 시설 특성 を全て取得（該当なしは `[기타]`）
pub fn facility_types(text: &str) -> Vec<&'static str> {
    let matched = matched_categories(FACILITY_TYPE_DICTIONARY, text);
    if matched.is_empty() {
        vec![OTHER]
    } else {
        matched
    }
}

/// 1値分の分類結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationClassification {
    pub original_text: String,
    pub place_type: &'static str,
    pub facility_types: Vec<&'static str>,
}

impl LocationClassification {
    /// 出力列用（`, ` 区切り）
    pub fn facility_label(&self) -> String {
        self.facility_types.join(", ")
    }
}

/// 発見場所を分類する（欠損は `기타` / `[기타]`）
pub fn classify_location(text: Option<&str>) -> LocationClassification {
    match text {
        Some(text) => LocationClassification {
            original_text: text.to_string(),
            place_type: place_type(text),
            facility_types: facility_types(text),
        },
        None => LocationClassification {
            original_text: String::new(),
            place_type: OTHER,
            facility_types: vec![OTHER],
        },
    }
}
