//! 毛色分類モジュール
//!
//! 自由記述の毛色（`color_cd`）から標準色トークンを抽出し、
//! トークン列を1つのカテゴリに集約する。
//!
//! ## 処理フロー
//! 1. 地名ノイズ除去（`동`・`구` などを含む値は `확인필요` に置換）
//! 2. 区切り文字（`,` `/` `·` 空白）で分割
//! 3. 各部分を同義語辞書と部分一致で照合（初出順・重複なし）
//! 4. 무늬 > 단색 の優先順でカテゴリを決定

use regex::Regex;
use serde::Serialize;

/// 判定不能のラベル
pub const NEEDS_REVIEW: &str = "확인필요";

/// 色トークンの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenGroup {
    /// 単色（5種）
    Solid,
    /// 柄（5種）
    Pattern,
}

/// 標準色トークンと同義語
pub struct ColorEntry {
    pub name: &'static str,
    pub group: TokenGroup,
    pub keywords: &'static [&'static str],
}

/// 色・柄の同義語辞書（照合順）
pub const COLOR_DICTIONARY: &[ColorEntry] = &[
    ColorEntry {
        name: "검정",
        group: TokenGroup::Solid,
        keywords: &["검정", "검정색", "검은색", "검", "흑색", "흑", "블랙"],
    },
    ColorEntry {
        name: "흰색",
        group: TokenGroup::Solid,
        keywords: &[
            "흰색", "흰", "백색", "백", "하얀색", "아이보리", "크림색", "크림", "화이트",
        ],
    },
    ColorEntry {
        name: "갈색",
        group: TokenGroup::Solid,
        keywords: &[
            "갈색", "갈", "연갈색", "연갈", "황갈색", "황토색", "브라운", "밤갈색", "초콜릿색",
        ],
    },
    ColorEntry {
        name: "노랑",
        group: TokenGroup::Solid,
        keywords: &["황색", "노랑", "노란색", "노랑색", "황", "금색", "옐로우", "누런색"],
    },
    ColorEntry {
        name: "회색",
        group: TokenGroup::Solid,
        keywords: &["회색", "회", "그레이", "그레이색"],
    },
    ColorEntry {
        name: "고등어무늬",
        group: TokenGroup::Pattern,
        keywords: &["고등어", "고등어색", "고등어태비"],
    },
    ColorEntry {
        name: "치즈무늬",
        group: TokenGroup::Pattern,
        keywords: &["치즈", "치즈색", "치즈태비"],
    },
    ColorEntry {
        name: "턱시도무늬",
        group: TokenGroup::Pattern,
        keywords: &["턱시도"],
    },
    ColorEntry {
        name: "태비무늬",
        group: TokenGroup::Pattern,
        keywords: &["태비"],
    },
    ColorEntry {
        name: "호피무늬",
        group: TokenGroup::Pattern,
        keywords: &["호피"],
    },
];

/// トークン名から種別を取得
pub fn token_group(token: &str) -> Option<TokenGroup> {
    COLOR_DICTIONARY
        .iter()
        .find(|e| e.name == token)
        .map(|e| e.group)
}

/// 地名が混入しているか判定
pub fn is_location_noise(text: &str) -> bool {
    lazy_static::lazy_static! {
        static ref NOISE_RE: Regex = Regex::new(r"(동|구|시|리|면|부근|길)").unwrap();
    }
    NOISE_RE.is_match(text)
}

/// 地名ノイズを `확인필요` に置換
pub fn filter_location_noise(text: &str) -> String {
    if is_location_noise(text) {
        NEEDS_REVIEW.to_string()
    } else {
        text.to_string()
    }
}

/// テキストから標準色トークンを抽出
pub fn extract_colors(text: &str) -> Vec<&'static str> {
    lazy_static::lazy_static! {
        static ref SPLIT_RE: Regex = Regex::new(r"[,/·\s]+").unwrap();
    }

    let lowered = text.to_lowercase();
    let mut found: Vec<&'static str> = Vec::new();

    for part in SPLIT_RE.split(&lowered).map(str::trim).filter(|p| !p.is_empty()) {
        for entry in COLOR_DICTIONARY {
            // 辞書のキーワードは小文字で保持
            let hit = entry.keywords.iter().any(|k| part.contains(k));
            if hit && !found.contains(&entry.name) {
                found.push(entry.name);
            }
        }
    }

    found
}

/// トークン列からカテゴリを決定
pub fn categorize(tokens: &[&str]) -> String {
    if tokens.is_empty() {
        return NEEDS_REVIEW.to_string();
    }

    let solids: Vec<&str> = tokens
        .iter()
        .copied()
        .filter(|t| token_group(t) == Some(TokenGroup::Solid))
        .collect();
    let patterns: Vec<&str> = tokens
        .iter()
        .copied()
        .filter(|t| token_group(t) == Some(TokenGroup::Pattern))
        .collect();

    // 柄を優先
    if let Some(pattern) = patterns.first() {
        return if tokens.len() == 1 {
            format!("무늬({})", pattern)
        } else {
            format!("무늬({})+조합", pattern)
        };
    }

    match solids.len() {
        0 => {
            let head: Vec<&str> = tokens.iter().copied().take(3).collect();
            format!("기타({})", head.join("+"))
        }
        1 => format!("단색({})", solids[0]),
        2 => format!("이색({})", solids.join("+")),
        _ => format!("삼색이상({})", solids[..3].join("+")),
    }
}

/// カテゴリから種別ラベル（括弧の前）を取得
pub fn color_type(category: &str) -> &str {
    category.split('(').next().unwrap_or(category)
}

/// 1値分の分類結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorClassification {
    /// ノイズ除去後の元テキスト
    pub filtered: Option<String>,
    pub tokens: Vec<&'static str>,
    pub category: String,
    pub color_type: String,
}

impl ColorClassification {
    /// `/` 区切りのトークン一覧（空なら `확인필요`）
    pub fn color_list(&self) -> String {
        if self.tokens.is_empty() {
            NEEDS_REVIEW.to_string()
        } else {
            self.tokens.join("/")
        }
    }
}

/// ノイズ除去からカテゴリ決定までを一括で行う
pub fn classify_color(text: Option<&str>) -> ColorClassification {
    let filtered = text.map(filter_location_noise);
    let tokens = filtered.as_deref().map(extract_colors).unwrap_or_default();
    let category = categorize(&tokens);
    let color_type = color_type(&category).to_string();

    ColorClassification {
        filtered,
        tokens,
        category,
        color_type,
    }
}
