//! 動物種別・処理状態・性別/中性化の変換
//!
//! 性別×中性化の判定は (条件, ラベル) の順序付きリストで表し、
//! 先頭から評価して最初に一致したものを採用する。

/// 動物種別
pub const DOG: &str = "개";
pub const CAT: &str = "고양이";
pub const OTHER_ANIMAL: &str = "기타";

/// 処理状態
pub const IN_CARE: &str = "보호중";
pub const CLOSED: &str = "종료";

/// 判定不能時のラベル
pub const NO_INFO: &str = "정보없음";

/// 品種コード（`kind_cd`）から動物種別を判定
pub fn animal_type(kind: Option<&str>) -> &'static str {
    match kind {
        Some(k) if k.contains(DOG) => DOG,
        Some(k) if k.contains(CAT) => CAT,
        _ => OTHER_ANIMAL,
    }
}

/// 処理状態を正規化する
///
/// `종료(입양)` → `입양`、`보호중` はそのまま。
pub fn normalize_process_state(state: &str) -> String {
    if state == IN_CARE {
        state.to_string()
    } else {
        state.replace("종료(", "").replace(')', "")
    }
}

/// 正規化済みの処理状態を 보호중 / 종료 に分類
pub fn process_category(state: Option<&str>) -> &'static str {
    match state {
        Some(IN_CARE) => IN_CARE,
        _ => CLOSED,
    }
}

/// 判定条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// 性別と中性化の両方が一致
    Both(&'static str, &'static str),
    /// どちらか一方が一致
    Either(&'static str, &'static str),
}

impl Condition {
    pub fn matches(&self, sex: Option<&str>, neuter: Option<&str>) -> bool {
        match *self {
            Condition::Both(s, n) => sex == Some(s) && neuter == Some(n),
            Condition::Either(s, n) => sex == Some(s) || neuter == Some(n),
        }
    }
}

/// 性別×中性化の判定表（上から順に評価）
pub const ANIMAL_STATUS_RULES: &[(Condition, &str)] = &[
    (Condition::Both("M", "Y"), "중성화된 수컷"),
    (Condition::Both("M", "N"), "중성화되지 않은 수컷"),
    (Condition::Both("F", "Y"), "중성화된 암컷"),
    (Condition::Both("F", "N"), "중성화되지 않은 암컷"),
    (Condition::Either("Q", "U"), "미상"),
];

/// 性別コード・中性化コードから状態ラベルを決定
pub fn animal_status(sex: Option<&str>, neuter: Option<&str>) -> &'static str {
    ANIMAL_STATUS_RULES
        .iter()
        .find(|(condition, _)| condition.matches(sex, neuter))
        .map(|(_, label)| *label)
        .unwrap_or(NO_INFO)
}

/// 性別コードの表示ラベル
pub fn sex_label(code: &str) -> Option<&'static str> {
    match code {
        "M" => Some("수컷"),
        "F" => Some("암컷"),
        "Q" => Some("미상"),
        _ => None,
    }
}

/// 中性化コードの表示ラベル
pub fn neuter_label(code: &str) -> Option<&'static str> {
    match code {
        "Y" => Some("중성화O"),
        "N" => Some("중성화X"),
        "U" => Some("미상"),
        _ => None,
    }
}
