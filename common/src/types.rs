//! 매칭 엔진의 데이터 타입
//!
//! - Profile: 정규화·파싱이 끝난 응답자 한 명
//! - AttributeValue: 속성별 본인 값 + 선호 값 (한 번만 파싱해 보관)
//! - PairResult: 한 쌍의 최종 결과 (출력 계약)

use crate::parser::{NumericSet, Preference, TokenSet, TraitValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 속성 하나의 파싱된 값
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Numeric { own: NumericSet, wanted: NumericSet },
    Tokens { own: TokenSet, wanted: Preference },
    Choice { own: TraitValue, wanted: Preference },
    Region { region: String, short_range_only: bool },
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Numeric { own, wanted } => write!(f, "{} / 희망 {}", own, wanted),
            AttributeValue::Tokens { own, wanted } => {
                let own = if own.is_empty() { "-".to_string() } else { own.tokens().join(", ") };
                write!(f, "{} / 희망 {}", own, wanted)
            }
            AttributeValue::Choice { own, wanted } => {
                let own = if own.is_blank() { "-" } else { own.raw() };
                write!(f, "{} / 희망 {}", own, wanted)
            }
            AttributeValue::Region { region, short_range_only } => {
                let region = if region.is_empty() { "-" } else { region.as_str() };
                write!(f, "{}{}", region, if *short_range_only { " (단거리)" } else { "" })
            }
        }
    }
}

/// 정규화된 응답자 프로필
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub nickname: String,
    /// 속성 정의 순서와 같은 순서
    pub values: Vec<AttributeValue>,
    /// 꼭 맞아야 하는 조건 이름 (순서 유지, 중복 없음)
    pub mandatory: Vec<String>,
}

impl Profile {
    pub fn value(&self, index: usize) -> Option<&AttributeValue> {
        self.values.get(index)
    }
}

/// 한 쌍의 매칭 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub nickname_a: String,
    pub nickname_b: String,
    pub mandatory_ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub score: f64,
    pub total: f64,
    pub percent: f64,
    pub matched_labels: Vec<String>,
    #[serde(default)]
    pub age_match: bool,
    #[serde(default)]
    pub distance_match: bool,
}

impl PairResult {
    /// `"점수/총점 (비율%)"`
    pub fn summary(&self) -> String {
        format!(
            "{}/{} ({}%)",
            format_number(self.score),
            format_number(self.total),
            self.percent
        )
    }

    /// 일치 조건들을 쉼표로 연결
    pub fn matched_summary(&self) -> String {
        self.matched_labels.join(", ")
    }

    pub fn pair_key(&self) -> (&str, &str) {
        (&self.nickname_a, &self.nickname_b)
    }
}

/// 정수면 소수점 없이 표시
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// 비율 계산 (소수 첫째 자리 반올림, 총점 0이면 0.0)
pub fn percent_of(score: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    (score / total * 1000.0).round() / 10.0
}
