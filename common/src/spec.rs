//! 속성 정의 테이블
//!
//! 설문 개정판마다 달라지는 질문 구성을 코드가 아닌 데이터로 둔다.
//! - 헤더 규칙: `(키워드, 표준 열 이름)`을 우선순위 순으로 나열
//! - 속성: 비교 방식·가중치·선택 여부·필수조건 별칭·본인/선호 열
//!
//! 기본값은 레이디 이어주기 설문(2.0)을 그대로 재현한다.
//! 다른 개정판은 `lady-match spec` 으로 JSON을 덤프해 수정한 뒤 `--spec` 으로 넘긴다.

use crate::error::{Error, Result};
use crate::parser::fold_key;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 속성 비교 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorKind {
    /// 본인 수치 ∩ 상대가 원하는 구간
    NumericRange,
    /// 본인 토큰과 상대 희망 토큰의 교집합
    TokenOverlap,
    /// 상대 선호 목록에 본인 값이 있거나 "상관없음"
    ExactOrWildcard,
    /// 거주 지역 + 희망 거리 조건 (단거리일 때만 같은 지역 요구)
    RegionDistance,
}

/// 헤더 키워드 규칙
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderRule {
    pub keyword: String,
    pub column: String,
}

impl HeaderRule {
    pub fn new(keyword: &str, column: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            column: column.to_string(),
        }
    }
}

/// 속성 하나의 정의
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: String,
    /// 결과 표에 쓰이는 표시 이름
    pub label: String,
    pub kind: ComparatorKind,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// 빈 선호를 와일드카드로 취급
    #[serde(default)]
    pub optional: bool,
    #[serde(default = "default_true")]
    pub mandatory_eligible: bool,
    #[serde(default)]
    pub mandatory_aliases: Vec<String>,
    pub self_column: String,
    pub pref_column: String,
}

fn default_weight() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_markers() -> Vec<String> {
    vec!["상관없음".into(), "상관 없음".into(), "무관".into()]
}

fn default_short_range() -> String {
    "단거리".into()
}

fn default_long_range() -> String {
    "장거리".into()
}

/// 전체 속성 정의 (실행 중에는 변하지 않는 설정)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeSpec {
    #[serde(default)]
    pub version: String,
    pub nickname_column: String,
    pub mandatory_column: String,
    #[serde(default = "default_markers")]
    pub wildcard_markers: Vec<String>,
    #[serde(default = "default_short_range")]
    pub short_range_token: String,
    #[serde(default = "default_long_range")]
    pub long_range_token: String,
    pub header_rules: Vec<HeaderRule>,
    pub attributes: Vec<AttributeDef>,
}

impl Default for AttributeSpec {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AttributeSpec {
    /// 내장 정의 (레이디 매칭 설문 2.0)
    pub fn builtin() -> Self {
        let choice = |name: &str, label: &str, optional: bool| AttributeDef {
            name: name.into(),
            label: label.into(),
            kind: ComparatorKind::ExactOrWildcard,
            weight: 1.0,
            optional,
            mandatory_eligible: true,
            mandatory_aliases: Vec::new(),
            self_column: format!("{}(레이디)", label),
            pref_column: format!("{}(상대방)", label),
        };

        let mut attributes = vec![
            AttributeDef {
                name: "age".into(),
                label: "나이".into(),
                kind: ComparatorKind::NumericRange,
                weight: 2.0,
                optional: false,
                mandatory_eligible: true,
                mandatory_aliases: Vec::new(),
                self_column: "레이디 나이".into(),
                pref_column: "선호하는 상대방 레이디 나이".into(),
            },
            AttributeDef {
                name: "height".into(),
                label: "키".into(),
                kind: ComparatorKind::NumericRange,
                weight: 1.0,
                optional: false,
                mandatory_eligible: true,
                mandatory_aliases: Vec::new(),
                self_column: "레이디 키".into(),
                pref_column: "상대방 레이디 키".into(),
            },
            AttributeDef {
                name: "distance".into(),
                label: "거리".into(),
                kind: ComparatorKind::RegionDistance,
                weight: 1.0,
                optional: false,
                mandatory_eligible: true,
                mandatory_aliases: vec!["지역".into()],
                self_column: "레이디의 거주 지역".into(),
                pref_column: "희망하는 거리 조건".into(),
            },
        ];

        attributes.push(choice("smoking", "흡연", false));
        attributes.push(choice("drinking", "음주", false));
        attributes.push(choice("tattoo", "타투", false));
        attributes.push(choice("closet", "벽장", false));
        let mut queer = choice("queer_friends", "퀴어 지인 多", false);
        queer.mandatory_aliases = vec!["퀴어 지인".into()];
        attributes.push(queer);
        attributes.push(choice("contact_term", "연락 텀", true));
        attributes.push(choice("hair_length", "머리 길이", true));
        let mut date = choice("date_frequency", "데이트 선호 주기", true);
        date.mandatory_aliases = vec!["데이트 주기".into()];
        attributes.push(date);
        attributes.push(choice("personality", "성격", false));
        attributes.push(AttributeDef {
            name: "playfulness".into(),
            label: "앙큼 레벨".into(),
            kind: ComparatorKind::TokenOverlap,
            weight: 1.0,
            optional: false,
            mandatory_eligible: true,
            mandatory_aliases: vec!["양금 레벨".into(), "앙큼".into()],
            self_column: "양금 레벨".into(),
            pref_column: "희망 양금 레벨".into(),
        });

        // 포함 관계가 있는 키워드는 긴 쪽을 먼저 둔다
        let mut header_rules = vec![
            HeaderRule::new("닉네임", "닉네임"),
            HeaderRule::new("꼭 맞아야", "꼭 맞아야 조건들"),
            HeaderRule::new("상대방 레이디 나이", "선호하는 상대방 레이디 나이"),
            HeaderRule::new("레이디 나이", "레이디 나이"),
            HeaderRule::new("상대방 레이디 키", "상대방 레이디 키"),
            HeaderRule::new("레이디 키", "레이디 키"),
            HeaderRule::new("거주 지역", "레이디의 거주 지역"),
            HeaderRule::new("거리 조건", "희망하는 거리 조건"),
        ];
        for label in ["흡연", "음주", "타투", "벽장", "퀴어 지인 多", "연락 텀", "머리 길이", "성격"] {
            let pref = format!("{}(상대방)", label);
            let own = format!("{}(레이디)", label);
            header_rules.push(HeaderRule::new(&pref, &pref));
            header_rules.push(HeaderRule::new(&own, &own));
        }
        header_rules.extend([
            HeaderRule::new("데이트 선호 주기(상대방)", "데이트 선호 주기(상대방)"),
            HeaderRule::new("데이트 선호 주기", "데이트 선호 주기(레이디)"),
            HeaderRule::new("희망 양금 레벨", "희망 양금 레벨"),
            HeaderRule::new("희망 앙큼 레벨", "희망 양금 레벨"),
            HeaderRule::new("양금 레벨", "양금 레벨"),
            HeaderRule::new("앙큼 레벨", "양금 레벨"),
        ]);

        Self {
            version: "2.0".into(),
            nickname_column: "닉네임".into(),
            mandatory_column: "꼭 맞아야 조건들".into(),
            wildcard_markers: default_markers(),
            short_range_token: default_short_range(),
            long_range_token: default_long_range(),
            header_rules,
            attributes,
        }
    }

    /// JSON 파일에서 읽기
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON 문자열에서 읽기 (검증 포함)
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 정의의 구조적 일관성 검사
    pub fn validate(&self) -> Result<()> {
        if self.nickname_column.trim().is_empty() {
            return Err(Error::Spec("닉네임 열 이름이 비어 있습니다".into()));
        }
        if self.wildcard_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(Error::Spec("와일드카드 표시가 하나 이상 필요합니다".into()));
        }

        let mut names = HashSet::new();
        for attr in &self.attributes {
            if !names.insert(attr.name.as_str()) {
                return Err(Error::Spec(format!("속성 이름 중복: {}", attr.name)));
            }
            if !attr.weight.is_finite() || attr.weight <= 0.0 {
                return Err(Error::Spec(format!(
                    "가중치는 0보다 커야 합니다: {} = {}",
                    attr.name, attr.weight
                )));
            }
        }

        let columns = self.columns();
        for rule in &self.header_rules {
            if rule.keyword.trim().is_empty() {
                return Err(Error::Spec(format!("빈 키워드 규칙: {}", rule.column)));
            }
            if !columns.contains(&rule.column.as_str()) {
                return Err(Error::Spec(format!(
                    "알 수 없는 열을 가리키는 규칙: {} → {}",
                    rule.keyword, rule.column
                )));
            }
        }

        Ok(())
    }

    /// 정의가 기대하는 모든 표준 열 (닉네임, 필수조건, 속성별 본인/선호)
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = vec![self.nickname_column.as_str(), self.mandatory_column.as_str()];
        for attr in &self.attributes {
            for column in [attr.self_column.as_str(), attr.pref_column.as_str()] {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        columns
    }

    /// 열이 없을 때 채울 기본 셀 값
    ///
    /// 숫자 속성과 거주 지역은 빈 값(일치 불가), 나머지는 "상관없음".
    pub fn default_cell(&self, column: &str) -> String {
        let blank = self.attributes.iter().any(|attr| match attr.kind {
            ComparatorKind::NumericRange => attr.self_column == column || attr.pref_column == column,
            ComparatorKind::RegionDistance => attr.self_column == column,
            _ => false,
        });
        if blank || column == self.mandatory_column || column == self.nickname_column {
            String::new()
        } else {
            self.wildcard_markers.first().cloned().unwrap_or_default()
        }
    }

    /// 필수조건 이름을 속성 인덱스로 해석 (이름·표시 이름·별칭, 공백 무시)
    pub fn find_mandatory(&self, condition: &str) -> Option<usize> {
        let key = fold_key(condition);
        if key.is_empty() {
            return None;
        }
        self.attributes.iter().position(|attr| {
            attr.mandatory_eligible
                && (fold_key(&attr.name) == key
                    || fold_key(&attr.label) == key
                    || attr.mandatory_aliases.iter().any(|a| fold_key(a) == key))
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// 희망 거리 조건이 "단거리만"인지 판정
    pub fn is_short_range_only(&self, distance_pref: &str) -> bool {
        let text = fold_key(distance_pref);
        text.contains(&fold_key(&self.short_range_token))
            && !text.contains(&fold_key(&self.long_range_token))
    }
}
