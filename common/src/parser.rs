//! 응답 값 파서
//!
//! 자유 입력 셀 문자열을 비교 가능한 값으로 바꾼다.
//! - 숫자 점/구간의 합집합 (`24`, `20~30`, `180 이상`, `25, 30~35`)
//! - 토큰 집합 (쉼표·슬래시·공백 구분)
//! - 와일드카드(상관없음)를 인식하는 선호 목록
//!
//! 모든 파서는 실패하지 않는다. 해석할 수 없는 입력은
//! "일치 불가"를 뜻하는 빈 값으로 떨어진다.

use regex::Regex;
use std::fmt;

/// 비교용 키: 소문자화 + 모든 공백 제거
pub fn fold_key(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// 닫힌 구간 `[low, high]` (한쪽이 무한대일 수 있음)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self { low: high, high: low }
        }
    }

    pub fn point(value: f64) -> Self {
        Self { low: value, high: value }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    pub fn intersects(&self, other: &Interval) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            return write!(f, "{}", self.low);
        }
        let low = if self.low.is_infinite() { String::new() } else { self.low.to_string() };
        let high = if self.high.is_infinite() { String::new() } else { self.high.to_string() };
        write!(f, "{}~{}", low, high)
    }
}

/// 구간들의 합집합. 비어 있으면 어떤 값과도 일치하지 않는다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericSet {
    intervals: Vec<Interval>,
}

impl NumericSet {
    pub fn from_intervals(intervals: Vec<Interval>) -> Self {
        Self { intervals }
    }

    /// 숫자/구간 텍스트를 파싱
    ///
    /// 쉼표(또는 슬래시)로 나뉜 각 토큰을 하나의 구간으로 읽는다.
    /// `"N세 이상"` → `[N, ∞)`, `"N세 이하"` → `(-∞, N]`.
    /// 숫자가 하나도 없는 토큰은 버린다.
    pub fn parse(text: &str) -> Self {
        let normalized: String = text
            .chars()
            .map(|c| match c {
                '～' | '〜' => '~',
                // 전각 숫자 → ASCII
                '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
                _ => c,
            })
            .collect();
        let intervals = normalized
            .split([',', '/', '，'])
            .filter_map(parse_interval_token)
            .collect();
        Self { intervals }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.intervals.iter().any(|interval| interval.contains(value))
    }

    /// 두 합집합의 교집합이 비어 있지 않은지 확인
    pub fn intersects(&self, other: &NumericSet) -> bool {
        self.intervals
            .iter()
            .any(|a| other.intervals.iter().any(|b| a.intersects(b)))
    }
}

impl fmt::Display for NumericSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.intervals.is_empty() {
            return write!(f, "-");
        }
        let parts: Vec<String> = self.intervals.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join(", "))
    }
}

fn parse_interval_token(token: &str) -> Option<Interval> {
    lazy_static::lazy_static! {
        static ref NUMBER_RE: Regex = Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap();
        // 숫자 사이의 하이픈은 구간 구분자로 본다 (20-30)
        static ref DASH_RANGE_RE: Regex =
            Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*-\s*([0-9]+(?:\.[0-9]+)?)").unwrap();
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let first_number = |text: &str| -> Option<f64> {
        NUMBER_RE.find(text).and_then(|m| m.as_str().parse::<f64>().ok())
    };

    if token.contains("이상") {
        return first_number(token).map(|n| Interval::new(n, f64::INFINITY));
    }
    if token.contains("이하") {
        return first_number(token).map(|n| Interval::new(f64::NEG_INFINITY, n));
    }

    if let Some((left, right)) = token.split_once('~') {
        let low = first_number(left);
        let high = first_number(right);
        return match (low, high) {
            (None, None) => None,
            (low, high) => Some(Interval::new(
                low.unwrap_or(f64::NEG_INFINITY),
                high.unwrap_or(f64::INFINITY),
            )),
        };
    }

    if let Some(caps) = DASH_RANGE_RE.captures(token) {
        let low = caps[1].parse::<f64>().ok()?;
        let high = caps[2].parse::<f64>().ok()?;
        return Some(Interval::new(low, high));
    }

    first_number(token).map(Interval::point)
}

/// 쉼표·슬래시로 선택지를 나눈다 (다단어 선택지는 유지)
pub fn split_choices(text: &str) -> Vec<String> {
    dedup_tokens(text.split([',', '/', '，']))
}

fn dedup_tokens<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for part in parts {
        let token = part.split_whitespace().collect::<Vec<_>>().join(" ");
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// 쉼표·슬래시·공백으로 나눈 토큰 집합 (등장 순서 유지, 중복 없음)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    pub fn parse(text: &str) -> Self {
        Self {
            tokens: dedup_tokens(text.split(|c: char| c == ',' || c == '/' || c == '，' || c.is_whitespace())),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        let key = fold_key(token);
        self.tokens.iter().any(|t| fold_key(t) == key)
    }

    pub fn overlaps(&self, other: &TokenSet) -> bool {
        self.tokens.iter().any(|t| other.contains(t))
    }
}

/// 응답자 본인의 특성 값 (원문 + 선택지 토큰)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraitValue {
    raw: String,
    tokens: Vec<String>,
}

impl TraitValue {
    pub fn parse(text: &str) -> Self {
        Self {
            raw: text.split_whitespace().collect::<Vec<_>>().join(" "),
            tokens: split_choices(text),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_blank(&self) -> bool {
        self.raw.is_empty()
    }
}

/// 상대에 대한 선호 (와일드카드 인식)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preference {
    choices: Vec<String>,
    wildcard: bool,
}

impl Preference {
    /// 선택지 목록으로 파싱 (쉼표·슬래시 구분)
    pub fn parse(text: &str, wildcard_markers: &[String]) -> Self {
        Self::from_tokens(split_choices(text), wildcard_markers)
    }

    /// 토큰 목록으로 파싱 (쉼표·슬래시·공백 구분)
    ///
    /// 와일드카드 표시는 공백으로 나누기 전에 선택지 단위로 확인한다 (`상관 없음`).
    pub fn parse_tokens(text: &str, wildcard_markers: &[String]) -> Self {
        let markers: Vec<String> = wildcard_markers.iter().map(|m| fold_key(m)).collect();
        let mut tokens: Vec<String> = Vec::new();
        for choice in split_choices(text) {
            let parts: Vec<String> = if markers.contains(&fold_key(&choice)) {
                vec![choice]
            } else {
                choice.split_whitespace().map(str::to_string).collect()
            };
            for part in parts {
                if !tokens.contains(&part) {
                    tokens.push(part);
                }
            }
        }
        Self::from_tokens(tokens, wildcard_markers)
    }

    fn from_tokens(tokens: Vec<String>, wildcard_markers: &[String]) -> Self {
        let markers: Vec<String> = wildcard_markers.iter().map(|m| fold_key(m)).collect();
        let mut wildcard = false;
        let mut choices = Vec::with_capacity(tokens.len());
        for token in tokens {
            if markers.contains(&fold_key(&token)) {
                wildcard = true;
            } else {
                choices.push(token);
            }
        }
        Self { choices, wildcard }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// 아무것도 적지 않은 선호
    pub fn is_unspecified(&self) -> bool {
        !self.wildcard && self.choices.is_empty()
    }

    fn has_choice(&self, value: &str) -> bool {
        let key = fold_key(value);
        !key.is_empty() && self.choices.iter().any(|c| fold_key(c) == key)
    }

    /// 상대 특성이 이 선호를 만족하는지 판정
    ///
    /// # Arguments
    /// * `value` - 상대의 특성 값
    /// * `optional` - 선택 속성 여부 (빈 선호를 와일드카드로 취급)
    pub fn accepts(&self, value: &TraitValue, optional: bool) -> bool {
        if self.is_unspecified() {
            return optional;
        }
        if value.is_blank() {
            return self.wildcard && optional;
        }
        if self.wildcard {
            return true;
        }
        self.has_choice(value.raw()) || value.tokens().iter().any(|t| self.has_choice(t))
    }

    /// 상대 토큰 집합과 하나라도 겹치는지 판정
    pub fn overlaps(&self, value: &TokenSet, optional: bool) -> bool {
        if self.is_unspecified() {
            return optional;
        }
        if value.is_empty() {
            return self.wildcard && optional;
        }
        self.wildcard || value.tokens().iter().any(|t| self.has_choice(t))
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.wildcard, self.choices.is_empty()) {
            (true, true) => write!(f, "*"),
            (true, false) => write!(f, "*, {}", self.choices.join(", ")),
            (false, true) => write!(f, "-"),
            (false, false) => write!(f, "{}", self.choices.join(", ")),
        }
    }
}
