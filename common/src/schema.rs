//! 스키마 정규화 모듈
//!
//! 설문 개정판마다 제각각인 열 제목을 표준 열 이름으로 맞추고,
//! 각 셀을 한 번만 파싱해 프로필로 만든다.
//!
//! ## 처리 흐름
//! 1. 헤더 정리 (공백·줄바꿈·따옴표 제거, 연속 공백 축약)
//! 2. 모든 셀이 빈 열은 제외
//! 3. 키워드 규칙을 순서대로 적용 (첫 번째로 포함되는 키워드가 승리)
//! 4. 같은 표준 열로 해석된 헤더가 여럿이면 첫 번째만 유지
//! 5. 없는 열은 기본값(상관없음 / 빈 값)으로 채움
//! 6. 닉네임 공란·중복 행 제거 후 프로필 생성

use crate::error::{Error, Result};
use crate::parser::{fold_key, split_choices, NumericSet, Preference, TokenSet, TraitValue};
use crate::spec::{AttributeSpec, ComparatorKind, HeaderRule};
use crate::table::RawTable;
use crate::types::{AttributeValue, Profile};
use std::collections::{BTreeMap, HashSet};

/// 원본 헤더 → 표준 열 매핑 한 건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub raw: String,
    pub column: String,
}

/// 정규화 보고서
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// 표준 열로 매핑된 헤더
    pub mapped: Vec<ColumnMapping>,
    /// 이미 매핑된 표준 열과 겹쳐 버려진 헤더
    pub dropped_duplicates: Vec<String>,
    /// 어떤 규칙에도 걸리지 않은 헤더
    pub unresolved: Vec<String>,
    /// 기본값으로 채운 표준 열
    pub synthesized: Vec<String>,
    /// 모든 셀이 비어 제외된 헤더
    pub ignored_empty: Vec<String>,
    /// 닉네임이 비어 버린 행 수
    pub skipped_blank_rows: usize,
    /// 중복으로 버린 닉네임 (첫 번째 응답만 유지)
    pub duplicate_nicknames: Vec<String>,
}

/// 정규화 결과
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub profiles: Vec<Profile>,
    pub report: NormalizationReport,
}

/// 헤더 문자열 정리
pub fn clean_header(raw: &str) -> String {
    let trimmed = raw
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”'))
        .trim();
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 키워드 규칙을 순서대로 적용해 첫 번째 일치 규칙을 반환
pub fn resolve_header<'a>(header: &str, rules: &'a [HeaderRule]) -> Option<&'a HeaderRule> {
    let key = fold_key(header);
    if key.is_empty() {
        return None;
    }
    rules.iter().find(|rule| {
        let keyword = fold_key(&rule.keyword);
        !keyword.is_empty() && key.contains(&keyword)
    })
}

/// 헤더를 표준 열 위치로 매핑
///
/// # Returns
/// 표준 열 이름 → 원본 열 인덱스, 그리고 보고서(열 부분만 채워짐)
pub fn map_columns(
    spec: &AttributeSpec,
    table: &RawTable,
) -> (BTreeMap<String, usize>, NormalizationReport) {
    let mut report = NormalizationReport::default();
    let mut columns: BTreeMap<String, usize> = BTreeMap::new();
    let skip_blank = !table.is_empty();

    for (index, raw) in table.headers().iter().enumerate() {
        let header = clean_header(raw);
        let rule = resolve_header(&header, &spec.header_rules);

        // 닉네임 열은 비어 있어도 유지 (행 단위로 버린다)
        let is_nickname = rule.is_some_and(|r| r.column == spec.nickname_column);
        if skip_blank && !is_nickname && table.column_is_blank(index) {
            report.ignored_empty.push(header);
            continue;
        }

        match rule {
            Some(rule) if columns.contains_key(&rule.column) => {
                tracing::warn!(header = %header, column = %rule.column, "중복 열 제외");
                report.dropped_duplicates.push(header);
            }
            Some(rule) => {
                columns.insert(rule.column.clone(), index);
                report.mapped.push(ColumnMapping {
                    raw: header,
                    column: rule.column.clone(),
                });
            }
            None => report.unresolved.push(header),
        }
    }

    for column in spec.columns() {
        if column != spec.nickname_column && !columns.contains_key(column) {
            report.synthesized.push(column.to_string());
        }
    }

    (columns, report)
}

/// 원본 표를 프로필 목록으로 정규화
///
/// 닉네임 열을 찾지 못하면 분석 자체가 불가능하므로 에러를 반환한다.
/// 그 외의 문제(빈 셀, 없는 열, 해석 불가 값)는 모두 기본값으로 흡수한다.
pub fn normalize(spec: &AttributeSpec, table: &RawTable) -> Result<NormalizedTable> {
    let (columns, mut report) = map_columns(spec, table);

    let nickname_index = match columns.get(&spec.nickname_column) {
        Some(&index) => index,
        None => {
            return Err(Error::MissingNickname {
                headers: table.headers().iter().map(|h| clean_header(h)).collect(),
            })
        }
    };

    let cell = |row: &[String], column: &str| -> String {
        match columns.get(column) {
            Some(&index) => row.get(index).cloned().unwrap_or_default(),
            None => spec.default_cell(column),
        }
    };

    let mut profiles = Vec::with_capacity(table.len());
    let mut seen: HashSet<String> = HashSet::new();

    for row in table.rows() {
        let nickname = row
            .get(nickname_index)
            .map(|n| n.trim().to_string())
            .unwrap_or_default();

        if nickname.is_empty() {
            report.skipped_blank_rows += 1;
            continue;
        }
        if !seen.insert(nickname.clone()) {
            tracing::warn!(nickname = %nickname, "중복 닉네임 제외 (첫 응답 유지)");
            report.duplicate_nicknames.push(nickname);
            continue;
        }

        let values = spec
            .attributes
            .iter()
            .map(|attr| {
                let own = cell(row, &attr.self_column);
                let wanted = cell(row, &attr.pref_column);
                parse_attribute(spec, attr.kind, &own, &wanted)
            })
            .collect();

        profiles.push(Profile {
            nickname,
            values,
            mandatory: split_choices(&cell(row, &spec.mandatory_column)),
        });
    }

    tracing::info!(
        profiles = profiles.len(),
        mapped = report.mapped.len(),
        synthesized = report.synthesized.len(),
        unresolved = report.unresolved.len(),
        "정규화 완료"
    );
    tracing::debug!(?report, "정규화 보고서");

    Ok(NormalizedTable { profiles, report })
}

fn parse_attribute(spec: &AttributeSpec, kind: ComparatorKind, own: &str, wanted: &str) -> AttributeValue {
    let markers = &spec.wildcard_markers;
    match kind {
        ComparatorKind::NumericRange => AttributeValue::Numeric {
            own: NumericSet::parse(own),
            wanted: NumericSet::parse(wanted),
        },
        ComparatorKind::TokenOverlap => AttributeValue::Tokens {
            own: TokenSet::parse(own),
            wanted: Preference::parse_tokens(wanted, markers),
        },
        ComparatorKind::ExactOrWildcard => AttributeValue::Choice {
            own: TraitValue::parse(own),
            wanted: Preference::parse(wanted, markers),
        },
        ComparatorKind::RegionDistance => AttributeValue::Region {
            region: own.split_whitespace().collect::<Vec<_>>().join(" "),
            short_range_only: spec.is_short_range_only(wanted),
        },
    }
}
