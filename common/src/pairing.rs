//! 쌍 열거 및 결과 조립
//!
//! 모든 응답자 쌍을 한 번씩만 평가한다.
//! 닉네임을 사전순으로 정렬한 키로 중복(A↔B / B↔A)을 막는다.

use crate::constraint::evaluate_pair;
use crate::error::Result;
use crate::schema::{normalize, NormalizationReport};
use crate::scoring::score_pair;
use crate::spec::AttributeSpec;
use crate::table::RawTable;
use crate::types::{PairResult, Profile};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// 필수조건을 통과하지 못한 쌍의 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatoryPolicy {
    /// 점수 0과 사유를 담아 결과에 남긴다
    #[default]
    Emit,
    /// 결과에서 뺀다
    Drop,
}

impl std::str::FromStr for MandatoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "emit" | "show" | "keep" => Ok(MandatoryPolicy::Emit),
            "drop" | "hide" => Ok(MandatoryPolicy::Drop),
            _ => Err(format!("Unknown policy: {}. Use emit or drop", s)),
        }
    }
}

impl std::fmt::Display for MandatoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MandatoryPolicy::Emit => write!(f, "emit"),
            MandatoryPolicy::Drop => write!(f, "drop"),
        }
    }
}

/// 매칭 옵션
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    pub policy: MandatoryPolicy,
}

/// 분석 전체 결과
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: NormalizationReport,
    pub profiles: Vec<Profile>,
    pub results: Vec<PairResult>,
}

/// 프로필 목록에서 모든 쌍의 결과를 만든다 (정렬 포함)
pub fn match_profiles(
    spec: &AttributeSpec,
    profiles: &[Profile],
    options: &MatchOptions,
) -> Vec<PairResult> {
    let mut seen: BTreeSet<(String, String)> = BTreeSet::new();
    let mut results = Vec::new();

    for (i, first) in profiles.iter().enumerate() {
        for (j, second) in profiles.iter().enumerate() {
            if i == j {
                continue;
            }

            let (a, b) = if first.nickname <= second.nickname {
                (first, second)
            } else {
                (second, first)
            };
            if !seen.insert((a.nickname.clone(), b.nickname.clone())) {
                continue;
            }

            let check = evaluate_pair(spec, a, b);
            if !check.admissible() {
                tracing::debug!(a = %a.nickname, b = %b.nickname, "필수조건 불충족");
                if options.policy == MandatoryPolicy::Emit {
                    results.push(PairResult {
                        nickname_a: a.nickname.clone(),
                        nickname_b: b.nickname.clone(),
                        mandatory_ok: false,
                        failure_reason: check.failure_reason(&a.nickname, &b.nickname),
                        score: 0.0,
                        total: 0.0,
                        percent: 0.0,
                        matched_labels: Vec::new(),
                        age_match: false,
                        distance_match: false,
                    });
                }
                continue;
            }

            let card = score_pair(spec, a, b);
            results.push(PairResult {
                nickname_a: a.nickname.clone(),
                nickname_b: b.nickname.clone(),
                mandatory_ok: true,
                failure_reason: None,
                score: card.score,
                total: card.total,
                percent: card.percent(),
                matched_labels: card.matched_labels,
                age_match: card.age_match,
                distance_match: card.distance_match,
            });
        }
    }

    sort_results(&mut results);
    results
}

/// 점수 내림차순 정렬 (동점은 비율 → 필수조건 → 나이 → 거리 → 닉네임)
pub fn sort_results(results: &mut [PairResult]) {
    results.sort_by(compare_results);
}

fn compare_results(x: &PairResult, y: &PairResult) -> Ordering {
    y.score
        .total_cmp(&x.score)
        .then_with(|| y.percent.total_cmp(&x.percent))
        .then_with(|| y.mandatory_ok.cmp(&x.mandatory_ok))
        .then_with(|| y.age_match.cmp(&x.age_match))
        .then_with(|| y.distance_match.cmp(&x.distance_match))
        .then_with(|| x.pair_key().cmp(&y.pair_key()))
}

/// 원본 표 → 정규화 → 쌍 매칭
pub fn analyze(
    spec: &AttributeSpec,
    table: &RawTable,
    options: &MatchOptions,
) -> Result<AnalysisOutcome> {
    let normalized = normalize(spec, table)?;
    let results = match_profiles(spec, &normalized.profiles, options);

    tracing::info!(
        profiles = normalized.profiles.len(),
        pairs = results.len(),
        admissible = results.iter().filter(|r| r.mandatory_ok).count(),
        "매칭 완료"
    );

    Ok(AnalysisOutcome {
        report: normalized.report,
        profiles: normalized.profiles,
        results,
    })
}
