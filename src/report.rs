//! 터미널 출력
//!
//! 결과 표와 정규화 보고서를 문자열로 만든다. 출력은 호출하는 쪽(main)이 한다.

use lady_match_common::{AttributeSpec, NormalizationReport, PairResult, Profile};
use std::fmt::Write;

/// 결과가 없을 때 안내 문구
pub const NO_MATCH_MESSAGE: &str = "조건을 만족하는 쌍이 없습니다";

/// 결과 표
///
/// # Arguments
/// * `results` - 정렬된 매칭 결과
/// * `top` - 상위 N개만 (None이면 전부)
pub fn format_results_table(results: &[PairResult], top: Option<usize>) -> String {
    if !results.iter().any(|r| r.mandatory_ok) {
        return format!("{}\n", NO_MATCH_MESSAGE);
    }

    let limit = top.unwrap_or(results.len()).min(results.len());
    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<12} {:<12} {:<16} 일치 조건들", "순위", "A", "B", "점수");

    for (rank, result) in results.iter().take(limit).enumerate() {
        let detail = if result.mandatory_ok {
            result.matched_summary()
        } else {
            format!("✖ {}", result.failure_reason.as_deref().unwrap_or("필수조건 불충족"))
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<12} {:<12} {:<16} {}",
            rank + 1,
            result.nickname_a,
            result.nickname_b,
            result.summary(),
            detail
        );
    }

    if limit < results.len() {
        let _ = writeln!(out, "... 외 {}쌍", results.len() - limit);
    }
    out
}

/// 헤더 매핑 보고서
pub fn format_normalization_report(report: &NormalizationReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "열 매핑 ({}개):", report.mapped.len());
    for mapping in &report.mapped {
        let _ = writeln!(out, "  {} → {}", mapping.raw, mapping.column);
    }

    let sections: [(&str, &[String]); 5] = [
        ("중복으로 무시한 열", &report.dropped_duplicates),
        ("해석하지 못한 열", &report.unresolved),
        ("기본값으로 채운 열", &report.synthesized),
        ("비어 있어 제외한 열", &report.ignored_empty),
        ("중복 닉네임 (첫 응답만 사용)", &report.duplicate_nicknames),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{} ({}개):", title, items.len());
        for item in items {
            let _ = writeln!(out, "  - {}", item);
        }
    }

    if report.skipped_blank_rows > 0 {
        let _ = writeln!(out, "닉네임이 비어 제외한 행: {}개", report.skipped_blank_rows);
    }
    out
}

/// 파싱된 프로필 목록 (입력 데이터 확인용)
pub fn format_profiles(spec: &AttributeSpec, profiles: &[Profile]) -> String {
    let mut out = String::new();
    for profile in profiles {
        let _ = writeln!(out, "■ {}", profile.nickname);
        for (attr, value) in spec.attributes.iter().zip(&profile.values) {
            let _ = writeln!(out, "  {:<12} {}", attr.label, value);
        }
        if !profile.mandatory.is_empty() {
            let _ = writeln!(out, "  {:<12} {}", "필수조건", profile.mandatory.join(", "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lady_match_common::schema::ColumnMapping;

    fn result(a: &str, b: &str, score: f64, mandatory_ok: bool) -> PairResult {
        PairResult {
            nickname_a: a.into(),
            nickname_b: b.into(),
            mandatory_ok,
            failure_reason: (!mandatory_ok).then(|| format!("{} 필수조건 불충족: 거리", a)),
            score,
            total: if mandatory_ok { 9.0 } else { 0.0 },
            percent: if mandatory_ok { 77.8 } else { 0.0 },
            matched_labels: vec!["A 나이".into()],
            age_match: false,
            distance_match: mandatory_ok,
        }
    }

    #[test]
    fn test_empty_results_message() {
        assert_eq!(format_results_table(&[], None), format!("{}\n", NO_MATCH_MESSAGE));
    }

    #[test]
    fn test_only_failed_results_message() {
        let results = vec![result("가람", "나래", 0.0, false)];
        assert!(format_results_table(&results, None).contains(NO_MATCH_MESSAGE));
    }

    #[test]
    fn test_results_table_top() {
        let results = vec![
            result("가람", "나래", 7.0, true),
            result("가람", "다온", 5.0, true),
            result("나래", "다온", 0.0, false),
        ];
        let table = format_results_table(&results, Some(2));
        assert!(table.contains("7/9 (77.8%)"));
        assert!(!table.contains("불충족"));
        assert!(table.contains("... 외 1쌍"));

        let full = format_results_table(&results, None);
        assert!(full.contains("✖ 나래 필수조건 불충족: 거리"));
    }

    #[test]
    fn test_normalization_report_sections() {
        let report = NormalizationReport {
            mapped: vec![ColumnMapping { raw: "닉네임 ".into(), column: "닉네임".into() }],
            unresolved: vec!["타임스탬프".into()],
            skipped_blank_rows: 2,
            ..Default::default()
        };
        let text = format_normalization_report(&report);
        assert!(text.contains("닉네임  → 닉네임"));
        assert!(text.contains("해석하지 못한 열 (1개):"));
        assert!(!text.contains("기본값으로 채운 열"));
        assert!(text.contains("닉네임이 비어 제외한 행: 2개"));
    }
}
