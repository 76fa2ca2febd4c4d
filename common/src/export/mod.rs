//! 결과 내보내기 코어 (바이트 버퍼 생성까지만, 파일 쓰기는 CLI 쪽)

pub mod csv_core;

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::types::PairResult;

/// 결과 표의 열 제목 (필수조건 열 제외)
pub const RESULT_HEADERS: [&str; 7] = [
    "A 닉네임",
    "B 닉네임",
    "매칭 점수",
    "총 점수",
    "비율(%)",
    "요약",
    "일치 조건들",
];

/// 필수조건 결과를 함께 내보낼 때 붙는 열 제목
pub const MANDATORY_HEADERS: [&str; 2] = ["필수조건", "제외 사유"];

/// 필수조건 실패 행이 섞여 있는지
pub fn has_failed_rows(results: &[PairResult]) -> bool {
    results.iter().any(|r| !r.mandatory_ok)
}

/// 필수조건 통과 여부 표시 문자열
pub fn mandatory_label(result: &PairResult) -> &'static str {
    if result.mandatory_ok {
        "통과"
    } else {
        "불충족"
    }
}
