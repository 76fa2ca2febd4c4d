//! 에러 타입 정의

use thiserror::Error;

/// 공통 에러 타입
///
/// 분석 전체를 중단시키는 구조적 문제만 여기에 해당한다.
/// 셀 단위 파싱 실패나 필수조건 불충족은 에러가 아니라 결과 데이터로 표현된다.
#[derive(Error, Debug)]
pub enum Error {
    #[error("닉네임 열을 찾을 수 없습니다 (헤더: {})", .headers.join(" | "))]
    MissingNickname { headers: Vec<String> },

    #[error("입력 데이터가 비어 있습니다")]
    EmptyTable,

    #[error("표 데이터 파싱 오류: {0}")]
    Table(String),

    #[error("속성 정의 오류: {0}")]
    Spec(String),

    #[error("내보내기 오류: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;
